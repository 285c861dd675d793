use iced::widget::{button, container, scrollable, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Shadow};

use crate::media::{
    row_id, Message, Movie, Page, RowSection, ScrollDirection, SURFACE_DARK_GRAY, TEXT_GRAY,
    TEXT_WHITE,
};
use crate::tmdb::ImageSize;
use crate::Streamix;

const ICON_FILM: char = '\u{F3A9}';
const ICON_CHEVRON_LEFT: char = '\u{F284}';
const ICON_CHEVRON_RIGHT: char = '\u{F285}';

pub const CARD_WIDTH: f32 = 150.0;
pub const CARD_HEIGHT: f32 = 225.0;
pub const CARD_SPACING: f32 = 16.0;
pub const ROW_CAP: usize = 20;

fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

fn hidden_horizontal_scrollbar_style(
    _theme: &iced::Theme,
    _status: scrollable::Status,
) -> scrollable::Style {
    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: iced::Background::Color(Color::TRANSPARENT),
                border: Border::default(),
            },
        },
        horizontal_rail: scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: iced::Background::Color(Color::TRANSPARENT),
                border: Border::default(),
            },
        },
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            shadow: Shadow::default(),
            icon: Color::TRANSPARENT,
        },
    }
}

impl Streamix {
    pub fn view_rows(&self) -> Element<'_, Message> {
        let sections: Vec<Element<Message>> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, section)| {
                container(self.view_row_section(section, index))
                    .padding(iced::Padding::new(0.0).left(48.0).right(48.0))
                    .into()
            })
            .collect();

        Column::with_children(sections)
            .spacing(48)
            .padding(iced::Padding::new(32.0).left(0.0).right(0.0).top(0.0))
            .width(Length::Fill)
            .into()
    }

    fn view_row_section(&self, section: &RowSection, row_index: usize) -> Element<'_, Message> {
        let row_title = text(section.title.clone())
            .size(24)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let cards: Vec<Element<Message>> = section
            .movies
            .iter()
            .take(ROW_CAP)
            .map(|movie| self.view_movie_card(movie))
            .collect();

        let cards_row = Row::with_children(cards)
            .spacing(CARD_SPACING)
            .align_y(iced::Alignment::Start);

        let mut scrollable_cards = scrollable(cards_row)
            .direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .style(hidden_horizontal_scrollbar_style);

        if let Some(row_id_str) = row_id(row_index) {
            scrollable_cards = scrollable_cards
                .id(iced::widget::Id::new(row_id_str))
                .on_scroll(move |viewport| {
                    Message::RowScrolled(row_index, viewport.absolute_offset().x)
                });
        }

        let is_hovered = self.hovered_row == Some(row_index);
        let cards_with_arrows =
            self.view_scrollable_with_arrows(scrollable_cards.into(), row_index, is_hovered);

        let section_content = iced::widget::column![row_title, cards_with_arrows]
            .spacing(20)
            .width(Length::Fill);

        iced::widget::mouse_area(section_content)
            .on_enter(Message::HoverRow(Some(row_index)))
            .on_exit(Message::HoverRow(None))
            .into()
    }

    fn view_scrollable_with_arrows<'a>(
        &'a self,
        scrollable_content: Element<'a, Message>,
        row_index: usize,
        is_hovered: bool,
    ) -> Element<'a, Message> {
        let left_arrow: Element<'a, Message> = if is_hovered {
            self.view_scroll_arrow(row_index, ScrollDirection::Left)
        } else {
            container(Space::new().width(0).height(0)).into()
        };

        let right_arrow: Element<'a, Message> = if is_hovered {
            self.view_scroll_arrow(row_index, ScrollDirection::Right)
        } else {
            container(Space::new().width(0).height(0)).into()
        };

        let left_overlay = container(left_arrow)
            .width(Length::Fill)
            .height(Length::Fixed(CARD_HEIGHT))
            .align_x(iced::alignment::Horizontal::Left)
            .align_y(iced::alignment::Vertical::Center);

        let right_overlay = container(right_arrow)
            .width(Length::Fill)
            .height(Length::Fixed(CARD_HEIGHT))
            .align_x(iced::alignment::Horizontal::Right)
            .align_y(iced::alignment::Vertical::Center);

        iced::widget::stack![scrollable_content, left_overlay, right_overlay]
            .width(Length::Fill)
            .height(Length::Fixed(CARD_HEIGHT))
            .into()
    }

    fn view_scroll_arrow(
        &self,
        row_index: usize,
        direction: ScrollDirection,
    ) -> Element<'_, Message> {
        let icon_char = match direction {
            ScrollDirection::Left => ICON_CHEVRON_LEFT,
            ScrollDirection::Right => ICON_CHEVRON_RIGHT,
        };

        button(
            container(icon(icon_char).size(24).color(TEXT_WHITE))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .width(Length::Fixed(48.0))
        .height(Length::Fixed(80.0))
        .padding(0)
        .style(|_theme, status| {
            let bg_alpha = match status {
                button::Status::Hovered => 0.9,
                _ => 0.7,
            };
            button::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.0, 0.0, 0.0, bg_alpha,
                ))),
                text_color: TEXT_WHITE,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 4.0.into(),
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
                    offset: iced::Vector::new(0.0, 2.0),
                    blur_radius: 8.0,
                },
                snap: false,
            }
        })
        .on_press(Message::ScrollRow(row_index, direction))
        .into()
    }

    fn view_movie_card(&self, movie: &Movie) -> Element<'_, Message> {
        let movie_id = movie.id;
        let is_hovered = self.hovered_card == Some(movie_id);

        let poster = self.view_card_poster(movie);

        let card_content: Element<Message> = if is_hovered {
            iced::widget::stack![poster, self.view_card_caption(movie)]
                .width(Length::Fixed(CARD_WIDTH))
                .height(Length::Fixed(CARD_HEIGHT))
                .into()
        } else {
            poster
        };

        let card_container = container(card_content)
            .width(Length::Fixed(CARD_WIDTH))
            .height(Length::Fixed(CARD_HEIGHT))
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 8.0.into(),
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                    offset: iced::Vector::new(0.0, 4.0),
                    blur_radius: 8.0,
                },
                ..Default::default()
            });

        iced::widget::mouse_area(card_container)
            .on_enter(Message::HoverCard(Some(movie_id)))
            .on_exit(Message::HoverCard(None))
            .on_press(Message::NavigateTo(Page::Detail(movie_id)))
            .into()
    }

    fn view_card_caption(&self, movie: &Movie) -> Element<'_, Message> {
        let caption = container(
            text(movie.title.clone())
                .size(13)
                .color(TEXT_WHITE)
                .font(iced::Font {
                    weight: iced::font::Weight::Bold,
                    ..Default::default()
                })
                .wrapping(text::Wrapping::Word),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(10.0)
        .align_x(iced::alignment::Horizontal::Left)
        .align_y(iced::alignment::Vertical::Bottom);

        let bottom_gradient = container(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::PI)
                        .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.8))
                        .add_stop(0.4, Color::from_rgba(0.0, 0.0, 0.0, 0.2))
                        .add_stop(0.6, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        iced::widget::stack![bottom_gradient, caption]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_card_poster(&self, movie: &Movie) -> Element<'_, Message> {
        let handle = movie.poster_path.as_ref().and_then(|poster_path| {
            let client = self.tmdb_client.as_ref()?;
            let image_url = client.image_url(poster_path, ImageSize::Poster);
            self.image_cache.get(&image_url)
        });

        match handle {
            Some(h) => iced::widget::image(h.clone())
                .width(Length::Fixed(CARD_WIDTH))
                .height(Length::Fixed(CARD_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => self.view_card_placeholder(),
        }
    }

    fn view_card_placeholder(&self) -> Element<'_, Message> {
        container(icon(ICON_FILM).size(48).color(TEXT_GRAY))
            .width(Length::Fixed(CARD_WIDTH))
            .height(Length::Fixed(CARD_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                ..Default::default()
            })
            .into()
    }
}
