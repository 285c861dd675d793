use iced::widget::{button, column, container, row, text, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::media::{
    truncate_overview, Message, Movie, MovieId, Page, ACCENT_RED, SURFACE_DARK_GRAY, TEXT_GRAY,
    TEXT_WHITE,
};
use crate::tmdb::ImageSize;
use crate::Streamix;

const HERO_HEIGHT: f32 = 620.0;
const OVERVIEW_CLAMP: usize = 200;

const ICON_PLAY_FILL: char = '\u{F4F4}';
const ICON_INFO_CIRCLE: char = '\u{F431}';

fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

impl Streamix {
    pub fn view_hero_section(&self) -> Element<'_, Message> {
        match &self.hero_content {
            Some(movie) => self.view_hero_with_content(movie),
            None => self.view_hero_placeholder(),
        }
    }

    pub fn view_hero_placeholder(&self) -> Element<'_, Message> {
        container(
            text("No featured content available")
                .size(24)
                .color(TEXT_GRAY),
        )
        .width(Length::Fill)
        .height(Length::Fixed(HERO_HEIGHT))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
            ..Default::default()
        })
        .into()
    }

    fn view_hero_with_content(&self, movie: &Movie) -> Element<'_, Message> {
        let hero_title = text(movie.title.clone())
            .size(48)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let hero_overview = container(
            text(truncate_overview(&movie.overview, OVERVIEW_CLAMP))
                .size(16)
                .color(TEXT_GRAY),
        )
        .max_width(500.0);

        let button_row = row![
            self.view_hero_play_button(movie.id),
            self.view_hero_more_info_button(movie.id)
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center);

        let hero_text_content = column![hero_title, hero_overview, button_row]
            .spacing(20)
            .padding(Padding::new(64.0).left(64.0).right(64.0));

        let hero_left_gradient = container(hero_text_content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_y(iced::alignment::Vertical::Center)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(0.0)
                        .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.99))
                        .add_stop(0.3, Color::from_rgba(0.0, 0.0, 0.0, 0.9))
                        .add_stop(0.5, Color::from_rgba(0.0, 0.0, 0.0, 0.6))
                        .add_stop(0.7, Color::from_rgba(0.0, 0.0, 0.0, 0.25))
                        .add_stop(0.9, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        let hero_bottom_gradient = container(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::PI)
                        .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.15))
                        .add_stop(0.06, Color::from_rgba(0.0, 0.0, 0.0, 0.05))
                        .add_stop(0.12, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        iced::widget::stack![
            self.view_hero_backdrop(movie),
            hero_bottom_gradient,
            hero_left_gradient
        ]
        .width(Length::Fill)
        .height(Length::Fixed(HERO_HEIGHT))
        .into()
    }

    fn view_hero_backdrop(&self, movie: &Movie) -> Element<'_, Message> {
        let Some(backdrop_path) = &movie.backdrop_path else {
            return self.view_hero_backdrop_placeholder();
        };
        let Some(client) = &self.tmdb_client else {
            return self.view_hero_backdrop_placeholder();
        };
        let image_url = client.image_url(backdrop_path, ImageSize::Original);
        let Some(handle) = self.image_cache.get(&image_url) else {
            return self.view_hero_backdrop_placeholder();
        };
        iced::widget::image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(HERO_HEIGHT))
            .content_fit(iced::ContentFit::Cover)
            .into()
    }

    fn view_hero_backdrop_placeholder(&self) -> Element<'_, Message> {
        container(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fixed(HERO_HEIGHT))
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                ..Default::default()
            })
            .into()
    }

    // Playback is not implemented; the button is a stub the update loop ignores.
    fn view_hero_play_button(&self, movie_id: MovieId) -> Element<'_, Message> {
        button(
            row![
                icon(ICON_PLAY_FILL).size(14).color(TEXT_WHITE),
                text("Play").size(16).color(TEXT_WHITE)
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(12.0).left(24.0).right(24.0))
        .style(|_theme, status| {
            let background_color = match status {
                button::Status::Hovered => Color::from_rgb(0.698, 0.027, 0.063),
                _ => ACCENT_RED,
            };
            button::Style {
                background: Some(iced::Background::Color(background_color)),
                text_color: TEXT_WHITE,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 4.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::PlayRequested(movie_id))
        .into()
    }

    fn view_hero_more_info_button(&self, movie_id: MovieId) -> Element<'_, Message> {
        button(
            row![
                icon(ICON_INFO_CIRCLE).size(14).color(TEXT_WHITE),
                text("More Info").size(16).color(TEXT_WHITE)
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(12.0).left(24.0).right(24.0))
        .style(|_theme, status| {
            let background_color = match status {
                button::Status::Hovered => Color::from_rgba(1.0, 1.0, 1.0, 0.1),
                _ => Color::TRANSPARENT,
            };
            button::Style {
                background: Some(iced::Background::Color(background_color)),
                text_color: TEXT_WHITE,
                border: Border {
                    color: TEXT_WHITE,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::NavigateTo(Page::Detail(movie_id)))
        .into()
    }
}
