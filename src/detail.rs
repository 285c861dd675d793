use iced::widget::{button, column, container, row, text, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::media::{
    Message, MovieDetail, MovieId, Page, ACCENT_RED, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::tmdb::ImageSize;
use crate::Streamix;

const ICON_PLAY_FILL: char = '\u{F4F4}';
const ICON_PLUS_LG: char = '\u{F64D}';
const ICON_HAND_THUMBS_UP: char = '\u{F40D}';
const ICON_CHEVRON_LEFT: char = '\u{F284}';

fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

pub fn release_year(date: &str) -> Option<u32> {
    date.get(..4)?.parse().ok()
}

impl Streamix {
    pub fn view_detail_page(&self) -> Element<'_, Message> {
        match &self.detail_content {
            Some(detail) => self.view_detail_content(detail),
            None => container(text("Loading...").size(20).color(TEXT_GRAY))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        }
    }

    pub fn view_detail_content(&self, detail: &MovieDetail) -> Element<'_, Message> {
        let back_button = button(
            row![
                icon(ICON_CHEVRON_LEFT).size(14).color(TEXT_WHITE),
                text("Back to Home").size(14).color(TEXT_WHITE)
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(8.0).left(12.0).right(12.0))
        .style(|_theme, status| {
            let text_color = match status {
                button::Status::Hovered => TEXT_GRAY,
                _ => TEXT_WHITE,
            };
            button::Style {
                background: Some(iced::Background::Color(Color::TRANSPARENT)),
                text_color,
                border: Border::default(),
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::NavigateTo(Page::Home));

        let detail_title = text(detail.title.clone())
            .size(56)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let mut info = column![detail_title].spacing(20);

        if let Some(tagline) = detail.display_tagline() {
            info = info.push(text(tagline.to_string()).size(18).color(TEXT_GRAY));
        }

        info = info.push(self.view_detail_metadata(detail));

        if !detail.genres.is_empty() {
            info = info.push(self.view_genre_pills(detail));
        }

        info = info.push(
            text(detail.overview.clone())
                .size(16)
                .color(Color::from_rgb(0.85, 0.85, 0.85)),
        );

        info = info.push(self.view_detail_actions(detail.id));

        let content = column![
            container(back_button).padding(Padding::new(24.0).left(48.0)),
            container(container(info).max_width(760.0))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_y(iced::alignment::Vertical::Center)
                .padding(Padding::new(0.0).left(64.0).right(64.0))
        ]
        .width(Length::Fill)
        .height(Length::Fill);

        let left_gradient = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(0.0)
                        .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.95))
                        .add_stop(0.4, Color::from_rgba(0.0, 0.0, 0.0, 0.75))
                        .add_stop(0.7, Color::from_rgba(0.0, 0.0, 0.0, 0.35))
                        .add_stop(1.0, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        iced::widget::stack![self.view_detail_backdrop(detail), left_gradient]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_detail_backdrop(&self, detail: &MovieDetail) -> Element<'_, Message> {
        let handle = detail.backdrop_path.as_ref().and_then(|backdrop_path| {
            let client = self.tmdb_client.as_ref()?;
            let image_url = client.image_url(backdrop_path, ImageSize::Original);
            self.image_cache.get(&image_url)
        });

        match handle {
            Some(h) => iced::widget::image(h.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                    ..Default::default()
                })
                .into(),
        }
    }

    fn view_detail_metadata(&self, detail: &MovieDetail) -> Element<'_, Message> {
        let mut items: Vec<Element<'_, Message>> = Vec::new();

        items.push(
            row![
                text("★").size(14).color(Color::from_rgb(0.96, 0.76, 0.07)),
                text(format!("{:.1}", detail.vote_average))
                    .size(14)
                    .color(TEXT_WHITE)
                    .font(iced::Font {
                        weight: iced::font::Weight::Bold,
                        ..Default::default()
                    })
            ]
            .spacing(4)
            .align_y(iced::Alignment::Center)
            .into(),
        );

        if let Some(year) = detail
            .release_date
            .as_deref()
            .and_then(release_year)
        {
            items.push(text(year.to_string()).size(14).color(TEXT_GRAY).into());
        }

        if let Some(runtime) = detail.runtime {
            items.push(
                text(format_runtime(runtime))
                    .size(14)
                    .color(TEXT_GRAY)
                    .into(),
            );
        }

        if let Some(ref status) = detail.status {
            items.push(
                container(text(status.clone()).size(12).color(TEXT_WHITE))
                    .padding(Padding::new(2.0).left(8.0).right(8.0))
                    .style(|_theme| container::Style {
                        border: Border {
                            color: TEXT_GRAY,
                            width: 1.0,
                            radius: 2.0.into(),
                        },
                        ..Default::default()
                    })
                    .into(),
            );
        }

        Row::with_children(items)
            .spacing(16)
            .align_y(iced::Alignment::Center)
            .into()
    }

    fn view_genre_pills(&self, detail: &MovieDetail) -> Element<'_, Message> {
        let pills: Vec<Element<'_, Message>> = detail
            .genres
            .iter()
            .map(|genre| {
                container(text(genre.name.clone()).size(13).color(TEXT_WHITE))
                    .padding(Padding::new(4.0).left(14.0).right(14.0))
                    .style(|_theme| container::Style {
                        background: Some(iced::Background::Color(Color::from_rgba(
                            0.4, 0.4, 0.4, 0.5,
                        ))),
                        border: Border {
                            color: Color::TRANSPARENT,
                            width: 0.0,
                            radius: 12.0.into(),
                        },
                        ..Default::default()
                    })
                    .into()
            })
            .collect();

        Row::with_children(pills)
            .spacing(8)
            .align_y(iced::Alignment::Center)
            .into()
    }

    // All three affordances are stubs the update loop acknowledges and drops.
    fn view_detail_actions(&self, movie_id: MovieId) -> Element<'_, Message> {
        let play_button = button(
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
        .on_press(Message::PlayRequested(movie_id));

        let square_button = |icon_char: char, message: Message| {
            button(
                container(icon(icon_char).size(16).color(TEXT_WHITE))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .center_x(Length::Fill)
                    .center_y(Length::Fill),
            )
            .width(Length::Fixed(44.0))
            .height(Length::Fixed(44.0))
            .padding(0)
            .style(|_theme, status| {
                let bg_alpha = match status {
                    button::Status::Hovered => 0.7,
                    _ => 0.5,
                };
                button::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        0.3, 0.3, 0.3, bg_alpha,
                    ))),
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
            .on_press(message)
        };

        row![
            play_button,
            square_button(ICON_PLUS_LG, Message::AddToListRequested(movie_id)),
            square_button(ICON_HAND_THUMBS_UP, Message::LikeRequested(movie_id))
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::Genre;

    #[test]
    fn runtime_formats_hours_and_minutes() {
        assert_eq!(format_runtime(142), "2h 22m");
        assert_eq!(format_runtime(60), "1h 0m");
        assert_eq!(format_runtime(0), "0h 0m");
    }

    #[test]
    fn release_year_takes_calendar_year() {
        assert_eq!(release_year("1999-03-31"), Some(1999));
        assert_eq!(release_year("2024-12-01"), Some(2024));
        assert_eq!(release_year(""), None);
        assert_eq!(release_year("soon"), None);
    }

    fn bare_detail() -> MovieDetail {
        serde_json::from_str(r#"{"id": 550, "title": "Fight Club"}"#).unwrap()
    }

    #[test]
    fn detail_view_builds_without_genres_or_tagline() {
        let app = Streamix::default();
        let detail = bare_detail();
        assert!(detail.genres.is_empty());
        assert!(detail.display_tagline().is_none());
        let _ = app.view_detail_content(&detail);
    }

    #[test]
    fn detail_view_builds_with_full_record() {
        let app = Streamix::default();
        let mut detail = bare_detail();
        detail.tagline = Some(String::from("Mischief. Mayhem. Soap."));
        detail.status = Some(String::from("Released"));
        detail.runtime = Some(139);
        detail.release_date = Some(String::from("1999-10-15"));
        detail.genres = vec![
            Genre {
                id: 18,
                name: String::from("Drama"),
            },
            Genre {
                id: 53,
                name: String::from("Thriller"),
            },
        ];
        let _ = app.view_detail_content(&detail);
    }
}
