use iced::widget::{button, container, row, text, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::media::{Message, Page, ACCENT_RED, TEXT_GRAY, TEXT_WHITE};
use crate::Streamix;

const ICON_FILM: char = '\u{F3A9}';
const ICON_SEARCH: char = '\u{F52A}';
const ICON_PERSON_FILL: char = '\u{F4DA}';

fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

impl Streamix {
    pub fn view_header(&self) -> Element<'_, Message> {
        let left_section = row![self.view_logo(), self.view_navigation()]
            .spacing(32)
            .align_y(iced::Alignment::Center);

        let right_section = row![self.view_search_button(), self.view_profile_button()]
            .spacing(16)
            .align_y(iced::Alignment::Center);

        let header_content = row![
            left_section,
            Space::new().width(Length::Fill),
            right_section
        ]
        .padding(Padding::new(16.0).left(48.0).right(48.0))
        .align_y(iced::Alignment::Center);

        let is_scrolled = self.main_scroll_offset > 0.0;

        container(header_content)
            .width(Length::Fill)
            .height(Length::Fixed(80.0))
            .style(move |_theme| {
                if !is_scrolled {
                    container::Style::default()
                } else {
                    container::Style {
                        background: Some(iced::Background::Color(Color::from_rgba(
                            0.0, 0.0, 0.0, 0.5,
                        ))),
                        ..Default::default()
                    }
                }
            })
            .into()
    }

    fn view_logo(&self) -> Element<'_, Message> {
        let wordmark = row![
            icon(ICON_FILM).size(28).color(ACCENT_RED),
            text("Streamix")
                .size(28)
                .color(TEXT_WHITE)
                .font(iced::Font {
                    weight: iced::font::Weight::Bold,
                    ..Default::default()
                })
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center);

        button(wordmark)
            .padding(0)
            .style(|_theme, _status| button::Style {
                background: Some(iced::Background::Color(Color::TRANSPARENT)),
                text_color: TEXT_WHITE,
                border: Border::default(),
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(Message::NavigateTo(Page::Home))
            .into()
    }

    fn view_navigation(&self) -> Element<'_, Message> {
        let home = button(text("Home").size(14).color(TEXT_WHITE))
            .padding(Padding::new(8.0).left(12.0).right(12.0))
            .style(|_theme, _status| button::Style {
                background: Some(iced::Background::Color(Color::TRANSPARENT)),
                text_color: TEXT_WHITE,
                border: Border::default(),
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(Message::NavigateTo(Page::Home));

        // The remaining destinations exist only as labels, like the original nav.
        let placeholder = |label: &'static str| {
            container(text(label).size(14).color(TEXT_GRAY))
                .padding(Padding::new(8.0).left(12.0).right(12.0))
        };

        row![
            home,
            placeholder("TV Shows"),
            placeholder("Movies"),
            placeholder("My List")
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center)
        .into()
    }

    fn view_search_button(&self) -> Element<'_, Message> {
        container(icon(ICON_SEARCH).size(18).color(TEXT_WHITE))
            .padding(8.0)
            .into()
    }

    fn view_profile_button(&self) -> Element<'_, Message> {
        container(
            container(icon(ICON_PERSON_FILL).size(18).color(TEXT_WHITE))
                .width(Length::Fixed(32.0))
                .height(Length::Fixed(32.0))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(ACCENT_RED)),
                    border: Border {
                        color: Color::TRANSPARENT,
                        width: 0.0,
                        radius: 4.0.into(),
                    },
                    ..Default::default()
                }),
        )
        .into()
    }
}
