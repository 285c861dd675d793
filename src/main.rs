mod config;
mod detail;
mod handlers;
mod header;
mod hero;
mod media;
mod rows;
mod tmdb;

use iced::widget::{button, column, container, scrollable, text};
use iced::{Element, Font, Length, Size, Task, Theme};

use config::{AppSettings, SetupPage};
use media::{
    LoadingState, Message, Movie, MovieDetail, MovieId, Page, Route, RowSection, ImageCache,
    ACCENT_RED, BACKGROUND_BLACK, TEXT_GRAY, TEXT_WHITE,
};
use tmdb::{load_home_content, TmdbClient};

pub struct Streamix {
    pub setup_page: Option<SetupPage>,
    pub current_page: Page,
    pub hero_content: Option<Movie>,
    pub rows: Vec<RowSection>,
    pub detail_content: Option<MovieDetail>,
    pub loading_state: LoadingState,
    pub image_cache: ImageCache,
    pub hovered_card: Option<MovieId>,
    pub hovered_row: Option<usize>,
    pub row_scroll_offsets: Vec<f32>,
    pub row_scroll_targets: Vec<f32>,
    pub main_scroll_offset: f32,
    pub tmdb_client: Option<TmdbClient>,
}

impl Default for Streamix {
    fn default() -> Self {
        Self {
            setup_page: None,
            current_page: Page::Home,
            hero_content: None,
            rows: Vec::new(),
            detail_content: None,
            loading_state: LoadingState::Loading,
            image_cache: ImageCache::new(),
            hovered_card: None,
            hovered_row: None,
            row_scroll_offsets: Vec::new(),
            row_scroll_targets: Vec::new(),
            main_scroll_offset: 0.0,
            tmdb_client: None,
        }
    }
}

fn launch_page() -> Option<Page> {
    let arg = std::env::args().nth(1)?;
    match arg.parse::<Route>() {
        Ok(Route::Home) => Some(Page::Home),
        Ok(Route::Movie(id)) => Some(Page::Detail(id)),
        Err(error) => {
            tracing::warn!(%error, "ignoring launch path");
            None
        }
    }
}

impl Streamix {
    fn new() -> (Self, Task<Message>) {
        let settings = match AppSettings::load() {
            Some(s) if s.is_valid() => s,
            _ => {
                return (
                    Self {
                        setup_page: Some(SetupPage::default()),
                        ..Default::default()
                    },
                    Task::none(),
                );
            }
        };

        let client = TmdbClient::from_settings(&settings);
        let mut tasks = vec![Task::perform(
            load_home_content(client.clone()),
            Message::HomeLoaded,
        )];

        if let Some(page @ Page::Detail(_)) = launch_page() {
            tasks.push(Task::done(Message::NavigateTo(page)));
        }

        (
            Self {
                tmdb_client: Some(client),
                ..Default::default()
            },
            Task::batch(tasks),
        )
    }

    fn initialize_with_settings(&mut self, settings: AppSettings) -> Task<Message> {
        let client = TmdbClient::from_settings(&settings);
        self.tmdb_client = Some(client.clone());
        self.setup_page = None;
        self.loading_state = LoadingState::Loading;
        Task::perform(load_home_content(client), Message::HomeLoaded)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        if let Message::Setup(setup_msg) = message {
            if let Some(ref mut setup) = self.setup_page {
                if let Some(settings) = setup.update(setup_msg) {
                    return self.initialize_with_settings(settings);
                }
            }
            return Task::none();
        }
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        if let Some(ref setup) = self.setup_page {
            return setup.view().map(Message::Setup);
        }

        let content = match (&self.loading_state, &self.current_page) {
            (LoadingState::Error(_), _) => self.view_error_screen(),
            (_, Page::Detail(_)) => self.view_detail_page(),
            (LoadingState::Loading, Page::Home) => self.view_loading_screen(),
            (_, Page::Home) => self.view_home(),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_BLACK)),
                ..Default::default()
            })
            .into()
    }

    fn view_home(&self) -> Element<'_, Message> {
        let page_content = column![self.view_hero_section(), self.view_rows()]
            .width(Length::Fill);

        let scrolled = scrollable(page_content)
            .on_scroll(|viewport| Message::MainScrolled(viewport.absolute_offset().y))
            .width(Length::Fill)
            .height(Length::Fill);

        iced::widget::stack![scrolled, self.view_header()]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_loading_screen(&self) -> Element<'_, Message> {
        container(text("Loading...").size(20).color(TEXT_GRAY))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    // Fetch failures land here; there is no per-section fallback and no
    // distinct not-found state.
    fn view_error_screen(&self) -> Element<'_, Message> {
        let message = match &self.loading_state {
            LoadingState::Error(error) => error.clone(),
            _ => String::from("Something went wrong"),
        };

        let retry_button = button(text("Retry").size(16).color(TEXT_WHITE))
            .padding([12, 32])
            .style(|_theme, status| {
                let bg = match status {
                    button::Status::Hovered => iced::Color::from_rgb(0.7, 0.02, 0.06),
                    _ => ACCENT_RED,
                };
                button::Style {
                    background: Some(iced::Background::Color(bg)),
                    text_color: TEXT_WHITE,
                    border: iced::Border::default().rounded(4),
                    ..Default::default()
                }
            })
            .on_press(Message::RetryLoad);

        container(
            column![
                text("Something went wrong").size(28).color(TEXT_WHITE),
                text(message).size(16).color(TEXT_GRAY),
                retry_button
            ]
            .spacing(20)
            .align_x(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    iced::application(Streamix::new, Streamix::update, Streamix::view)
        .title("Streamix")
        .theme(Streamix::theme)
        .window_size(Size::new(1280.0, 720.0))
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .default_font(Font::DEFAULT)
        .run()
}
