use iced::widget::image::Handle;
use iced::Task;

use crate::media::{
    row_id, HomeContent, LoadingState, Message, MovieDetail, Page, ScrollDirection,
};
use crate::rows::{CARD_SPACING, CARD_WIDTH, ROW_CAP};
use crate::tmdb::{fetch_image_bytes, load_home_content, FetchFailure, ImageSize};
use crate::Streamix;

pub const SCROLL_AMOUNT: f32 = 800.0;

const VISIBLE_CARD_WINDOW: usize = 10;

pub fn handle_message(app: &mut Streamix, message: Message) -> Task<Message> {
    match message {
        Message::Setup(_) => Task::none(),
        Message::NavigateTo(page) => handle_navigate(app, page),
        Message::HomeLoaded(result) => handle_home_loaded(app, result),
        Message::DetailLoaded(result) => handle_detail_loaded(app, result),
        Message::LoadImage(url) => handle_load_image(app, url),
        Message::ImageLoaded(url, result) => handle_image_loaded(app, url, result),
        Message::HoverCard(id) => {
            app.hovered_card = id;
            Task::none()
        }
        Message::HoverRow(index) => {
            app.hovered_row = index;
            Task::none()
        }
        Message::ScrollRow(index, direction) => handle_scroll_row(app, index, direction),
        Message::AnimateScroll(index) => handle_animate_scroll(app, index),
        Message::RowScrolled(index, offset) => handle_row_scrolled(app, index, offset),
        Message::MainScrolled(offset) => {
            app.main_scroll_offset = offset;
            Task::none()
        }
        Message::PlayRequested(movie_id) => {
            tracing::debug!(movie_id, "play requested, playback is not wired up");
            Task::none()
        }
        Message::AddToListRequested(movie_id) => {
            tracing::debug!(movie_id, "add to list requested, lists are not wired up");
            Task::none()
        }
        Message::LikeRequested(movie_id) => {
            tracing::debug!(movie_id, "like requested, ratings are not wired up");
            Task::none()
        }
        Message::RetryLoad => handle_retry_load(app),
    }
}

fn handle_navigate(app: &mut Streamix, page: Page) -> Task<Message> {
    app.current_page = page.clone();
    match page {
        Page::Home => Task::none(),
        Page::Detail(movie_id) => {
            app.detail_content = None;
            let Some(client) = &app.tmdb_client else {
                return Task::none();
            };
            let fetch_client = client.clone();
            Task::perform(
                async move { fetch_client.fetch_movie_details(movie_id).await },
                Message::DetailLoaded,
            )
        }
    }
}

fn handle_home_loaded(
    app: &mut Streamix,
    result: Result<HomeContent, FetchFailure>,
) -> Task<Message> {
    match result {
        Ok(content) => {
            app.hero_content = content.hero;
            app.rows = content.rows;
            app.loading_state = LoadingState::Idle;
            load_home_images(app)
        }
        Err(error) => {
            tracing::error!(%error, "home content load failed");
            app.loading_state = LoadingState::Error(error.to_string());
            Task::none()
        }
    }
}

fn handle_detail_loaded(
    app: &mut Streamix,
    result: Result<MovieDetail, FetchFailure>,
) -> Task<Message> {
    match result {
        Ok(detail) => {
            let backdrop_task = load_detail_backdrop(app, &detail);
            app.detail_content = Some(detail);
            backdrop_task
        }
        Err(error) => {
            tracing::error!(%error, "detail load failed");
            app.loading_state = LoadingState::Error(error.to_string());
            Task::none()
        }
    }
}

fn handle_image_loaded(
    app: &mut Streamix,
    url: String,
    result: Result<Handle, String>,
) -> Task<Message> {
    if let Ok(handle) = result {
        app.image_cache.insert(url, handle);
    }
    Task::none()
}

fn handle_load_image(app: &mut Streamix, url: String) -> Task<Message> {
    if app.image_cache.get(&url).is_some() || app.image_cache.is_pending(&url) {
        return Task::none();
    }
    app.image_cache.mark_pending(url.clone());

    Task::perform(
        async move {
            let result = fetch_image_bytes(url.clone()).await;
            (url, result)
        },
        |(url, result)| match result {
            Ok(bytes) => Message::ImageLoaded(url, Ok(Handle::from_bytes(bytes))),
            Err(error) => Message::ImageLoaded(url, Err(error)),
        },
    )
}

fn handle_retry_load(app: &mut Streamix) -> Task<Message> {
    app.loading_state = LoadingState::Loading;
    let Some(client) = &app.tmdb_client else {
        return Task::none();
    };
    Task::perform(load_home_content(client.clone()), Message::HomeLoaded)
}

// The trigger always asks for the full step; out-of-range targets are left
// to the scroll container's own clamping.
fn handle_scroll_row(
    app: &mut Streamix,
    row_index: usize,
    direction: ScrollDirection,
) -> Task<Message> {
    while app.row_scroll_offsets.len() <= row_index {
        app.row_scroll_offsets.push(0.0);
    }
    while app.row_scroll_targets.len() <= row_index {
        app.row_scroll_targets.push(0.0);
    }

    let delta = match direction {
        ScrollDirection::Left => -SCROLL_AMOUNT,
        ScrollDirection::Right => SCROLL_AMOUNT,
    };
    app.row_scroll_targets[row_index] += delta;
    Task::done(Message::AnimateScroll(row_index))
}

fn handle_animate_scroll(app: &mut Streamix, row_index: usize) -> Task<Message> {
    if row_index >= app.row_scroll_offsets.len() || row_index >= app.row_scroll_targets.len() {
        return Task::none();
    }

    let current = app.row_scroll_offsets[row_index];
    let target = app.row_scroll_targets[row_index];
    let diff = target - current;

    let Some(row_id_str) = row_id(row_index) else {
        return Task::none();
    };
    let id = iced::widget::Id::new(row_id_str);

    if diff.abs() < 1.0 {
        app.row_scroll_offsets[row_index] = target;
        let offset = iced::widget::scrollable::AbsoluteOffset { x: target, y: 0.0 };
        return iced::widget::operation::scroll_to(id, offset);
    }

    let new_offset = current + diff * 0.15;
    app.row_scroll_offsets[row_index] = new_offset;
    let offset = iced::widget::scrollable::AbsoluteOffset {
        x: new_offset,
        y: 0.0,
    };

    Task::batch([
        iced::widget::operation::scroll_to(id, offset),
        Task::perform(
            async { tokio::time::sleep(std::time::Duration::from_millis(16)).await },
            move |_| Message::AnimateScroll(row_index),
        ),
    ])
}

fn handle_row_scrolled(app: &mut Streamix, row_index: usize, offset: f32) -> Task<Message> {
    while app.row_scroll_offsets.len() <= row_index {
        app.row_scroll_offsets.push(0.0);
    }
    app.row_scroll_offsets[row_index] = offset;
    load_visible_images(app, row_index, offset)
}

fn load_home_images(app: &Streamix) -> Task<Message> {
    let Some(client) = &app.tmdb_client else {
        return Task::none();
    };

    let mut tasks = Vec::new();

    if let Some(hero) = &app.hero_content {
        if let Some(backdrop_path) = &hero.backdrop_path {
            let url = client.image_url(backdrop_path, ImageSize::Original);
            tasks.push(Task::done(Message::LoadImage(url)));
        }
    }

    for row_index in 0..app.rows.len() {
        tasks.push(load_visible_images(app, row_index, 0.0));
    }

    Task::batch(tasks)
}

fn load_visible_images(app: &Streamix, row_index: usize, offset: f32) -> Task<Message> {
    let Some(section) = app.rows.get(row_index) else {
        return Task::none();
    };
    let Some(client) = &app.tmdb_client else {
        return Task::none();
    };

    let card_span = CARD_WIDTH + CARD_SPACING;
    let first_visible = (offset / card_span).floor().max(0.0) as usize;

    let mut tasks = Vec::new();
    for movie in section
        .movies
        .iter()
        .take(ROW_CAP)
        .skip(first_visible)
        .take(VISIBLE_CARD_WINDOW)
    {
        if let Some(poster_path) = &movie.poster_path {
            let url = client.image_url(poster_path, ImageSize::Poster);
            if app.image_cache.get(&url).is_none() && !app.image_cache.is_pending(&url) {
                tasks.push(Task::done(Message::LoadImage(url)));
            }
        }
    }

    Task::batch(tasks)
}

fn load_detail_backdrop(app: &Streamix, detail: &MovieDetail) -> Task<Message> {
    let Some(client) = &app.tmdb_client else {
        return Task::none();
    };
    let Some(backdrop_path) = &detail.backdrop_path else {
        return Task::none();
    };
    let url = client.image_url(backdrop_path, ImageSize::Original);
    if app.image_cache.get(&url).is_some() || app.image_cache.is_pending(&url) {
        return Task::none();
    }
    Task::done(Message::LoadImage(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll(app: &mut Streamix, index: usize, direction: ScrollDirection) {
        let _ = handle_message(app, Message::ScrollRow(index, direction));
    }

    #[test]
    fn scroll_trigger_requests_exactly_800() {
        let mut app = Streamix::default();
        scroll(&mut app, 0, ScrollDirection::Right);
        assert_eq!(app.row_scroll_targets[0], 800.0);
        scroll(&mut app, 0, ScrollDirection::Right);
        assert_eq!(app.row_scroll_targets[0], 1600.0);
        scroll(&mut app, 0, ScrollDirection::Left);
        assert_eq!(app.row_scroll_targets[0], 800.0);
    }

    #[test]
    fn scroll_trigger_is_not_clamped_at_the_left_edge() {
        let mut app = Streamix::default();
        scroll(&mut app, 1, ScrollDirection::Left);
        assert_eq!(app.row_scroll_targets[1], -800.0);
    }

    #[test]
    fn scroll_on_empty_row_is_a_no_op() {
        let mut app = Streamix::default();
        assert!(app.rows.is_empty());
        scroll(&mut app, 3, ScrollDirection::Right);
        assert_eq!(app.row_scroll_targets[3], 800.0);
        let _ = handle_message(&mut app, Message::AnimateScroll(3));
    }

    #[test]
    fn animate_scroll_out_of_range_does_not_fail() {
        let mut app = Streamix::default();
        let _ = handle_message(&mut app, Message::AnimateScroll(7));
    }

    #[test]
    fn hover_state_tracks_cards_and_rows() {
        let mut app = Streamix::default();
        let _ = handle_message(&mut app, Message::HoverCard(Some(550)));
        assert_eq!(app.hovered_card, Some(550));
        let _ = handle_message(&mut app, Message::HoverRow(Some(2)));
        assert_eq!(app.hovered_row, Some(2));
        let _ = handle_message(&mut app, Message::HoverCard(None));
        assert_eq!(app.hovered_card, None);
    }

    #[test]
    fn home_load_failure_reaches_the_error_boundary() {
        let mut app = Streamix::default();
        let failure = Err(FetchFailure {
            resource: String::from("upcoming movies"),
        });
        let _ = handle_message(&mut app, Message::HomeLoaded(failure));
        assert!(matches!(app.loading_state, LoadingState::Error(_)));
        assert!(app.rows.is_empty());
    }

    #[test]
    fn stub_affordances_change_no_state() {
        let mut app = Streamix::default();
        let _ = handle_message(&mut app, Message::PlayRequested(550));
        let _ = handle_message(&mut app, Message::AddToListRequested(550));
        let _ = handle_message(&mut app, Message::LikeRequested(550));
        assert!(matches!(app.loading_state, LoadingState::Loading));
        assert!(app.detail_content.is_none());
    }
}
