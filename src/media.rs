use std::collections::{HashMap, HashSet};

use iced::widget::image::Handle;
use iced::Color;
use serde::Deserialize;

use crate::tmdb::FetchFailure;

pub const BACKGROUND_BLACK: Color = Color::from_rgb(0.0, 0.0, 0.0);
pub const SURFACE_DARK_GRAY: Color = Color::from_rgb(0.078, 0.078, 0.078);
pub const ACCENT_RED: Color = Color::from_rgb(0.898, 0.035, 0.078);
pub const TEXT_WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const TEXT_GRAY: Color = Color::from_rgb(0.702, 0.702, 0.702);

pub const ROW_IDS: [&str; 4] = ["row-0", "row-1", "row-2", "row-3"];

pub fn row_id(index: usize) -> Option<&'static str> {
    ROW_IDS.get(index).copied()
}

pub type MovieId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Home,
    Detail(MovieId),
}

#[derive(Debug, Clone)]
pub enum LoadingState {
    Idle,
    Loading,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl MovieDetail {
    pub fn display_tagline(&self) -> Option<&str> {
        self.tagline.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieListResponse {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Trending,
    Popular,
    TopRated,
    Upcoming,
}

impl Category {
    pub fn row_title(self) -> &'static str {
        match self {
            Category::Trending => "Trending Now",
            Category::Popular => "Popular on Streamix",
            Category::TopRated => "Top Rated",
            Category::Upcoming => "Coming Soon",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RowSection {
    pub title: String,
    pub category: Category,
    pub movies: Vec<Movie>,
}

#[derive(Debug, Clone)]
pub struct HomeContent {
    pub hero: Option<Movie>,
    pub rows: Vec<RowSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("unknown route: {0}")]
    UnknownPath(String),
    #[error("invalid movie identifier: {0}")]
    InvalidId(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Movie(MovieId),
}

impl std::str::FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim_start_matches('/').trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Route::Home);
        }
        match trimmed.split_once('/') {
            Some(("movie", id)) if !id.is_empty() && !id.contains('/') => id
                .parse::<MovieId>()
                .map(Route::Movie)
                .map_err(|_| RouteError::InvalidId(id.to_string())),
            _ => Err(RouteError::UnknownPath(path.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ScrollDirection {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub enum Message {
    Setup(crate::config::SetupMessage),
    NavigateTo(Page),
    HomeLoaded(Result<HomeContent, FetchFailure>),
    DetailLoaded(Result<MovieDetail, FetchFailure>),
    LoadImage(String),
    ImageLoaded(String, Result<Handle, String>),
    HoverCard(Option<MovieId>),
    HoverRow(Option<usize>),
    ScrollRow(usize, ScrollDirection),
    AnimateScroll(usize),
    RowScrolled(usize, f32),
    MainScrolled(f32),
    PlayRequested(MovieId),
    AddToListRequested(MovieId),
    LikeRequested(MovieId),
    RetryLoad,
}

#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    cache: HashMap<String, Handle>,
    pending: HashSet<String>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.cache.get(url)
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.pending.remove(&url);
        self.cache.insert(url, handle);
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    pub fn mark_pending(&mut self, url: String) {
        self.pending.insert(url);
    }
}

pub fn truncate_overview(overview: &str, max_length: usize) -> String {
    if overview.len() <= max_length {
        return overview.to_string();
    }
    let cut = overview
        .char_indices()
        .take_while(|(i, _)| *i <= max_length)
        .last()
        .map_or(0, |(i, _)| i);
    let truncated = &overview[..cut];
    format!(
        "{}...",
        truncated.rfind(' ').map_or(truncated, |i| &truncated[..i])
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_root_parses_to_home() {
        assert_eq!("/".parse::<Route>(), Ok(Route::Home));
        assert_eq!("".parse::<Route>(), Ok(Route::Home));
    }

    #[test]
    fn route_movie_parses_numeric_id() {
        assert_eq!("/movie/550".parse::<Route>(), Ok(Route::Movie(550)));
        assert_eq!("movie/603/".parse::<Route>(), Ok(Route::Movie(603)));
    }

    #[test]
    fn route_rejects_non_numeric_id() {
        assert_eq!(
            "/movie/abc".parse::<Route>(),
            Err(RouteError::InvalidId(String::from("abc")))
        );
    }

    #[test]
    fn route_rejects_unknown_paths() {
        assert!(matches!(
            "/tv/42".parse::<Route>(),
            Err(RouteError::UnknownPath(_))
        ));
        assert!(matches!(
            "/movie/550/credits".parse::<Route>(),
            Err(RouteError::UnknownPath(_))
        ));
        assert!(matches!(
            "/movie/".parse::<Route>(),
            Err(RouteError::UnknownPath(_))
        ));
    }

    #[test]
    fn list_response_keeps_pagination_fields() {
        let json = r#"{
            "page": 2,
            "results": [{"id": 550, "title": "Fight Club"}],
            "total_pages": 10,
            "total_results": 200
        }"#;
        let envelope: MovieListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.page, 2);
        assert_eq!(envelope.total_pages, 10);
        assert_eq!(envelope.total_results, 200);
        assert_eq!(envelope.results.len(), 1);
        assert_eq!(envelope.results[0].id, 550);
    }

    #[test]
    fn movie_tolerates_missing_fields() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(movie.title, "");
        assert!(movie.poster_path.is_none());
        assert_eq!(movie.vote_average, 0.0);
    }

    #[test]
    fn display_tagline_skips_absent_and_empty() {
        let mut detail: MovieDetail = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(detail.display_tagline(), None);
        detail.tagline = Some(String::new());
        assert_eq!(detail.display_tagline(), None);
        detail.tagline = Some(String::from("Mischief. Mayhem. Soap."));
        assert_eq!(detail.display_tagline(), Some("Mischief. Mayhem. Soap."));
    }

    #[test]
    fn truncate_overview_cuts_at_word_boundary() {
        let short = "A quiet film.";
        assert_eq!(truncate_overview(short, 200), short);
        let long = "word ".repeat(100);
        let truncated = truncate_overview(&long, 50);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 54);
    }
}
