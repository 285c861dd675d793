use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppSettings;
use crate::media::{
    Category, HomeContent, Movie, MovieDetail, MovieId, MovieListResponse, RowSection,
};

const CACHE_TTL_SECONDS: u64 = 3600;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch {resource}")]
pub struct FetchFailure {
    pub resource: String,
}

impl FetchFailure {
    fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
        }
    }
}

#[derive(Clone)]
pub enum ImageSize {
    Poster,
    Original,
}

struct CacheEntry<T> {
    data: T,
    created_at: Instant,
}

impl<T: Clone> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            created_at: Instant::now(),
        }
    }

    fn is_valid(&self) -> bool {
        self.created_at.elapsed() < Duration::from_secs(CACHE_TTL_SECONDS)
    }
}

#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    image_base_url: String,
    language: String,
    http_client: Arc<reqwest::Client>,
    list_cache: Arc<RwLock<HashMap<String, CacheEntry<Vec<Movie>>>>>,
    detail_cache: Arc<RwLock<HashMap<MovieId, CacheEntry<MovieDetail>>>>,
}

impl TmdbClient {
    pub fn new(api_key: String, language: String) -> Self {
        Self {
            api_key,
            base_url: String::from(DEFAULT_BASE_URL),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            language,
            http_client: Arc::new(reqwest::Client::new()),
            list_cache: Arc::new(RwLock::new(HashMap::new())),
            detail_cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        let language = if settings.language.is_empty() {
            String::from("en-US")
        } else {
            settings.language.clone()
        };
        Self::new(settings.api_key.clone(), language)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn image_url(&self, path: &str, size: ImageSize) -> String {
        let size_path = match size {
            ImageSize::Poster => "w500",
            ImageSize::Original => "original",
        };
        format!("{}/{}{}", self.image_base_url, size_path, path)
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}{}?api_key={}&language={}",
            self.base_url, endpoint, self.api_key, self.language
        )
    }

    fn get_cached_list(&self, key: &str) -> Option<Vec<Movie>> {
        self.list_cache
            .read()
            .ok()?
            .get(key)
            .filter(|e| e.is_valid())
            .map(|e| e.data.clone())
    }

    fn set_cached_list(&self, key: String, data: Vec<Movie>) {
        if let Ok(mut cache) = self.list_cache.write() {
            cache.insert(key, CacheEntry::new(data));
        }
    }

    fn get_cached_detail(&self, id: MovieId) -> Option<MovieDetail> {
        self.detail_cache
            .read()
            .ok()?
            .get(&id)
            .filter(|e| e.is_valid())
            .map(|e| e.data.clone())
    }

    fn set_cached_detail(&self, id: MovieId, data: MovieDetail) {
        if let Ok(mut cache) = self.detail_cache.write() {
            cache.insert(id, CacheEntry::new(data));
        }
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        resource: &str,
    ) -> Result<T, FetchFailure> {
        tracing::debug!(resource, "tmdb request");
        let response = self.http_client.get(url).send().await.map_err(|e| {
            tracing::debug!(resource, error = %e, "transport error");
            FetchFailure::new(resource)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(resource, status = %status, "non-success response");
            return Err(FetchFailure::new(resource));
        }

        response.json().await.map_err(|e| {
            tracing::debug!(resource, error = %e, "undecodable response body");
            FetchFailure::new(resource)
        })
    }

    async fn fetch_list(
        &self,
        endpoint: &str,
        resource: &str,
        cache_key: &str,
    ) -> Result<Vec<Movie>, FetchFailure> {
        if let Some(cached) = self.get_cached_list(cache_key) {
            return Ok(cached);
        }

        let response: MovieListResponse =
            self.fetch_json(&self.build_url(endpoint), resource).await?;
        self.set_cached_list(cache_key.to_string(), response.results.clone());
        Ok(response.results)
    }

    pub async fn fetch_trending(&self) -> Result<Vec<Movie>, FetchFailure> {
        self.fetch_list("/trending/movie/week", "trending movies", "trending")
            .await
    }

    pub async fn fetch_by_category(&self, category: &str) -> Result<Vec<Movie>, FetchFailure> {
        // The keyword goes into the path verbatim; unsupported values are the API's to reject.
        self.fetch_list(
            &format!("/movie/{}", category),
            &format!("{} movies", category),
            category,
        )
        .await
    }

    pub async fn fetch_movie_details(&self, id: MovieId) -> Result<MovieDetail, FetchFailure> {
        if let Some(cached) = self.get_cached_detail(id) {
            return Ok(cached);
        }

        let detail: MovieDetail = self
            .fetch_json(&self.build_url(&format!("/movie/{}", id)), "movie details")
            .await?;
        self.set_cached_detail(id, detail.clone());
        Ok(detail)
    }
}

pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, String> {
    reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| e.to_string())
}

// All four home fetches run concurrently and settle together: one failure
// fails the whole composition, there is no partial render.
pub async fn load_home_content(client: TmdbClient) -> Result<HomeContent, FetchFailure> {
    let (trending, popular, top_rated, upcoming) = tokio::try_join!(
        client.fetch_trending(),
        client.fetch_by_category("popular"),
        client.fetch_by_category("top_rated"),
        client.fetch_by_category("upcoming"),
    )?;

    let hero = trending.first().cloned();

    Ok(HomeContent {
        hero,
        rows: vec![
            RowSection {
                title: String::from(Category::Trending.row_title()),
                category: Category::Trending,
                movies: trending,
            },
            RowSection {
                title: String::from(Category::Popular.row_title()),
                category: Category::Popular,
                movies: popular,
            },
            RowSection {
                title: String::from(Category::TopRated.row_title()),
                category: Category::TopRated,
                movies: top_rated,
            },
            RowSection {
                title: String::from(Category::Upcoming.row_title()),
                category: Category::Upcoming,
                movies: upcoming,
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LIST_BODY: &str = r#"{
        "page": 1,
        "results": [
            {
                "id": 550,
                "title": "Fight Club",
                "overview": "A ticking-time-bomb insomniac.",
                "poster_path": "/fight-club.jpg",
                "backdrop_path": "/fight-club-backdrop.jpg",
                "vote_average": 8.4,
                "release_date": "1999-10-15"
            },
            {
                "id": 603,
                "title": "The Matrix",
                "overview": "A computer hacker learns the truth.",
                "poster_path": "/matrix.jpg",
                "backdrop_path": "/matrix-backdrop.jpg",
                "vote_average": 8.2,
                "release_date": "1999-03-31"
            }
        ],
        "total_pages": 10,
        "total_results": 200
    }"#;

    const DETAIL_BODY: &str = r#"{
        "id": 550,
        "title": "Fight Club",
        "overview": "A ticking-time-bomb insomniac.",
        "poster_path": "/fight-club.jpg",
        "backdrop_path": "/fight-club-backdrop.jpg",
        "vote_average": 8.4,
        "release_date": "1999-10-15",
        "runtime": 139,
        "tagline": "Mischief. Mayhem. Soap.",
        "status": "Released",
        "genres": [
            {"id": 18, "name": "Drama"},
            {"id": 53, "name": "Thriller"}
        ]
    }"#;

    fn test_client(base_url: &str) -> TmdbClient {
        TmdbClient::new(String::from("test-key"), String::from("en-US")).with_base_url(base_url)
    }

    async fn mount_list(server: &MockServer, endpoint: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_string(LIST_BODY))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn category_request_carries_keyword_and_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/popular"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LIST_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let movies = test_client(&server.uri())
            .fetch_by_category("popular")
            .await
            .unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, 550);
        assert_eq!(movies[0].title, "Fight Club");
        assert_eq!(movies[1].release_date.as_deref(), Some("1999-03-31"));
    }

    #[tokio::test]
    async fn unsupported_keyword_is_forwarded_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/definitely_not_a_category"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .fetch_by_category("definitely_not_a_category")
            .await;

        assert_eq!(
            result.unwrap_err(),
            FetchFailure::new("definitely_not_a_category movies")
        );
    }

    #[tokio::test]
    async fn trending_uses_weekly_movie_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/trending/movie/week"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LIST_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let movies = test_client(&server.uri()).fetch_trending().await.unwrap();
        assert_eq!(movies.len(), 2);
    }

    #[tokio::test]
    async fn detail_request_parses_full_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/550"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL_BODY))
            .mount(&server)
            .await;

        let detail = test_client(&server.uri())
            .fetch_movie_details(550)
            .await
            .unwrap();

        assert_eq!(detail.title, "Fight Club");
        assert_eq!(detail.runtime, Some(139));
        assert_eq!(detail.status.as_deref(), Some("Released"));
        assert_eq!(detail.genres.len(), 2);
        assert_eq!(detail.genres[0].name, "Drama");
    }

    #[tokio::test]
    async fn non_success_status_raises_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(
            client.fetch_trending().await.unwrap_err(),
            FetchFailure::new("trending movies")
        );
        assert_eq!(
            client.fetch_by_category("popular").await.unwrap_err(),
            FetchFailure::new("popular movies")
        );
        assert_eq!(
            client.fetch_movie_details(550).await.unwrap_err(),
            FetchFailure::new("movie details")
        );
    }

    #[tokio::test]
    async fn list_responses_are_cached_within_ttl() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/popular"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LIST_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let first = client.fetch_by_category("popular").await.unwrap();
        let second = client.fetch_by_category("popular").await.unwrap();
        assert_eq!(first.len(), second.len());
    }

    #[tokio::test]
    async fn home_content_joins_four_fetches_in_fixed_order() {
        let server = MockServer::start().await;
        mount_list(&server, "/trending/movie/week").await;
        mount_list(&server, "/movie/popular").await;
        mount_list(&server, "/movie/top_rated").await;
        mount_list(&server, "/movie/upcoming").await;

        let home = load_home_content(test_client(&server.uri())).await.unwrap();

        let hero = home.hero.expect("hero comes from the first trending title");
        assert_eq!(hero.id, 550);
        assert_eq!(home.rows.len(), 4);
        let titles: Vec<&str> = home.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Trending Now", "Popular on Streamix", "Top Rated", "Coming Soon"]
        );
    }

    #[tokio::test]
    async fn home_content_fails_when_any_fetch_fails() {
        let server = MockServer::start().await;
        mount_list(&server, "/trending/movie/week").await;
        mount_list(&server, "/movie/popular").await;
        mount_list(&server, "/movie/top_rated").await;
        Mock::given(method("GET"))
            .and(path("/movie/upcoming"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = load_home_content(test_client(&server.uri())).await;
        assert_eq!(result.unwrap_err(), FetchFailure::new("upcoming movies"));
    }

    #[tokio::test]
    async fn home_content_hero_is_none_for_empty_trending() {
        let server = MockServer::start().await;
        let empty = r#"{"page": 1, "results": [], "total_pages": 0, "total_results": 0}"#;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(empty))
            .mount(&server)
            .await;

        let home = load_home_content(test_client(&server.uri())).await.unwrap();
        assert!(home.hero.is_none());
        assert_eq!(home.rows.len(), 4);
        assert!(home.rows.iter().all(|r| r.movies.is_empty()));
    }

    #[test]
    fn image_urls_use_size_tokens() {
        let client = TmdbClient::new(String::from("k"), String::from("en-US"));
        assert_eq!(
            client.image_url("/poster.jpg", ImageSize::Poster),
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
        assert_eq!(
            client.image_url("/backdrop.jpg", ImageSize::Original),
            "https://image.tmdb.org/t/p/original/backdrop.jpg"
        );
    }
}
