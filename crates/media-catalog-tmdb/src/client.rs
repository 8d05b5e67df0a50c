use media_catalog_config::{CatalogConfig, TmdbConfig};
use media_catalog_models::{MediaId, MediaItem, MediaType};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::TmdbError;
use crate::filter;
use crate::types::{Genre, GenreList, Page};

const DEFAULT_SORT: &str = "popularity.desc";

// Both discover surfaces raise the vote floor above the list default to keep
// drive-by entries out of filtered browsing.
const DISCOVER_MIN_VOTES: u32 = 25;

// Search is the one place sparse titles must still be findable by name.
const TV_SEARCH_MIN_VOTES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieCategory {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl MovieCategory {
    fn path(&self) -> &'static str {
        match self {
            MovieCategory::Popular => "popular",
            MovieCategory::TopRated => "top_rated",
            MovieCategory::NowPlaying => "now_playing",
            MovieCategory::Upcoming => "upcoming",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvCategory {
    Popular,
    TopRated,
    AiringToday,
    OnTheAir,
}

impl TvCategory {
    fn path(&self) -> &'static str {
        match self {
            TvCategory::Popular => "popular",
            TvCategory::TopRated => "top_rated",
            TvCategory::AiringToday => "airing_today",
            TvCategory::OnTheAir => "on_the_air",
        }
    }
}

/// Caller-chosen discover refinements. Everything is optional; unset fields
/// are simply not sent.
#[derive(Debug, Clone, Default)]
pub struct DiscoverFilter {
    pub sort_by: Option<String>,
    pub genre_id: Option<i64>,
    pub year: Option<i32>,
    pub min_rating: Option<f64>,
    pub min_runtime: Option<u32>,
    pub max_runtime: Option<u32>,
    /// TV production status, e.g. "0" for returning series.
    pub status: Option<String>,
}

impl DiscoverFilter {
    pub fn is_empty(&self) -> bool {
        self.sort_by.is_none()
            && self.genre_id.is_none()
            && self.year.is_none()
            && self.min_rating.is_none()
            && self.min_runtime.is_none()
            && self.max_runtime.is_none()
            && self.status.is_none()
    }
}

/// Read-only client for the metadata provider's v3 API.
///
/// Every request carries the always-on content filters from
/// [`CatalogConfig`]; the provider is treated as the source of truth for
/// lists and details, and nothing here ever writes provider state.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    language: String,
    token: String,
    catalog: CatalogConfig,
}

impl TmdbClient {
    pub fn new(tmdb: &TmdbConfig, catalog: &CatalogConfig, token: &str) -> Result<Self, TmdbError> {
        if token.trim().is_empty() {
            return Err(TmdbError::MissingToken);
        }
        Ok(Self {
            client: Client::new(),
            base_url: tmdb.base_url.trim_end_matches('/').to_string(),
            language: tmdb.language.clone(),
            token: token.to_string(),
            catalog: catalog.clone(),
        })
    }

    /// Curated movie list (`popular`, `top_rated`, ...), one page at a time.
    pub async fn movie_list(
        &self,
        category: MovieCategory,
        page: u32,
    ) -> Result<Page<MediaItem>, TmdbError> {
        let mut params = self.movie_filters();
        params.push(("page".to_string(), page.to_string()));
        let fetched = self
            .get_page(&format!("/movie/{}", category.path()), &params)
            .await?;
        Ok(tagged(MediaType::Movie, fetched))
    }

    pub async fn tv_list(
        &self,
        category: TvCategory,
        page: u32,
    ) -> Result<Page<MediaItem>, TmdbError> {
        let mut params = self.tv_filters();
        params.push(("page".to_string(), page.to_string()));
        let fetched = self
            .get_page(&format!("/tv/{}", category.path()), &params)
            .await?;
        Ok(tagged(MediaType::Tv, fetched))
    }

    /// Day-window trending for one media type.
    pub async fn trending(&self, media: MediaType) -> Result<Page<MediaItem>, TmdbError> {
        let segment = title_segment(media)?;
        let params = match media {
            MediaType::Tv => self.tv_filters(),
            _ => self.movie_filters(),
        };
        let fetched = self
            .get_page(&format!("/trending/{segment}/day"), &params)
            .await?;
        Ok(tagged(media, fetched))
    }

    pub async fn discover_movies(
        &self,
        filter: &DiscoverFilter,
        page: u32,
    ) -> Result<Page<MediaItem>, TmdbError> {
        let params = self.discover_movie_params(filter, page);
        let fetched = self.get_page("/discover/movie", &params).await?;
        Ok(tagged(MediaType::Movie, fetched))
    }

    pub async fn discover_tv(
        &self,
        filter: &DiscoverFilter,
        page: u32,
    ) -> Result<Page<MediaItem>, TmdbError> {
        let params = self.discover_tv_params(filter, page);
        let fetched = self.get_page("/discover/tv", &params).await?;
        Ok(tagged(MediaType::Tv, fetched))
    }

    /// Mixed search across movies, TV, and other kinds. Results pass through
    /// the client-side catalog filter before they are returned.
    pub async fn search_multi(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Page<MediaItem>, TmdbError> {
        let params = vec![
            ("query".to_string(), query.to_string()),
            ("page".to_string(), page.to_string()),
            include_adult_param(),
        ];
        let fetched = self.get_page("/search/multi", &params).await?;
        let mut converted = self_tagged(fetched);
        converted.results = filter::filter_catalog(converted.results);
        Ok(converted)
    }

    pub async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Page<MediaItem>, TmdbError> {
        let mut params = vec![
            ("query".to_string(), query.to_string()),
            ("page".to_string(), page.to_string()),
        ];
        params.extend(self.movie_filters());
        let fetched = self.get_page("/search/movie", &params).await?;
        Ok(tagged(MediaType::Movie, fetched))
    }

    pub async fn search_tv(&self, query: &str, page: u32) -> Result<Page<MediaItem>, TmdbError> {
        let params = vec![
            ("query".to_string(), query.to_string()),
            ("page".to_string(), page.to_string()),
            include_adult_param(),
            (
                "vote_count.gte".to_string(),
                TV_SEARCH_MIN_VOTES.to_string(),
            ),
        ];
        let fetched = self.get_page("/search/tv", &params).await?;
        Ok(tagged(MediaType::Tv, fetched))
    }

    /// Raw detail payload with credits, videos, and similar titles appended.
    /// Kept as an object so callers can both parse it and store a stripped
    /// copy with the library.
    pub async fn details(
        &self,
        media: MediaType,
        id: &MediaId,
    ) -> Result<Map<String, Value>, TmdbError> {
        let path = format!("/{}/{}", title_segment(media)?, id);
        self.get_json(&path, &details_params()).await
    }

    pub async fn genres(&self, media: MediaType) -> Result<Vec<Genre>, TmdbError> {
        let path = format!("/genre/{}/list", title_segment(media)?);
        let list: GenreList = self.get_json(&path, &[]).await?;
        Ok(list.genres)
    }

    // Always-on movie parameters, matching the configured catalog rules.
    fn movie_filters(&self) -> Vec<(String, String)> {
        vec![
            include_adult_param(),
            (
                "vote_count.gte".to_string(),
                self.catalog.movie_min_votes.to_string(),
            ),
            (
                "certification.lte".to_string(),
                self.catalog.movie_certification_ceiling.clone(),
            ),
        ]
    }

    fn tv_filters(&self) -> Vec<(String, String)> {
        vec![
            include_adult_param(),
            (
                "vote_count.gte".to_string(),
                self.catalog.tv_min_votes.to_string(),
            ),
        ]
    }

    fn discover_movie_params(&self, filter: &DiscoverFilter, page: u32) -> Vec<(String, String)> {
        let mut params = self.movie_filters();
        set_param(&mut params, "vote_count.gte", DISCOVER_MIN_VOTES.to_string());
        params.push(("page".to_string(), page.to_string()));
        params.push((
            "sort_by".to_string(),
            filter
                .sort_by
                .clone()
                .unwrap_or_else(|| DEFAULT_SORT.to_string()),
        ));
        if let Some(genre) = filter.genre_id {
            params.push(("with_genres".to_string(), genre.to_string()));
        }
        if let Some(year) = filter.year {
            params.push(("year".to_string(), year.to_string()));
        }
        if let Some(rating) = filter.min_rating {
            params.push(("vote_average.gte".to_string(), rating.to_string()));
        }
        if let Some(min) = filter.min_runtime {
            params.push(("with_runtime.gte".to_string(), min.to_string()));
        }
        if let Some(max) = filter.max_runtime {
            params.push(("with_runtime.lte".to_string(), max.to_string()));
        }
        params
    }

    fn discover_tv_params(&self, filter: &DiscoverFilter, page: u32) -> Vec<(String, String)> {
        let mut params = self.tv_filters();
        set_param(&mut params, "vote_count.gte", DISCOVER_MIN_VOTES.to_string());
        params.push(("page".to_string(), page.to_string()));
        params.push((
            "sort_by".to_string(),
            filter
                .sort_by
                .clone()
                .unwrap_or_else(|| DEFAULT_SORT.to_string()),
        ));
        if let Some(genre) = filter.genre_id {
            params.push(("with_genres".to_string(), genre.to_string()));
        }
        if let Some(year) = filter.year {
            params.push(("first_air_date_year".to_string(), year.to_string()));
        }
        if let Some(rating) = filter.min_rating {
            params.push(("vote_average.gte".to_string(), rating.to_string()));
        }
        if let Some(status) = &filter.status {
            params.push(("with_status".to_string(), status.clone()));
        }
        params
    }

    async fn get_page(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Page<Map<String, Value>>, TmdbError> {
        let page = self.get_json(path, params).await?;
        Ok(self.clamp(page))
    }

    // The provider rejects requests past the page cap, so the advertised
    // page count is cut down before anyone paginates toward the cliff.
    fn clamp<T>(&self, mut page: Page<T>) -> Page<T> {
        page.total_pages = page.total_pages.min(self.catalog.max_pages);
        page
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .query(&[("language", self.language.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(TmdbError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(TmdbError::NotFound(path.to_string()));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TmdbError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, path = %path, "provider returned an error");
            return Err(TmdbError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(TmdbError::Decode)
    }
}

fn include_adult_param() -> (String, String) {
    ("include_adult".to_string(), "false".to_string())
}

fn details_params() -> Vec<(String, String)> {
    vec![
        (
            "append_to_response".to_string(),
            "credits,videos,similar".to_string(),
        ),
        include_adult_param(),
    ]
}

fn title_segment(media: MediaType) -> Result<&'static str, TmdbError> {
    match media {
        MediaType::Movie => Ok("movie"),
        MediaType::Tv => Ok("tv"),
        MediaType::Unknown => Err(TmdbError::UnsupportedMediaType),
    }
}

// Later values win, mirroring how discover refinements override the list
// defaults.
fn set_param(params: &mut Vec<(String, String)>, key: &str, value: String) {
    if let Some(existing) = params.iter_mut().find(|(name, _)| name == key) {
        existing.1 = value;
    } else {
        params.push((key.to_string(), value));
    }
}

fn tagged(media_type: MediaType, page: Page<Map<String, Value>>) -> Page<MediaItem> {
    page.map(|object| MediaItem::from_object(media_type, object))
}

fn self_tagged(page: Page<Map<String, Value>>) -> Page<MediaItem> {
    page.map(|object| {
        let media_type = object
            .get("media_type")
            .and_then(Value::as_str)
            .map(MediaType::parse)
            .unwrap_or_default();
        MediaItem::from_object(media_type, object)
    })
}
