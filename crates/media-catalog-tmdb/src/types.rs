use chrono::Datelike;
use media_catalog_models::{MediaItem, MediaType};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One page of a paged endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "default_page_number")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn default_page_number() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            results: self.results.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub site: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimilarList {
    #[serde(default)]
    pub results: Vec<Map<String, Value>>,
}

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

// Sparse TV entries crowd the similar rail; entries below this vote count
// are skipped for TV only.
const SIMILAR_TV_MIN_VOTES: u64 = 25;

/// Parsed view of a movie or TV detail response fetched with
/// `append_to_response=credits,videos,similar`. Movie-only and TV-only
/// fields are both optional so one type covers either endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TitleDetails {
    pub title: Option<String>,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub runtime: Option<u32>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub status: Option<String>,
    pub poster_path: Option<String>,
    pub genres: Vec<Genre>,
    pub credits: Credits,
    pub videos: VideoList,
    pub similar: SimilarList,
}

impl TitleDetails {
    pub fn parse(object: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(object.clone()))
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    pub fn year(&self) -> Option<i32> {
        parse_year(
            self.release_date
                .as_deref()
                .or(self.first_air_date.as_deref())?,
        )
    }

    /// URL of the first YouTube video tagged as a trailer, if any.
    pub fn trailer_url(&self) -> Option<String> {
        self.videos
            .results
            .iter()
            .find(|video| video.kind == "Trailer" && video.site == "YouTube")
            .map(|video| format!("{YOUTUBE_WATCH_URL}{}", video.key))
    }

    pub fn top_cast(&self, limit: usize) -> &[CastMember] {
        let end = self.credits.cast.len().min(limit);
        &self.credits.cast[..end]
    }

    /// Similar titles as catalog entries, tagged with `media_type`.
    pub fn similar_items(&self, media_type: MediaType, limit: usize) -> Vec<MediaItem> {
        self.similar
            .results
            .iter()
            .cloned()
            .map(|object| MediaItem::from_object(media_type, object))
            .filter(|item| {
                media_type != MediaType::Tv
                    || item.vote_count().unwrap_or(0) > SIMILAR_TV_MIN_VOTES
            })
            .take(limit)
            .collect()
    }
}

fn parse_year(date: &str) -> Option<i32> {
    if let Ok(parsed) = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.year());
    }
    date.get(..4)?.parse().ok()
}

/// Keys of a detail response that exist only for rendering. They are removed
/// before an entry is stored with the library, keeping persisted records the
/// size of a list result.
const DETAIL_ONLY_KEYS: [&str; 3] = ["credits", "videos", "similar"];

pub fn library_item(media_type: MediaType, mut object: Map<String, Value>) -> MediaItem {
    for key in DETAIL_ONLY_KEYS {
        object.remove(key);
    }
    MediaItem::from_object(media_type, object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_catalog_models::MediaId;
    use serde_json::json;

    fn details_payload() -> Map<String, Value> {
        match json!({
            "id": 1396,
            "name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "number_of_seasons": 5,
            "number_of_episodes": 62,
            "vote_average": 8.9,
            "genres": [{"id": 18, "name": "Drama"}],
            "credits": {"cast": [
                {"name": "Bryan Cranston", "character": "Walter White"},
                {"name": "Aaron Paul", "character": "Jesse Pinkman"}
            ]},
            "videos": {"results": [
                {"key": "t1", "type": "Teaser", "site": "YouTube"},
                {"key": "v1", "type": "Trailer", "site": "Vimeo"},
                {"key": "XZ8daibM3AE", "type": "Trailer", "site": "YouTube"},
                {"key": "late", "type": "Trailer", "site": "YouTube"}
            ]},
            "similar": {"results": [
                {"id": 60059, "name": "Better Call Saul", "vote_count": 5000},
                {"id": 999, "name": "Obscure Spinoff", "vote_count": 3}
            ]}
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_parse_reads_tv_fields() {
        let details = TitleDetails::parse(&details_payload()).unwrap();
        assert_eq!(details.display_title(), "Breaking Bad");
        assert_eq!(details.year(), Some(2008));
        assert_eq!(details.number_of_seasons, Some(5));
        assert_eq!(details.genres[0].name, "Drama");
    }

    #[test]
    fn test_trailer_url_picks_the_first_youtube_trailer() {
        let details = TitleDetails::parse(&details_payload()).unwrap();
        assert_eq!(
            details.trailer_url().unwrap(),
            "https://www.youtube.com/watch?v=XZ8daibM3AE"
        );
    }

    #[test]
    fn test_trailer_url_is_none_without_a_match() {
        let details = TitleDetails::default();
        assert_eq!(details.trailer_url(), None);
    }

    #[test]
    fn test_top_cast_clamps_to_available() {
        let details = TitleDetails::parse(&details_payload()).unwrap();
        assert_eq!(details.top_cast(18).len(), 2);
        assert_eq!(details.top_cast(1)[0].name, "Bryan Cranston");
    }

    #[test]
    fn test_similar_tv_items_drop_sparse_entries() {
        let details = TitleDetails::parse(&details_payload()).unwrap();
        let similar = details.similar_items(MediaType::Tv, 12);
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].id, MediaId::Number(60059));
    }

    #[test]
    fn test_library_item_strips_detail_only_keys() {
        let item = library_item(MediaType::Tv, details_payload());
        assert_eq!(item.id, MediaId::Number(1396));
        assert_eq!(item.media_type, MediaType::Tv);
        assert_eq!(item.title(), Some("Breaking Bad"));
        assert!(item.fields.get("credits").is_none());
        assert!(item.fields.get("videos").is_none());
        assert!(item.fields.get("similar").is_none());
        assert!(item.fields.get("number_of_seasons").is_some());
    }
}
