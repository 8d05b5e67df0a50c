use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::MediaId;

/// Provider-side classification of an entry.
///
/// Multi search can return kinds the catalog does not handle (people, for
/// one); those deserialize to `Unknown` instead of failing the whole page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
    #[serde(other)]
    Unknown,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Unknown => "unknown",
        }
    }

    /// Lenient parse for values embedded in provider payloads.
    pub fn parse(value: &str) -> MediaType {
        match value {
            "movie" => MediaType::Movie,
            "tv" => MediaType::Tv,
            _ => MediaType::Unknown,
        }
    }
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Unknown
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog entry.
///
/// Only `id` and `media_type` are interpreted. Everything else the provider
/// sent rides along untouched in `fields` and is persisted exactly as it
/// arrived, so entries written today still carry whatever the provider adds
/// next year. The accessors read common provider fields out of the bag
/// without requiring any of them to be present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    #[serde(default)]
    pub id: MediaId,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MediaItem {
    pub fn new(id: impl Into<MediaId>, media_type: MediaType) -> Self {
        Self {
            id: id.into(),
            media_type,
            fields: Map::new(),
        }
    }

    /// Builds an entry from a raw provider object, tagging it with
    /// `media_type`. The `id` and `media_type` keys are lifted out of the
    /// object so they are not carried twice.
    pub fn from_object(media_type: MediaType, mut fields: Map<String, Value>) -> Self {
        let id = fields
            .remove("id")
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();
        fields.remove("media_type");
        Self {
            id,
            media_type,
            fields,
        }
    }

    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Display title: movies carry `title`, TV carries `name`.
    pub fn title(&self) -> Option<&str> {
        self.str_field("title").or_else(|| self.str_field("name"))
    }

    /// `release_date` for movies, `first_air_date` for TV.
    pub fn release_date(&self) -> Option<&str> {
        self.str_field("release_date")
            .or_else(|| self.str_field("first_air_date"))
    }

    /// Release year, if the release date is present and parseable.
    pub fn year(&self) -> Option<i32> {
        let date = self.release_date()?;
        if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            return Some(parsed.year());
        }
        // Partial dates like "1994" still show up in older records.
        date.get(..4)?.parse().ok()
    }

    pub fn overview(&self) -> Option<&str> {
        self.str_field("overview")
    }

    pub fn poster_path(&self) -> Option<&str> {
        self.str_field("poster_path")
    }

    pub fn vote_average(&self) -> Option<f64> {
        self.fields.get("vote_average").and_then(Value::as_f64)
    }

    pub fn vote_count(&self) -> Option<u64> {
        self.fields.get("vote_count").and_then(Value::as_u64)
    }
}
