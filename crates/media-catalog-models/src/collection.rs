use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two user-facing collections. The lowercase form doubles as the
/// persistence key and the CLI spelling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CollectionName {
    Favorites,
    Watchlist,
}

impl CollectionName {
    pub const ALL: [CollectionName; 2] = [CollectionName::Favorites, CollectionName::Watchlist];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Favorites => "favorites",
            CollectionName::Watchlist => "watchlist",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionName {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "favorites" => Ok(CollectionName::Favorites),
            "watchlist" => Ok(CollectionName::Watchlist),
            other => Err(format!(
                "unknown collection '{other}', expected 'favorites' or 'watchlist'"
            )),
        }
    }
}
