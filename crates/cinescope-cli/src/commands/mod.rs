pub mod browse;
pub mod clear;
pub mod config;
pub mod library;
pub mod prompts;
pub mod render;
pub mod search;
pub mod show;

use clap::ValueEnum;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use media_catalog_config::{Config, CredentialStore, PathManager};
use media_catalog_models::{CollectionName, MediaId, MediaType};
use media_catalog_store::{CollectionStore, JsonFileStore};
use media_catalog_tmdb::TmdbClient;

/// CLI spelling of the two collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollectionArg {
    Favorites,
    Watchlist,
}

impl CollectionArg {
    pub fn name(self) -> CollectionName {
        match self {
            CollectionArg::Favorites => CollectionName::Favorites,
            CollectionArg::Watchlist => CollectionName::Watchlist,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MediaArg {
    Movie,
    Tv,
}

impl MediaArg {
    pub fn media_type(self) -> MediaType {
        match self {
            MediaArg::Movie => MediaType::Movie,
            MediaArg::Tv => MediaType::Tv,
        }
    }
}

/// Id argument as typed by the user. Digits become the provider's numeric
/// form; anything else is kept as text, matching how ids serialize.
pub fn parse_media_id(raw: &str) -> Result<MediaId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(eyre!("id must not be empty"));
    }
    Ok(match trimmed.parse::<i64>() {
        Ok(number) => MediaId::Number(number),
        Err(_) => MediaId::Text(trimmed.to_string()),
    })
}

/// Shared per-invocation context: resolved paths and loaded configuration.
pub struct App {
    pub paths: PathManager,
    pub config: Config,
}

impl App {
    pub fn new() -> Result<Self> {
        let paths = PathManager::default();
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to prepare data directories: {}", e))?;
        let config = Config::load_or_default(&paths.config_file());
        config
            .validate()
            .map_err(|e| eyre!("Invalid configuration: {}", e))?;
        Ok(Self { paths, config })
    }

    /// The collection store, hydrated from the library directory.
    pub fn open_store(&self) -> CollectionStore<JsonFileStore> {
        CollectionStore::open(JsonFileStore::new(self.paths.library_dir()))
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        let mut store = CredentialStore::new(self.paths.credentials_file());
        store
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
        Ok(store)
    }

    pub fn client(&self) -> Result<TmdbClient> {
        let credentials = self.credentials()?;
        let token = credentials.get_tmdb_api_token().cloned().unwrap_or_default();
        TmdbClient::new(&self.config.tmdb, &self.config.catalog, &token)
            .map_err(|e| eyre!("{}", e))
    }
}
