use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Sent as the `language` parameter on every provider request.
    #[serde(default = "default_language")]
    pub language: String,
}

/// Knobs for the always-on result filtering. The defaults mirror what the
/// provider-facing layer sends when nothing is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Minimum vote count attached to movie list and search requests.
    #[serde(default = "default_movie_min_votes")]
    pub movie_min_votes: u32,
    /// Minimum vote count attached to TV list requests.
    #[serde(default = "default_tv_min_votes")]
    pub tv_min_votes: u32,
    /// Highest certification allowed in movie results.
    #[serde(default = "default_movie_certification_ceiling")]
    pub movie_certification_ceiling: String,
    /// The provider rejects pages past this point.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_movie_min_votes() -> u32 {
    5
}

fn default_tv_min_votes() -> u32 {
    25
}

fn default_movie_certification_ceiling() -> String {
    "R".to_string()
}

fn default_max_pages() -> u32 {
    500
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            movie_min_votes: default_movie_min_votes(),
            tv_min_votes: default_tv_min_votes(),
            movie_certification_ceiling: default_movie_certification_ceiling(),
            max_pages: default_max_pages(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb: TmdbConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads the config if the file exists and parses, falling back to
    /// defaults otherwise. A broken file is reported but never fatal.
    pub fn load_or_default(path: &PathBuf) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(error) => {
                warn!(path = %path.display(), error = %error, "ignoring unreadable config file");
                Self::default()
            }
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.base_url.trim().is_empty() {
            anyhow::bail!("tmdb.base_url must not be empty");
        }
        if self.tmdb.image_base_url.trim().is_empty() {
            anyhow::bail!("tmdb.image_base_url must not be empty");
        }
        if self.catalog.max_pages == 0 {
            anyhow::bail!("catalog.max_pages must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_save_load() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut config = Config::default();
        config.catalog.movie_min_votes = 50;
        config.tmdb.base_url = "http://localhost:9090/3".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.catalog.movie_min_votes, 50);
        assert_eq!(loaded.catalog.tv_min_votes, 25);
        assert_eq!(loaded.tmdb.base_url, "http://localhost:9090/3");
        assert_eq!(loaded.catalog.movie_certification_ceiling, "R");
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();
        std::fs::write(&path, "[catalog]\nmax_pages = 100\n").unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.catalog.max_pages, 100);
        assert_eq!(loaded.tmdb.base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    fn test_load_or_default_survives_a_broken_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();
        std::fs::write(&path, "not [valid toml").unwrap();

        let loaded = Config::load_or_default(&path);
        assert_eq!(loaded.catalog.max_pages, 500);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.catalog.max_pages = 0;
        assert!(config.validate().is_err());

        config.catalog.max_pages = 500;
        config.tmdb.base_url = String::new();
        assert!(config.validate().is_err());
    }
}
