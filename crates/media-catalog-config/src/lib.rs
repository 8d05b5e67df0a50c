pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{CatalogConfig, Config, TmdbConfig};
pub use credentials::CredentialStore;
pub use paths::{container_base_path, PathManager};
