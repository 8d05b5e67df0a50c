use media_catalog_models::CollectionName;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The item handed to `add` carries no usable id, so it could never be
    /// found or removed again.
    #[error("item has no usable id and cannot be added to '{name}'")]
    InvalidItem { name: CollectionName },

    /// The in-memory collection was updated but writing it back failed. The
    /// mutation is not rolled back; re-saving later may still succeed.
    #[error("failed to persist collection '{name}': {cause}")]
    Persistence {
        name: CollectionName,
        cause: anyhow::Error,
    },
}
