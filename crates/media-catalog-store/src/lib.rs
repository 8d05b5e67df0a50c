pub mod error;
pub mod kv;
pub mod store;

pub use error::StoreError;
pub use kv::{JsonFileStore, MemoryStore, PersistedKeyValueStore};
pub use store::CollectionStore;
