use media_catalog_models::{CollectionName, MediaId, MediaItem};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::kv::PersistedKeyValueStore;

/// Version written with every payload. Bump when the persisted layout
/// changes shape.
const SCHEMA_VERSION: u32 = 1;

/// Envelope written to the backend: `{"version": 1, "items": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
struct Payload<T> {
    version: u32,
    items: T,
}

/// Read-side shape: the current envelope, or the bare array older installs
/// wrote. Untagged, so whichever form parses wins.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredPayload {
    Versioned(Payload<Vec<MediaItem>>),
    Legacy(Vec<MediaItem>),
}

/// Two named, deduplicated, insertion-ordered collections of catalog
/// entries, written back through a [`PersistedKeyValueStore`] after every
/// mutation.
///
/// Uniqueness is keyed on `id` alone: a movie and a TV show sharing an id
/// cannot coexist in one collection. The two collections are otherwise fully
/// independent.
///
/// The store assumes a single logical writer per backing location.
/// Operations are synchronous and unlocked; separate processes writing the
/// same files are last-write-wins. [`load`](CollectionStore::load) replaces
/// in-memory state wholesale, so callers hydrate once at startup rather than
/// mid-session.
pub struct CollectionStore<S: PersistedKeyValueStore> {
    backend: S,
    favorites: Vec<MediaItem>,
    watchlist: Vec<MediaItem>,
}

impl<S: PersistedKeyValueStore> CollectionStore<S> {
    /// An empty store over `backend`. Nothing is read until
    /// [`load`](CollectionStore::load).
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            favorites: Vec::new(),
            watchlist: Vec::new(),
        }
    }

    /// Creates the store and hydrates both collections in one step.
    pub fn open(backend: S) -> Self {
        let mut store = Self::new(backend);
        store.load();
        store
    }

    /// Hydrates both collections from the backend, replacing whatever is in
    /// memory.
    ///
    /// Hydration never fails: a missing key, an unreadable backend, or a
    /// malformed payload all yield an empty collection, logged at `warn`
    /// where data was actually lost. Entries without a usable id are dropped
    /// here so that everything hydrated can later be addressed by `remove`.
    pub fn load(&mut self) {
        self.favorites = self.load_collection(CollectionName::Favorites);
        self.watchlist = self.load_collection(CollectionName::Watchlist);
    }

    /// Adds `item` to `name`. Any existing element with the same id is
    /// removed first and the item is appended at the end, so re-adding moves
    /// an entry to the most-recently-added position. The collection is
    /// persisted before returning; if the write fails the in-memory change
    /// is kept and [`StoreError::Persistence`] propagates.
    pub fn add(
        &mut self,
        name: CollectionName,
        item: MediaItem,
    ) -> Result<&[MediaItem], StoreError> {
        if !item.id.is_usable() {
            return Err(StoreError::InvalidItem { name });
        }

        let id = item.id.clone();
        let items = self.collection_mut(name);
        items.retain(|existing| existing.id != id);
        items.push(item);
        debug!(collection = %name, id = %id, "added item");

        self.persist(name)?;
        Ok(self.collection(name))
    }

    /// Removes the element carrying `id` from `name`, if present. Removing
    /// an absent id is a no-op apart from the write-back.
    pub fn remove(
        &mut self,
        name: CollectionName,
        id: &MediaId,
    ) -> Result<&[MediaItem], StoreError> {
        let items = self.collection_mut(name);
        let before = items.len();
        items.retain(|existing| existing.id != *id);
        if items.len() < before {
            debug!(collection = %name, id = %id, "removed item");
        }

        self.persist(name)?;
        Ok(self.collection(name))
    }

    /// Membership test by id. Never fails and never touches the backend.
    pub fn contains(&self, name: CollectionName, id: &MediaId) -> bool {
        self.collection(name)
            .iter()
            .any(|item| item.id == *id)
    }

    /// Live contents of `name` in insertion order.
    pub fn list(&self, name: CollectionName) -> &[MediaItem] {
        self.collection(name)
    }

    fn load_collection(&self, name: CollectionName) -> Vec<MediaItem> {
        let raw = match self.backend.get(name.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(collection = %name, "no persisted data, starting empty");
                return Vec::new();
            }
            Err(error) => {
                warn!(
                    collection = %name,
                    error = %error,
                    "could not read persisted collection, starting empty"
                );
                return Vec::new();
            }
        };

        let items = match serde_json::from_str::<StoredPayload>(&raw) {
            Ok(StoredPayload::Versioned(payload)) => {
                if payload.version > SCHEMA_VERSION {
                    warn!(
                        collection = %name,
                        version = payload.version,
                        "collection was written by a newer schema, loading anyway"
                    );
                }
                payload.items
            }
            Ok(StoredPayload::Legacy(items)) => {
                debug!(
                    collection = %name,
                    "found version-less payload, it will be rewritten on the next save"
                );
                items
            }
            Err(error) => {
                warn!(
                    collection = %name,
                    error = %error,
                    "malformed persisted collection, starting empty"
                );
                return Vec::new();
            }
        };

        let total = items.len();
        let items: Vec<MediaItem> = items
            .into_iter()
            .filter(|item| item.id.is_usable())
            .collect();
        if items.len() < total {
            warn!(
                collection = %name,
                dropped = total - items.len(),
                "dropped persisted entries without a usable id"
            );
        }
        items
    }

    fn persist(&self, name: CollectionName) -> Result<(), StoreError> {
        let payload = Payload {
            version: SCHEMA_VERSION,
            items: self.collection(name),
        };
        let encoded = serde_json::to_string_pretty(&payload).map_err(|error| {
            StoreError::Persistence {
                name,
                cause: error.into(),
            }
        })?;
        self.backend
            .set(name.as_str(), &encoded)
            .map_err(|cause| StoreError::Persistence { name, cause })?;
        Ok(())
    }

    fn collection(&self, name: CollectionName) -> &[MediaItem] {
        match name {
            CollectionName::Favorites => &self.favorites,
            CollectionName::Watchlist => &self.watchlist,
        }
    }

    fn collection_mut(&mut self, name: CollectionName) -> &mut Vec<MediaItem> {
        match name {
            CollectionName::Favorites => &mut self.favorites,
            CollectionName::Watchlist => &mut self.watchlist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{JsonFileStore, MemoryStore};
    use media_catalog_models::MediaType;
    use serde_json::json;

    fn movie(id: i64, title: &str) -> MediaItem {
        MediaItem::new(id, MediaType::Movie).with_field("title", json!(title))
    }

    fn ids(items: &[MediaItem]) -> Vec<MediaId> {
        items.iter().map(|item| item.id.clone()).collect()
    }

    struct FailingStore;

    impl PersistedKeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[test]
    fn test_add_then_contains() {
        let mut store = CollectionStore::open(MemoryStore::new());
        store
            .add(CollectionName::Favorites, movie(603, "The Matrix"))
            .unwrap();

        assert!(store.contains(CollectionName::Favorites, &MediaId::Number(603)));
        assert!(!store.contains(CollectionName::Watchlist, &MediaId::Number(603)));
    }

    #[test]
    fn test_add_rejects_items_without_usable_id() {
        let backend = MemoryStore::new();
        let mut store = CollectionStore::open(backend.clone());

        let result = store.add(CollectionName::Favorites, movie(1, "ok"));
        assert!(result.is_ok());

        let blank = MediaItem::new("", MediaType::Movie).with_field("title", json!("nameless"));
        let error = store.add(CollectionName::Favorites, blank).unwrap_err();
        assert!(matches!(error, StoreError::InvalidItem { .. }));

        // The failed add must not disturb the collection or re-persist it.
        assert_eq!(store.list(CollectionName::Favorites).len(), 1);
        assert!(!backend.snapshot("favorites").unwrap().contains("nameless"));
    }

    #[test]
    fn test_re_add_replaces_and_moves_to_end() {
        let mut store = CollectionStore::open(MemoryStore::new());
        store.add(CollectionName::Favorites, movie(5, "Heat")).unwrap();
        store.add(CollectionName::Favorites, movie(7, "Alien")).unwrap();

        let updated = store
            .add(CollectionName::Favorites, movie(5, "Heat (Remastered)"))
            .unwrap();

        assert_eq!(
            ids(updated),
            vec![MediaId::Number(7), MediaId::Number(5)]
        );
        assert_eq!(updated[1].title(), Some("Heat (Remastered)"));
        assert_eq!(updated.len(), 2);
    }

    #[test]
    fn test_remove_then_contains_is_false() {
        let mut store = CollectionStore::open(MemoryStore::new());
        store.add(CollectionName::Watchlist, movie(42, "Blow Out")).unwrap();

        store
            .remove(CollectionName::Watchlist, &MediaId::Number(42))
            .unwrap();

        assert!(!store.contains(CollectionName::Watchlist, &MediaId::Number(42)));
        assert!(store.list(CollectionName::Watchlist).is_empty());
    }

    #[test]
    fn test_remove_of_absent_id_is_a_noop() {
        let mut store = CollectionStore::open(MemoryStore::new());
        store.add(CollectionName::Favorites, movie(1, "Ran")).unwrap();

        let after = store
            .remove(CollectionName::Favorites, &MediaId::Number(999))
            .unwrap();

        assert_eq!(ids(after), vec![MediaId::Number(1)]);
    }

    #[test]
    fn test_collections_are_independent() {
        let mut store = CollectionStore::open(MemoryStore::new());
        store.add(CollectionName::Favorites, movie(5, "Heat")).unwrap();
        store
            .add(
                CollectionName::Watchlist,
                MediaItem::new(5, MediaType::Tv).with_field("name", json!("Heat: The Series")),
            )
            .unwrap();

        store
            .remove(CollectionName::Favorites, &MediaId::Number(5))
            .unwrap();

        assert!(!store.contains(CollectionName::Favorites, &MediaId::Number(5)));
        assert!(store.contains(CollectionName::Watchlist, &MediaId::Number(5)));
    }

    #[test]
    fn test_numeric_and_text_ids_are_distinct_members() {
        let mut store = CollectionStore::open(MemoryStore::new());
        store.add(CollectionName::Favorites, movie(5, "Heat")).unwrap();
        store
            .add(
                CollectionName::Favorites,
                MediaItem::new("5", MediaType::Movie).with_field("title", json!("Five")),
            )
            .unwrap();

        assert_eq!(store.list(CollectionName::Favorites).len(), 2);
        assert!(store.contains(CollectionName::Favorites, &MediaId::Number(5)));
        assert!(store.contains(CollectionName::Favorites, &MediaId::Text("5".into())));
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let backend = MemoryStore::new();
        let mut store = CollectionStore::open(backend.clone());
        store.add(CollectionName::Favorites, movie(3, "Third")).unwrap();
        store.add(CollectionName::Favorites, movie(1, "First")).unwrap();
        store
            .add(
                CollectionName::Favorites,
                movie(2, "Second").with_field("vote_average", json!(7.9)),
            )
            .unwrap();

        let reloaded = CollectionStore::open(backend);
        let items = reloaded.list(CollectionName::Favorites);

        assert_eq!(
            ids(items),
            vec![MediaId::Number(3), MediaId::Number(1), MediaId::Number(2)]
        );
        assert_eq!(items[2].vote_average(), Some(7.9));
    }

    #[test]
    fn test_round_trip_of_an_emptied_collection() {
        let backend = MemoryStore::new();
        let mut store = CollectionStore::open(backend.clone());
        store.add(CollectionName::Watchlist, movie(9, "Solaris")).unwrap();
        store
            .remove(CollectionName::Watchlist, &MediaId::Number(9))
            .unwrap();

        let reloaded = CollectionStore::open(backend);
        assert!(reloaded.list(CollectionName::Watchlist).is_empty());
    }

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileStore::new(dir.path());

        let mut store = CollectionStore::open(backend.clone());
        store.add(CollectionName::Favorites, movie(603, "The Matrix")).unwrap();
        store.add(CollectionName::Watchlist, movie(27205, "Inception")).unwrap();

        let reloaded = CollectionStore::open(JsonFileStore::new(dir.path()));
        assert_eq!(
            ids(reloaded.list(CollectionName::Favorites)),
            vec![MediaId::Number(603)]
        );
        assert_eq!(
            ids(reloaded.list(CollectionName::Watchlist)),
            vec![MediaId::Number(27205)]
        );
    }

    #[test]
    fn test_persisted_payload_is_a_versioned_envelope() {
        let backend = MemoryStore::new();
        let mut store = CollectionStore::open(backend.clone());
        store.add(CollectionName::Favorites, movie(603, "The Matrix")).unwrap();

        let raw = backend.snapshot("favorites").unwrap();
        let payload: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(payload["version"], json!(1));
        assert_eq!(payload["items"][0]["id"], json!(603));
    }

    #[test]
    fn test_legacy_bare_array_payload_still_loads() {
        let backend = MemoryStore::new();
        backend.insert_raw(
            "watchlist",
            r#"[{"id": 5, "media_type": "movie", "title": "Heat"}]"#,
        );

        let mut store = CollectionStore::open(backend.clone());
        assert_eq!(
            ids(store.list(CollectionName::Watchlist)),
            vec![MediaId::Number(5)]
        );

        // The next save upgrades the payload to the envelope.
        store.add(CollectionName::Watchlist, movie(7, "Alien")).unwrap();
        let raw = backend.snapshot("watchlist").unwrap();
        let payload: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(payload["version"], json!(1));
        assert_eq!(payload["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_payload_loads_as_empty() {
        let backend = MemoryStore::new();
        backend.insert_raw("favorites", "{definitely not json");
        backend.insert_raw("watchlist", r#"{"items": "wrong shape"}"#);

        let store = CollectionStore::open(backend);
        assert!(store.list(CollectionName::Favorites).is_empty());
        assert!(store.list(CollectionName::Watchlist).is_empty());
    }

    #[test]
    fn test_malformed_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("favorites.json"), "corrupted!!").unwrap();

        let store = CollectionStore::open(JsonFileStore::new(dir.path()));
        assert!(store.list(CollectionName::Favorites).is_empty());
    }

    #[test]
    fn test_load_drops_entries_without_usable_ids() {
        let backend = MemoryStore::new();
        backend.insert_raw(
            "favorites",
            r#"{"version": 1, "items": [
                {"id": 1, "media_type": "movie", "title": "kept"},
                {"id": "", "media_type": "movie", "title": "blank id"},
                {"media_type": "tv", "name": "no id at all"}
            ]}"#,
        );

        let store = CollectionStore::open(backend);
        assert_eq!(
            ids(store.list(CollectionName::Favorites)),
            vec![MediaId::Number(1)]
        );
    }

    #[test]
    fn test_load_replaces_unsaved_state() {
        let backend = MemoryStore::new();
        let mut store = CollectionStore::open(backend.clone());
        store.add(CollectionName::Favorites, movie(1, "old")).unwrap();

        backend.insert_raw(
            "favorites",
            r#"{"version": 1, "items": [{"id": 9, "media_type": "movie", "title": "new"}]}"#,
        );
        store.load();

        assert_eq!(
            ids(store.list(CollectionName::Favorites)),
            vec![MediaId::Number(9)]
        );
    }

    #[test]
    fn test_persist_failure_keeps_the_in_memory_mutation() {
        let mut store = CollectionStore::new(FailingStore);

        let error = store
            .add(CollectionName::Favorites, movie(603, "The Matrix"))
            .unwrap_err();

        assert!(matches!(error, StoreError::Persistence { .. }));
        assert!(store.contains(CollectionName::Favorites, &MediaId::Number(603)));
        assert_eq!(store.list(CollectionName::Favorites).len(), 1);
    }
}
