pub mod collection;
pub mod id;
pub mod media;

pub use collection::CollectionName;
pub use id::MediaId;
pub use media::{MediaItem, MediaType};
