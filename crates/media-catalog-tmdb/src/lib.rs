pub mod client;
pub mod error;
pub mod filter;
pub mod images;
pub mod types;

pub use client::{DiscoverFilter, MovieCategory, TmdbClient, TvCategory};
pub use error::TmdbError;
pub use types::{library_item, CastMember, Genre, Page, TitleDetails};
