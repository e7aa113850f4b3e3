mod collection_store;
mod place_search;
mod source_adapter;

pub use collection_store::CollectionStore;
pub use place_search::{PlaceHit, PlaceQuery, PlaceSearch};
pub use source_adapter::SourceAdapter;
