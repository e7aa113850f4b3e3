//! # anshin-sources
//!
//! External sources of shop sightings. Each adapter implements
//! [`SourceAdapter`](anshin_core::traits::SourceAdapter) over a shared
//! retrying HTTP transport; map-backed adapters go through the narrow
//! [`PlaceSearch`](anshin_core::traits::PlaceSearch) capability so tests and
//! offline runs can substitute [`places::StubPlaceSearch`].

pub mod adapters;
pub mod cache;
pub mod chains;
pub mod places;
pub mod registry;
pub mod search;
pub mod transport;

pub use cache::LookupCache;
pub use chains::{ChainBrand, ChainMaster, ChainMenu};
pub use places::{CachedPlaceSearch, GooglePlacesClient, StubPlaceSearch};
pub use registry::SourceRegistry;
pub use search::{CustomSearchClient, SearchItem};
pub use transport::{HttpClient, HttpClientConfig};
