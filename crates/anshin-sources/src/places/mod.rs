//! [`PlaceSearch`](anshin_core::traits::PlaceSearch) implementations.

mod cached;
mod google;
mod stub;

pub use cached::CachedPlaceSearch;
pub use google::GooglePlacesClient;
pub use stub::StubPlaceSearch;
