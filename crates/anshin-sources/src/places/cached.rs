use std::sync::Arc;

use anshin_core::errors::AnshinResult;
use anshin_core::traits::{PlaceHit, PlaceQuery, PlaceSearch};
use async_trait::async_trait;

use crate::cache::LookupCache;

/// Memoizes identical queries for the lifetime of one job.
///
/// The chain-matrix and map adapters often issue overlapping queries; this
/// wrapper answers repeats from the job's [`LookupCache`].
pub struct CachedPlaceSearch {
    inner: Arc<dyn PlaceSearch>,
    cache: LookupCache<Vec<PlaceHit>>,
}

impl CachedPlaceSearch {
    pub fn new(inner: Arc<dyn PlaceSearch>, cache: LookupCache<Vec<PlaceHit>>) -> Self {
        Self { inner, cache }
    }

    fn key(query: &PlaceQuery) -> String {
        match query.location_bias {
            Some((c, r)) => format!("{}|{:.5},{:.5},{}|{}", query.text, c.lat, c.lng, r, query.max_results),
            None => format!("{}|-|{}", query.text, query.max_results),
        }
    }
}

#[async_trait]
impl PlaceSearch for CachedPlaceSearch {
    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    async fn search(&self, query: &PlaceQuery) -> AnshinResult<Vec<PlaceHit>> {
        let key = Self::key(query);
        if let Some(hits) = self.cache.get(&key) {
            tracing::trace!(query = %query.text, "places cache hit");
            return Ok(hits);
        }
        let hits = self.inner.search(query).await?;
        self.cache.insert(key, hits.clone());
        Ok(hits)
    }
}
