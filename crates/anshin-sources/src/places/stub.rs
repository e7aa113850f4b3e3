use std::sync::atomic::{AtomicUsize, Ordering};

use anshin_core::errors::{AnshinResult, SourceError};
use anshin_core::traits::{PlaceHit, PlaceQuery, PlaceSearch};
use async_trait::async_trait;

/// Offline [`PlaceSearch`] answering from canned results.
///
/// A query returns the hits of every registered needle it contains.
/// `unavailable()` builds an instance that reports no index at all, which
/// drives adapters onto their master-data fallback.
#[derive(Debug, Default)]
pub struct StubPlaceSearch {
    available: bool,
    entries: Vec<(String, Vec<PlaceHit>)>,
    calls: AtomicUsize,
}

impl StubPlaceSearch {
    pub fn new() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn with_hits(mut self, needle: impl Into<String>, hits: Vec<PlaceHit>) -> Self {
        self.entries.push((needle.into(), hits));
        self
    }

    /// Number of searches issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PlaceSearch for StubPlaceSearch {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn search(&self, query: &PlaceQuery) -> AnshinResult<Vec<PlaceHit>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if !self.available {
            return Err(SourceError::MissingCredential {
                name: "places index".to_string(),
            }
            .into());
        }
        Ok(self
            .entries
            .iter()
            .filter(|(needle, _)| query.text.contains(needle.as_str()))
            .flat_map(|(_, hits)| hits.iter().cloned())
            .take(query.max_results as usize)
            .collect())
    }
}
