use async_trait::async_trait;

use crate::errors::AnshinResult;
use crate::models::{CollectionTarget, RawSighting, SourceType};

/// One external source of shop sightings.
///
/// Adapters that only understand named areas return an empty list for
/// spatial targets. Errors are reported, never panicked; the job runner
/// downgrades them to an empty result.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Stable adapter name used in config and logs.
    fn name(&self) -> &str;

    fn source_type(&self) -> SourceType;

    async fn collect(&self, target: &CollectionTarget) -> AnshinResult<Vec<RawSighting>>;
}
