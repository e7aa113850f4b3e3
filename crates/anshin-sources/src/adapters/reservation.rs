use anshin_core::errors::AnshinResult;
use anshin_core::models::{CollectionTarget, RawSighting, SourceType};
use anshin_core::traits::SourceAdapter;
use async_trait::async_trait;

/// Reservation platforms.
///
/// None of them offers a public API and their terms forbid scraping, so
/// this adapter always reports nothing. Shops listed there still surface
/// through the map adapter.
#[derive(Debug, Default)]
pub struct ReservationAdapter;

#[async_trait]
impl SourceAdapter for ReservationAdapter {
    fn name(&self) -> &str {
        super::RESERVATION
    }

    fn source_type(&self) -> SourceType {
        SourceType::Reservation
    }

    async fn collect(&self, target: &CollectionTarget) -> AnshinResult<Vec<RawSighting>> {
        tracing::debug!(adapter = self.name(), target = %target.descriptor(), "no safe API, skipping");
        Ok(Vec::new())
    }
}
