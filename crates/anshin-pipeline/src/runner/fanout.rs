//! Concurrent adapter fan-out with per-adapter fault isolation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::Instrument;

use anshin_core::errors::{AnshinError, SourceError};
use anshin_core::models::{CollectionTarget, RawSighting};
use anshin_core::traits::SourceAdapter;
use anshin_observability::{adapter_span, events};

/// Run one adapter under a timeout. Errors and timeouts become an empty list.
async fn collect_one(
    adapter: &dyn SourceAdapter,
    target: &CollectionTarget,
    timeout: Duration,
) -> Vec<RawSighting> {
    let started = Instant::now();
    let result = match tokio::time::timeout(timeout, adapter.collect(target)).await {
        Ok(result) => result,
        Err(_) => Err(AnshinError::from(SourceError::Timeout {
            adapter: adapter.name().to_string(),
            secs: timeout.as_secs(),
        })),
    };
    match result {
        Ok(sightings) => {
            events::adapter_finished(adapter.name(), sightings.len(), started.elapsed().as_millis());
            sightings
        }
        Err(e) => {
            events::adapter_failed(adapter.name(), &e.to_string());
            Vec::new()
        }
    }
}

/// Invoke every adapter concurrently and flatten the results in adapter order.
pub async fn collect_all(
    adapters: &[Arc<dyn SourceAdapter>],
    target: &CollectionTarget,
    timeout: Duration,
) -> Vec<RawSighting> {
    let calls = adapters.iter().map(|adapter| {
        let span = adapter_span!(adapter.name());
        collect_one(adapter.as_ref(), target, timeout).instrument(span)
    });
    join_all(calls).await.into_iter().flatten().collect()
}
