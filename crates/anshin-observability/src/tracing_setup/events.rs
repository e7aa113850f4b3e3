//! Structured log events for the job lifecycle.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

pub fn job_started(job_id: &str, area: &str, adapters: usize) {
    tracing::info!(
        event = "job_started",
        job_id = %job_id,
        area = %area,
        adapters = adapters,
        "collection job started"
    );
}

pub fn job_completed(job_id: &str, collected: u32, processed: u32) {
    tracing::info!(
        event = "job_completed",
        job_id = %job_id,
        collected = collected,
        processed = processed,
        "collection job completed"
    );
}

pub fn job_failed(job_id: &str, error: &str) {
    tracing::error!(
        event = "job_failed",
        job_id = %job_id,
        error = %error,
        "collection job failed"
    );
}

/// An adapter error or timeout, replaced by an empty result.
pub fn adapter_failed(adapter: &str, error: &str) {
    tracing::warn!(
        event = "adapter_failed",
        adapter = %adapter,
        error = %error,
        "adapter failed; continuing with no results"
    );
}

pub fn adapter_finished(adapter: &str, sightings: usize, elapsed_ms: u128) {
    tracing::info!(
        event = "adapter_finished",
        adapter = %adapter,
        sightings = sightings,
        elapsed_ms = elapsed_ms as u64,
        "adapter finished"
    );
}

pub fn candidates_persisted(job_id: &str, new_shops: u32, updates: u32) {
    tracing::info!(
        event = "candidates_persisted",
        job_id = %job_id,
        new_shops = new_shops,
        updates = updates,
        "candidates persisted"
    );
}

/// A source served placeholder data instead of live results.
pub fn fallback_used(component: &str, reason: &str, items: usize) {
    tracing::warn!(
        event = "fallback_used",
        component = %component,
        reason = %reason,
        items = items,
        "fallback used"
    );
}
