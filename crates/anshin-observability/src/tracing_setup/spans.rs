//! Span definitions for a job, one adapter call, and the merge pass.

/// Span covering one collection job.
#[macro_export]
macro_rules! job_span {
    ($job_id:expr, $area:expr) => {
        tracing::info_span!("anshin.job", job_id = %$job_id, area = %$area)
    };
}

/// Span covering one adapter's collect call.
#[macro_export]
macro_rules! adapter_span {
    ($adapter:expr) => {
        tracing::info_span!("anshin.adapter", adapter = %$adapter)
    };
}

/// Span covering dedup, merge and post-merge phases.
#[macro_export]
macro_rules! merge_span {
    ($sightings:expr) => {
        tracing::info_span!("anshin.merge", sightings = $sightings)
    };
}

pub mod names {
    pub const JOB: &str = "anshin.job";
    pub const ADAPTER: &str = "anshin.adapter";
    pub const MERGE: &str = "anshin.merge";
}
