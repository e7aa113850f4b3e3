//! # anshin-pipeline
//!
//! Orchestration of one collection job: adapter fan-out, audit snapshot,
//! merge, incremental update detection and candidate persistence, plus
//! the sequential drivers for uncollected-area batches and mesh sweeps.

pub mod candidates;
pub mod incremental;
pub mod provider;
pub mod runner;
pub mod scheduling;

pub use incremental::{DetectionOutcome, IncrementalDetector};
pub use provider::{AdapterProvider, StaticAdapters};
pub use runner::{build_merge_engine, JobRunner, RunnerSettings};
pub use scheduling::{BatchReport, ScheduleSettings, SweepReport};
