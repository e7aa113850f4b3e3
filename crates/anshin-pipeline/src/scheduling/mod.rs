//! Sequential multi-job drivers.
//!
//! Both drivers run one job at a time with a fixed pause between jobs to
//! stay inside third-party rate limits, and keep going past a failed job.

pub mod batch;
pub mod mesh;

use std::time::Duration;

use anshin_core::config::CollectionConfig;
use anshin_core::models::JobSummary;

pub use batch::run_uncollected;
pub use mesh::{run_mesh, run_mesh_points};

/// Outcome of an uncollected-areas batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub summaries: Vec<JobSummary>,
    /// (area descriptor, error message) per failed job.
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.summaries.len() + self.failures.len()
    }
}

/// Outcome of a mesh sweep.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub points: usize,
    pub summaries: Vec<JobSummary>,
    pub failed_points: usize,
}

/// Pauses and sizing used by the drivers.
#[derive(Debug, Clone)]
pub struct ScheduleSettings {
    pub inter_job_delay: Duration,
    pub mesh_point_delay: Duration,
    pub batch_size: usize,
    pub stale_after_days: i64,
    pub mesh_radius_m: u32,
    pub grid_step_lat: f64,
    pub grid_step_lng: f64,
}

impl ScheduleSettings {
    pub fn from_config(config: &CollectionConfig) -> Self {
        Self {
            inter_job_delay: Duration::from_secs(config.inter_job_delay_secs),
            mesh_point_delay: Duration::from_secs(config.mesh_point_delay_secs),
            batch_size: config.uncollected_batch_size,
            stale_after_days: config.stale_after_days,
            mesh_radius_m: config.mesh_radius_m,
            grid_step_lat: config.grid_step_lat,
            grid_step_lng: config.grid_step_lng,
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
