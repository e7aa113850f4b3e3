use serde::{Deserialize, Serialize};

use super::defaults;

/// Job runner and sweep scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Maximum raw sightings written to the audit snapshot per job.
    pub raw_snapshot_cap: usize,
    /// Pause between consecutive jobs of an uncollected-areas batch.
    pub inter_job_delay_secs: u64,
    /// Pause between consecutive mesh points.
    pub mesh_point_delay_secs: u64,
    /// Number of areas processed by one uncollected-areas batch.
    pub uncollected_batch_size: usize,
    /// Areas whose last collection is older than this are due again.
    pub stale_after_days: i64,
    /// Search radius around each mesh point, in meters.
    pub mesh_radius_m: u32,
    /// Mesh grid step in degrees latitude.
    pub grid_step_lat: f64,
    /// Mesh grid step in degrees longitude.
    pub grid_step_lng: f64,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            raw_snapshot_cap: defaults::DEFAULT_RAW_SNAPSHOT_CAP,
            inter_job_delay_secs: defaults::DEFAULT_INTER_JOB_DELAY_SECS,
            mesh_point_delay_secs: defaults::DEFAULT_MESH_POINT_DELAY_SECS,
            uncollected_batch_size: defaults::DEFAULT_UNCOLLECTED_BATCH_SIZE,
            stale_after_days: defaults::DEFAULT_STALE_AFTER_DAYS,
            mesh_radius_m: defaults::DEFAULT_MESH_RADIUS_M,
            grid_step_lat: defaults::DEFAULT_GRID_STEP_LAT,
            grid_step_lng: defaults::DEFAULT_GRID_STEP_LNG,
        }
    }
}
