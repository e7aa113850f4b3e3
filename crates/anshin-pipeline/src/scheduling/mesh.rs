use anshin_core::errors::{AnshinResult, PipelineError};
use anshin_core::geo::{area_bounds, generate_mesh, GeoPoint, GridStep, AREA_PRESETS};
use anshin_core::models::CollectionTarget;

use super::{pause, ScheduleSettings, SweepReport};
use crate::runner::JobRunner;

/// Sweep the preset area `key` point by point.
pub async fn run_mesh(
    runner: &JobRunner,
    key: &str,
    settings: &ScheduleSettings,
) -> AnshinResult<SweepReport> {
    let bounds = area_bounds(key).ok_or_else(|| PipelineError::UnknownArea {
        key: key.to_string(),
        known: AREA_PRESETS
            .iter()
            .map(|p| p.key)
            .collect::<Vec<_>>()
            .join(", "),
    })?;
    let step = GridStep {
        lat: settings.grid_step_lat,
        lng: settings.grid_step_lng,
    };
    let points = generate_mesh(&bounds, step);
    tracing::info!(area = key, points = points.len(), "mesh sweep started");
    Ok(run_mesh_points(runner, &points, settings).await)
}

/// One spatial job per point. A failed point is logged and skipped.
pub async fn run_mesh_points(
    runner: &JobRunner,
    points: &[GeoPoint],
    settings: &ScheduleSettings,
) -> SweepReport {
    let mut report = SweepReport {
        points: points.len(),
        ..SweepReport::default()
    };
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            pause(settings.mesh_point_delay).await;
        }
        let target = CollectionTarget::spatial(*point, settings.mesh_radius_m);
        match runner.run(&target).await {
            Ok(summary) => report.summaries.push(summary),
            Err(e) => {
                tracing::warn!(lat = point.lat, lng = point.lng, error = %e, "mesh point failed");
                report.failed_points += 1;
            }
        }
    }
    report
}
