use chrono::{Duration as ChronoDuration, Utc};

use anshin_core::errors::AnshinResult;
use anshin_core::models::CollectionTarget;

use super::{pause, BatchReport, ScheduleSettings};
use crate::runner::JobRunner;

/// Collect areas never collected or last collected more than
/// `stale_after_days` ago, lowest code first, one job at a time.
pub async fn run_uncollected(
    runner: &JobRunner,
    settings: &ScheduleSettings,
) -> AnshinResult<BatchReport> {
    let cutoff = Utc::now() - ChronoDuration::days(settings.stale_after_days);
    let areas = runner
        .store()
        .uncollected_areas(cutoff, settings.batch_size)
        .await?;
    tracing::info!(areas = areas.len(), %cutoff, "uncollected batch selected");

    let mut report = BatchReport::default();
    for (i, area) in areas.iter().enumerate() {
        if i > 0 {
            pause(settings.inter_job_delay).await;
        }
        let target = CollectionTarget::area_with_code(&area.query_name(), area.code.clone());
        match runner.run(&target).await {
            Ok(summary) => report.summaries.push(summary),
            Err(e) => {
                tracing::warn!(area = %area.code, error = %e, "area job failed; continuing");
                report.failures.push((target.descriptor(), e.to_string()));
            }
        }
    }
    Ok(report)
}
