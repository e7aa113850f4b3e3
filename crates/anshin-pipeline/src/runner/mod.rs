//! JobRunner: one collection job from `processing` to `completed` or `failed`.
//!
//! Steps: create job → adapter fan-out → audit snapshot → merge →
//! incremental detection → candidate insert → complete job and stamp area.

pub mod fanout;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::Instrument;

use anshin_core::config::{AnshinConfig, ScoringConfig};
use anshin_core::errors::AnshinResult;
use anshin_core::models::{CollectionTarget, JobRecord, JobSummary, RawSighting, RawSnapshot};
use anshin_core::traits::CollectionStore;
use anshin_merge::{BrandRegistry, Fingerprinter, MergeEngine};
use anshin_observability::{events, job_span, merge_span};
use anshin_scoring::{CategoryTable, ValueScorer};
use anshin_sources::ChainMaster;

use crate::candidates::to_candidate;
use crate::incremental::IncrementalDetector;
use crate::provider::AdapterProvider;

/// Per-job policy knobs.
#[derive(Debug, Clone)]
pub struct RunnerSettings {
    pub adapter_timeout: Duration,
    pub raw_snapshot_cap: usize,
    pub acceptance_threshold: u8,
}

impl RunnerSettings {
    pub fn from_config(config: &AnshinConfig) -> Self {
        Self {
            adapter_timeout: Duration::from_secs(config.sources.adapter_timeout_secs),
            raw_snapshot_cap: config.collection.raw_snapshot_cap,
            acceptance_threshold: config.scoring.acceptance_reliability_threshold,
        }
    }
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self::from_config(&AnshinConfig::default())
    }
}

/// Merge engine with the configured category table and every chain
/// brand of `master` registered for fingerprinting.
pub fn build_merge_engine(scoring: &ScoringConfig, master: &ChainMaster) -> AnshinResult<MergeEngine> {
    let table = match scoring.category_table_path.as_deref() {
        Some(path) => CategoryTable::from_path(Path::new(path))?,
        None => CategoryTable::builtin()?,
    };
    let mut brands = BrandRegistry::new();
    for brand in master.brands() {
        brands.register(&brand.brand_name, &brand.aliases);
    }
    Ok(MergeEngine::new(
        Fingerprinter::new(brands),
        ValueScorer::new(table),
    ))
}

pub struct JobRunner {
    store: Arc<dyn CollectionStore>,
    provider: Arc<dyn AdapterProvider>,
    engine: MergeEngine,
    settings: RunnerSettings,
}

impl JobRunner {
    pub fn new(
        store: Arc<dyn CollectionStore>,
        provider: Arc<dyn AdapterProvider>,
        engine: MergeEngine,
        settings: RunnerSettings,
    ) -> Self {
        Self {
            store,
            provider,
            engine,
            settings,
        }
    }

    pub fn store(&self) -> &Arc<dyn CollectionStore> {
        &self.store
    }

    pub fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    /// Run one job. Any failure after the job row exists marks it `failed`
    /// with the error in its log, then propagates.
    pub async fn run(&self, target: &CollectionTarget) -> AnshinResult<JobSummary> {
        let job = self.store.create_job(target).await?;
        let span = job_span!(job.id, job.area_name);

        async {
            match self.execute(&job, target).await {
                Ok(summary) => Ok(summary),
                Err(e) => {
                    let message = e.to_string();
                    events::job_failed(&job.id, &message);
                    if let Err(fail_err) = self.store.fail_job(&job.id, &message).await {
                        tracing::error!(job_id = %job.id, error = %fail_err, "could not record job failure");
                    }
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, job: &JobRecord, target: &CollectionTarget) -> AnshinResult<JobSummary> {
        let adapters = self.provider.adapters();
        events::job_started(&job.id, &job.area_name, adapters.len());

        let sightings = fanout::collect_all(&adapters, target, self.settings.adapter_timeout).await;
        let collected = sightings.len();

        let snapshots = snapshot_rows(&job.id, &sightings, self.settings.raw_snapshot_cap)?;
        self.store.insert_raw_snapshots(&snapshots).await?;

        let now = Utc::now();
        let merged = {
            let _guard = merge_span!(collected).entered();
            self.engine.merge(sightings, now)
        };

        let detector = IncrementalDetector::new(self.store.clone(), self.settings.acceptance_threshold);
        let detected = detector.apply(merged.shops).await?;
        tracing::info!(
            shops = detected.shops.len(),
            suppressed_updates = detected.suppressed_updates,
            below_threshold = detected.below_threshold,
            already_queued = detected.already_queued,
            "incremental detection finished"
        );

        let records: Vec<_> = detected
            .shops
            .iter()
            .filter_map(|shop| to_candidate(shop, &job.id, now))
            .collect();
        self.store.insert_candidates(&records).await?;
        events::candidates_persisted(&job.id, detected.new_shops, detected.updates);

        let collected = u32::try_from(collected).unwrap_or(u32::MAX);
        let processed = u32::try_from(records.len()).unwrap_or(u32::MAX);
        // Completion is the last write: a job is terminal once completed.
        self.store.mark_area_collected(target, Utc::now()).await?;
        self.store.complete_job(&job.id, collected, processed).await?;
        events::job_completed(&job.id, collected, processed);

        Ok(JobSummary {
            job_id: job.id.clone(),
            area_name: job.area_name.clone(),
            collected_count: collected,
            processed_count: processed,
            new_shops: detected.new_shops,
            updates: detected.updates,
        })
    }
}

/// Audit rows for the first `cap` sightings.
fn snapshot_rows(job_id: &str, sightings: &[RawSighting], cap: usize) -> AnshinResult<Vec<RawSnapshot>> {
    sightings
        .iter()
        .take(cap)
        .map(|s| -> AnshinResult<RawSnapshot> {
            Ok(RawSnapshot {
                job_id: job_id.to_string(),
                source_type: s.source.source_type,
                source_url: s.source.url.clone(),
                raw_data: serde_json::to_value(s)?,
            })
        })
        .collect()
}
