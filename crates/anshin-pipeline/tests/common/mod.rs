//! Shared adapters and store wrappers for pipeline integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use anshin_core::config::ScoringConfig;
use anshin_core::errors::{AnshinResult, SourceError, StorageError};
use anshin_core::models::{
    AreaRecord, CandidateRecord, CollectionTarget, JobRecord, RawSighting, RawSnapshot,
    RestaurantRef, SourceType,
};
use anshin_core::traits::{CollectionStore, SourceAdapter};
use anshin_pipeline::{build_merge_engine, JobRunner, RunnerSettings, StaticAdapters};
use anshin_sources::ChainMaster;
use anshin_storage::StorageEngine;

/// Returns the same sightings for every named-area target.
pub struct FixedAdapter {
    pub name: &'static str,
    pub sightings: Vec<RawSighting>,
}

#[async_trait]
impl SourceAdapter for FixedAdapter {
    fn name(&self) -> &str {
        self.name
    }

    fn source_type(&self) -> SourceType {
        self.sightings
            .first()
            .map_or(SourceType::Unknown, |s| s.source.source_type)
    }

    async fn collect(&self, _target: &CollectionTarget) -> AnshinResult<Vec<RawSighting>> {
        Ok(self.sightings.clone())
    }
}

pub struct FailingAdapter;

#[async_trait]
impl SourceAdapter for FailingAdapter {
    fn name(&self) -> &str {
        "failing"
    }

    fn source_type(&self) -> SourceType {
        SourceType::Review
    }

    async fn collect(&self, _target: &CollectionTarget) -> AnshinResult<Vec<RawSighting>> {
        Err(SourceError::Network {
            reason: "connection reset".into(),
        }
        .into())
    }
}

pub struct SlowAdapter;

#[async_trait]
impl SourceAdapter for SlowAdapter {
    fn name(&self) -> &str {
        "slow"
    }

    fn source_type(&self) -> SourceType {
        SourceType::Blog
    }

    async fn collect(&self, _target: &CollectionTarget) -> AnshinResult<Vec<RawSighting>> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(Vec::new())
    }
}

/// Which store write a [`FaultyStore`] rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    InsertCandidates,
    MarkAreaCollected,
}

/// Delegates to a real store but fails one kind of write.
pub struct FaultyStore {
    pub inner: Arc<StorageEngine>,
    pub fault: Fault,
    pub last_job: Mutex<Option<String>>,
}

fn disk_error<T>() -> AnshinResult<T> {
    Err(StorageError::SqliteError {
        message: "disk I/O error".into(),
    }
    .into())
}

impl FaultyStore {
    pub fn new(inner: Arc<StorageEngine>, fault: Fault) -> Self {
        Self {
            inner,
            fault,
            last_job: Mutex::new(None),
        }
    }

    pub fn last_job_id(&self) -> Option<String> {
        self.last_job.lock().unwrap().clone()
    }
}

#[async_trait]
impl CollectionStore for FaultyStore {
    async fn create_job(&self, target: &CollectionTarget) -> AnshinResult<JobRecord> {
        let job = self.inner.create_job(target).await?;
        *self.last_job.lock().unwrap() = Some(job.id.clone());
        Ok(job)
    }

    async fn complete_job(&self, job_id: &str, collected: u32, processed: u32) -> AnshinResult<()> {
        self.inner.complete_job(job_id, collected, processed).await
    }

    async fn fail_job(&self, job_id: &str, message: &str) -> AnshinResult<()> {
        self.inner.fail_job(job_id, message).await
    }

    async fn get_job(&self, job_id: &str) -> AnshinResult<Option<JobRecord>> {
        self.inner.get_job(job_id).await
    }

    async fn insert_raw_snapshots(&self, rows: &[RawSnapshot]) -> AnshinResult<usize> {
        self.inner.insert_raw_snapshots(rows).await
    }

    async fn insert_candidates(&self, rows: &[CandidateRecord]) -> AnshinResult<usize> {
        if self.fault == Fault::InsertCandidates {
            return disk_error();
        }
        self.inner.insert_candidates(rows).await
    }

    async fn find_restaurant_by_place_id(
        &self,
        place_id: &str,
    ) -> AnshinResult<Option<RestaurantRef>> {
        self.inner.find_restaurant_by_place_id(place_id).await
    }

    async fn find_restaurant_by_name(&self, name: &str) -> AnshinResult<Option<RestaurantRef>> {
        self.inner.find_restaurant_by_name(name).await
    }

    async fn restaurant_menu_names(&self, restaurant_id: &str) -> AnshinResult<Vec<String>> {
        self.inner.restaurant_menu_names(restaurant_id).await
    }

    async fn candidate_in_queue(
        &self,
        shop_name: &str,
        place_id: Option<&str>,
    ) -> AnshinResult<bool> {
        self.inner.candidate_in_queue(shop_name, place_id).await
    }

    async fn uncollected_areas(
        &self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> AnshinResult<Vec<AreaRecord>> {
        self.inner.uncollected_areas(cutoff, limit).await
    }

    async fn mark_area_collected(
        &self,
        target: &CollectionTarget,
        at: DateTime<Utc>,
    ) -> AnshinResult<()> {
        if self.fault == Fault::MarkAreaCollected {
            return disk_error();
        }
        self.inner.mark_area_collected(target, at).await
    }

    async fn upsert_area(&self, area: &AreaRecord) -> AnshinResult<()> {
        self.inner.upsert_area(area).await
    }
}

pub fn fast_settings() -> RunnerSettings {
    RunnerSettings {
        adapter_timeout: Duration::from_millis(200),
        ..RunnerSettings::default()
    }
}

pub fn runner_with(
    store: Arc<dyn CollectionStore>,
    adapters: Vec<Arc<dyn SourceAdapter>>,
    settings: RunnerSettings,
) -> JobRunner {
    let master = ChainMaster::builtin().unwrap();
    let engine = build_merge_engine(&ScoringConfig::default(), &master).unwrap();
    JobRunner::new(
        store,
        Arc::new(StaticAdapters::new(adapters)),
        engine,
        settings,
    )
}

pub fn fixed(name: &'static str, sightings: Vec<RawSighting>) -> Arc<dyn SourceAdapter> {
    Arc::new(FixedAdapter { name, sightings })
}
