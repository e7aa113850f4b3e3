//! StorageEngine: owns the ConnectionPool and implements CollectionStore.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use anshin_core::config::StorageConfig;
use anshin_core::errors::AnshinResult;
use anshin_core::models::{
    AreaRecord, CandidateRecord, CollectionTarget, JobLogEntry, JobRecord, JobStatus, RawSnapshot,
    RestaurantRef,
};
use anshin_core::traits::CollectionStore;

use crate::pool::ConnectionPool;
use crate::queries::{area_ops, candidate_ops, job_ops, restaurant_ops, snapshot_ops};

pub struct StorageEngine {
    pool: ConnectionPool,
    /// File-backed databases read through the pool; in-memory ones through
    /// the writer, since each in-memory connection is a separate database.
    use_read_pool: bool,
}

impl StorageEngine {
    pub fn open(path: &Path, config: &StorageConfig) -> AnshinResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        tracing::debug!(path = %path.display(), "storage opened");
        Ok(Self {
            pool,
            use_read_pool: true,
        })
    }

    /// Open the database named by the config's `db_path`.
    pub fn from_config(config: &StorageConfig) -> AnshinResult<Self> {
        Self::open(Path::new(&config.db_path), config)
    }

    pub fn open_in_memory() -> AnshinResult<Self> {
        Ok(Self {
            pool: ConnectionPool::open_in_memory()?,
            use_read_pool: false,
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    async fn with_reader<F, T>(&self, f: F) -> AnshinResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> AnshinResult<T>,
    {
        match (&self.pool.readers, self.use_read_pool) {
            (Some(readers), true) => readers.with_conn(f),
            _ => self.pool.writer.with_conn(f).await,
        }
    }

    // --- Inspection and seeding, used by the CLI and tests ---

    pub async fn candidates_for_job(&self, job_id: &str) -> AnshinResult<Vec<CandidateRecord>> {
        self.with_reader(|conn| candidate_ops::list_for_job(conn, job_id))
            .await
    }

    pub async fn raw_snapshot_count(&self, job_id: &str) -> AnshinResult<usize> {
        self.with_reader(|conn| snapshot_ops::count_for_job(conn, job_id))
            .await
    }

    pub async fn area(&self, code: &str) -> AnshinResult<Option<AreaRecord>> {
        self.with_reader(|conn| area_ops::get(conn, code)).await
    }

    /// Register an approved restaurant and return its id.
    pub async fn add_restaurant(
        &self,
        name: &str,
        address: Option<&str>,
        place_id: Option<&str>,
    ) -> AnshinResult<String> {
        let id = Uuid::new_v4().to_string();
        self.pool
            .writer
            .with_conn(|conn| restaurant_ops::insert_restaurant(conn, &id, name, address, place_id))
            .await?;
        Ok(id)
    }

    pub async fn add_menu(&self, restaurant_id: &str, name: &str) -> AnshinResult<()> {
        let id = Uuid::new_v4().to_string();
        self.pool
            .writer
            .with_conn(|conn| restaurant_ops::insert_menu(conn, &id, restaurant_id, name))
            .await
    }
}

#[async_trait]
impl CollectionStore for StorageEngine {
    async fn create_job(&self, target: &CollectionTarget) -> AnshinResult<JobRecord> {
        let now = Utc::now();
        let job = JobRecord {
            id: Uuid::new_v4().to_string(),
            area_name: target.descriptor(),
            municipality_code: target.municipality_code().map(str::to_string),
            status: JobStatus::Processing,
            collected_count: 0,
            processed_count: 0,
            created_at: now,
            completed_at: None,
            logs: vec![JobLogEntry {
                time: now,
                msg: format!("collection started for {}", target.descriptor()),
            }],
        };
        self.pool
            .writer
            .with_conn(|conn| job_ops::insert_job(conn, &job))
            .await?;
        Ok(job)
    }

    async fn complete_job(&self, job_id: &str, collected: u32, processed: u32) -> AnshinResult<()> {
        self.pool
            .writer
            .with_conn(|conn| job_ops::complete_job(conn, job_id, collected, processed, Utc::now()))
            .await
    }

    async fn fail_job(&self, job_id: &str, message: &str) -> AnshinResult<()> {
        self.pool
            .writer
            .with_conn(|conn| job_ops::fail_job(conn, job_id, message, Utc::now()))
            .await
    }

    async fn get_job(&self, job_id: &str) -> AnshinResult<Option<JobRecord>> {
        self.with_reader(|conn| job_ops::get_job(conn, job_id)).await
    }

    async fn insert_raw_snapshots(&self, rows: &[RawSnapshot]) -> AnshinResult<usize> {
        self.pool
            .writer
            .with_conn(|conn| snapshot_ops::insert_snapshots(conn, rows))
            .await
    }

    async fn insert_candidates(&self, rows: &[CandidateRecord]) -> AnshinResult<usize> {
        self.pool
            .writer
            .with_conn(|conn| candidate_ops::insert_candidates(conn, rows))
            .await
    }

    async fn find_restaurant_by_place_id(
        &self,
        place_id: &str,
    ) -> AnshinResult<Option<RestaurantRef>> {
        self.with_reader(|conn| restaurant_ops::find_by_place_id(conn, place_id))
            .await
    }

    async fn find_restaurant_by_name(&self, name: &str) -> AnshinResult<Option<RestaurantRef>> {
        self.with_reader(|conn| restaurant_ops::find_by_name(conn, name))
            .await
    }

    async fn restaurant_menu_names(&self, restaurant_id: &str) -> AnshinResult<Vec<String>> {
        self.with_reader(|conn| restaurant_ops::menu_names(conn, restaurant_id))
            .await
    }

    async fn candidate_in_queue(
        &self,
        shop_name: &str,
        place_id: Option<&str>,
    ) -> AnshinResult<bool> {
        self.with_reader(|conn| candidate_ops::in_queue(conn, shop_name, place_id))
            .await
    }

    async fn uncollected_areas(
        &self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> AnshinResult<Vec<AreaRecord>> {
        self.with_reader(|conn| area_ops::uncollected(conn, cutoff, limit))
            .await
    }

    async fn mark_area_collected(
        &self,
        target: &CollectionTarget,
        at: DateTime<Utc>,
    ) -> AnshinResult<()> {
        let changed = self
            .pool
            .writer
            .with_conn(|conn| area_ops::mark_collected(conn, target, at))
            .await?;
        if changed == 0 {
            tracing::debug!(area = %target.descriptor(), "no master row to stamp");
        }
        Ok(())
    }

    async fn upsert_area(&self, area: &AreaRecord) -> AnshinResult<()> {
        self.pool
            .writer
            .with_conn(|conn| area_ops::upsert(conn, area))
            .await
    }
}
