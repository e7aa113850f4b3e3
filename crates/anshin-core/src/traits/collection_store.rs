use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AnshinResult;
use crate::models::{
    AreaRecord, CandidateRecord, CollectionTarget, JobRecord, RawSnapshot, RestaurantRef,
};

/// The pipeline's whole contract with persistent storage.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    // --- Jobs ---
    async fn create_job(&self, target: &CollectionTarget) -> AnshinResult<JobRecord>;
    async fn complete_job(&self, job_id: &str, collected: u32, processed: u32) -> AnshinResult<()>;
    async fn fail_job(&self, job_id: &str, message: &str) -> AnshinResult<()>;
    async fn get_job(&self, job_id: &str) -> AnshinResult<Option<JobRecord>>;

    // --- Output ---
    async fn insert_raw_snapshots(&self, rows: &[RawSnapshot]) -> AnshinResult<usize>;
    /// All rows of one job in a single transaction.
    async fn insert_candidates(&self, rows: &[CandidateRecord]) -> AnshinResult<usize>;

    // --- Existing data ---
    async fn find_restaurant_by_place_id(&self, place_id: &str)
        -> AnshinResult<Option<RestaurantRef>>;
    async fn find_restaurant_by_name(&self, name: &str) -> AnshinResult<Option<RestaurantRef>>;
    async fn restaurant_menu_names(&self, restaurant_id: &str) -> AnshinResult<Vec<String>>;
    /// A pending or approved candidate with this place id or shop name exists.
    async fn candidate_in_queue(&self, shop_name: &str, place_id: Option<&str>)
        -> AnshinResult<bool>;

    // --- Area master ---
    async fn uncollected_areas(
        &self,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> AnshinResult<Vec<AreaRecord>>;
    async fn mark_area_collected(
        &self,
        target: &CollectionTarget,
        at: DateTime<Utc>,
    ) -> AnshinResult<()>;
    async fn upsert_area(&self, area: &AreaRecord) -> AnshinResult<()>;
}
