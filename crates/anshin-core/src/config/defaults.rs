// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "anshin.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Collection ---
pub const DEFAULT_RAW_SNAPSHOT_CAP: usize = 50;
pub const DEFAULT_INTER_JOB_DELAY_SECS: u64 = 5;
pub const DEFAULT_MESH_POINT_DELAY_SECS: u64 = 2;
pub const DEFAULT_UNCOLLECTED_BATCH_SIZE: usize = 5;
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 90;
pub const DEFAULT_MESH_RADIUS_M: u32 = 5_000;
pub const DEFAULT_GRID_STEP_LAT: f64 = 0.045;
pub const DEFAULT_GRID_STEP_LNG: f64 = 0.055;

// --- Scoring ---
pub const DEFAULT_ACCEPTANCE_RELIABILITY_THRESHOLD: u8 = 30;

// --- Sources ---
pub const DEFAULT_PLACES_ENDPOINT: &str = "https://places.googleapis.com/v1/places:searchText";
pub const DEFAULT_CSE_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
pub const DEFAULT_GOURMET_SEARCH_URL: &str = "https://tabelog.com/rstLst/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; AnshinCollector/0.1)";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_MAX_RETRIES: u32 = 3;
pub const DEFAULT_HTTP_INITIAL_BACKOFF_MS: u64 = 500;
pub const DEFAULT_HTTP_MAX_BACKOFF_SECS: u64 = 30;
pub const DEFAULT_ADAPTER_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PLACES_MAX_RESULTS: u32 = 20;
pub const DEFAULT_LOOKUP_CACHE_CAPACITY: u64 = 2_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;
