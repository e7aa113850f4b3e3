use serde::{Deserialize, Serialize};

use super::defaults;

/// External source endpoints, credentials and HTTP behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Places API key. Usually supplied through `GOOGLE_MAPS_API_KEY`.
    pub places_api_key: Option<String>,
    /// Custom search engine id. Usually supplied through `GOOGLE_CSE_ID`.
    pub cse_id: Option<String>,
    pub places_endpoint: String,
    pub cse_endpoint: String,
    pub gourmet_search_url: String,
    /// Official allergy pages scraped by the official-list adapter.
    pub official_list_urls: Vec<String>,
    pub user_agent: String,
    pub http_timeout_secs: u64,
    pub http_max_retries: u32,
    pub http_initial_backoff_ms: u64,
    pub http_max_backoff_secs: u64,
    /// Upper bound on one adapter call within a job.
    pub adapter_timeout_secs: u64,
    pub places_max_results: u32,
    pub lookup_cache_capacity: u64,
    /// Adapter names to run. Empty means all.
    pub enabled_adapters: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            places_api_key: None,
            cse_id: None,
            places_endpoint: defaults::DEFAULT_PLACES_ENDPOINT.to_string(),
            cse_endpoint: defaults::DEFAULT_CSE_ENDPOINT.to_string(),
            gourmet_search_url: defaults::DEFAULT_GOURMET_SEARCH_URL.to_string(),
            official_list_urls: Vec::new(),
            user_agent: defaults::DEFAULT_USER_AGENT.to_string(),
            http_timeout_secs: defaults::DEFAULT_HTTP_TIMEOUT_SECS,
            http_max_retries: defaults::DEFAULT_HTTP_MAX_RETRIES,
            http_initial_backoff_ms: defaults::DEFAULT_HTTP_INITIAL_BACKOFF_MS,
            http_max_backoff_secs: defaults::DEFAULT_HTTP_MAX_BACKOFF_SECS,
            adapter_timeout_secs: defaults::DEFAULT_ADAPTER_TIMEOUT_SECS,
            places_max_results: defaults::DEFAULT_PLACES_MAX_RESULTS,
            lookup_cache_capacity: defaults::DEFAULT_LOOKUP_CACHE_CAPACITY,
            enabled_adapters: Vec::new(),
        }
    }
}

impl SourcesConfig {
    /// Whether the named adapter should run under this configuration.
    pub fn adapter_enabled(&self, name: &str) -> bool {
        self.enabled_adapters.is_empty() || self.enabled_adapters.iter().any(|n| n == name)
    }
}
