use std::sync::Arc;

use anshin_core::config::SourcesConfig;
use anshin_core::errors::AnshinResult;
use anshin_core::traits::{PlaceSearch, SourceAdapter};

use crate::adapters::{
    self, BlogAdapter, ChainMatrixAdapter, GoogleMapsAdapter, GourmetAdapter, OfficialListAdapter,
    ReservationAdapter, SnsAdapter,
};
use crate::cache::LookupCache;
use crate::chains::ChainMaster;
use crate::places::{CachedPlaceSearch, GooglePlacesClient};
use crate::search::CustomSearchClient;
use crate::transport::{HttpClient, HttpClientConfig};

/// Builds the configured adapter set.
///
/// Every call to [`SourceRegistry::job_adapters`] wires a fresh
/// [`LookupCache`], so cached lookups never outlive the job that made them.
pub struct SourceRegistry {
    config: SourcesConfig,
    master: Arc<ChainMaster>,
    http: HttpClient,
}

impl SourceRegistry {
    pub fn new(config: SourcesConfig, master: Arc<ChainMaster>) -> AnshinResult<Self> {
        let http = HttpClient::new(HttpClientConfig::from_sources(&config))?;
        Ok(Self {
            config,
            master,
            http,
        })
    }

    pub fn master(&self) -> &Arc<ChainMaster> {
        &self.master
    }

    pub fn config(&self) -> &SourcesConfig {
        &self.config
    }

    /// Enabled adapters for one job, in a stable order.
    pub fn job_adapters(&self) -> Vec<Arc<dyn SourceAdapter>> {
        let cfg = &self.config;
        let places: Arc<dyn PlaceSearch> = Arc::new(CachedPlaceSearch::new(
            Arc::new(GooglePlacesClient::new(
                self.http.clone(),
                cfg.places_endpoint.clone(),
                cfg.places_api_key.clone(),
            )),
            LookupCache::new(cfg.lookup_cache_capacity),
        ));
        let search = Arc::new(CustomSearchClient::new(
            self.http.clone(),
            cfg.cse_endpoint.clone(),
            cfg.places_api_key.clone(),
            cfg.cse_id.clone(),
        ));

        let all: Vec<Arc<dyn SourceAdapter>> = vec![
            Arc::new(OfficialListAdapter::new(
                self.http.clone(),
                cfg.official_list_urls.clone(),
            )),
            Arc::new(SnsAdapter::new(search.clone())),
            Arc::new(BlogAdapter::new(search)),
            Arc::new(GourmetAdapter::new(
                self.http.clone(),
                cfg.gourmet_search_url.clone(),
            )),
            Arc::new(GoogleMapsAdapter::new(places.clone(), cfg.places_max_results)),
            Arc::new(ReservationAdapter),
            Arc::new(ChainMatrixAdapter::new(
                places,
                self.master.clone(),
                cfg.places_max_results,
            )),
        ];

        all.into_iter()
            .filter(|a| cfg.adapter_enabled(a.name()))
            .collect()
    }

    /// Names of the adapters this configuration runs.
    pub fn enabled_names(&self) -> Vec<&'static str> {
        adapters::ALL_ADAPTERS
            .into_iter()
            .filter(|n| self.config.adapter_enabled(n))
            .collect()
    }
}
