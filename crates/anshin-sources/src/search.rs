//! Web custom-search client used by the SNS and blog adapters.

use anshin_core::errors::{AnshinResult, SourceError};
use serde::Deserialize;

use crate::transport::HttpClient;

/// One search result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    items: Vec<SearchItem>,
}

#[derive(Debug, Clone)]
pub struct CustomSearchClient {
    http: HttpClient,
    endpoint: String,
    api_key: Option<String>,
    engine_id: Option<String>,
}

impl CustomSearchClient {
    pub fn new(
        http: HttpClient,
        endpoint: impl Into<String>,
        api_key: Option<String>,
        engine_id: Option<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            engine_id: engine_id.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Both the API key and the engine id are present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.engine_id.is_some()
    }

    pub async fn search(&self, query: &str) -> AnshinResult<Vec<SearchItem>> {
        let (Some(key), Some(cx)) = (self.api_key.as_deref(), self.engine_id.as_deref()) else {
            return Err(SourceError::MissingCredential {
                name: "GOOGLE_CSE_ID".to_string(),
            }
            .into());
        };
        let resp: SearchResponse = self
            .http
            .get_json(&self.endpoint, &[("key", key), ("cx", cx), ("q", query)])
            .await?;
        tracing::debug!(query, results = resp.items.len(), "custom search");
        Ok(resp.items)
    }
}
