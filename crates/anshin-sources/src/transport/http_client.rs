//! HTTP client with retry, exponential backoff, timeout, and gzip compression.

use std::time::Duration;

use anshin_core::config::SourcesConfig;
use anshin_core::errors::{AnshinResult, SourceError};
use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

/// Configuration for the HTTP transport layer.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Initial backoff duration (doubles each retry).
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::from_sources(&SourcesConfig::default())
    }
}

impl HttpClientConfig {
    pub fn from_sources(config: &SourcesConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.http_timeout_secs),
            max_retries: config.http_max_retries,
            initial_backoff: Duration::from_millis(config.http_initial_backoff_ms),
            max_backoff: Duration::from_secs(config.http_max_backoff_secs),
            user_agent: config.user_agent.clone(),
        }
    }
}

fn net_err(reason: String) -> SourceError {
    SourceError::Network { reason }
}

/// Shared async transport for every adapter. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpClient {
    config: HttpClientConfig,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> AnshinResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| net_err(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// GET a page body as text.
    pub async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> AnshinResult<String> {
        let resp = self
            .send(url, || self.client.request(Method::GET, url).query(query))
            .await?;
        Ok(resp
            .text()
            .await
            .map_err(|e| net_err(format!("reading body of {url}: {e}")))?)
    }

    /// GET a JSON document.
    pub async fn get_json<Resp: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> AnshinResult<Resp> {
        let resp = self
            .send(url, || self.client.request(Method::GET, url).query(query))
            .await?;
        decode(url, resp).await
    }

    /// POST a JSON body with extra headers and decode the JSON reply.
    pub async fn post_json<Req: Serialize + ?Sized, Resp: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &Req,
    ) -> AnshinResult<Resp> {
        let resp = self
            .send(url, || {
                let mut req = self.client.request(Method::POST, url).json(body);
                for (name, value) in headers {
                    req = req.header(*name, *value);
                }
                req
            })
            .await?;
        decode(url, resp).await
    }

    /// Unified retry loop. Client errors (4xx) are returned immediately.
    async fn send<F>(&self, url: &str, build: F) -> AnshinResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut backoff = self.config.initial_backoff;
        let mut last_status: Option<u16> = None;
        let mut last_err = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::debug!(
                    "http: retry attempt {}/{} after {:?} for {}",
                    attempt,
                    self.config.max_retries,
                    backoff,
                    url
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(self.config.max_backoff);
            }

            match build().send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return Ok(resp);
                    }
                    if status.is_client_error() {
                        return Err(SourceError::HttpStatus {
                            status: status.as_u16(),
                            url: url.to_string(),
                        }
                        .into());
                    }
                    last_status = Some(status.as_u16());
                    last_err = format!("HTTP {status}");
                }
                Err(e) => {
                    last_status = None;
                    last_err = e.to_string();
                }
            }
        }

        match last_status {
            Some(status) => Err(SourceError::HttpStatus {
                status,
                url: url.to_string(),
            }
            .into()),
            None => Err(net_err(format!(
                "all {} retries exhausted for {url}: {last_err}",
                self.config.max_retries
            ))
            .into()),
        }
    }
}

async fn decode<Resp: DeserializeOwned>(url: &str, resp: Response) -> AnshinResult<Resp> {
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| net_err(format!("reading body of {url}: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        SourceError::Parse {
            source_name: url.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_follows_sources_section() {
        let mut sources = SourcesConfig::default();
        sources.http_max_retries = 7;
        sources.http_initial_backoff_ms = 10;
        let cfg = HttpClientConfig::from_sources(&sources);
        assert_eq!(cfg.max_retries, 7);
        assert_eq!(cfg.initial_backoff, Duration::from_millis(10));
        assert_eq!(cfg.max_backoff, Duration::from_secs(30));
    }

    #[test]
    fn builds_client() {
        assert!(HttpClient::new(HttpClientConfig::default()).is_ok());
    }
}
