//! HTTP question source.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::instrument;

use quizrun_core::error::FetchError;
use quizrun_core::traits::ResourceFetcher;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches question files relative to a base URL.
pub struct HttpFetcher {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, location: &str) -> String {
        format!("{}/{}", self.base_url, location.trim_start_matches('/'))
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(self.url_for(location))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        location: location.to_string(),
                        secs: self.timeout_secs,
                    }
                } else {
                    FetchError::Network {
                        location: location.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(FetchError::NotFound(location.to_string()));
        }
        if !response.status().is_success() {
            return Err(FetchError::Status {
                location: location.to_string(),
                status,
            });
        }

        response.text().await.map_err(|e| FetchError::Network {
            location: location.to_string(),
            message: format!("failed to read body: {e}"),
        })
    }
}
