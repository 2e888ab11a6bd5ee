//! HTTP manifest fetcher

use super::ManifestFetcher;
use crate::{AuditConfig, Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, instrument};
use url::Url;

/// Fetches manifests over HTTP(S) with a fixed per-request timeout
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &AuditConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    fn map_error(url: &Url, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::ConnectionTimeout { url: url.to_string() }
        } else {
            Error::Network(e)
        }
    }
}

#[async_trait]
impl ManifestFetcher for HttpFetcher {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<String> {
        let start = Instant::now();

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Self::map_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::ConnectionTimeout { url: url.to_string() }
            } else {
                Error::ManifestFetch(format!("reading body of {url}: {e}"))
            }
        })?;

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Manifest fetched"
        );

        Ok(body)
    }
}
