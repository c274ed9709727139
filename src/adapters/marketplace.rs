use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, error};

use crate::config::AppConfig;
use crate::error::UpstreamError;
use crate::models::UpstreamSearchResponse;

/// Thin client over the marketplace search endpoint.
#[derive(Clone)]
pub struct MarketplaceClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl MarketplaceClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .context("Failed to build marketplace HTTP client")?;
        Ok(Self {
            client,
            endpoint: config.search_endpoint(),
            token: config.bearer_token().map(str::to_string),
        })
    }

    pub fn sends_token(&self) -> bool {
        self.token.is_some()
    }

    pub async fn search(&self, query: &str) -> Result<UpstreamSearchResponse, UpstreamError> {
        debug!(url = %self.endpoint, "Making GET request");

        let mut request = self.client.get(&self.endpoint).query(&[("q", query)]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await.map_err(|e| {
            error!(url = %self.endpoint, error = %e, "No response received from marketplace");
            UpstreamError::Transport(e)
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            error!(url = %self.endpoint, status, body = %body, "Marketplace API error");
            return Err(UpstreamError::Status { status, body });
        }

        resp.json::<UpstreamSearchResponse>().await.map_err(|e| {
            error!(url = %self.endpoint, error = %e, "Failed to decode marketplace response");
            UpstreamError::Decode(e)
        })
    }
}
