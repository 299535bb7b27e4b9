//! DexScreener HTTP client.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use super::types::{PairInfo, SearchResponse};

/// Public DexScreener REST endpoint (no authentication)
pub const DEXSCREENER_API: &str = "https://api.dexscreener.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Read-only DexScreener search client
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    base_url: String,
    http: Client,
}

impl DexScreenerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MarketError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MarketError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// Free-text search for tokens/pairs.
    ///
    /// Zero pairs is a valid outcome ("no market found"); only transport and
    /// HTTP-level failures are errors.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, MarketError> {
        let url = format!("{}/latest/dex/search", self.base_url);
        tracing::debug!(query, "dexscreener search");

        let response = self
            .http
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// All pairs for a token address on one chain.
    ///
    /// Preferred over free-text search when the mint is already known; the
    /// endpoint returns a bare array.
    pub async fn token_pairs(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<Vec<PairInfo>, MarketError> {
        let url = format!(
            "{}/token-pairs/v1/{}/{}",
            self.base_url, chain_id, token_address
        );
        tracing::debug!(chain_id, token_address, "dexscreener token pairs");

        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_default_timeout() {
        assert!(DexScreenerClient::new(DEXSCREENER_API).is_ok());
    }

    #[test]
    fn client_builds_with_custom_base_url() {
        let client = DexScreenerClient::with_timeout(
            "http://localhost:9999",
            Duration::from_secs(2),
        );
        assert!(client.is_ok());
    }
}
