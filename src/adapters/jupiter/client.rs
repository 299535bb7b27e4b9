//! Jupiter HTTP client.
//!
//! Single bounded quote request per call; upstream errors degrade to a
//! per-item error value at the application layer.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use super::quote::{QuoteRequest, QuoteResponse};

/// Jupiter V6 quote API base URL
pub const JUPITER_API: &str = "https://quote-api.jup.ag/v6";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Quote API error {status}: {body}")]
    Api { status: u16, body: String },
}

/// Quote-only Jupiter client
#[derive(Debug, Clone)]
pub struct JupiterClient {
    base_url: String,
    http: Client,
}

impl JupiterClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, QuoteError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, QuoteError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// Fetch a swap quote. Amount is in smallest units of the input asset;
    /// slippage is in basis points.
    pub async fn get_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, QuoteError> {
        let url = format!("{}/quote", self.base_url);

        tracing::debug!(
            input = %request.input_mint,
            output = %request.output_mint,
            amount = request.amount,
            "jupiter quote"
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("inputMint", request.input_mint.as_str()),
                ("outputMint", request.output_mint.as_str()),
                ("amount", &request.amount.to_string()),
                ("slippageBps", &request.slippage_bps.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuoteError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
