//! Solana JSON-RPC Client
//!
//! Speaks JSON-RPC 2.0 over HTTP to the configured chain endpoint. Every call
//! is a single bounded request; there are no retries here — a failed call is
//! reported once per sweep and retried naturally on the next one.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::tokens::LAMPORTS_PER_SOL;

/// Default request timeout for RPC calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Malformed RPC response: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// One entry from `getRecentPerformanceSamples`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSample {
    #[serde(default)]
    pub slot: u64,
    #[serde(default)]
    pub num_transactions: u64,
    #[serde(default)]
    pub sample_period_secs: u64,
}

impl PerformanceSample {
    /// Transactions per second, floor-rounded; a zero period is 0 TPS
    pub fn tps(&self) -> u64 {
        if self.sample_period_secs == 0 {
            0
        } else {
            self.num_transactions / self.sample_period_secs
        }
    }
}

/// Chain-health probe result
#[derive(Debug, Clone)]
pub struct NetworkStatus {
    pub slot: u64,
    pub blockhash: String,
    pub samples: Vec<PerformanceSample>,
}

/// Read-only JSON-RPC client for one chain endpoint
#[derive(Debug, Clone)]
pub struct RpcClient {
    endpoint: String,
    http: Client,
}

impl RpcClient {
    pub fn new(endpoint: String) -> Result<Self, RpcError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: String, timeout: Duration) -> Result<Self, RpcError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        tracing::debug!(method, endpoint = %self.endpoint, "rpc call");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let envelope: RpcEnvelope = response.json().await?;
        if let Some(err) = envelope.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        envelope
            .result
            .ok_or_else(|| RpcError::Malformed(format!("{method}: response has no result")))
    }

    /// SOL balance for a wallet address.
    ///
    /// A well-formed response without `result.value` converts as 0 lamports
    /// (the upstream's defensive shape); transport, HTTP, and RPC-level
    /// failures return `Err` so callers can tell a zero balance from a
    /// failed query.
    pub async fn get_balance(&self, address: &str) -> Result<f64, RpcError> {
        let result = self.call("getBalance", json!([address])).await?;
        let lamports = result
            .get("value")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        Ok(lamports as f64 / LAMPORTS_PER_SOL as f64)
    }

    /// Current slot number
    pub async fn get_slot(&self) -> Result<u64, RpcError> {
        let result = self.call("getSlot", json!([])).await?;
        result
            .as_u64()
            .ok_or_else(|| RpcError::Malformed("getSlot: result is not a number".into()))
    }

    /// Latest blockhash
    pub async fn get_latest_blockhash(&self) -> Result<String, RpcError> {
        let result = self.call("getLatestBlockhash", json!([])).await?;
        result
            .get("value")
            .and_then(|v| v.get("blockhash"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RpcError::Malformed("getLatestBlockhash: missing blockhash".into()))
    }

    /// Recent performance samples, newest first as the node returns them
    pub async fn get_recent_performance_samples(
        &self,
        limit: usize,
    ) -> Result<Vec<PerformanceSample>, RpcError> {
        let result = self
            .call("getRecentPerformanceSamples", json!([limit]))
            .await?;
        serde_json::from_value(result)
            .map_err(|e| RpcError::Malformed(format!("getRecentPerformanceSamples: {e}")))
    }

    /// Composite chain-health probe: slot + blockhash + performance samples
    pub async fn get_network_status(&self, sample_limit: usize) -> Result<NetworkStatus, RpcError> {
        let slot = self.get_slot().await?;
        let blockhash = self.get_latest_blockhash().await?;
        let samples = self.get_recent_performance_samples(sample_limit).await?;
        Ok(NetworkStatus {
            slot,
            blockhash,
            samples,
        })
    }
}
