//! Jupiter quote request/response types.

use serde::{Deserialize, Serialize};

/// Default slippage tolerance in basis points (0.5%)
pub const DEFAULT_SLIPPAGE_BPS: u16 = 50;

/// Parameters for a quote request
#[derive(Debug, Clone, Serialize)]
pub struct QuoteRequest {
    pub input_mint: String,
    pub output_mint: String,
    /// Amount in smallest units of the input asset
    pub amount: u64,
    pub slippage_bps: u16,
}

impl QuoteRequest {
    pub fn new(
        input_mint: impl Into<String>,
        output_mint: impl Into<String>,
        amount: u64,
        slippage_bps: u16,
    ) -> Self {
        Self {
            input_mint: input_mint.into(),
            output_mint: output_mint.into(),
            amount,
            slippage_bps,
        }
    }
}

/// Jupiter V6 quote response.
///
/// Amounts are strings in smallest units of the respective asset; the caller
/// applies the decimal scale from the token registry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(default)]
    pub in_amount: String,
    #[serde(default)]
    pub out_amount: String,
    #[serde(default)]
    pub price_impact_pct: Option<String>,
    #[serde(default)]
    pub slippage_bps: u16,
    #[serde(default)]
    pub route_plan: Vec<RoutePlanStep>,
}

impl QuoteResponse {
    /// Output amount in smallest units; 0 when absent or non-numeric
    pub fn output_amount_raw(&self) -> u64 {
        self.out_amount.parse().unwrap_or(0)
    }

    pub fn hop_count(&self) -> usize {
        self.route_plan.len()
    }
}

/// One hop of the quoted route
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanStep {
    #[serde(default)]
    pub swap_info: Option<SwapInfo>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SwapInfo {
    #[serde(default)]
    pub label: Option<String>,
}
