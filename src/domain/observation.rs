//! Observation Model
//!
//! Typed records produced by one monitoring sweep. Every upstream payload is
//! normalized into these structs at the adapter boundary; nothing downstream
//! (detector, formatter, store) ever sees raw JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A wallet on the watchlist, supplied by configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchedWallet {
    /// Wallet address (opaque identifier, base58 in practice)
    pub address: String,
    /// Human-readable label shown in reports
    #[serde(default)]
    pub label: String,
}

impl WatchedWallet {
    pub fn new(address: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            label: label.into(),
        }
    }

    /// Label, falling back to a truncated address when none was configured
    pub fn display_label(&self) -> String {
        if self.label.is_empty() {
            self.address.chars().take(8).collect()
        } else {
            self.label.clone()
        }
    }
}

/// One balance reading for one wallet in one sweep.
///
/// Exactly one of `balance_sol` / `error` is set: a successful query carries
/// the balance, a failed query carries the error text. A genuine zero balance
/// is `Some(0.0)` with no error, so the two cases never look alike.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletObservation {
    pub address: String,
    pub label: String,
    #[serde(default)]
    pub balance_sol: Option<f64>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WalletObservation {
    /// Successful balance reading
    pub fn ok(wallet: &WatchedWallet, balance_sol: f64) -> Self {
        Self {
            address: wallet.address.clone(),
            label: wallet.display_label(),
            balance_sol: Some(balance_sol),
            timestamp: Utc::now(),
            error: None,
        }
    }

    /// Failed balance query; the error text surfaces inline in the report
    pub fn failed(wallet: &WatchedWallet, error: impl Into<String>) -> Self {
        Self {
            address: wallet.address.clone(),
            label: wallet.display_label(),
            balance_sol: None,
            timestamp: Utc::now(),
            error: Some(error.into()),
        }
    }
}

/// One market reading for one token symbol in one sweep.
///
/// Price-like fields stay opaque strings because upstreams return "N/A" or
/// omit them entirely; numeric interpretation is the detector's job and a
/// non-numeric value there means "skip", not "fail".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenObservation {
    pub symbol: String,
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub change_24h: Option<String>,
    #[serde(default)]
    pub volume_24h: Option<String>,
    #[serde(default)]
    pub liquidity_usd: Option<String>,
    #[serde(default)]
    pub dex: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TokenObservation {
    pub fn failed(symbol: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price_usd: None,
            change_24h: None,
            volume_24h: None,
            liquidity_usd: None,
            dex: None,
            timestamp: Utc::now(),
            error: Some(error.into()),
        }
    }

    /// Parsed price, if the opaque field holds a number
    pub fn price(&self) -> Option<f64> {
        self.price_usd
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
    }
}

/// The complete set of observations taken in one sweep.
///
/// Immutable once written; snapshots are only appended to the store and read
/// back as "most recent". `Default` is the empty snapshot used as the
/// comparison baseline on a first-ever run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub wallets: Vec<WalletObservation>,
    #[serde(default)]
    pub prices: Vec<TokenObservation>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            wallets: Vec::new(),
            prices: Vec::new(),
        }
    }
}

impl Snapshot {
    pub fn new(wallets: Vec<WalletObservation>, prices: Vec<TokenObservation>) -> Self {
        Self {
            timestamp: Utc::now(),
            wallets,
            prices,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty() && self.prices.is_empty()
    }
}
