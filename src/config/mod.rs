//! Configuration Loader
//!
//! TOML config file with environment overrides, matching the agent's original
//! env contract: `SOLANA_RPC_URL`, `SOLANA_NETWORK`, `SOLANA_WALLETS` (JSON
//! array of `{address, label}`), `SOLANA_WATCHLIST` (comma-separated
//! symbols). The config file is optional; the agent can run entirely from
//! environment variables and defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::observation::WatchedWallet;

/// Minimum plausible length of a Solana address
const MIN_ADDRESS_LEN: usize = 32;

/// Well-known public RPC endpoints per network
const MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";
const DEVNET_RPC: &str = "https://api.devnet.solana.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub solana: SolanaSection,
    #[serde(default)]
    pub watch: WatchSection,
    #[serde(default)]
    pub monitor: MonitorSection,
    #[serde(default)]
    pub apis: ApiSection,
}

/// Solana network selection
#[derive(Debug, Clone, Deserialize)]
pub struct SolanaSection {
    /// Explicit RPC endpoint; overrides the network default when set
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// "mainnet-beta" or "devnet"
    #[serde(default = "default_network")]
    pub network: String,
}

fn default_network() -> String {
    "mainnet-beta".to_string()
}

impl Default for SolanaSection {
    fn default() -> Self {
        Self {
            rpc_url: None,
            network: default_network(),
        }
    }
}

impl SolanaSection {
    /// Effective RPC endpoint: env override, then config value, then the
    /// well-known endpoint for the selected network
    pub fn effective_rpc_url(&self) -> String {
        if let Ok(url) = std::env::var("SOLANA_RPC_URL") {
            if !url.is_empty() {
                return url;
            }
        }
        if let Some(url) = &self.rpc_url {
            if !url.is_empty() {
                return url.clone();
            }
        }
        match self.effective_network().as_str() {
            "devnet" => DEVNET_RPC.to_string(),
            _ => MAINNET_RPC.to_string(),
        }
    }

    pub fn effective_network(&self) -> String {
        std::env::var("SOLANA_NETWORK").unwrap_or_else(|_| self.network.clone())
    }
}

/// Watchlists: wallets and token symbols
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    #[serde(default)]
    pub wallets: Vec<WatchedWallet>,
    /// Token symbols to monitor; an unconfigured agent still watches SOL
    #[serde(default = "default_watch_tokens")]
    pub tokens: Vec<String>,
}

fn default_watch_tokens() -> Vec<String> {
    vec!["SOL".to_string()]
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            wallets: Vec::new(),
            tokens: default_watch_tokens(),
        }
    }
}

/// Monitoring policy
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSection {
    /// Data directory for snapshots and alert archives (`~` expanded)
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Wallet balance change threshold, percent
    #[serde(default = "default_wallet_threshold")]
    pub wallet_threshold_pct: f64,
    /// Token price change threshold, percent
    #[serde(default = "default_price_threshold")]
    pub price_threshold_pct: f64,
    /// Per-request timeout for upstream calls, seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Worker limit for the per-sweep fan-out
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_checks: usize,
}

fn default_data_dir() -> String {
    "~/.solwatch".to_string()
}
fn default_wallet_threshold() -> f64 {
    crate::domain::detector::DEFAULT_WALLET_THRESHOLD_PCT
}
fn default_price_threshold() -> f64 {
    crate::domain::detector::DEFAULT_PRICE_THRESHOLD_PCT
}
fn default_timeout_secs() -> u64 {
    12
}
fn default_max_concurrent() -> usize {
    8
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            wallet_threshold_pct: default_wallet_threshold(),
            price_threshold_pct: default_price_threshold(),
            request_timeout_secs: default_timeout_secs(),
            max_concurrent_checks: default_max_concurrent(),
        }
    }
}

impl MonitorSection {
    /// Data directory with `~` expanded
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir).to_string())
    }
}

/// Upstream API base URLs (overridable for tests and self-hosted mirrors)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_dexscreener_url")]
    pub dexscreener_url: String,
    #[serde(default = "default_jupiter_url")]
    pub jupiter_url: String,
}

fn default_dexscreener_url() -> String {
    crate::adapters::dexscreener::DEXSCREENER_API.to_string()
}
fn default_jupiter_url() -> String {
    crate::adapters::jupiter::JUPITER_API.to_string()
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            dexscreener_url: default_dexscreener_url(),
            jupiter_url: default_jupiter_url(),
        }
    }
}

/// Load configuration from an optional TOML file, then apply env overrides
/// and validate. A missing file is fine: the original agent ran env-only.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) if path.exists() => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        Some(path) => {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Config::default()
        }
        None => Config::default(),
    };

    apply_env_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Merge the env-var watchlists over the file-based ones
fn apply_env_overrides(config: &mut Config) {
    if let Ok(wallets_json) = std::env::var("SOLANA_WALLETS") {
        config.watch.wallets = parse_wallets_json(&wallets_json);
    }
    if let Ok(tokens_csv) = std::env::var("SOLANA_WATCHLIST") {
        config.watch.tokens = parse_watchlist_csv(&tokens_csv);
    }
}

/// Parse the `SOLANA_WALLETS` JSON array. Malformed input degrades to an
/// empty watchlist (logged) - the sweep still runs and reports on tokens.
pub fn parse_wallets_json(raw: &str) -> Vec<WatchedWallet> {
    match serde_json::from_str::<Vec<WatchedWallet>>(raw) {
        Ok(wallets) => wallets,
        Err(e) => {
            tracing::warn!(error = %e, "malformed SOLANA_WALLETS, treating watchlist as empty");
            Vec::new()
        }
    }
}

/// Parse the `SOLANA_WATCHLIST` CSV of token symbols
pub fn parse_watchlist_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}

impl Config {
    /// Validate thresholds and drop wallet entries that cannot be real
    /// addresses. Invalid entries are skipped with a warning rather than
    /// aborting the watchlist.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.monitor.wallet_threshold_pct <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "wallet_threshold_pct must be > 0, got {}",
                self.monitor.wallet_threshold_pct
            )));
        }
        if self.monitor.price_threshold_pct <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "price_threshold_pct must be > 0, got {}",
                self.monitor.price_threshold_pct
            )));
        }
        if self.monitor.max_concurrent_checks == 0 {
            return Err(ConfigError::Validation(
                "max_concurrent_checks must be > 0".to_string(),
            ));
        }
        if self.monitor.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }

        self.watch.wallets.retain(|w| {
            let plausible = w.address.len() >= MIN_ADDRESS_LEN;
            if !plausible {
                tracing::warn!(address = %w.address, "skipping implausible wallet address");
            }
            plausible
        });

        let network = self.solana.effective_network();
        if network != "mainnet-beta" && network != "devnet" {
            return Err(ConfigError::Validation(format!(
                "unknown network '{network}', expected mainnet-beta or devnet"
            )));
        }

        Ok(())
    }
}
