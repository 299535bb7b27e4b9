//! Monitoring Sweep
//!
//! One sweep is one unit of work: fan out wallet and token checks, assemble
//! the snapshot, compare against the previous one, persist, render. The
//! previous snapshot is read before the current one is written, so "previous"
//! always means the last complete sweep. Nothing in the fan-out phase can
//! abort the sweep; every upstream failure degrades to a per-item error.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Semaphore;

use crate::adapters::dexscreener::{DexScreenerClient, PairInfo};
use crate::adapters::rpc::RpcClient;
use crate::config::Config;
use crate::domain::detector::Detector;
use crate::domain::observation::{Snapshot, TokenObservation, WalletObservation, WatchedWallet};
use crate::domain::report;
use crate::domain::tokens::TokenRegistry;
use crate::storage::{SnapshotStore, StoreError};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Client setup failed: {0}")]
    ClientSetup(String),
}

/// Everything one sweep produced
#[derive(Debug)]
pub struct SweepOutcome {
    pub snapshot: Snapshot,
    pub alerts: Vec<String>,
    pub report: String,
    pub snapshot_path: PathBuf,
    /// Set when at least one alert fired and the report was archived
    pub alert_path: Option<PathBuf>,
}

/// Owns the adapters and policy for running sweeps
pub struct SweepRunner {
    rpc: RpcClient,
    dex: DexScreenerClient,
    registry: TokenRegistry,
    detector: Detector,
    store: SnapshotStore,
    wallets: Vec<WatchedWallet>,
    tokens: Vec<String>,
    max_concurrent: usize,
}

impl SweepRunner {
    pub fn from_config(config: &Config) -> Result<Self, SweepError> {
        let timeout = Duration::from_secs(config.monitor.request_timeout_secs);

        let rpc = RpcClient::with_timeout(config.solana.effective_rpc_url(), timeout)
            .map_err(|e| SweepError::ClientSetup(e.to_string()))?;
        let dex = DexScreenerClient::with_timeout(config.apis.dexscreener_url.clone(), timeout)
            .map_err(|e| SweepError::ClientSetup(e.to_string()))?;

        Ok(Self {
            rpc,
            dex,
            registry: TokenRegistry::well_known(),
            detector: Detector::new(
                config.monitor.wallet_threshold_pct,
                config.monitor.price_threshold_pct,
            ),
            store: SnapshotStore::new(config.monitor.data_dir()),
            wallets: config.watch.wallets.clone(),
            tokens: config.watch.tokens.clone(),
            max_concurrent: config.monitor.max_concurrent_checks,
        })
    }

    /// Run one full sweep: fetch, detect, persist, report.
    ///
    /// Persistence happens only after all fan-out work has settled, and the
    /// snapshot is written unconditionally - even when identical to the
    /// previous one or when every upstream call failed.
    pub async fn run(&self) -> Result<SweepOutcome, SweepError> {
        tracing::info!(
            wallets = self.wallets.len(),
            tokens = self.tokens.len(),
            "starting monitoring sweep"
        );

        let limiter = Arc::new(Semaphore::new(self.max_concurrent));
        let (wallet_obs, token_obs) = tokio::join!(
            self.check_wallets(Arc::clone(&limiter)),
            self.check_prices(Arc::clone(&limiter)),
        );

        let current = Snapshot::new(wallet_obs, token_obs);

        // Read "previous" before writing "current": the detection baseline is
        // the last complete sweep, never the one in flight.
        let previous = self.store.latest_snapshot()?;
        let alerts = self.detector.detect(&current, &previous);
        let snapshot_path = self.store.write_snapshot(&current)?;

        let report = report::render(&current, &alerts, &previous);

        let alert_path = if alerts.is_empty() {
            None
        } else {
            tracing::warn!(count = alerts.len(), "alerts triggered");
            Some(self.store.archive_alert_report(&report)?)
        };

        Ok(SweepOutcome {
            snapshot: current,
            alerts,
            report,
            snapshot_path,
            alert_path,
        })
    }

    /// Check all watched wallets, bounded by the shared worker limit.
    ///
    /// Handles are awaited in spawn order, so the returned observations match
    /// watchlist order regardless of completion order.
    async fn check_wallets(&self, limiter: Arc<Semaphore>) -> Vec<WalletObservation> {
        let mut handles = Vec::with_capacity(self.wallets.len());
        for wallet in &self.wallets {
            let rpc = self.rpc.clone();
            let wallet = wallet.clone();
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                let _permit = limiter.acquire_owned().await.ok();
                check_wallet(&rpc, &wallet).await
            }));
        }

        let mut observations = Vec::with_capacity(handles.len());
        for (wallet, handle) in self.wallets.iter().zip(handles) {
            match handle.await {
                Ok(obs) => observations.push(obs),
                Err(e) => {
                    tracing::error!(label = %wallet.display_label(), error = %e, "wallet check task failed");
                    observations.push(WalletObservation::failed(wallet, format!("task failed: {e}")));
                }
            }
        }
        observations
    }

    /// Check all watchlist tokens, bounded by the shared worker limit
    async fn check_prices(&self, limiter: Arc<Semaphore>) -> Vec<TokenObservation> {
        let mut handles = Vec::with_capacity(self.tokens.len());
        for symbol in &self.tokens {
            let dex = self.dex.clone();
            let registry = self.registry.clone();
            let symbol = symbol.clone();
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move {
                let _permit = limiter.acquire_owned().await.ok();
                check_price(&dex, &registry, &symbol).await
            }));
        }

        let mut observations = Vec::with_capacity(handles.len());
        for (symbol, handle) in self.tokens.iter().zip(handles) {
            match handle.await {
                Ok(obs) => observations.push(obs),
                Err(e) => {
                    tracing::error!(symbol = %symbol, error = %e, "price check task failed");
                    observations.push(TokenObservation::failed(symbol, format!("task failed: {e}")));
                }
            }
        }
        observations
    }
}

async fn check_wallet(rpc: &RpcClient, wallet: &WatchedWallet) -> WalletObservation {
    match rpc.get_balance(&wallet.address).await {
        Ok(balance) => WalletObservation::ok(wallet, balance),
        Err(e) => {
            tracing::warn!(label = %wallet.display_label(), error = %e, "balance check failed");
            WalletObservation::failed(wallet, e.to_string())
        }
    }
}

async fn check_price(
    dex: &DexScreenerClient,
    registry: &TokenRegistry,
    symbol: &str,
) -> TokenObservation {
    // A known mint gets the precise pair lookup; anything else goes through
    // free-text search where the first pair is canonical.
    let pairs = match registry.get(symbol) {
        Some(asset) => dex.token_pairs("solana", &asset.mint).await,
        None => dex.search(symbol).await.map(|resp| resp.pairs),
    };

    match pairs {
        Ok(pairs) => match pairs.first() {
            Some(pair) => observation_from_pair(symbol, pair),
            None => TokenObservation::failed(symbol, "No pairs found"),
        },
        Err(e) => {
            tracing::warn!(symbol, error = %e, "price check failed");
            TokenObservation::failed(symbol, e.to_string())
        }
    }
}

fn observation_from_pair(symbol: &str, pair: &PairInfo) -> TokenObservation {
    TokenObservation {
        symbol: symbol.to_string(),
        price_usd: pair.price_usd.clone(),
        change_24h: pair.change_24h(),
        volume_24h: pair.volume_24h(),
        liquidity_usd: pair.liquidity_usd(),
        dex: pair.dex_id.clone(),
        timestamp: chrono::Utc::now(),
        error: None,
    }
}
