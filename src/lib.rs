//! solwatch - Solana wallet & token watchlist monitor
//!
//! Scheduled sweeps over a watchlist of wallets and tokens: fetch balances
//! and market data, diff against the previous snapshot, alert on threshold
//! breaches, persist, report.
//!
//! # Modules
//!
//! - `domain`: observations, snapshots, change detection, report rendering
//! - `adapters`: upstream clients (Solana JSON-RPC, DexScreener, Jupiter)
//! - `storage`: append-only snapshot store and alert archive
//! - `config`: TOML configuration with environment overrides
//! - `application`: sweep orchestration and one-shot query handlers

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod storage;
