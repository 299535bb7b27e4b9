//! Solana JSON-RPC Adapter
//!
//! Read-only chain queries over plain HTTP: balance, slot, blockhash, and
//! recent performance samples. No subscriptions, no signing.

mod client;

pub use client::{NetworkStatus, PerformanceSample, RpcClient, RpcError};
