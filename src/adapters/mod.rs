//! Adapters Layer - External System Clients
//!
//! Implementations of the agent's three independent upstream data sources:
//! - RPC: Solana JSON-RPC node (balances, slot, blockhash, performance)
//! - DexScreener: DEX aggregator search (prices, volume, liquidity)
//! - Jupiter: swap quoting
//!
//! Each adapter owns its HTTP client, a bounded timeout, and a `thiserror`
//! enum; none of them retries. They fail independently so one bad upstream
//! never prevents reporting on the others.

pub mod dexscreener;
pub mod jupiter;
pub mod rpc;

pub use dexscreener::DexScreenerClient;
pub use jupiter::JupiterClient;
pub use rpc::RpcClient;
