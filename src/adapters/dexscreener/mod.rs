//! DexScreener Adapter
//!
//! Read-only market search against the DexScreener aggregator. An empty pair
//! list is the "no market found" outcome, not an error.

mod client;
mod types;

pub use client::{DexScreenerClient, MarketError, DEXSCREENER_API};
pub use types::{ChangeWindows, Liquidity, PairInfo, SearchResponse, TokenMeta, VolumeWindows};
