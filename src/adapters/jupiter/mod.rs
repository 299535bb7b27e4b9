//! Jupiter Adapter
//!
//! Quote-only client for the Jupiter DEX aggregator. No swap building and no
//! transaction execution - this agent observes, it does not trade.

mod client;
mod quote;

pub use client::{JupiterClient, QuoteError, JUPITER_API};
pub use quote::{QuoteRequest, QuoteResponse, RoutePlanStep, SwapInfo, DEFAULT_SLIPPAGE_BPS};
