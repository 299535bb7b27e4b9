//! Domain Layer - Core monitoring types and logic
//!
//! Pure types and functions with no network or disk access:
//! - `observation`: typed sweep records (wallets, tokens, snapshots)
//! - `tokens`: well-known mint registry and per-asset decimal scales
//! - `detector`: threshold-based change detection between snapshots
//! - `report`: markdown report rendering

pub mod detector;
pub mod observation;
pub mod report;
pub mod tokens;

pub use detector::{Detector, DEFAULT_PRICE_THRESHOLD_PCT, DEFAULT_WALLET_THRESHOLD_PCT};
pub use observation::{Snapshot, TokenObservation, WalletObservation, WatchedWallet};
pub use tokens::{AssetInfo, TokenRegistry, LAMPORTS_PER_SOL};
