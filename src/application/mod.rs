//! Application Layer - Use cases
//!
//! - `sweep`: the monitoring cycle (fetch, detect, persist, report)
//! - `queries`: one-shot price / balance / quote / network lookups

pub mod queries;
pub mod sweep;

pub use queries::QueryService;
pub use sweep::{SweepError, SweepOutcome, SweepRunner};
