//! Change Detection
//!
//! Compares the current snapshot against the previous one and emits one alert
//! string per threshold breach. Pure and deterministic: same two snapshots in,
//! same ordered alert list out.

use std::collections::HashMap;

use crate::domain::observation::Snapshot;

/// Default threshold for wallet balance changes (percent)
pub const DEFAULT_WALLET_THRESHOLD_PCT: f64 = 5.0;
/// Default threshold for token price changes (percent)
pub const DEFAULT_PRICE_THRESHOLD_PCT: f64 = 10.0;

/// Single-threshold binary detector per metric kind.
///
/// Comparisons are strict (`abs(change) > threshold`), and a previous value
/// of zero or below never alerts: percentage change from nothing is
/// undefined, and a first-ever reading is not a change.
#[derive(Debug, Clone)]
pub struct Detector {
    pub wallet_threshold_pct: f64,
    pub price_threshold_pct: f64,
}

impl Default for Detector {
    fn default() -> Self {
        Self {
            wallet_threshold_pct: DEFAULT_WALLET_THRESHOLD_PCT,
            price_threshold_pct: DEFAULT_PRICE_THRESHOLD_PCT,
        }
    }
}

impl Detector {
    pub fn new(wallet_threshold_pct: f64, price_threshold_pct: f64) -> Self {
        Self {
            wallet_threshold_pct,
            price_threshold_pct,
        }
    }

    /// Detect significant changes between two snapshots.
    ///
    /// Returns wallet alerts first (in current-snapshot wallet order), then
    /// price alerts (in current-snapshot token order). An empty previous
    /// snapshot yields no alerts by construction.
    pub fn detect(&self, current: &Snapshot, previous: &Snapshot) -> Vec<String> {
        let mut alerts = Vec::new();

        let prev_wallets: HashMap<&str, f64> = previous
            .wallets
            .iter()
            .filter_map(|w| w.balance_sol.map(|b| (w.address.as_str(), b)))
            .collect();

        for wallet in &current.wallets {
            let (Some(prev_bal), Some(curr_bal)) = (
                prev_wallets.get(wallet.address.as_str()).copied(),
                wallet.balance_sol,
            ) else {
                continue;
            };
            if prev_bal <= 0.0 {
                continue;
            }
            let change_pct = (curr_bal - prev_bal) / prev_bal * 100.0;
            if change_pct.abs() > self.wallet_threshold_pct {
                let direction = if change_pct > 0.0 {
                    "increased"
                } else {
                    "decreased"
                };
                alerts.push(format!(
                    "Wallet {}: Balance {} by {:.1}% ({:.4} -> {:.4} SOL)",
                    wallet.label,
                    direction,
                    change_pct.abs(),
                    prev_bal,
                    curr_bal
                ));
            }
        }

        let prev_prices: HashMap<&str, f64> = previous
            .prices
            .iter()
            .filter_map(|p| p.price().map(|v| (p.symbol.as_str(), v)))
            .collect();

        for token in &current.prices {
            // A non-numeric price on either side is absence of data, not an
            // alert-worthy condition.
            let (Some(prev_price), Some(curr_price)) = (
                prev_prices.get(token.symbol.as_str()).copied(),
                token.price(),
            ) else {
                continue;
            };
            if prev_price <= 0.0 {
                continue;
            }
            let change_pct = (curr_price - prev_price) / prev_price * 100.0;
            if change_pct.abs() > self.price_threshold_pct {
                let direction = if change_pct > 0.0 { "pumped" } else { "dumped" };
                alerts.push(format!(
                    "{} {} {:.1}% (${:.4} -> ${:.4})",
                    token.symbol,
                    direction,
                    change_pct.abs(),
                    prev_price,
                    curr_price
                ));
            }
        }

        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::{TokenObservation, WalletObservation, WatchedWallet};

    fn wallet_obs(address: &str, label: &str, balance: Option<f64>) -> WalletObservation {
        let w = WatchedWallet::new(address, label);
        match balance {
            Some(b) => WalletObservation::ok(&w, b),
            None => WalletObservation::failed(&w, "rpc unreachable"),
        }
    }

    fn token_obs(symbol: &str, price: Option<&str>) -> TokenObservation {
        let mut obs = TokenObservation::failed(symbol, "placeholder");
        obs.error = None;
        obs.price_usd = price.map(|p| p.to_string());
        obs
    }

    fn snapshot(wallets: Vec<WalletObservation>, prices: Vec<TokenObservation>) -> Snapshot {
        Snapshot::new(wallets, prices)
    }

    #[test]
    fn identical_snapshots_yield_no_alerts() {
        let current = snapshot(
            vec![wallet_obs("a1", "Main", Some(100.0))],
            vec![token_obs("SOL", Some("150.00"))],
        );
        let detector = Detector::default();
        assert!(detector.detect(&current, &current.clone()).is_empty());
    }

    #[test]
    fn empty_previous_snapshot_yields_no_alerts() {
        let current = snapshot(
            vec![wallet_obs("a1", "Main", Some(1_000_000.0))],
            vec![token_obs("SOL", Some("150.00"))],
        );
        let detector = Detector::default();
        assert!(detector.detect(&current, &Snapshot::default()).is_empty());
    }

    #[test]
    fn wallet_increase_over_threshold_alerts() {
        let previous = snapshot(vec![wallet_obs("a1", "Main", Some(100.0))], vec![]);
        let current = snapshot(vec![wallet_obs("a1", "Main", Some(106.0))], vec![]);

        let alerts = Detector::default().detect(&current, &previous);
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("increased by 6.0%"));
        assert!(alerts[0].contains("100.0000 -> 106.0000"));
    }

    #[test]
    fn wallet_threshold_boundary_is_strict() {
        let previous = snapshot(vec![wallet_obs("a1", "Main", Some(100.0))], vec![]);

        // Exactly 5.0% must not alert
        let at_boundary = snapshot(vec![wallet_obs("a1", "Main", Some(105.0))], vec![]);
        assert!(Detector::default().detect(&at_boundary, &previous).is_empty());

        // Just over must alert
        let over = snapshot(vec![wallet_obs("a1", "Main", Some(105.0001))], vec![]);
        assert_eq!(Detector::default().detect(&over, &previous).len(), 1);
    }

    #[test]
    fn zero_previous_balance_never_alerts() {
        let previous = snapshot(vec![wallet_obs("a1", "Main", Some(0.0))], vec![]);
        let current = snapshot(vec![wallet_obs("a1", "Main", Some(5_000.0))], vec![]);
        assert!(Detector::default().detect(&current, &previous).is_empty());
    }

    #[test]
    fn new_wallet_never_alerts() {
        let previous = snapshot(vec![wallet_obs("other", "Old", Some(10.0))], vec![]);
        let current = snapshot(vec![wallet_obs("a1", "New", Some(9_999.0))], vec![]);
        assert!(Detector::default().detect(&current, &previous).is_empty());
    }

    #[test]
    fn failed_current_observation_never_alerts() {
        let previous = snapshot(vec![wallet_obs("a1", "Main", Some(100.0))], vec![]);
        let current = snapshot(vec![wallet_obs("a1", "Main", None)], vec![]);
        assert!(Detector::default().detect(&current, &previous).is_empty());
    }

    #[test]
    fn price_dump_over_threshold_alerts() {
        let previous = snapshot(vec![], vec![token_obs("XYZ", Some("1.000000"))]);
        let current = snapshot(vec![], vec![token_obs("XYZ", Some("0.850000"))]);

        let alerts = Detector::default().detect(&current, &previous);
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("XYZ dumped 15.0%"));
        assert!(alerts[0].contains("$1.0000 -> $0.8500"));
    }

    #[test]
    fn price_threshold_boundary_is_strict() {
        let previous = snapshot(vec![], vec![token_obs("SOL", Some("100.0"))]);

        let at_boundary = snapshot(vec![], vec![token_obs("SOL", Some("110.0"))]);
        assert!(Detector::default().detect(&at_boundary, &previous).is_empty());

        let over = snapshot(vec![], vec![token_obs("SOL", Some("110.011"))]);
        let alerts = Detector::default().detect(&over, &previous);
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("pumped"));
    }

    #[test]
    fn non_numeric_price_is_skipped_silently() {
        let previous = snapshot(vec![], vec![token_obs("SOL", Some("N/A"))]);
        let current = snapshot(vec![], vec![token_obs("SOL", Some("150.0"))]);
        assert!(Detector::default().detect(&current, &previous).is_empty());

        let previous = snapshot(vec![], vec![token_obs("SOL", Some("100.0"))]);
        let current = snapshot(vec![], vec![token_obs("SOL", None)]);
        assert!(Detector::default().detect(&current, &previous).is_empty());
    }

    #[test]
    fn wallet_alerts_precede_price_alerts_in_input_order() {
        let previous = snapshot(
            vec![
                wallet_obs("a1", "First", Some(100.0)),
                wallet_obs("a2", "Second", Some(100.0)),
            ],
            vec![
                token_obs("AAA", Some("1.0")),
                token_obs("BBB", Some("1.0")),
            ],
        );
        let current = snapshot(
            vec![
                wallet_obs("a1", "First", Some(200.0)),
                wallet_obs("a2", "Second", Some(50.0)),
            ],
            vec![
                token_obs("AAA", Some("2.0")),
                token_obs("BBB", Some("0.5")),
            ],
        );

        let detector = Detector::default();
        let alerts = detector.detect(&current, &previous);
        assert_eq!(alerts.len(), 4);
        assert!(alerts[0].contains("First"));
        assert!(alerts[1].contains("Second"));
        assert!(alerts[2].starts_with("AAA"));
        assert!(alerts[3].starts_with("BBB"));

        // Deterministic: re-running produces the identical list
        assert_eq!(detector.detect(&current, &previous), alerts);
    }

    #[test]
    fn custom_thresholds_are_honored() {
        let previous = snapshot(vec![wallet_obs("a1", "Main", Some(100.0))], vec![]);
        let current = snapshot(vec![wallet_obs("a1", "Main", Some(103.0))], vec![]);

        assert!(Detector::default().detect(&current, &previous).is_empty());
        let tight = Detector::new(2.0, 10.0);
        assert_eq!(tight.detect(&current, &previous).len(), 1);
    }
}
