//! Report Formatter
//!
//! Renders a snapshot plus its alerts into the markdown report that gets
//! printed and archived. Pure: no I/O, no mutation of inputs.

use crate::domain::observation::Snapshot;

/// Sentinel line used when no alert fired
pub const ALL_QUIET: &str = "*No significant changes detected. All quiet on the chain.*";

/// Render the monitoring report.
///
/// Sections in order: dated header, wallet bullets (balance or inline error),
/// token price table (rows with errors omitted), alerts or the all-quiet
/// sentinel. The previous snapshot is accepted for interface stability but
/// the report only shows current readings; deltas live in the alert text.
pub fn render(current: &Snapshot, alerts: &[String], _previous: &Snapshot) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "## Solana Monitor — {}\n",
        current.timestamp.format("%Y-%m-%d")
    ));

    if !current.wallets.is_empty() {
        lines.push("### Wallets\n".to_string());
        for w in &current.wallets {
            match w.balance_sol {
                Some(balance) => {
                    lines.push(format!("- **{}**: {:.4} SOL\n", w.label, balance));
                }
                None => {
                    let err = w.error.as_deref().unwrap_or("Unknown");
                    lines.push(format!("- **{}**: Error — {}\n", w.label, err));
                }
            }
        }
    }

    if !current.prices.is_empty() {
        lines.push("\n### Token Prices\n".to_string());
        lines.push("| Token | Price | 24h | Volume | Liquidity |\n".to_string());
        lines.push("|-------|-------|-----|--------|----------|\n".to_string());
        for p in current.prices.iter().filter(|p| p.error.is_none()) {
            let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
            lines.push(format!(
                "| {} | ${} | {}% | ${} | ${} |\n",
                p.symbol,
                field(&p.price_usd),
                field(&p.change_24h),
                field(&p.volume_24h),
                field(&p.liquidity_usd),
            ));
        }
    }

    if alerts.is_empty() {
        lines.push(format!("\n{ALL_QUIET}\n"));
    } else {
        lines.push("\n### Alerts\n".to_string());
        for alert in alerts {
            lines.push(format!("- {alert}\n"));
        }
    }

    lines.concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::{TokenObservation, WalletObservation, WatchedWallet};

    fn sample_snapshot() -> Snapshot {
        let main = WatchedWallet::new("addr-1", "Main");
        let cold = WatchedWallet::new("addr-2", "Cold");

        let mut sol = TokenObservation::failed("SOL", "placeholder");
        sol.error = None;
        sol.price_usd = Some("142.51".to_string());
        sol.change_24h = Some("3.2".to_string());
        sol.volume_24h = Some("1200000".to_string());
        sol.liquidity_usd = Some("5400000".to_string());
        sol.dex = Some("raydium".to_string());

        Snapshot::new(
            vec![
                WalletObservation::ok(&main, 42.123456),
                WalletObservation::failed(&cold, "rpc timeout"),
            ],
            vec![sol, TokenObservation::failed("BONK", "No pairs found")],
        )
    }

    #[test]
    fn report_contains_all_sections_in_order() {
        let snapshot = sample_snapshot();
        let alerts = vec!["SOL pumped 12.0% ($127.0000 -> $142.5100)".to_string()];
        let report = render(&snapshot, &alerts, &Snapshot::default());

        let header = report.find("## Solana Monitor").unwrap();
        let wallets = report.find("### Wallets").unwrap();
        let prices = report.find("### Token Prices").unwrap();
        let alerts_at = report.find("### Alerts").unwrap();
        assert!(header < wallets && wallets < prices && prices < alerts_at);
    }

    #[test]
    fn balances_are_rendered_with_four_decimals() {
        let report = render(&sample_snapshot(), &[], &Snapshot::default());
        assert!(report.contains("- **Main**: 42.1235 SOL"));
    }

    #[test]
    fn failed_wallet_shows_inline_error() {
        let report = render(&sample_snapshot(), &[], &Snapshot::default());
        assert!(report.contains("- **Cold**: Error — rpc timeout"));
    }

    #[test]
    fn errored_tokens_are_omitted_from_the_table() {
        let report = render(&sample_snapshot(), &[], &Snapshot::default());
        assert!(report.contains("| SOL | $142.51 | 3.2% | $1200000 | $5400000 |"));
        assert!(!report.contains("| BONK |"));
    }

    #[test]
    fn no_alerts_renders_sentinel() {
        let report = render(&sample_snapshot(), &[], &Snapshot::default());
        assert!(report.contains(ALL_QUIET));
        assert!(!report.contains("### Alerts"));
    }

    #[test]
    fn alerts_are_listed_verbatim() {
        let alerts = vec![
            "Wallet Main: Balance increased by 6.0% (100.0000 -> 106.0000 SOL)".to_string(),
            "XYZ dumped 15.0% ($1.0000 -> $0.8500)".to_string(),
        ];
        let report = render(&sample_snapshot(), &alerts, &Snapshot::default());
        for alert in &alerts {
            assert!(report.contains(&format!("- {alert}")));
        }
        assert!(!report.contains(ALL_QUIET));
    }

    #[test]
    fn empty_snapshot_still_produces_a_report() {
        let report = render(&Snapshot::default(), &[], &Snapshot::default());
        assert!(report.starts_with("## Solana Monitor"));
        assert!(!report.contains("### Wallets"));
        assert!(!report.contains("### Token Prices"));
        assert!(report.contains(ALL_QUIET));
    }
}
