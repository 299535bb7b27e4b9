//! One-shot Queries
//!
//! Handlers behind the `price`, `balance`, `quote`, and `network`
//! subcommands. Each returns rendered markdown; upstream failures are
//! reported inside the text, mirroring the sweep's degrade-don't-abort
//! policy.

use std::time::Duration;

use crate::adapters::dexscreener::{DexScreenerClient, PairInfo};
use crate::adapters::jupiter::{JupiterClient, QuoteRequest};
use crate::adapters::rpc::{NetworkStatus, RpcClient};
use crate::config::Config;
use crate::domain::tokens::TokenRegistry;

use super::sweep::SweepError;

/// Shortest address worth sending to the node
const MIN_ADDRESS_LEN: usize = 32;

/// Adapters bundle for the one-shot query commands
pub struct QueryService {
    rpc: RpcClient,
    dex: DexScreenerClient,
    jupiter: JupiterClient,
    registry: TokenRegistry,
    network: String,
}

impl QueryService {
    pub fn from_config(config: &Config) -> Result<Self, SweepError> {
        let timeout = Duration::from_secs(config.monitor.request_timeout_secs);

        let rpc = RpcClient::with_timeout(config.solana.effective_rpc_url(), timeout)
            .map_err(|e| SweepError::ClientSetup(e.to_string()))?;
        let dex = DexScreenerClient::with_timeout(config.apis.dexscreener_url.clone(), timeout)
            .map_err(|e| SweepError::ClientSetup(e.to_string()))?;
        let jupiter = JupiterClient::with_timeout(config.apis.jupiter_url.clone(), timeout)
            .map_err(|e| SweepError::ClientSetup(e.to_string()))?;

        Ok(Self {
            rpc,
            dex,
            jupiter,
            registry: TokenRegistry::well_known(),
            network: config.solana.effective_network(),
        })
    }

    /// Price check for a token symbol or raw mint address
    pub async fn price(&self, token: &str) -> String {
        let token_upper = token.trim().to_uppercase();
        let symbol = if token_upper.is_empty() {
            "SOL"
        } else {
            token_upper.as_str()
        };
        tracing::info!(symbol, "price check");

        let pairs = match self.registry.get(symbol) {
            Some(asset) => self.dex.token_pairs("solana", &asset.mint).await,
            None => self.dex.search(token.trim()).await.map(|r| r.pairs),
        };

        match pairs {
            Err(e) => format!("Failed to fetch price data: {e}"),
            Ok(pairs) if pairs.is_empty() => format!("No trading pairs found for: {symbol}"),
            Ok(pairs) => render_price_pairs(symbol, &pairs),
        }
    }

    /// Balance check for a wallet address, with a best-effort USD estimate
    pub async fn balance(&self, address: &str) -> String {
        let address = address.trim();
        if address.len() < MIN_ADDRESS_LEN {
            return "Please provide a valid Solana wallet address.".to_string();
        }
        let prefix: String = address.chars().take(8).collect();
        tracing::info!(address_prefix = %prefix, "balance check");

        let balance = match self.rpc.get_balance(address).await {
            Ok(balance) => balance,
            Err(e) => return format!("Balance query failed: {e}"),
        };

        // USD estimate is decoration; its failure must not hide the balance.
        let sol_price = match self.dex.search("SOL").await {
            Ok(resp) => resp
                .pairs
                .iter()
                .find(|p| p.base_symbol() == Some("SOL"))
                .and_then(|p| p.price_usd.as_deref())
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|p| *p > 0.0),
            Err(_) => None,
        };

        render_balance(address, balance, sol_price, &self.network)
    }

    /// Swap quote between two symbols (or raw mints)
    pub async fn quote(&self, from: &str, to: &str, amount: f64, slippage_bps: u16) -> String {
        let from = from.trim().to_uppercase();
        let to = to.trim().to_uppercase();
        tracing::info!(%from, %to, amount, "swap quote");

        let request = QuoteRequest::new(
            self.registry.mint_for(&from),
            self.registry.mint_for(&to),
            self.registry.to_raw(&from, amount),
            slippage_bps,
        );

        match self.jupiter.get_quote(&request).await {
            Err(e) => format!("Jupiter quote failed: {e}"),
            Ok(quote) => {
                let out_human = self.registry.to_human(&to, quote.output_amount_raw());
                let impact = quote
                    .price_impact_pct
                    .clone()
                    .unwrap_or_else(|| "0".to_string());
                let slippage = if quote.slippage_bps > 0 {
                    quote.slippage_bps
                } else {
                    slippage_bps
                };
                let hops = quote.hop_count();
                format!(
                    "## Jupiter Swap Quote\n\n\
                     **{amount} {from}** -> **{out_human:.6} {to}**\n\
                     - Price Impact: {impact}%\n\
                     - Slippage Tolerance: {slippage} bps ({:.2}%)\n\
                     - Route: {hops} hop{}\n\n\
                     *This is a quote only — no swap executed.*\n",
                    slippage as f64 / 100.0,
                    if hops == 1 { "" } else { "s" },
                )
            }
        }
    }

    /// Chain-health probe
    pub async fn network(&self) -> String {
        tracing::info!("network status check");
        match self.rpc.get_network_status(3).await {
            Err(e) => format!("Network status query failed: {e}"),
            Ok(status) => render_network_status(&status, &self.network),
        }
    }
}

fn render_price_pairs(symbol: &str, pairs: &[PairInfo]) -> String {
    let mut lines = vec![format!("## Price Check: {symbol}\n")];
    for pair in pairs.iter().take(3) {
        let field = |v: Option<String>| v.unwrap_or_else(|| "N/A".to_string());
        lines.push(format!(
            "**{}/{}** on {}\n\
             - Price: **${}**\n\
             - 24h Change: {}%\n\
             - 24h Volume: ${}\n\
             - Liquidity: ${}\n",
            pair.base_symbol().unwrap_or("?"),
            pair.quote_symbol().unwrap_or("?"),
            pair.dex_id.as_deref().unwrap_or("Unknown"),
            field(pair.price_usd.clone()),
            field(pair.change_24h()),
            field(pair.volume_24h()),
            field(pair.liquidity_usd()),
        ));
    }
    lines.join("\n")
}

fn render_balance(address: &str, balance: f64, sol_price: Option<f64>, network: &str) -> String {
    // Char-based truncation: the address is caller-supplied and the byte
    // length gate upstream does not guarantee char boundaries.
    let chars: Vec<char> = address.chars().collect();
    let short = format!(
        "{}...{}",
        chars.iter().take(8).collect::<String>(),
        chars[chars.len().saturating_sub(4)..]
            .iter()
            .collect::<String>()
    );
    let mut lines = vec![
        "## Wallet Balance\n".to_string(),
        format!("**Address:** `{short}`\n"),
        format!("**Balance:** {balance:.4} SOL\n"),
    ];
    if let Some(price) = sol_price {
        lines.push(format!(
            "**USD Value:** ~${:.2} (@ ${:.2}/SOL)\n",
            balance * price,
            price
        ));
    }
    lines.push(format!("**Network:** {network}\n"));
    lines.join("\n")
}

fn render_network_status(status: &NetworkStatus, network: &str) -> String {
    let hash_prefix: String = status.blockhash.chars().take(16).collect();
    let mut lines = vec![
        "## Solana Network Status\n".to_string(),
        format!("**Current Slot:** {}\n", status.slot),
        format!("**Latest Blockhash:** `{hash_prefix}...`\n"),
        format!("**Network:** {network}\n"),
    ];

    if !status.samples.is_empty() {
        lines.push("\n**Recent Performance:**\n".to_string());
        for sample in status.samples.iter().take(3) {
            lines.push(format!(
                "- Slot {}: {} TPS ({} txs)\n",
                sample.slot,
                sample.tps(),
                sample.num_transactions
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::rpc::PerformanceSample;

    fn sample_pair() -> PairInfo {
        serde_json::from_value(serde_json::json!({
            "dexId": "raydium",
            "priceUsd": "142.51",
            "priceChange": {"h24": 3.2},
            "volume": {"h24": 1200000.0},
            "liquidity": {"usd": 5400000.0},
            "baseToken": {"symbol": "SOL"},
            "quoteToken": {"symbol": "USDC"}
        }))
        .unwrap()
    }

    #[test]
    fn price_rendering_caps_at_three_pairs() {
        let pairs = vec![sample_pair(), sample_pair(), sample_pair(), sample_pair()];
        let out = render_price_pairs("SOL", &pairs);
        assert_eq!(out.matches("**SOL/USDC** on raydium").count(), 3);
        assert!(out.contains("## Price Check: SOL"));
        assert!(out.contains("- Price: **$142.51**"));
    }

    #[test]
    fn price_rendering_uses_na_for_missing_fields() {
        let out = render_price_pairs("XYZ", &[PairInfo::default()]);
        assert!(out.contains("**?/?** on Unknown"));
        assert!(out.contains("- Price: **$N/A**"));
    }

    #[test]
    fn balance_rendering_truncates_address() {
        let address = "So11111111111111111111111111111111111111112";
        let out = render_balance(address, 2.5, Some(100.0), "mainnet-beta");
        assert!(out.contains("`So111111...1112`"));
        assert!(out.contains("**Balance:** 2.5000 SOL"));
        assert!(out.contains("**USD Value:** ~$250.00 (@ $100.00/SOL)"));
        assert!(out.contains("**Network:** mainnet-beta"));
    }

    #[test]
    fn balance_rendering_survives_multibyte_addresses() {
        // 12 three-byte chars pass a byte-length gate without any char
        // boundary at byte 8
        let out = render_balance("€€€€€€€€€€€€", 1.0, None, "mainnet-beta");
        assert!(out.contains("`€€€€€€€€...€€€€`"));
        assert!(out.contains("**Balance:** 1.0000 SOL"));
    }

    #[test]
    fn balance_rendering_omits_usd_line_without_price() {
        let address = "So11111111111111111111111111111111111111112";
        let out = render_balance(address, 2.5, None, "devnet");
        assert!(!out.contains("USD Value"));
    }

    #[test]
    fn network_rendering_includes_tps_per_sample() {
        let status = NetworkStatus {
            slot: 123_456,
            blockhash: "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM".to_string(),
            samples: vec![
                PerformanceSample {
                    slot: 123_400,
                    num_transactions: 180,
                    sample_period_secs: 60,
                },
                PerformanceSample {
                    slot: 123_340,
                    num_transactions: 0,
                    sample_period_secs: 0,
                },
            ],
        };
        let out = render_network_status(&status, "mainnet-beta");
        assert!(out.contains("**Current Slot:** 123456"));
        assert!(out.contains("`9WzDXwBbmkg8ZTbN...`"));
        assert!(out.contains("- Slot 123400: 3 TPS (180 txs)"));
        assert!(out.contains("- Slot 123340: 0 TPS (0 txs)"));
    }

    #[test]
    fn network_rendering_skips_empty_samples_section() {
        let status = NetworkStatus {
            slot: 1,
            blockhash: "abc".to_string(),
            samples: vec![],
        };
        let out = render_network_status(&status, "devnet");
        assert!(!out.contains("Recent Performance"));
    }
}
