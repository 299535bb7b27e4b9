//! Token Registry
//!
//! Well-known mint addresses and per-asset decimal scales. The smallest-unit
//! scale is a property of the asset, not of any API call site, so quote
//! handling looks decimals up here instead of hard-coding 6-vs-9 branches.

use std::collections::HashMap;

/// Lamports per SOL (native asset uses 9 decimals)
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Static facts about one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
    pub mint: String,
    pub decimals: u8,
}

/// Symbol -> mint/decimals lookup for the assets the agent understands.
///
/// Symbols outside the registry are passed through verbatim (the caller may
/// already hold a raw mint address) with a SOL-like 9-decimal default.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    assets: HashMap<String, AssetInfo>,
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::well_known()
    }
}

impl TokenRegistry {
    /// Registry preloaded with the mints the original watchlist shipped with
    pub fn well_known() -> Self {
        let mut assets = HashMap::new();
        let mut add = |symbol: &str, mint: &str, decimals: u8| {
            assets.insert(
                symbol.to_string(),
                AssetInfo {
                    mint: mint.to_string(),
                    decimals,
                },
            );
        };

        add("SOL", "So11111111111111111111111111111111111111112", 9);
        add("USDC", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", 6);
        add("USDT", "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB", 6);
        add("BONK", "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263", 5);
        add("JUP", "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN", 6);
        add("RAY", "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R", 6);
        add("WIF", "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm", 6);

        Self { assets }
    }

    /// Register or override an asset
    pub fn insert(&mut self, symbol: impl Into<String>, mint: impl Into<String>, decimals: u8) {
        self.assets.insert(
            symbol.into(),
            AssetInfo {
                mint: mint.into(),
                decimals,
            },
        );
    }

    pub fn get(&self, symbol: &str) -> Option<&AssetInfo> {
        self.assets.get(&symbol.to_uppercase())
    }

    /// Mint address for a symbol; unknown symbols are assumed to already be
    /// mint addresses and returned unchanged
    pub fn mint_for(&self, symbol: &str) -> String {
        self.get(symbol)
            .map(|a| a.mint.clone())
            .unwrap_or_else(|| symbol.to_string())
    }

    /// Decimal scale for a symbol; unknown symbols default to 9 (SOL-like)
    pub fn decimals_for(&self, symbol: &str) -> u8 {
        self.get(symbol).map(|a| a.decimals).unwrap_or(9)
    }

    /// Convert a human amount to smallest units for this symbol
    pub fn to_raw(&self, symbol: &str, amount: f64) -> u64 {
        let scale = 10u64.pow(self.decimals_for(symbol) as u32);
        (amount * scale as f64) as u64
    }

    /// Convert a smallest-unit amount to a human-scaled value for this symbol
    pub fn to_human(&self, symbol: &str, amount_raw: u64) -> f64 {
        let scale = 10u64.pow(self.decimals_for(symbol) as u32);
        amount_raw as f64 / scale as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn well_known_scales() {
        let reg = TokenRegistry::well_known();
        assert_eq!(reg.decimals_for("SOL"), 9);
        assert_eq!(reg.decimals_for("USDC"), 6);
        assert_eq!(reg.decimals_for("usdt"), 6);
        assert_eq!(reg.decimals_for("BONK"), 5);
    }

    #[test]
    fn unknown_symbol_passes_through_as_mint() {
        let reg = TokenRegistry::well_known();
        let mint = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";
        assert_eq!(reg.mint_for(mint), mint);
        assert_eq!(reg.decimals_for(mint), 9);
    }

    #[test]
    fn raw_and_human_conversions() {
        let reg = TokenRegistry::well_known();
        assert_eq!(reg.to_raw("SOL", 1.5), 1_500_000_000);
        assert_eq!(reg.to_raw("USDC", 2.0), 2_000_000);
        assert_relative_eq!(reg.to_human("USDC", 2_500_000), 2.5);
        assert_relative_eq!(reg.to_human("SOL", LAMPORTS_PER_SOL), 1.0);
    }

    #[test]
    fn registry_is_extensible() {
        let mut reg = TokenRegistry::well_known();
        reg.insert("PYTH", "HZ1JovNiVvGrGNiiYvEozEVgZ58xaU3RKwX8eACQBCt3", 6);
        assert_eq!(reg.decimals_for("PYTH"), 6);
    }
}
