//! DexScreener payload types.
//!
//! Upstream fields come and go per pair, so everything is optional and
//! decoded with defaults; downstream code maps absences to "N/A".

use serde::Deserialize;

/// Response of `/latest/dex/search`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub pairs: Vec<PairInfo>,
}

/// One trading pair as DexScreener reports it, ordered by upstream relevance
/// (the first pair for a query is treated as canonical for that symbol)
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PairInfo {
    #[serde(default)]
    pub dex_id: Option<String>,
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub price_change: Option<ChangeWindows>,
    #[serde(default)]
    pub volume: Option<VolumeWindows>,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default)]
    pub base_token: Option<TokenMeta>,
    #[serde(default)]
    pub quote_token: Option<TokenMeta>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ChangeWindows {
    #[serde(default)]
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct VolumeWindows {
    #[serde(default)]
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Liquidity {
    #[serde(default)]
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TokenMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl PairInfo {
    /// 24h change as a display string, if reported
    pub fn change_24h(&self) -> Option<String> {
        self.price_change
            .as_ref()
            .and_then(|c| c.h24)
            .map(|v| v.to_string())
    }

    /// 24h volume in USD as a display string, if reported
    pub fn volume_24h(&self) -> Option<String> {
        self.volume
            .as_ref()
            .and_then(|v| v.h24)
            .map(|v| v.to_string())
    }

    /// Liquidity in USD as a display string, if reported
    pub fn liquidity_usd(&self) -> Option<String> {
        self.liquidity
            .as_ref()
            .and_then(|l| l.usd)
            .map(|v| v.to_string())
    }

    pub fn base_symbol(&self) -> Option<&str> {
        self.base_token.as_ref().and_then(|t| t.symbol.as_deref())
    }

    pub fn quote_symbol(&self) -> Option<&str> {
        self.quote_token.as_ref().and_then(|t| t.symbol.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_pair_payload() {
        let json = serde_json::json!({
            "pairs": [{
                "dexId": "raydium",
                "priceUsd": "142.51",
                "priceChange": {"h24": 3.2, "h1": 0.4},
                "volume": {"h24": 1200000.5},
                "liquidity": {"usd": 5400000.0},
                "baseToken": {"symbol": "SOL", "address": "So111..."},
                "quoteToken": {"symbol": "USDC"}
            }]
        });
        let resp: SearchResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.pairs.len(), 1);

        let pair = &resp.pairs[0];
        assert_eq!(pair.dex_id.as_deref(), Some("raydium"));
        assert_eq!(pair.price_usd.as_deref(), Some("142.51"));
        assert_eq!(pair.change_24h().as_deref(), Some("3.2"));
        assert_eq!(pair.volume_24h().as_deref(), Some("1200000.5"));
        assert_eq!(pair.liquidity_usd().as_deref(), Some("5400000"));
        assert_eq!(pair.base_symbol(), Some("SOL"));
        assert_eq!(pair.quote_symbol(), Some("USDC"));
    }

    #[test]
    fn tolerates_sparse_pair_payload() {
        let json = serde_json::json!({"pairs": [{"dexId": "orca"}]});
        let resp: SearchResponse = serde_json::from_value(json).unwrap();
        let pair = &resp.pairs[0];
        assert!(pair.price_usd.is_none());
        assert!(pair.change_24h().is_none());
        assert!(pair.volume_24h().is_none());
        assert!(pair.liquidity_usd().is_none());
    }

    #[test]
    fn missing_pairs_field_is_an_empty_list() {
        let resp: SearchResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(resp.pairs.is_empty());
    }
}
