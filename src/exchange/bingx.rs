//! BingX public REST adapter.
//!
//! Market data only: BingX gates currency-network metadata behind
//! authenticated endpoints, so this venue never contributes to network
//! resolution and the resolver simply sees no data for it.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

use super::{parse_decimal, parse_price, Exchange};
use crate::domain::{Quote, RawNetworkEntry, TickerMap};
use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://open-api.bingx.com";

pub struct BingxClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    code: i64,
    #[serde(default)]
    msg: String,
    data: Option<T>,
}

#[derive(Deserialize)]
struct SymbolList {
    #[serde(default = "Vec::new")]
    symbols: Vec<SymbolInfo>,
}

#[derive(Deserialize)]
struct SymbolInfo {
    /// "BASE-QUOTE" form, e.g. "BTC-USDT".
    symbol: String,
    status: Option<i64>,
}

#[derive(Deserialize)]
struct Ticker {
    symbol: String,
    #[serde(rename = "bidPrice")]
    bid_price: Option<String>,
    #[serde(rename = "bestBidPrice")]
    best_bid_price: Option<String>,
    #[serde(rename = "askPrice")]
    ask_price: Option<String>,
    #[serde(rename = "bestAskPrice")]
    best_ask_price: Option<String>,
    #[serde(rename = "quoteVolume")]
    quote_volume: Option<String>,
    /// Some deployments report turnover instead of quoteVolume.
    turnover: Option<String>,
}

impl BingxClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response: ApiResponse<T> = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.code != 0 {
            return Err(Error::Exchange {
                exchange: "bingx".to_string(),
                reason: format!("code {}: {}", response.code, response.msg),
            });
        }
        response.data.ok_or_else(|| Error::Exchange {
            exchange: "bingx".to_string(),
            reason: "empty data".to_string(),
        })
    }
}

fn dashed_to_slash(symbol: &str) -> Option<String> {
    let (base, quote) = symbol.split_once('-')?;
    if base.is_empty() || quote != "USDT" {
        return None;
    }
    Some(format!("{base}/USDT"))
}

#[async_trait]
impl Exchange for BingxClient {
    fn name(&self) -> &'static str {
        "bingx"
    }

    async fn spot_symbols(&self) -> Result<Vec<String>> {
        let list: SymbolList = self.get("/openApi/spot/v1/common/symbols").await?;

        Ok(list
            .symbols
            .into_iter()
            .filter(|s| s.status.map_or(true, |st| st == 1))
            .filter_map(|s| dashed_to_slash(&s.symbol))
            .collect())
    }

    async fn fetch_tickers(&self, symbols: &[String]) -> Result<TickerMap> {
        let list: Vec<Ticker> = self.get("/openApi/spot/v1/ticker/24hr").await?;

        let wanted: HashSet<&str> = symbols.iter().map(String::as_str).collect();
        let mut tickers = TickerMap::new();
        for t in list {
            let Some(symbol) = dashed_to_slash(&t.symbol) else {
                continue;
            };
            if !wanted.contains(symbol.as_str()) {
                continue;
            }
            let bid = parse_price(t.bid_price.as_deref())
                .or_else(|| parse_price(t.best_bid_price.as_deref()));
            let ask = parse_price(t.ask_price.as_deref())
                .or_else(|| parse_price(t.best_ask_price.as_deref()));
            let quote_volume = parse_decimal(t.quote_volume.as_deref())
                .or_else(|| parse_decimal(t.turnover.as_deref()));
            tickers.insert(
                symbol,
                Quote {
                    bid,
                    ask,
                    quote_volume,
                },
            );
        }
        Ok(tickers)
    }

    async fn currency_networks(&self, currency: &str) -> Result<Vec<RawNetworkEntry>> {
        debug!(currency, "bingx exposes no public network data");
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_dashed_symbols() {
        assert_eq!(dashed_to_slash("BTC-USDT"), Some("BTC/USDT".to_string()));
        assert_eq!(dashed_to_slash("BTC-USDC"), None);
        assert_eq!(dashed_to_slash("BTCUSDT"), None);
    }
}
