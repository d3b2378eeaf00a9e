//! Bitget v2 public REST adapter.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;

use super::{parse_decimal, parse_price, Exchange};
use crate::domain::{Quote, RawNetworkEntry, TickerMap};
use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://api.bitget.com";

pub struct BitgetClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct V2Response<T> {
    code: String,
    #[serde(default)]
    msg: String,
    data: Option<T>,
}

#[derive(Deserialize)]
struct SymbolInfo {
    #[serde(rename = "baseCoin")]
    base_coin: String,
    #[serde(rename = "quoteCoin")]
    quote_coin: String,
    status: Option<String>,
}

#[derive(Deserialize)]
struct Ticker {
    symbol: String,
    #[serde(rename = "bidPr")]
    bid_pr: Option<String>,
    #[serde(rename = "askPr")]
    ask_pr: Option<String>,
    #[serde(rename = "usdtVolume")]
    usdt_volume: Option<String>,
    #[serde(rename = "quoteVolume")]
    quote_volume: Option<String>,
}

#[derive(Deserialize)]
struct CoinInfo {
    coin: String,
    #[serde(default = "Vec::new")]
    chains: Vec<Chain>,
}

#[derive(Deserialize)]
struct Chain {
    chain: String,
    #[serde(rename = "withdrawFee")]
    withdraw_fee: Option<String>,
    withdrawable: Option<String>,
    rechargeable: Option<String>,
}

impl BitgetClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response: V2Response<T> = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.code != "00000" {
            return Err(Error::Exchange {
                exchange: "bitget".to_string(),
                reason: format!("code {}: {}", response.code, response.msg),
            });
        }
        response.data.ok_or_else(|| Error::Exchange {
            exchange: "bitget".to_string(),
            reason: "empty data".to_string(),
        })
    }
}

#[async_trait]
impl Exchange for BitgetClient {
    fn name(&self) -> &'static str {
        "bitget"
    }

    async fn spot_symbols(&self) -> Result<Vec<String>> {
        let symbols: Vec<SymbolInfo> = self.get("/api/v2/spot/public/symbols", &[]).await?;

        Ok(symbols
            .into_iter()
            .filter(|s| s.quote_coin == "USDT")
            .filter(|s| s.status.as_deref().map_or(true, |st| st == "online"))
            .map(|s| format!("{}/USDT", s.base_coin))
            .collect())
    }

    async fn fetch_tickers(&self, symbols: &[String]) -> Result<TickerMap> {
        let list: Vec<Ticker> = self.get("/api/v2/spot/market/tickers", &[]).await?;

        let wanted: HashSet<&str> = symbols.iter().map(String::as_str).collect();
        let mut tickers = TickerMap::new();
        for t in list {
            let Some(base) = t.symbol.strip_suffix("USDT") else {
                continue;
            };
            if base.is_empty() {
                continue;
            }
            let symbol = format!("{base}/USDT");
            if !wanted.contains(symbol.as_str()) {
                continue;
            }
            let quote_volume = parse_decimal(t.usdt_volume.as_deref())
                .or_else(|| parse_decimal(t.quote_volume.as_deref()));
            tickers.insert(
                symbol,
                Quote {
                    bid: parse_price(t.bid_pr.as_deref()),
                    ask: parse_price(t.ask_pr.as_deref()),
                    quote_volume,
                },
            );
        }
        Ok(tickers)
    }

    async fn currency_networks(&self, currency: &str) -> Result<Vec<RawNetworkEntry>> {
        let coins: Vec<CoinInfo> = self
            .get("/api/v2/spot/public/coins", &[("coin", currency)])
            .await?;

        let mut entries = Vec::new();
        for coin in coins {
            if !coin.coin.eq_ignore_ascii_case(currency) {
                continue;
            }
            for chain in coin.chains {
                if chain.chain.is_empty() {
                    continue;
                }
                entries.push(RawNetworkEntry {
                    raw_name: chain.chain,
                    withdraw_fee: parse_decimal(chain.withdraw_fee.as_deref()),
                    withdraw_enabled: chain.withdrawable.as_deref().map_or(true, |v| v == "true"),
                    deposit_enabled: chain.rechargeable.as_deref().map_or(true, |v| v == "true"),
                });
            }
        }
        Ok(entries)
    }
}
