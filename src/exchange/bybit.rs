//! Bybit v5 public REST adapter.
//!
//! Uses the global host, which resolves in regions where the primary domain
//! does not.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;

use super::{parse_decimal, parse_enabled, parse_price, Exchange};
use crate::domain::{Quote, RawNetworkEntry, TickerMap};
use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://api.bybitglobal.com";

pub struct BybitClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct V5Response<T> {
    #[serde(rename = "retCode")]
    ret_code: i64,
    #[serde(rename = "retMsg", default)]
    ret_msg: String,
    result: Option<T>,
}

#[derive(Deserialize)]
struct ListResult<T> {
    #[serde(default = "Vec::new")]
    list: Vec<T>,
}

#[derive(Deserialize)]
struct Instrument {
    #[serde(rename = "baseCoin")]
    base_coin: String,
    #[serde(rename = "quoteCoin")]
    quote_coin: String,
}

#[derive(Deserialize)]
struct Ticker {
    symbol: String,
    #[serde(rename = "bid1Price")]
    bid1_price: Option<String>,
    #[serde(rename = "ask1Price")]
    ask1_price: Option<String>,
    #[serde(rename = "turnover24h")]
    turnover_24h: Option<String>,
}

#[derive(Deserialize)]
struct CoinInfoResult {
    #[serde(default = "Vec::new")]
    rows: Vec<CoinRow>,
}

#[derive(Deserialize)]
struct CoinRow {
    coin: String,
    #[serde(default = "Vec::new")]
    chains: Vec<Chain>,
}

#[derive(Deserialize)]
struct Chain {
    #[serde(rename = "chainType")]
    chain_type: Option<String>,
    chain: Option<String>,
    #[serde(rename = "withdrawFee")]
    withdraw_fee: Option<String>,
    #[serde(rename = "withdrawEnable")]
    withdraw_enable: Option<String>,
    #[serde(rename = "depositEnable")]
    deposit_enable: Option<String>,
}

impl BybitClient {
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
        let response: V5Response<T> = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.ret_code != 0 {
            return Err(Error::Exchange {
                exchange: "bybit".to_string(),
                reason: format!("retCode {}: {}", response.ret_code, response.ret_msg),
            });
        }
        response.result.ok_or_else(|| Error::Exchange {
            exchange: "bybit".to_string(),
            reason: "empty result".to_string(),
        })
    }
}

#[async_trait]
impl Exchange for BybitClient {
    fn name(&self) -> &'static str {
        "bybit"
    }

    async fn spot_symbols(&self) -> Result<Vec<String>> {
        let result: ListResult<Instrument> = self
            .get("/v5/market/instruments-info", &[("category", "spot")])
            .await?;

        Ok(result
            .list
            .into_iter()
            .filter(|i| i.quote_coin == "USDT")
            .map(|i| format!("{}/USDT", i.base_coin))
            .collect())
    }

    async fn fetch_tickers(&self, symbols: &[String]) -> Result<TickerMap> {
        let result: ListResult<Ticker> = self
            .get("/v5/market/tickers", &[("category", "spot")])
            .await?;

        let wanted: HashSet<&str> = symbols.iter().map(String::as_str).collect();
        let mut tickers = TickerMap::new();
        for t in result.list {
            // Venue format "BTCUSDT" -> "BTC/USDT".
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
            tickers.insert(
                symbol,
                Quote {
                    bid: parse_price(t.bid1_price.as_deref()),
                    ask: parse_price(t.ask1_price.as_deref()),
                    quote_volume: parse_decimal(t.turnover_24h.as_deref()),
                },
            );
        }
        Ok(tickers)
    }

    async fn currency_networks(&self, currency: &str) -> Result<Vec<RawNetworkEntry>> {
        let result: CoinInfoResult = self
            .get("/v5/asset/coin/query-info", &[("coin", currency)])
            .await?;

        let mut entries = Vec::new();
        for row in result.rows {
            if !row.coin.eq_ignore_ascii_case(currency) {
                continue;
            }
            for chain in row.chains {
                let raw_name = chain
                    .chain_type
                    .or(chain.chain)
                    .unwrap_or_default()
                    .to_uppercase();
                if raw_name.is_empty() {
                    continue;
                }
                entries.push(RawNetworkEntry {
                    raw_name,
                    withdraw_fee: parse_decimal(chain.withdraw_fee.as_deref()),
                    withdraw_enabled: parse_enabled(chain.withdraw_enable.as_deref()),
                    deposit_enabled: parse_enabled(chain.deposit_enable.as_deref()),
                });
            }
        }
        Ok(entries)
    }
}
