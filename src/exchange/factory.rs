//! Exchange construction by name.

use std::sync::Arc;
use std::time::Duration;

use super::{BingxClient, BitgetClient, BybitClient, Exchange};
use crate::error::{Error, Result};

/// Exchanges this build knows how to talk to.
pub const SUPPORTED_EXCHANGES: &[&str] = &["bingx", "bitget", "bybit"];

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .unwrap_or_default()
}

/// Build an adapter for a named exchange.
pub fn create_exchange(name: &str) -> Result<Arc<dyn Exchange>> {
    match name.to_lowercase().as_str() {
        "bybit" => Ok(Arc::new(BybitClient::new(http_client()))),
        "bitget" => Ok(Arc::new(BitgetClient::new(http_client()))),
        "bingx" => Ok(Arc::new(BingxClient::new(http_client()))),
        other => Err(Error::UnsupportedExchange(other.to_string())),
    }
}
