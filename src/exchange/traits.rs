//! Exchange trait definition.
//!
//! The scanner and resolver never talk to a venue directly; they consume
//! normalized quotes and network tables produced through this interface.

use async_trait::async_trait;

use crate::domain::{RawNetworkEntry, TickerMap};
use crate::error::Result;

/// A venue that can serve public spot market data.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// Exchange name for logging and fee lookup.
    fn name(&self) -> &'static str;

    /// Active USDT spot symbols in `"BASE/USDT"` form.
    async fn spot_symbols(&self) -> Result<Vec<String>>;

    /// Best bid/ask and 24h quote turnover for the requested symbols.
    ///
    /// Symbols the venue has no data for are simply missing from the map.
    async fn fetch_tickers(&self, symbols: &[String]) -> Result<TickerMap>;

    /// Transfer networks the venue reports for one currency. An empty list
    /// means the venue exposes no network data for it.
    async fn currency_networks(&self, currency: &str) -> Result<Vec<RawNetworkEntry>>;
}
