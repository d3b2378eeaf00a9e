use rust_decimal::Decimal;
use std::collections::HashMap;

/// Best bid/ask snapshot for one symbol on one exchange.
///
/// Rebuilt from scratch every poll cycle. Absent fields stay absent; an
/// exchange reporting no price is never treated as reporting zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Quote {
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    /// 24h turnover in the quote currency.
    pub quote_volume: Option<Decimal>,
}

/// Tickers for one exchange: symbol -> quote.
pub type TickerMap = HashMap<String, Quote>;

/// Tickers for all exchanges: exchange name -> ticker map.
///
/// An exchange that is offline and an exchange with no data for a symbol
/// look the same here: an empty or missing entry.
pub type TickersByExchange = HashMap<String, TickerMap>;

/// Split a `"BASE/QUOTE"` symbol into its currency codes.
pub fn split_symbol(symbol: &str) -> Option<(&str, &str)> {
    let (base, quote) = symbol.split_once('/')?;
    if base.is_empty() || quote.is_empty() {
        return None;
    }
    Some((base, quote))
}
