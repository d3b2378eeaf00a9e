//! Exchange connectivity: trait, public REST adapters, and construction.

pub mod bingx;
pub mod bitget;
pub mod bybit;
pub mod factory;
pub mod traits;

pub use bingx::BingxClient;
pub use bitget::BitgetClient;
pub use bybit::BybitClient;
pub use factory::{create_exchange, SUPPORTED_EXCHANGES};
pub use traits::Exchange;

use rust_decimal::Decimal;

/// Parse a venue price string; empty, unparseable, or zero prices are
/// absent (venues report "0" for an empty book side).
pub(crate) fn parse_price(raw: Option<&str>) -> Option<Decimal> {
    let value: Decimal = raw?.trim().parse().ok()?;
    if value.is_zero() {
        None
    } else {
        Some(value)
    }
}

/// Parse a venue decimal string; zero is a legitimate value here.
pub(crate) fn parse_decimal(raw: Option<&str>) -> Option<Decimal> {
    raw?.trim().parse().ok()
}

/// Venue enable flags arrive as "1"/"0" or "true"/"false" strings; a
/// missing flag means enabled.
pub(crate) fn parse_enabled(raw: Option<&str>) -> bool {
    match raw {
        None => true,
        Some(value) => matches!(value.trim(), "1" | "true" | "True"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_price_is_absent() {
        assert_eq!(parse_price(Some("0")), None);
        assert_eq!(parse_price(Some("")), None);
        assert_eq!(parse_price(Some("50000.5")), Some(dec!(50000.5)));
        assert_eq!(parse_price(None), None);
    }

    #[test]
    fn zero_volume_is_kept() {
        assert_eq!(parse_decimal(Some("0")), Some(Decimal::ZERO));
        assert_eq!(parse_decimal(Some("garbage")), None);
    }

    #[test]
    fn missing_enable_flag_defaults_on() {
        assert!(parse_enabled(None));
        assert!(parse_enabled(Some("1")));
        assert!(parse_enabled(Some("true")));
        assert!(!parse_enabled(Some("0")));
        assert!(!parse_enabled(Some("false")));
    }
}
