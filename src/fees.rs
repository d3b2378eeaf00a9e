//! Per-exchange taker fee schedule.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::config::FeesConfig;

/// Taker fee applied to unrecognized exchanges: 0.1%.
pub const DEFAULT_TAKER_FEE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// Static taker fee rates keyed by lowercase exchange name.
#[derive(Debug, Clone)]
pub struct FeeSchedule {
    taker: HashMap<String, Decimal>,
    default_taker: Decimal,
}

impl FeeSchedule {
    pub fn new(default_taker: Decimal) -> Self {
        Self {
            taker: HashMap::new(),
            default_taker,
        }
    }

    /// Override the taker rate for one exchange.
    pub fn with_taker(mut self, exchange: impl Into<String>, rate: Decimal) -> Self {
        self.taker.insert(exchange.into().to_lowercase(), rate);
        self
    }

    /// Taker fee rate for an exchange, falling back to the default for
    /// unknown names.
    pub fn taker(&self, exchange: &str) -> Decimal {
        self.taker
            .get(&exchange.to_lowercase())
            .copied()
            .unwrap_or(self.default_taker)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_TAKER_FEE)
    }
}

impl From<&FeesConfig> for FeeSchedule {
    fn from(config: &FeesConfig) -> Self {
        let mut schedule = Self::new(config.default_taker);
        for (exchange, rate) in &config.taker {
            schedule = schedule.with_taker(exchange.clone(), *rate);
        }
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn unknown_exchange_gets_default_rate() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.taker("nosuchvenue"), dec!(0.001));
    }

    #[test]
    fn override_is_case_insensitive() {
        let fees = FeeSchedule::default().with_taker("Bybit", dec!(0.0018));
        assert_eq!(fees.taker("bybit"), dec!(0.0018));
        assert_eq!(fees.taker("BYBIT"), dec!(0.0018));
        assert_eq!(fees.taker("bitget"), dec!(0.001));
    }
}
