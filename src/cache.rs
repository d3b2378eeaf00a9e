//! Caller-owned cache of network-resolution results.
//!
//! Resolution for a fixed (buy exchange, sell exchange, symbol) key is
//! deterministic given the same input tables, so the polling loop keeps
//! results across cycles and clears them when a new scan session starts.
//! The scanner and resolver never touch this cache themselves.

use std::collections::HashMap;
use std::fmt;

use crate::domain::BestNetwork;

/// Key for one directed cross-exchange route of one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub buy_exchange: String,
    pub sell_exchange: String,
    pub symbol: String,
}

impl RouteKey {
    pub fn new(
        buy_exchange: impl Into<String>,
        sell_exchange: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            buy_exchange: buy_exchange.into(),
            sell_exchange: sell_exchange.into(),
            symbol: symbol.into(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{}:{}",
            self.buy_exchange, self.sell_exchange, self.symbol
        )
    }
}

/// Resolution state for one currency of a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Resolution {
    /// Not computed yet.
    #[default]
    Pending,
    /// Computed: no viable route exists.
    NoRoute,
    /// Computed: cheapest viable network.
    Route(BestNetwork),
}

impl Resolution {
    pub fn is_pending(&self) -> bool {
        matches!(self, Resolution::Pending)
    }

    pub fn route(&self) -> Option<&BestNetwork> {
        match self {
            Resolution::Route(network) => Some(network),
            _ => None,
        }
    }
}

impl From<Option<BestNetwork>> for Resolution {
    fn from(result: Option<BestNetwork>) -> Self {
        match result {
            Some(network) => Resolution::Route(network),
            None => Resolution::NoRoute,
        }
    }
}

/// Resolution state for both currencies of a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteNetworks {
    /// Base currency of the symbol (the asset being moved between venues).
    pub base: Resolution,
    /// Quote currency of the symbol.
    pub quote: Resolution,
}

/// Map from route key to resolution results.
#[derive(Debug, Default)]
pub struct NetworkCache {
    entries: HashMap<RouteKey, RouteNetworks>,
}

impl NetworkCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &RouteKey) -> Option<&RouteNetworks> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &RouteKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: RouteKey, networks: RouteNetworks) {
        self.entries.insert(key, networks);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn route_key_renders_directed_form() {
        let key = RouteKey::new("bitget", "bybit", "BTC/USDT");
        assert_eq!(key.to_string(), "bitget->bybit:BTC/USDT");
    }

    #[test]
    fn resolution_from_optional_result() {
        let network = BestNetwork {
            network: "TRC20".to_string(),
            withdraw_fee: Some(dec!(1)),
            currency: "USDT".to_string(),
        };
        assert_eq!(
            Resolution::from(Some(network.clone())).route(),
            Some(&network)
        );
        assert_eq!(Resolution::from(None), Resolution::NoRoute);
        assert!(Resolution::default().is_pending());
    }

    #[test]
    fn cache_round_trip() {
        let mut cache = NetworkCache::new();
        let key = RouteKey::new("a", "b", "BTC/USDT");
        assert!(!cache.contains(&key));

        cache.insert(key.clone(), RouteNetworks::default());
        assert!(cache.contains(&key));
        assert!(cache.get(&key).unwrap().base.is_pending());

        cache.clear();
        assert!(cache.is_empty());
    }
}
