//! Transfer-network types and canonical name normalization.
//!
//! Venues spell the same transfer rail differently ("TRC20", "Tron (TRC20)",
//! "trx"). Matching across venues happens on a canonical name derived from
//! the raw spelling; anything outside the known set passes through
//! upper-cased.

use rust_decimal::Decimal;
use std::collections::HashMap;

/// One transfer network as reported by a venue for a currency, before
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNetworkEntry {
    pub raw_name: String,
    pub withdraw_fee: Option<Decimal>,
    pub withdraw_enabled: bool,
    pub deposit_enabled: bool,
}

/// A venue network after canonical-name normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub normalized_name: String,
    pub raw_name: String,
    pub withdraw_fee: Option<Decimal>,
    pub withdraw_enabled: bool,
    pub deposit_enabled: bool,
}

/// Cheapest viable transfer network found for a currency.
///
/// An absent fee means the venue did not quote one: unknown, assumed
/// non-blocking but unquantified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestNetwork {
    pub network: String,
    pub withdraw_fee: Option<Decimal>,
    pub currency: String,
}

/// Per-exchange currency-network table: currency code -> reported networks.
///
/// A missing currency means "no network data available" for that venue, not
/// an error.
#[derive(Debug, Clone, Default)]
pub struct NetworkTable {
    currencies: HashMap<String, Vec<RawNetworkEntry>>,
}

impl NetworkTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, currency: impl Into<String>, entries: Vec<RawNetworkEntry>) {
        self.currencies.insert(currency.into(), entries);
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// Networks for one currency, deduplicated by canonical name.
    ///
    /// Entry order is preserved: tie-breaks downstream fall back to the
    /// first-listed network, so the result must not be re-keyed through an
    /// unordered map. When two raw entries normalize to the same canonical
    /// name the later one wins, in the earlier entry's position.
    pub fn networks_for(&self, currency: &str) -> Vec<NetworkInfo> {
        let mut result: Vec<NetworkInfo> = Vec::new();
        let mut index_by_name: HashMap<String, usize> = HashMap::new();
        let Some(entries) = self.currencies.get(currency) else {
            return result;
        };
        for entry in entries {
            let normalized = normalize_network_name(&entry.raw_name);
            let info = NetworkInfo {
                normalized_name: normalized.clone(),
                raw_name: entry.raw_name.clone(),
                withdraw_fee: entry.withdraw_fee,
                withdraw_enabled: entry.withdraw_enabled,
                deposit_enabled: entry.deposit_enabled,
            };
            match index_by_name.get(&normalized) {
                Some(&slot) => result[slot] = info,
                None => {
                    index_by_name.insert(normalized, result.len());
                    result.push(info);
                }
            }
        }
        result
    }
}

/// Map a venue-specific network spelling to its canonical name.
///
/// Matching runs on a lowercased copy with spaces, hyphens, and underscores
/// stripped. Check order matters: substrings nest ("tron" before the
/// catch-all, "trx" and "op" by exact match so names like "opbnb" fall
/// through).
pub fn normalize_network_name(name: &str) -> String {
    let key: String = name
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect();

    if key.contains("trc20") || key.contains("tron") || key == "trx" {
        return "TRC20".to_string();
    }
    if key.contains("erc20") || key.contains("eth") || key.contains("ethereum") {
        return "ERC20".to_string();
    }
    if key.contains("bep20") || key.contains("bsc") || key.contains("binancesmartchain") {
        return "BSC".to_string();
    }
    if key.contains("arbitrum") {
        return "ARBITRUM".to_string();
    }
    if key.contains("optimism") || key == "op" {
        return "OPTIMISM".to_string();
    }
    if key.contains("polygon") || key.contains("matic") {
        return "POLYGON".to_string();
    }
    if key.contains("sol") || key.contains("solana") {
        return "SOLANA".to_string();
    }
    name.to_uppercase()
}
