//! Cross-exchange transfer-network resolution.
//!
//! Given the currency-network tables of two venues, find the cheapest
//! network that the source can withdraw over and the destination can accept
//! deposits on. "No shared network", "no enabled route", and "fee unknown"
//! are all ordinary results here, never errors; the only failure mode is a
//! caller passing an empty currency code.
//!
//! Both entry points are read-only over the tables they are handed;
//! refreshing stale tables is the connectivity layer's job.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::domain::{BestNetwork, NetworkInfo, NetworkTable};
use crate::error::{ContractError, Result};

/// Absent-safe fee comparison: an unknown fee sorts after every known fee.
///
/// Returns true when `candidate` is strictly cheaper than `incumbent`, with
/// absent treated as +infinity on both sides. Two absent fees never replace
/// each other, so the first surviving candidate wins when no fee is known.
fn cheaper_fee(candidate: Option<Decimal>, incumbent: Option<Decimal>) -> bool {
    match (candidate, incumbent) {
        (Some(c), Some(i)) => c < i,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Cheapest network shared by `src` and `dst` for `currency` that `src` can
/// withdraw over and `dst` can accept deposits on.
///
/// Not symmetric: the enable flags are directional, so swapping `src` and
/// `dst` may change the answer.
pub fn best_common_network(
    src: &NetworkTable,
    dst: &NetworkTable,
    currency: &str,
) -> Result<Option<BestNetwork>> {
    if currency.trim().is_empty() {
        return Err(ContractError::EmptyCurrency.into());
    }

    let src_networks = src.networks_for(currency);
    let dst_networks = dst.networks_for(currency);
    if src_networks.is_empty() || dst_networks.is_empty() {
        return Ok(None);
    }

    let dst_by_name: HashMap<&str, &NetworkInfo> = dst_networks
        .iter()
        .map(|info| (info.normalized_name.as_str(), info))
        .collect();

    // Walk in the source's entry order so an all-absent-fee tie resolves to
    // the first network the source lists.
    let mut best: Option<(&str, Option<Decimal>)> = None;
    for src_info in &src_networks {
        let name = src_info.normalized_name.as_str();
        let Some(dst_info) = dst_by_name.get(name) else {
            continue;
        };
        if !src_info.withdraw_enabled || !dst_info.deposit_enabled {
            continue;
        }
        let fee = src_info.withdraw_fee;
        match best {
            None => best = Some((name, fee)),
            Some((_, incumbent)) if cheaper_fee(fee, incumbent) => best = Some((name, fee)),
            Some(_) => {}
        }
    }

    Ok(best.map(|(network, withdraw_fee)| BestNetwork {
        network: network.to_string(),
        withdraw_fee,
        currency: currency.to_string(),
    }))
}

/// Cheapest withdrawal-enabled network on a single exchange.
///
/// Fallback when no common route exists: informational, tells the operator
/// the cheapest way off one venue.
pub fn best_withdraw_network(
    table: &NetworkTable,
    currency: &str,
) -> Result<Option<BestNetwork>> {
    if currency.trim().is_empty() {
        return Err(ContractError::EmptyCurrency.into());
    }

    let networks = table.networks_for(currency);

    let mut best: Option<(&str, Option<Decimal>)> = None;
    for info in &networks {
        if !info.withdraw_enabled {
            continue;
        }
        let name = info.normalized_name.as_str();
        let fee = info.withdraw_fee;
        match best {
            None => best = Some((name, fee)),
            Some((_, incumbent)) if cheaper_fee(fee, incumbent) => best = Some((name, fee)),
            Some(_) => {}
        }
    }

    Ok(best.map(|(network, withdraw_fee)| BestNetwork {
        network: network.to_string(),
        withdraw_fee,
        currency: currency.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn known_fee_beats_unknown_fee() {
        assert!(cheaper_fee(Some(dec!(5)), None));
        assert!(!cheaper_fee(None, Some(dec!(5))));
        assert!(!cheaper_fee(None, None));
        assert!(cheaper_fee(Some(dec!(1)), Some(dec!(2))));
        assert!(!cheaper_fee(Some(dec!(2)), Some(dec!(2))));
    }
}
