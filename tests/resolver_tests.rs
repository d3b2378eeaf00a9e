use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use spreadscan::domain::{NetworkTable, RawNetworkEntry};
use spreadscan::error::{ContractError, Error};
use spreadscan::resolver::{best_common_network, best_withdraw_network};

fn entry(
    raw_name: &str,
    fee: Option<Decimal>,
    withdraw_enabled: bool,
    deposit_enabled: bool,
) -> RawNetworkEntry {
    RawNetworkEntry {
        raw_name: raw_name.to_string(),
        withdraw_fee: fee,
        withdraw_enabled,
        deposit_enabled,
    }
}

fn table(currency: &str, entries: Vec<RawNetworkEntry>) -> NetworkTable {
    let mut table = NetworkTable::new();
    table.insert(currency, entries);
    table
}

#[test]
fn picks_cheapest_shared_network() {
    let src = table(
        "USDT",
        vec![
            entry("ERC20", Some(dec!(10)), true, true),
            entry("TRC20", Some(dec!(1.0)), true, true),
        ],
    );
    let dst = table(
        "USDT",
        vec![
            entry("ERC20", Some(dec!(5)), true, true),
            entry("TRC20", Some(dec!(2.5)), true, true),
        ],
    );

    let best = best_common_network(&src, &dst, "USDT").unwrap().unwrap();
    assert_eq!(best.network, "TRC20");
    // Fee comes from the withdrawing side.
    assert_eq!(best.withdraw_fee, Some(dec!(1.0)));
    assert_eq!(best.currency, "USDT");
}

#[test]
fn matches_across_venue_spellings() {
    let src = table("USDT", vec![entry("Tron (TRC20)", Some(dec!(1)), true, true)]);
    let dst = table("USDT", vec![entry("TRX", None, true, true)]);

    let best = best_common_network(&src, &dst, "USDT").unwrap().unwrap();
    assert_eq!(best.network, "TRC20");
}

#[test]
fn route_requires_withdraw_at_source_and_deposit_at_destination() {
    // Withdrawals suspended at the source.
    let src = table("USDT", vec![entry("TRC20", Some(dec!(1)), false, true)]);
    let dst = table("USDT", vec![entry("TRC20", Some(dec!(1)), true, true)]);
    assert!(best_common_network(&src, &dst, "USDT").unwrap().is_none());

    // Deposits suspended at the destination.
    let src = table("USDT", vec![entry("TRC20", Some(dec!(1)), true, true)]);
    let dst = table("USDT", vec![entry("TRC20", Some(dec!(1)), true, false)]);
    assert!(best_common_network(&src, &dst, "USDT").unwrap().is_none());
}

#[test]
fn resolution_is_directional() {
    let a = table("USDT", vec![entry("TRC20", Some(dec!(1)), true, false)]);
    let b = table("USDT", vec![entry("TRC20", Some(dec!(2)), false, true)]);

    // a withdraws, b deposits: viable.
    assert!(best_common_network(&a, &b, "USDT").unwrap().is_some());
    // Reversed direction has no withdrawable side.
    assert!(best_common_network(&b, &a, "USDT").unwrap().is_none());
}

#[test]
fn known_fee_beats_absent_fee() {
    let src = table(
        "USDT",
        vec![
            entry("TRC20", None, true, true),
            entry("ERC20", Some(dec!(20)), true, true),
        ],
    );
    let dst = table(
        "USDT",
        vec![
            entry("TRC20", Some(dec!(1)), true, true),
            entry("ERC20", Some(dec!(1)), true, true),
        ],
    );

    let best = best_common_network(&src, &dst, "USDT").unwrap().unwrap();
    assert_eq!(best.network, "ERC20");
    assert_eq!(best.withdraw_fee, Some(dec!(20)));
}

#[test]
fn all_absent_fees_still_resolve() {
    let src = table("TON", vec![entry("TON", None, true, true)]);
    let dst = table("TON", vec![entry("TON", None, true, true)]);

    let best = best_common_network(&src, &dst, "TON").unwrap().unwrap();
    assert_eq!(best.network, "TON");
    assert_eq!(best.withdraw_fee, None);
}

#[test]
fn all_absent_fees_resolve_to_the_first_listed_network() {
    // Three shared networks, none quoting a fee: the winner must be the
    // first one the source lists, every time.
    let src = table(
        "USDT",
        vec![
            entry("ARBITRUM", None, true, true),
            entry("BSC", None, true, true),
            entry("POLYGON", None, true, true),
        ],
    );
    let dst = table(
        "USDT",
        vec![
            entry("POLYGON", None, true, true),
            entry("BSC", None, true, true),
            entry("ARBITRUM", None, true, true),
        ],
    );

    for _ in 0..64 {
        let best = best_common_network(&src, &dst, "USDT").unwrap().unwrap();
        assert_eq!(best.network, "ARBITRUM");
    }
}

#[test]
fn disjoint_networks_yield_no_route() {
    let src = table("USDT", vec![entry("TRC20", Some(dec!(1)), true, true)]);
    let dst = table("USDT", vec![entry("SOLANA", Some(dec!(1)), true, true)]);
    assert!(best_common_network(&src, &dst, "USDT").unwrap().is_none());
}

#[test]
fn missing_currency_data_yields_no_route() {
    let src = table("USDT", vec![entry("TRC20", Some(dec!(1)), true, true)]);
    let dst = NetworkTable::new();
    assert!(best_common_network(&src, &dst, "USDT").unwrap().is_none());
    assert!(best_common_network(&dst, &src, "USDT").unwrap().is_none());
}

#[test]
fn empty_currency_code_fails_fast() {
    let table = NetworkTable::new();
    for currency in ["", "   "] {
        assert!(matches!(
            best_common_network(&table, &table, currency),
            Err(Error::Contract(ContractError::EmptyCurrency))
        ));
        assert!(matches!(
            best_withdraw_network(&table, currency),
            Err(Error::Contract(ContractError::EmptyCurrency))
        ));
    }
}

#[test]
fn withdraw_fallback_picks_cheapest_enabled_network() {
    let src = table(
        "USDT",
        vec![
            entry("ERC20", Some(dec!(10)), true, true),
            // Deposit flag is irrelevant for the one-sided fallback.
            entry("BSC", Some(dec!(0.5)), true, false),
            entry("TRC20", Some(dec!(0.1)), false, true),
        ],
    );

    let best = best_withdraw_network(&src, "USDT").unwrap().unwrap();
    assert_eq!(best.network, "BSC");
    assert_eq!(best.withdraw_fee, Some(dec!(0.5)));
}

#[test]
fn withdraw_fallback_returns_none_when_everything_is_disabled() {
    let src = table(
        "USDT",
        vec![
            entry("ERC20", Some(dec!(10)), false, true),
            entry("TRC20", Some(dec!(1)), false, true),
        ],
    );
    assert!(best_withdraw_network(&src, "USDT").unwrap().is_none());
}
