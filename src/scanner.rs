//! Quote aggregation and opportunity ranking.
//!
//! Pure single-pass computation over a quote snapshot: per symbol, gate out
//! thin exchanges, pick the best bid and ask across venues, adjust for taker
//! fees, and rank the surviving spreads. Malformed per-symbol data (absent
//! prices, non-positive effective prices, spike spreads) is silently skipped
//! so one bad ticker never aborts the scan for every other symbol.

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

use crate::domain::{Opportunity, TickersByExchange};
use crate::error::{ContractError, Result};
use crate::fees::FeeSchedule;

/// Spreads at or above this percentage are treated as stale or corrupted
/// ticker data rather than real opportunities. Inherited heuristic, not a
/// derived bound.
pub const SPIKE_SPREAD_PCT: Decimal = Decimal::from_parts(300, 0, 0, false, 0);

/// Best cross-exchange bid/ask pairing for one symbol.
struct BestPair<'a> {
    buy_exchange: &'a str,
    ask: Decimal,
    sell_exchange: &'a str,
    bid: Decimal,
}

/// Scan the highest bid and lowest ask across exchanges. Ties go to the
/// first exchange encountered in iteration order; cross-run determinism is
/// neither guaranteed nor required.
fn best_bid_ask<'a, I>(quotes: I) -> Option<BestPair<'a>>
where
    I: IntoIterator<Item = (&'a str, Option<Decimal>, Option<Decimal>)>,
{
    let mut best_bid: Option<(&str, Decimal)> = None;
    let mut best_ask: Option<(&str, Decimal)> = None;

    for (exchange, bid, ask) in quotes {
        if let Some(bid) = bid {
            if best_bid.map_or(true, |(_, b)| bid > b) {
                best_bid = Some((exchange, bid));
            }
        }
        if let Some(ask) = ask {
            if best_ask.map_or(true, |(_, a)| ask < a) {
                best_ask = Some((exchange, ask));
            }
        }
    }

    let (sell_exchange, bid) = best_bid?;
    let (buy_exchange, ask) = best_ask?;
    Some(BestPair {
        buy_exchange,
        ask,
        sell_exchange,
        bid,
    })
}

/// Fee-adjusted spread in percent, or `None` when either effective price is
/// non-positive (malformed upstream data).
fn fee_adjusted_spread(
    ask: Decimal,
    bid: Decimal,
    buy_fee: Decimal,
    sell_fee: Decimal,
) -> Option<Decimal> {
    let effective_buy = ask * (Decimal::ONE + buy_fee);
    let effective_sell = bid * (Decimal::ONE - sell_fee);
    if effective_buy <= Decimal::ZERO || effective_sell <= Decimal::ZERO {
        return None;
    }
    Some((effective_sell - effective_buy) / effective_buy * Decimal::ONE_HUNDRED)
}

/// Compute ranked fee-adjusted arbitrage opportunities for `symbols`.
///
/// When `min_quote_volume_usd` is positive, an exchange whose 24h quote
/// turnover for a symbol is absent or below the threshold is blanked before
/// best-price selection, so a thin venue cannot contaminate the search even
/// with a numerically attractive price.
///
/// Returns opportunities sorted by spread descending (stable ties). An empty
/// symbol list is a caller contract violation and fails fast.
pub fn compute_opportunities(
    symbols: &[String],
    tickers_by_exchange: &TickersByExchange,
    fees: &FeeSchedule,
    min_spread_pct: Decimal,
    min_quote_volume_usd: Decimal,
) -> Result<Vec<Opportunity>> {
    if symbols.is_empty() {
        return Err(ContractError::EmptySymbols.into());
    }

    let mut opps = Vec::new();
    for symbol in symbols {
        if let Some(opp) = scan_symbol(
            symbol,
            tickers_by_exchange,
            fees,
            min_spread_pct,
            min_quote_volume_usd,
        ) {
            opps.push(opp);
        }
    }

    opps.sort_by(|a, b| b.spread_pct.cmp(&a.spread_pct));
    Ok(opps)
}

fn scan_symbol(
    symbol: &str,
    tickers_by_exchange: &TickersByExchange,
    fees: &FeeSchedule,
    min_spread_pct: Decimal,
    min_quote_volume_usd: Decimal,
) -> Option<Opportunity> {
    let gated = tickers_by_exchange.iter().filter_map(|(exchange, tickers)| {
        let quote = tickers.get(symbol)?;
        // Liquidity gate: enforce the per-exchange 24h turnover floor before
        // choosing the best bid/ask.
        if min_quote_volume_usd > Decimal::ZERO {
            let liquid = quote
                .quote_volume
                .is_some_and(|qv| qv >= min_quote_volume_usd);
            if !liquid {
                return Some((exchange.as_str(), None, None));
            }
        }
        Some((exchange.as_str(), quote.bid, quote.ask))
    });

    let best = best_bid_ask(gated)?;
    if best.buy_exchange == best.sell_exchange {
        return None;
    }

    let spread_pct = fee_adjusted_spread(
        best.ask,
        best.bid,
        fees.taker(best.buy_exchange),
        fees.taker(best.sell_exchange),
    )?;

    if spread_pct <= Decimal::ZERO {
        return None;
    }
    // Skip unrealistic spikes.
    if spread_pct >= SPIKE_SPREAD_PCT {
        return None;
    }
    if spread_pct < min_spread_pct {
        return None;
    }

    Some(Opportunity {
        symbol: symbol.to_string(),
        buy_exchange: best.buy_exchange.to_string(),
        sell_exchange: best.sell_exchange.to_string(),
        buy_price: best.ask,
        sell_price: best.bid,
        spread_pct,
    })
}

/// Best cross-exchange pairing for one symbol with no liquidity gate, no
/// spike check, and the spread clamped at zero.
///
/// This deliberately stays a separate code path from the gated primary scan:
/// pinned coverage takes precedence over strict data-quality filtering.
fn best_pair_unfiltered(
    symbol: &str,
    tickers_by_exchange: &TickersByExchange,
    fees: &FeeSchedule,
) -> Option<Opportunity> {
    let quotes = tickers_by_exchange.iter().filter_map(|(exchange, tickers)| {
        let quote = tickers.get(symbol)?;
        Some((exchange.as_str(), quote.bid, quote.ask))
    });

    let best = best_bid_ask(quotes)?;
    if best.buy_exchange == best.sell_exchange {
        return None;
    }

    let buy_fee = fees.taker(best.buy_exchange);
    let sell_fee = fees.taker(best.sell_exchange);
    let effective_buy = best.ask * (Decimal::ONE + buy_fee);
    if effective_buy <= Decimal::ZERO {
        return None;
    }
    let effective_sell = best.bid * (Decimal::ONE - sell_fee);
    let spread_pct =
        ((effective_sell - effective_buy) / effective_buy * Decimal::ONE_HUNDRED).max(Decimal::ZERO);

    Some(Opportunity {
        symbol: symbol.to_string(),
        buy_exchange: best.buy_exchange.to_string(),
        sell_exchange: best.sell_exchange.to_string(),
        buy_price: best.ask,
        sell_price: best.bid,
        spread_pct,
    })
}

/// Merge pinned symbols into a ranked opportunity list.
///
/// Pinned symbols the primary pass already covered are left alone. For the
/// rest, a candidate is built even when it would otherwise be filtered out.
/// Duplicates by symbol keep the higher spread in the earlier entry's slot,
/// so equal spreads stay in discovery order through the stable re-sort.
pub fn append_pinned(
    opps: Vec<Opportunity>,
    pinned: &[String],
    tickers_by_exchange: &TickersByExchange,
    fees: &FeeSchedule,
) -> Vec<Opportunity> {
    let existing: HashSet<&str> = opps.iter().map(|o| o.symbol.as_str()).collect();
    let mut extra = Vec::new();
    for symbol in pinned {
        if existing.contains(symbol.as_str()) {
            continue;
        }
        if let Some(opp) = best_pair_unfiltered(symbol, tickers_by_exchange, fees) {
            extra.push(opp);
        }
    }
    if extra.is_empty() {
        return opps;
    }

    let mut merged: Vec<Opportunity> = Vec::new();
    let mut index_by_symbol: HashMap<String, usize> = HashMap::new();
    for opp in opps.into_iter().chain(extra) {
        match index_by_symbol.get(&opp.symbol) {
            Some(&slot) => {
                if opp.spread_pct > merged[slot].spread_pct {
                    merged[slot] = opp;
                }
            }
            None => {
                index_by_symbol.insert(opp.symbol.clone(), merged.len());
                merged.push(opp);
            }
        }
    }

    merged.sort_by(|a, b| b.spread_pct.cmp(&a.spread_pct));
    merged
}

/// Diagnostic fallback when a scan produces nothing: the best cross-exchange
/// pairings regardless of sign, capped at `limit`.
///
/// Scans at most `max(limit, 50)` symbols so a huge symbol list stays cheap.
pub fn best_candidates(
    symbols: &[String],
    tickers_by_exchange: &TickersByExchange,
    fees: &FeeSchedule,
    limit: usize,
) -> Vec<Opportunity> {
    if limit == 0 {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for symbol in symbols.iter().take(limit.max(50)) {
        if let Some(opp) = best_pair_unfiltered(symbol, tickers_by_exchange, fees) {
            candidates.push(opp);
            if candidates.len() >= limit {
                break;
            }
        }
    }

    candidates.sort_by(|a, b| b.spread_pct.cmp(&a.spread_pct));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Quote;
    use rust_decimal_macros::dec;

    fn quote(bid: Option<Decimal>, ask: Option<Decimal>, qv: Option<Decimal>) -> Quote {
        Quote {
            bid,
            ask,
            quote_volume: qv,
        }
    }

    fn tickers(entries: &[(&str, &str, Quote)]) -> TickersByExchange {
        let mut book = TickersByExchange::new();
        for (exchange, symbol, q) in entries {
            book.entry(exchange.to_string())
                .or_default()
                .insert(symbol.to_string(), q.clone());
        }
        book
    }

    #[test]
    fn fee_adjusted_spread_matches_worked_example() {
        // ask 50000 @ 0.1% buy fee, bid 50600 @ 0.1% sell fee.
        let spread = fee_adjusted_spread(dec!(50000), dec!(50600), dec!(0.001), dec!(0.001))
            .expect("positive effective prices");
        assert_eq!(spread.round_dp(4), dec!(0.9978));
    }

    #[test]
    fn fee_adjusted_spread_rejects_non_positive_effective_price() {
        assert!(fee_adjusted_spread(dec!(0), dec!(100), dec!(0.001), dec!(0.001)).is_none());
        assert!(fee_adjusted_spread(dec!(100), dec!(0), dec!(0.001), dec!(0.001)).is_none());
    }

    #[test]
    fn same_exchange_best_bid_and_ask_is_rejected() {
        let book = tickers(&[
            ("a", "BTC/USDT", quote(Some(dec!(101)), Some(dec!(100)), Some(dec!(1000000)))),
            ("b", "BTC/USDT", quote(Some(dec!(99)), Some(dec!(102)), Some(dec!(1000000)))),
        ]);
        // Exchange "a" holds both the highest bid and the lowest ask.
        let symbols = vec!["BTC/USDT".to_string()];
        let opps = compute_opportunities(
            &symbols,
            &book,
            &FeeSchedule::new(Decimal::ZERO),
            Decimal::ZERO,
            Decimal::ZERO,
        )
        .unwrap();
        assert!(opps.is_empty());
    }

    #[test]
    fn pinned_merge_keeps_higher_spread_on_duplicate_symbol() {
        let existing = vec![Opportunity {
            symbol: "BTC/USDT".to_string(),
            buy_exchange: "a".to_string(),
            sell_exchange: "b".to_string(),
            buy_price: dec!(100),
            sell_price: dec!(101),
            spread_pct: dec!(1),
        }];
        let book = tickers(&[
            ("a", "BTC/USDT", quote(Some(dec!(90)), Some(dec!(100)), None)),
            ("b", "BTC/USDT", quote(Some(dec!(100.5)), Some(dec!(110)), None)),
        ]);
        let pinned = vec!["BTC/USDT".to_string()];
        let merged = append_pinned(existing, &pinned, &book, &FeeSchedule::new(Decimal::ZERO));
        // Already covered by the primary pass: untouched.
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].spread_pct, dec!(1));
    }

    #[test]
    fn pinned_entry_clamps_negative_spread_to_zero() {
        let book = tickers(&[
            ("a", "XYZ/USDT", quote(Some(dec!(90)), Some(dec!(100)), None)),
            ("b", "XYZ/USDT", quote(Some(dec!(95)), Some(dec!(120)), None)),
        ]);
        let pinned = vec!["XYZ/USDT".to_string()];
        let merged = append_pinned(Vec::new(), &pinned, &book, &FeeSchedule::new(Decimal::ZERO));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].spread_pct, Decimal::ZERO);
        assert_eq!(merged[0].buy_exchange, "a");
        assert_eq!(merged[0].sell_exchange, "b");
    }
}
