//! Shared CLI output helpers for consistent operator-facing text.

use std::fmt::Display;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cache::{NetworkCache, Resolution, RouteKey};
use crate::domain::Opportunity;

const RULE_WIDTH: usize = 56;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<24} {value}");
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("{message}");
}

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "Pair")]
    pair: String,
    #[tabled(rename = "Buy")]
    buy: String,
    #[tabled(rename = "Sell")]
    sell: String,
    #[tabled(rename = "Ask")]
    ask: String,
    #[tabled(rename = "Bid")]
    bid: String,
    #[tabled(rename = "Spread %")]
    spread: String,
    #[tabled(rename = "Base network")]
    base_network: String,
    #[tabled(rename = "Quote network")]
    quote_network: String,
}

/// Render ranked opportunities (after fees) with their resolved transfer
/// network, when known.
pub fn render_opportunities(opps: &[Opportunity], cache: &NetworkCache) -> String {
    if opps.is_empty() {
        return "no opportunities this cycle".to_string();
    }

    let rows: Vec<OpportunityRow> = opps
        .iter()
        .map(|o| {
            let key = RouteKey::new(
                o.buy_exchange.as_str(),
                o.sell_exchange.as_str(),
                o.symbol.as_str(),
            );
            let (base_network, quote_network) = match cache.get(&key) {
                None => (
                    describe_resolution(&Resolution::Pending),
                    describe_resolution(&Resolution::Pending),
                ),
                Some(entry) => (
                    describe_resolution(&entry.base),
                    describe_resolution(&entry.quote),
                ),
            };
            OpportunityRow {
                pair: o.symbol.clone(),
                buy: o.buy_exchange.clone(),
                sell: o.sell_exchange.clone(),
                ask: format!("{:.6}", o.buy_price),
                bid: format!("{:.6}", o.sell_price),
                spread: format!("{:.3}", o.spread_pct),
                base_network,
                quote_network,
            }
        })
        .collect();

    Table::new(rows).with(Style::sharp()).to_string()
}

/// One-line description of a resolution state.
pub fn describe_resolution(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Pending => "...".to_string(),
        Resolution::NoRoute => "none".to_string(),
        Resolution::Route(net) => match net.withdraw_fee {
            Some(fee) => format!("{} (fee {fee} {})", net.network, net.currency),
            None => format!("{} (fee unknown)", net.network),
        },
    }
}
