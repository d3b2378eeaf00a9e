use rust_decimal::Decimal;

/// A fee-adjusted cross-exchange price discrepancy for one symbol.
///
/// Immutable once constructed. The scanner only emits entries where the buy
/// and sell venues differ; primary-pass entries always carry a positive
/// spread, while pinned and diagnostic entries may be clamped to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opportunity {
    pub symbol: String,
    pub buy_exchange: String,
    pub sell_exchange: String,
    /// Best ask on the buy exchange.
    pub buy_price: Decimal,
    /// Best bid on the sell exchange.
    pub sell_price: Decimal,
    /// Fee-adjusted spread, in percent.
    pub spread_pct: Decimal,
}
