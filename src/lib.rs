//! Spreadscan - cross-exchange spot arbitrage scanning.
//!
//! This crate polls live bid/ask quotes for USDT spot pairs across several
//! centralized exchanges, computes fee-adjusted price discrepancies, ranks
//! them, and annotates the best candidates with the cheapest mutually viable
//! transfer network between the two venues.
//!
//! # Modules
//!
//! - [`scanner`] - Pure opportunity math: liquidity gating, best bid/ask
//!   selection, fee adjustment, spike rejection, pinned-symbol merge, and
//!   the best-candidates diagnostic fallback
//! - [`resolver`] - Cross-exchange transfer-network matching with canonical
//!   name normalization and absent-fee tie-breaking
//! - [`domain`] - Exchange-agnostic types: quotes, opportunities, network
//!   tables
//! - [`fees`] - Per-exchange taker fee schedule
//! - [`cache`] - Caller-owned cache of network-resolution results
//! - [`exchange`] - Exchange trait and public REST adapters
//! - [`config`] - Configuration loading from TOML with CLI overrides
//! - [`error`] - Error types for the crate
//! - [`app`] - Polling-loop orchestration
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use spreadscan::domain::{Quote, TickersByExchange};
//! use spreadscan::fees::FeeSchedule;
//! use spreadscan::scanner;
//!
//! let mut tickers = TickersByExchange::new();
//! tickers.entry("bitget".to_string()).or_default().insert(
//!     "BTC/USDT".to_string(),
//!     Quote {
//!         bid: Some(Decimal::from(50400)),
//!         ask: Some(Decimal::from(50000)),
//!         quote_volume: Some(Decimal::from(100_000)),
//!     },
//! );
//! tickers.entry("bybit".to_string()).or_default().insert(
//!     "BTC/USDT".to_string(),
//!     Quote {
//!         bid: Some(Decimal::from(50600)),
//!         ask: Some(Decimal::from(50650)),
//!         quote_volume: Some(Decimal::from(200_000)),
//!     },
//! );
//!
//! let symbols = vec!["BTC/USDT".to_string()];
//! let opps = scanner::compute_opportunities(
//!     &symbols,
//!     &tickers,
//!     &FeeSchedule::default(),
//!     Decimal::ZERO,
//!     Decimal::from(50_000),
//! )
//! .unwrap();
//! assert_eq!(opps[0].buy_exchange, "bitget");
//! assert_eq!(opps[0].sell_exchange, "bybit");
//! ```

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod fees;
pub mod resolver;
pub mod scanner;
