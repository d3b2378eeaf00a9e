//! Exchange-agnostic market types: quotes, opportunities, transfer networks.

pub mod network;
pub mod opportunity;
pub mod quote;

pub use network::{normalize_network_name, BestNetwork, NetworkInfo, NetworkTable, RawNetworkEntry};
pub use opportunity::Opportunity;
pub use quote::{split_symbol, Quote, TickerMap, TickersByExchange};
