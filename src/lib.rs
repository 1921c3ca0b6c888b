//! Arbitrage profit calculator for USD→ZAR crypto spreads
//!
//! Computes per-leg trading fees, transfer costs and net profit for buying an
//! asset on a USD exchange and selling it on a ZAR exchange, against an
//! injected, read-only exchange fee table.

pub mod config;
pub mod types;
pub mod errors;
pub mod fees;
pub mod arbitrage;
pub mod validation;
pub mod utils;
pub mod storage;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use errors::{ArbError, ArbResult};
pub use fees::ExchangeFeeTable;
pub use arbitrage::{calculate_arbitrage_profit, ProfitCalculator};
pub use types::*;
