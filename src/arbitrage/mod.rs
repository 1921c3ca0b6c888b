//! Arbitrage profit calculation and opportunity evaluation

pub mod calculator;
pub mod evaluation;

pub use calculator::*;
pub use evaluation::*;
