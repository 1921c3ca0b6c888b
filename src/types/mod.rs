//! Core data types and structures

pub mod exchange;
pub mod arbitrage;
pub mod calculator;
pub mod validation;

pub use exchange::*;
pub use arbitrage::*;
pub use calculator::*;
pub use validation::*;
