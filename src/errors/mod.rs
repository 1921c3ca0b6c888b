//! Error types for fee lookups, calculations and data loading

pub mod arb_error;

pub use arb_error::*;
