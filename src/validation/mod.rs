//! Validation functions for prices and opportunities

pub mod price;
pub mod opportunity;

pub use price::*;
pub use opportunity::*;
