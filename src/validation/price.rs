//! Price validation functions

use rust_decimal::prelude::*;
use crate::errors::{ArbError, ArbResult};

pub fn validate_price(price: Decimal, source: &str) -> ArbResult<()> {
    if price <= Decimal::ZERO {
        return Err(ArbError::invalid_input(
            source,
            format!("price is zero or negative: {}", price),
        ));
    }

    Ok(())
}
