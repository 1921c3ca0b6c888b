//! Mathematical utility functions
//!
//! All helpers return `None` on overflow instead of panicking.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// `amount * pct / 100`, with `pct` in percentage units.
pub fn percent_of(amount: Decimal, pct: Decimal) -> Option<Decimal> {
    amount.checked_mul(pct)?.checked_div(dec!(100))
}

/// `part / whole * 100`, defined as zero when `whole` is zero.
pub fn ratio_pct(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return Some(Decimal::ZERO);
    }
    part.checked_div(whole)?.checked_mul(dec!(100))
}
