//! Transfer fee estimation from exchange withdrawal fees

use rust_decimal::prelude::*;
use crate::{
    errors::{ArbError, ArbResult},
    fees::ExchangeFeeTable,
};

/// Flat cost, in USD, of withdrawing the asset from `exchange`.
///
/// A USD withdrawal fee is used as-is; a ZAR-only fee is converted at
/// `usd_to_zar_rate`.
pub fn estimate_transfer_fee_usd(
    table: &ExchangeFeeTable,
    exchange: &str,
    usd_to_zar_rate: Decimal,
) -> ArbResult<Decimal> {
    let fee = table
        .exchange_fee(exchange)
        .ok_or_else(|| ArbError::ExchangeFeeNotFound {
            exchange: exchange.to_string(),
        })?;

    if let Some(usd) = fee.withdrawal_fee_usd {
        return Ok(usd);
    }

    if usd_to_zar_rate <= Decimal::ZERO {
        return Err(ArbError::invalid_input(
            "usd_to_zar_rate",
            format!("rate must be positive, got {}", usd_to_zar_rate),
        ));
    }

    fee.withdrawal_fee_zar
        .unwrap_or_default()
        .checked_div(usd_to_zar_rate)
        .ok_or_else(|| ArbError::overflow("transfer fee conversion"))
}
