//! Opportunity validation ahead of the profit calculation

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use crate::{
    fees::ExchangeFeeTable,
    types::{ArbitrageOpportunity, CalculatorInput, ValidationResult},
    validation::validate_price,
};

/// Spread implied by the quotes, in percent, with the ZAR sell price
/// converted back to USD at `usd_to_zar_rate`.
pub fn implied_spread_pct(opp: &ArbitrageOpportunity, usd_to_zar_rate: Decimal) -> Option<Decimal> {
    if opp.buy_price <= Decimal::ZERO || usd_to_zar_rate <= Decimal::ZERO {
        return None;
    }
    let sell_price_usd = opp.sell_price.checked_div(usd_to_zar_rate)?;
    sell_price_usd
        .checked_sub(opp.buy_price)?
        .checked_div(opp.buy_price)?
        .checked_mul(dec!(100))
}

pub fn validate_opportunity(
    opp: &ArbitrageOpportunity,
    fee_table: &ExchangeFeeTable,
    input: &CalculatorInput,
    usd_to_zar_rate: Decimal,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    let mut all_good = true;

    // Price sanity check
    let buy_check = validate_price(opp.buy_price, "buy_price");
    let sell_check = validate_price(opp.sell_price, "sell_price");
    result.price_sanity = buy_check.is_ok() && sell_check.is_ok();
    for err in [buy_check.err(), sell_check.err()].into_iter().flatten() {
        result.warnings.push(err.to_string());
        all_good = false;
    }

    // Fee coverage check
    let buy_known = input.custom_buy_fee.is_some() || fee_table.exchange_fee(&opp.buy_exchange).is_some();
    let sell_known = input.custom_sell_fee.is_some() || fee_table.exchange_fee(&opp.sell_exchange).is_some();
    result.exchanges_known = buy_known && sell_known;
    if !buy_known {
        result.warnings.push(format!("No fee schedule for buy exchange {}", opp.buy_exchange));
        all_good = false;
    }
    if !sell_known {
        result.warnings.push(format!("No fee schedule for sell exchange {}", opp.sell_exchange));
        all_good = false;
    }

    result.distinct_exchanges = opp.buy_exchange != opp.sell_exchange;
    if !result.distinct_exchanges {
        result.warnings.push(format!("Buy and sell exchange are both {}", opp.buy_exchange));
        all_good = false;
    }

    // Reported spread vs quotes, warn only
    result.spread_consistent = match (opp.spread, implied_spread_pct(opp, usd_to_zar_rate)) {
        (Some(reported), Some(implied)) => reported.is_sign_negative() == implied.is_sign_negative(),
        _ => true,
    };
    if !result.spread_consistent {
        result.warnings.push(format!(
            "Reported spread {:?}% disagrees with quotes ({:.2}% implied)",
            opp.spread,
            implied_spread_pct(opp, usd_to_zar_rate).unwrap_or_default()
        ));
    }

    result.all_passed = all_good;
    result
}
