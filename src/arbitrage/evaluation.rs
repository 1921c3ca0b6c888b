//! Evaluation of feed opportunities against the configured investment

use chrono::Utc;
use tracing::warn;
use crate::{
    arbitrage::ProfitCalculator,
    config::Config,
    errors::ArbResult,
    fees::estimate_transfer_fee_usd,
    types::{ArbitrageOpportunity, CalculationRecord, CalculatorInput},
    validation::validate_opportunity,
};

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub record: CalculationRecord,
    /// Profitable and at or above the configured net profit percentage.
    pub meets_threshold: bool,
}

/// Builds the calculator request for `opp` from the configuration, filling
/// the transfer fee from the buy exchange's withdrawal fee when enabled.
pub fn build_input(calculator: &ProfitCalculator, config: &Config, opp: &ArbitrageOpportunity) -> CalculatorInput {
    let mut input = config.calculator_input();

    if input.transfer_fee.is_none() && config.apply_withdrawal_fee {
        match estimate_transfer_fee_usd(calculator.fee_table(), &opp.buy_exchange, config.usd_to_zar_rate) {
            Ok(fee) => input.transfer_fee = Some(fee),
            Err(e) => warn!("No withdrawal fee applied for {}: {}", opp.buy_exchange, e),
        }
    }

    input
}

pub fn evaluate_opportunity(
    calculator: &ProfitCalculator,
    config: &Config,
    opp: &ArbitrageOpportunity,
) -> ArbResult<Evaluation> {
    let input = build_input(calculator, config, opp);
    let validation = validate_opportunity(opp, calculator.fee_table(), &input, config.usd_to_zar_rate);

    let result = calculator.calculate_arbitrage_profit(&input, opp, config.usd_to_zar_rate)?;
    let meets_threshold = result.is_profit && result.net_profit_percentage >= config.min_net_profit_pct;

    Ok(Evaluation {
        record: CalculationRecord {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            route: opp.route_label(),
            result,
            validation,
        },
        meets_threshold,
    })
}
