//! Arbitrage profit calculation
//!
//! Buys on the USD exchange, sells on the ZAR exchange and nets out both
//! trading fees plus an optional flat transfer fee. The USD→ZAR rate is
//! carried through to the result for display but is not applied to the
//! sell leg: `sell_price` enters the arithmetic as quoted.

use rust_decimal::prelude::*;
use std::sync::Arc;
use tracing::debug;
use crate::{
    config::MAX_CUSTOM_FEE_PCT,
    errors::{ArbError, ArbResult},
    fees::ExchangeFeeTable,
    types::{ArbitrageOpportunity, CalculatorInput, CalculatorResult},
    utils::{percent_of, ratio_pct},
};

/// Stateless calculator over a shared, read-only fee table.
#[derive(Debug, Clone)]
pub struct ProfitCalculator {
    fee_table: Arc<ExchangeFeeTable>,
}

impl ProfitCalculator {
    pub fn new(fee_table: Arc<ExchangeFeeTable>) -> Self {
        Self { fee_table }
    }

    pub fn fee_table(&self) -> &ExchangeFeeTable {
        &self.fee_table
    }

    pub fn calculate_arbitrage_profit(
        &self,
        input: &CalculatorInput,
        opportunity: &ArbitrageOpportunity,
        usd_to_zar_rate: Decimal,
    ) -> ArbResult<CalculatorResult> {
        calculate_arbitrage_profit(&self.fee_table, input, opportunity, usd_to_zar_rate)
    }
}

impl Default for ProfitCalculator {
    fn default() -> Self {
        Self::new(Arc::new(ExchangeFeeTable::default()))
    }
}

/// Computes fees and profit for investing `input.amount` in `opportunity`.
///
/// # Errors
/// `ExchangeFeeNotFound` when a side has neither a table entry nor an
/// override, `InvalidInput` for negative amounts or out-of-range fees and
/// rates, `InvalidBuyPrice` when the buy price cannot size a position.
pub fn calculate_arbitrage_profit(
    fee_table: &ExchangeFeeTable,
    input: &CalculatorInput,
    opportunity: &ArbitrageOpportunity,
    usd_to_zar_rate: Decimal,
) -> ArbResult<CalculatorResult> {
    let buy_fee_percentage = resolve_fee_percentage(
        fee_table,
        &opportunity.buy_exchange,
        input.custom_buy_fee,
        "custom_buy_fee",
    )?;
    let sell_fee_percentage = resolve_fee_percentage(
        fee_table,
        &opportunity.sell_exchange,
        input.custom_sell_fee,
        "custom_sell_fee",
    )?;

    validate_input(input, usd_to_zar_rate)?;

    if opportunity.buy_price <= Decimal::ZERO {
        return Err(ArbError::InvalidBuyPrice {
            price: opportunity.buy_price,
        });
    }

    let investment_amount = input.amount;
    let transfer_fee = input.transfer_fee.unwrap_or(Decimal::ZERO);

    // Buy leg
    let buy_fee_amount = checked(percent_of(investment_amount, buy_fee_percentage), "buy fee amount")?;
    let deployed = checked(investment_amount.checked_sub(buy_fee_amount), "deployed capital")?;
    let quantity = checked(deployed.checked_div(opportunity.buy_price), "quantity")?;

    // Sell leg
    let gross_proceeds = checked(quantity.checked_mul(opportunity.sell_price), "gross proceeds")?;
    let sell_fee_amount = checked(percent_of(gross_proceeds, sell_fee_percentage), "sell fee amount")?;
    let net_proceeds = checked(gross_proceeds.checked_sub(sell_fee_amount), "net proceeds")?;

    let gross_profit = checked(gross_proceeds.checked_sub(investment_amount), "gross profit")?;
    let net_profit = checked(
        net_proceeds
            .checked_sub(transfer_fee)
            .and_then(|after_transfer| after_transfer.checked_sub(investment_amount)),
        "net profit",
    )?;
    let net_profit_percentage = checked(ratio_pct(net_profit, investment_amount), "net profit percentage")?;
    let total_fees = checked(
        buy_fee_amount
            .checked_add(sell_fee_amount)
            .and_then(|fees| fees.checked_add(transfer_fee)),
        "total fees",
    )?;

    debug!(
        buy_exchange = %opportunity.buy_exchange,
        sell_exchange = %opportunity.sell_exchange,
        amount = %investment_amount,
        net_profit = %net_profit,
        "Calculated arbitrage profit"
    );

    Ok(CalculatorResult {
        buy_exchange: opportunity.buy_exchange.clone(),
        sell_exchange: opportunity.sell_exchange.clone(),
        investment_amount,
        buy_price: opportunity.buy_price,
        sell_price: opportunity.sell_price,
        buy_fee_percentage,
        sell_fee_percentage,
        buy_fee_amount,
        sell_fee_amount,
        transfer_fee,
        total_fees,
        gross_profit,
        net_profit,
        net_profit_percentage,
        is_profit: net_profit > Decimal::ZERO,
        quantity,
        usd_to_zar_rate,
    })
}

fn checked(value: Option<Decimal>, step: &str) -> ArbResult<Decimal> {
    value.ok_or_else(|| ArbError::overflow(step))
}

fn resolve_fee_percentage(
    fee_table: &ExchangeFeeTable,
    exchange: &str,
    custom_fee: Option<Decimal>,
    field: &str,
) -> ArbResult<Decimal> {
    match custom_fee {
        Some(fee) => {
            if fee < Decimal::ZERO || fee > MAX_CUSTOM_FEE_PCT {
                return Err(ArbError::invalid_input(
                    field,
                    format!("fee {}% outside [0, {}]", fee, MAX_CUSTOM_FEE_PCT),
                ));
            }
            Ok(fee)
        }
        None => fee_table
            .exchange_fee(exchange)
            .map(|fee| fee.trading_fee_percentage)
            .ok_or_else(|| ArbError::ExchangeFeeNotFound {
                exchange: exchange.to_string(),
            }),
    }
}

fn validate_input(input: &CalculatorInput, usd_to_zar_rate: Decimal) -> ArbResult<()> {
    if input.amount < Decimal::ZERO {
        return Err(ArbError::invalid_input(
            "amount",
            format!("investment amount must not be negative, got {}", input.amount),
        ));
    }

    if let Some(fee) = input.transfer_fee {
        if fee < Decimal::ZERO {
            return Err(ArbError::invalid_input(
                "transfer_fee",
                format!("transfer fee must not be negative, got {}", fee),
            ));
        }
    }

    if usd_to_zar_rate <= Decimal::ZERO {
        return Err(ArbError::invalid_input(
            "usd_to_zar_rate",
            format!("rate must be positive, got {}", usd_to_zar_rate),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use crate::types::ExchangeFee;

    const RATE: Decimal = dec!(18.5);

    fn binance_to_luno(sell_price: Decimal) -> ArbitrageOpportunity {
        ArbitrageOpportunity::new("Binance", "LUNO", dec!(45000), sell_price)
    }

    fn calc() -> ProfitCalculator {
        ProfitCalculator::default()
    }

    #[test]
    fn default_fees_come_from_the_table() {
        let result = calc()
            .calculate_arbitrage_profit(&CalculatorInput::new(dec!(10000)), &binance_to_luno(dec!(850000)), RATE)
            .unwrap();
        assert_eq!(result.buy_fee_percentage, dec!(0.10));
        assert_eq!(result.sell_fee_percentage, dec!(0.25));
    }

    #[test]
    fn end_to_end_binance_to_luno() {
        let result = calc()
            .calculate_arbitrage_profit(&CalculatorInput::new(dec!(10000)), &binance_to_luno(dec!(850000)), RATE)
            .unwrap();

        assert_eq!(result.investment_amount, dec!(10000));
        assert_eq!(result.buy_fee_amount, dec!(10));
        assert_eq!(result.quantity, dec!(9990) / dec!(45000));
        assert_eq!(result.quantity, dec!(0.222));
        // 0.222 BTC * 850000 = 188700, less 0.25% = 188228.25
        assert_eq!(result.sell_fee_amount, dec!(471.75));
        assert_eq!(result.gross_profit, dec!(178700));
        assert_eq!(result.net_profit, dec!(178228.25));
        assert_eq!(result.total_fees, dec!(481.75));
        assert_eq!(result.transfer_fee, dec!(0));
        assert_eq!(result.net_profit_percentage, dec!(1782.2825));
        assert!(result.is_profit);
        assert_eq!(result.usd_to_zar_rate, RATE);
        assert_eq!(result.buy_exchange, "Binance");
        assert_eq!(result.sell_exchange, "LUNO");
    }

    #[test]
    fn rate_does_not_change_profit() {
        let opp = binance_to_luno(dec!(850000));
        let input = CalculatorInput::new(dec!(10000));
        let a = calc().calculate_arbitrage_profit(&input, &opp, dec!(18.5)).unwrap();
        let b = calc().calculate_arbitrage_profit(&input, &opp, dec!(1)).unwrap();
        assert_eq!(a.net_profit, b.net_profit);
        assert_eq!(a.total_fees, b.total_fees);
    }

    #[test]
    fn unprofitable_when_sell_price_is_below_buy_price() {
        let result = calc()
            .calculate_arbitrage_profit(&CalculatorInput::new(dec!(10000)), &binance_to_luno(dec!(37000)), RATE)
            .unwrap();
        assert!(result.net_profit < dec!(0));
        assert!(!result.is_profit);
        assert_eq!(result.net_profit, dec!(-1806.535));
    }

    #[test]
    fn custom_buy_fee_overrides_table() {
        let input = CalculatorInput::new(dec!(10000)).with_custom_buy_fee(dec!(0.05));
        let result = calc()
            .calculate_arbitrage_profit(&input, &binance_to_luno(dec!(850000)), RATE)
            .unwrap();
        assert_eq!(result.buy_fee_percentage, dec!(0.05));
        assert_eq!(result.buy_fee_amount, dec!(10000) * dec!(0.05) / dec!(100));
        assert_eq!(result.buy_fee_amount, dec!(5));
        assert_eq!(result.sell_fee_percentage, dec!(0.25));
    }

    #[test]
    fn custom_fee_of_zero_is_an_override_not_a_default() {
        let input = CalculatorInput::new(dec!(900))
            .with_custom_buy_fee(dec!(0))
            .with_custom_sell_fee(dec!(0));
        let result = calc()
            .calculate_arbitrage_profit(&input, &binance_to_luno(dec!(45000)), RATE)
            .unwrap();
        assert_eq!(result.buy_fee_amount, dec!(0));
        assert_eq!(result.sell_fee_amount, dec!(0));
        assert_eq!(result.net_profit, dec!(0));
        assert!(!result.is_profit);
    }

    #[test]
    fn transfer_fee_is_deducted_once() {
        let base = calc()
            .calculate_arbitrage_profit(&CalculatorInput::new(dec!(10000)), &binance_to_luno(dec!(850000)), RATE)
            .unwrap();
        let with_transfer = calc()
            .calculate_arbitrage_profit(
                &CalculatorInput::new(dec!(10000)).with_transfer_fee(dec!(25)),
                &binance_to_luno(dec!(850000)),
                RATE,
            )
            .unwrap();

        assert_eq!(with_transfer.transfer_fee, dec!(25));
        assert_eq!(with_transfer.net_profit, base.net_profit - dec!(25));
        assert_eq!(with_transfer.gross_profit, base.gross_profit);
        assert_eq!(
            with_transfer.total_fees,
            with_transfer.buy_fee_amount + with_transfer.sell_fee_amount + with_transfer.transfer_fee
        );
    }

    #[test]
    fn unknown_buy_exchange_fails() {
        let opp = ArbitrageOpportunity::new("UnknownExchange", "LUNO", dec!(45000), dec!(850000));
        match calc().calculate_arbitrage_profit(&CalculatorInput::new(dec!(10000)), &opp, RATE) {
            Err(ArbError::ExchangeFeeNotFound { exchange }) => assert_eq!(exchange, "UnknownExchange"),
            other => panic!("expected ExchangeFeeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn unknown_sell_exchange_fails() {
        let opp = ArbitrageOpportunity::new("Binance", "UnknownExchange", dec!(45000), dec!(850000));
        match calc().calculate_arbitrage_profit(&CalculatorInput::new(dec!(10000)), &opp, RATE) {
            Err(ArbError::ExchangeFeeNotFound { exchange }) => assert_eq!(exchange, "UnknownExchange"),
            other => panic!("expected ExchangeFeeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn unknown_exchange_fails_before_price_guard() {
        let opp = ArbitrageOpportunity::new("UnknownExchange", "LUNO", dec!(0), dec!(850000));
        assert!(matches!(
            calc().calculate_arbitrage_profit(&CalculatorInput::new(dec!(10000)), &opp, RATE),
            Err(ArbError::ExchangeFeeNotFound { .. })
        ));
    }

    #[test]
    fn unknown_exchange_with_override_is_accepted() {
        let opp = ArbitrageOpportunity::new("UnknownExchange", "LUNO", dec!(45000), dec!(850000));
        let input = CalculatorInput::new(dec!(10000)).with_custom_buy_fee(dec!(0.2));
        let result = calc().calculate_arbitrage_profit(&input, &opp, RATE).unwrap();
        assert_eq!(result.buy_fee_percentage, dec!(0.2));
    }

    #[test]
    fn zero_investment_has_zero_percentage() {
        let result = calc()
            .calculate_arbitrage_profit(&CalculatorInput::new(dec!(0)), &binance_to_luno(dec!(850000)), RATE)
            .unwrap();
        assert_eq!(result.investment_amount, dec!(0));
        assert_eq!(result.buy_fee_amount, dec!(0));
        assert_eq!(result.net_profit_percentage, dec!(0));
        assert!(!result.is_profit);
    }

    #[test]
    fn zero_buy_price_is_rejected() {
        let opp = ArbitrageOpportunity::new("Binance", "LUNO", dec!(0), dec!(850000));
        assert!(matches!(
            calc().calculate_arbitrage_profit(&CalculatorInput::new(dec!(10000)), &opp, RATE),
            Err(ArbError::InvalidBuyPrice { .. })
        ));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let opp = binance_to_luno(dec!(850000));
        let cases = [
            (CalculatorInput::new(dec!(-1)), RATE, "amount"),
            (CalculatorInput::new(dec!(100)).with_transfer_fee(dec!(-5)), RATE, "transfer_fee"),
            (CalculatorInput::new(dec!(100)).with_custom_sell_fee(dec!(101)), RATE, "custom_sell_fee"),
            (CalculatorInput::new(dec!(100)).with_custom_buy_fee(dec!(-0.1)), RATE, "custom_buy_fee"),
            (CalculatorInput::new(dec!(100)), dec!(0), "usd_to_zar_rate"),
        ];
        for (input, rate, expected_field) in cases {
            match calc().calculate_arbitrage_profit(&input, &opp, rate) {
                Err(ArbError::InvalidInput { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("expected InvalidInput for {}, got {:?}", expected_field, other),
            }
        }
    }

    #[test]
    fn injected_table_is_used() {
        let table = ExchangeFeeTable::new(vec![
            ExchangeFee::usd("Binance", dec!(1), dec!(20)),
            ExchangeFee::zar("LUNO", dec!(2), dec!(8.5)),
        ])
        .unwrap();
        let result = calculate_arbitrage_profit(
            &table,
            &CalculatorInput::new(dec!(1000)),
            &binance_to_luno(dec!(45000)),
            RATE,
        )
        .unwrap();
        assert_eq!(result.buy_fee_percentage, dec!(1));
        assert_eq!(result.sell_fee_percentage, dec!(2));
        assert_eq!(result.buy_fee_amount, dec!(10));
    }

    #[test]
    fn calculator_is_shareable_across_threads() {
        let calculator = calc();
        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let calculator = calculator.clone();
                std::thread::spawn(move || {
                    calculator
                        .calculate_arbitrage_profit(
                            &CalculatorInput::new(Decimal::from(i * 1000)),
                            &binance_to_luno(dec!(850000)),
                            RATE,
                        )
                        .map(|r| r.is_profit)
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().unwrap());
        }
    }

    #[test]
    fn extreme_quotes_overflow_without_panicking() {
        let opp = ArbitrageOpportunity::new(
            "Binance",
            "LUNO",
            dec!(0.000000000001),
            dec!(1000000000000),
        );
        match calc().calculate_arbitrage_profit(&CalculatorInput::new(dec!(10000000)), &opp, RATE) {
            Err(ArbError::ArithmeticOverflow { step }) => assert_eq!(step, "gross proceeds"),
            other => panic!("expected ArithmeticOverflow, got {:?}", other),
        }
    }

    #[test]
    fn overflow_in_fee_amount_is_reported() {
        let opp = binance_to_luno(dec!(850000));
        let input = CalculatorInput::new(Decimal::MAX).with_custom_buy_fee(dec!(50));
        assert!(matches!(
            calc().calculate_arbitrage_profit(&input, &opp, RATE),
            Err(ArbError::ArithmeticOverflow { .. })
        ));
    }

    fn extreme_decimal() -> impl Strategy<Value = Decimal> {
        (any::<i64>(), 0u32..=28).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
    }

    proptest! {
        #[test]
        fn extreme_inputs_return_typed_results(
            amount in extreme_decimal(),
            buy_price in extreme_decimal(),
            sell_price in extreme_decimal(),
            sell_fee in prop::option::of(0u32..=10_000),
            transfer_fee in prop::option::of(extreme_decimal()),
            sell_exchange in prop::sample::select(vec!["LUNO", "VALR", "Binance", "Nowhere"]),
        ) {
            let mut input = CalculatorInput::new(amount);
            input.custom_sell_fee = sell_fee.map(|bps| Decimal::new(bps as i64, 2));
            input.transfer_fee = transfer_fee;
            let opp = ArbitrageOpportunity::new("Binance", sell_exchange, buy_price, sell_price);

            match calc().calculate_arbitrage_profit(&input, &opp, RATE) {
                Ok(result) => {
                    prop_assert_eq!(result.is_profit, result.net_profit > Decimal::ZERO);
                    prop_assert_eq!(
                        Some(result.total_fees),
                        result.buy_fee_amount
                            .checked_add(result.sell_fee_amount)
                            .and_then(|fees| fees.checked_add(result.transfer_fee))
                    );
                }
                Err(ArbError::ArithmeticOverflow { .. })
                | Err(ArbError::InvalidInput { .. })
                | Err(ArbError::InvalidBuyPrice { .. }) => {}
                Err(ArbError::ExchangeFeeNotFound { exchange }) => {
                    prop_assert_eq!(exchange, "Nowhere");
                    prop_assert!(sell_fee.is_none());
                }
                Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
            }
        }

        #[test]
        fn profit_flag_and_percentage_are_consistent(
            amount_cents in 0u64..100_000_000,
            buy_cents in 1u64..10_000_000,
            sell_cents in 0u64..2_000_000_000,
            buy_fee_bps in 0u32..1000,
            sell_fee_bps in 0u32..1000,
            transfer_cents in 0u64..100_000,
        ) {
            let input = CalculatorInput::new(Decimal::new(amount_cents as i64, 2))
                .with_custom_buy_fee(Decimal::new(buy_fee_bps as i64, 2))
                .with_custom_sell_fee(Decimal::new(sell_fee_bps as i64, 2))
                .with_transfer_fee(Decimal::new(transfer_cents as i64, 2));
            let opp = ArbitrageOpportunity::new(
                "Binance",
                "LUNO",
                Decimal::new(buy_cents as i64, 2),
                Decimal::new(sell_cents as i64, 2),
            );

            let result = calc().calculate_arbitrage_profit(&input, &opp, RATE).unwrap();

            prop_assert_eq!(result.is_profit, result.net_profit > Decimal::ZERO);
            prop_assert_eq!(
                result.total_fees,
                result.buy_fee_amount + result.sell_fee_amount + result.transfer_fee
            );
            if result.investment_amount.is_zero() {
                prop_assert_eq!(result.net_profit_percentage, Decimal::ZERO);
            } else {
                let expected = result.net_profit / result.investment_amount * dec!(100);
                prop_assert!((result.net_profit_percentage - expected).abs() <= dec!(0.0000000001));
            }
        }
    }
}
