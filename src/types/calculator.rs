//! Profit calculator request and result types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use super::ValidationResult;

/// Request parameters for a single profit calculation.
///
/// Fee overrides are in percentage units. `transfer_fee` is a flat amount in
/// the investment currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInput {
    pub amount: Decimal,
    #[serde(default)]
    pub custom_buy_fee: Option<Decimal>,
    #[serde(default)]
    pub custom_sell_fee: Option<Decimal>,
    #[serde(default)]
    pub transfer_fee: Option<Decimal>,
}

impl CalculatorInput {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    pub fn with_custom_buy_fee(mut self, fee: Decimal) -> Self {
        self.custom_buy_fee = Some(fee);
        self
    }

    pub fn with_custom_sell_fee(mut self, fee: Decimal) -> Self {
        self.custom_sell_fee = Some(fee);
        self
    }

    pub fn with_transfer_fee(mut self, fee: Decimal) -> Self {
        self.transfer_fee = Some(fee);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorResult {
    pub buy_exchange: String,
    pub sell_exchange: String,
    pub investment_amount: Decimal,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub buy_fee_percentage: Decimal,
    pub sell_fee_percentage: Decimal,
    pub buy_fee_amount: Decimal,
    pub sell_fee_amount: Decimal,
    pub transfer_fee: Decimal,
    pub total_fees: Decimal,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
    pub net_profit_percentage: Decimal,
    pub is_profit: bool,
    /// Units of the asset bought on the buy exchange.
    pub quantity: Decimal,
    /// Informational only; not applied to the profit arithmetic.
    pub usd_to_zar_rate: Decimal,
}

/// A persisted calculation, one JSON line per evaluated opportunity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub route: String,
    pub result: CalculatorResult,
    pub validation: ValidationResult,
}
