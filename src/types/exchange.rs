//! Exchange fee schedule types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the exchange fee table.
///
/// `trading_fee_percentage` is in percentage units: `0.10` means 0.10%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeFee {
    pub name: String,
    pub trading_fee_percentage: Decimal,
    #[serde(rename = "withdrawalFeeUSD", default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_fee_usd: Option<Decimal>,
    #[serde(rename = "withdrawalFeeZAR", default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_fee_zar: Option<Decimal>,
}

impl ExchangeFee {
    pub fn usd(name: &str, trading_fee_percentage: Decimal, withdrawal_fee_usd: Decimal) -> Self {
        Self {
            name: name.to_string(),
            trading_fee_percentage,
            withdrawal_fee_usd: Some(withdrawal_fee_usd),
            withdrawal_fee_zar: None,
        }
    }

    pub fn zar(name: &str, trading_fee_percentage: Decimal, withdrawal_fee_zar: Decimal) -> Self {
        Self {
            name: name.to_string(),
            trading_fee_percentage,
            withdrawal_fee_usd: None,
            withdrawal_fee_zar: Some(withdrawal_fee_zar),
        }
    }

    pub fn has_withdrawal_fee(&self) -> bool {
        self.withdrawal_fee_usd.is_some() || self.withdrawal_fee_zar.is_some()
    }
}
