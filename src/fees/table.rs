//! Exchange fee table
//!
//! The table is an immutable value handed to the calculator. The built-in
//! schedule covers the USD venues we buy on and the ZAR venues we sell on;
//! deployments can replace it with a JSON file of the same shape.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;
use crate::{
    config::MAX_TRADING_FEE_PCT,
    errors::{ArbError, ArbResult},
    types::ExchangeFee,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeFeeTable {
    fees: Vec<ExchangeFee>,
}

impl ExchangeFeeTable {
    /// Builds a table, rejecting rows that break the fee invariants.
    pub fn new(fees: Vec<ExchangeFee>) -> ArbResult<Self> {
        if fees.is_empty() {
            return Err(ArbError::InvalidFeeTable {
                reason: "fee table has no exchanges".to_string(),
            });
        }

        {
            let mut seen = HashSet::new();
            for fee in &fees {
                if !seen.insert(fee.name.as_str()) {
                    return Err(ArbError::InvalidFeeTable {
                        reason: format!("duplicate exchange: {}", fee.name),
                    });
                }
                validate_fee_row(fee)?;
            }
        }

        Ok(Self { fees })
    }

    pub fn from_json_str(json: &str) -> ArbResult<Self> {
        let fees: Vec<ExchangeFee> = serde_json::from_str(json)
            .map_err(|e| ArbError::data_parsing("exchange fee table JSON", e))?;
        Self::new(fees)
    }

    /// All known fee records.
    pub fn exchange_fees(&self) -> &[ExchangeFee] {
        &self.fees
    }

    /// Exact, case-sensitive lookup by exchange name.
    pub fn exchange_fee(&self, name: &str) -> Option<&ExchangeFee> {
        self.fees.iter().find(|fee| fee.name == name)
    }

    pub fn len(&self) -> usize {
        self.fees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fees.is_empty()
    }
}

impl Default for ExchangeFeeTable {
    fn default() -> Self {
        Self {
            fees: default_exchange_fees(),
        }
    }
}

fn validate_fee_row(fee: &ExchangeFee) -> ArbResult<()> {
    if fee.name.trim().is_empty() {
        return Err(ArbError::InvalidFeeTable {
            reason: "exchange name is empty".to_string(),
        });
    }

    if fee.trading_fee_percentage < Decimal::ZERO || fee.trading_fee_percentage > MAX_TRADING_FEE_PCT {
        return Err(ArbError::InvalidFeeTable {
            reason: format!(
                "{} trading fee {}% outside [0, {}]",
                fee.name, fee.trading_fee_percentage, MAX_TRADING_FEE_PCT
            ),
        });
    }

    if !fee.has_withdrawal_fee() {
        return Err(ArbError::InvalidFeeTable {
            reason: format!("{} has no withdrawal fee", fee.name),
        });
    }

    let negative = [fee.withdrawal_fee_usd, fee.withdrawal_fee_zar]
        .into_iter()
        .flatten()
        .any(|w| w < Decimal::ZERO);
    if negative {
        return Err(ArbError::InvalidFeeTable {
            reason: format!("{} has a negative withdrawal fee", fee.name),
        });
    }

    Ok(())
}

/// Built-in fee schedule. Trading fees are taker rates in percent.
pub fn default_exchange_fees() -> Vec<ExchangeFee> {
    vec![
        // USD venues
        ExchangeFee::usd("Binance", dec!(0.10), dec!(20)),
        ExchangeFee::usd("Kraken", dec!(0.26), dec!(15)),
        ExchangeFee::usd("Coinbase", dec!(0.60), dec!(10)),
        ExchangeFee::usd("Bybit", dec!(0.10), dec!(18)),
        // ZAR venues
        ExchangeFee::zar("LUNO", dec!(0.25), dec!(8.50)),
        ExchangeFee::zar("VALR", dec!(0.10), dec!(30)),
        ExchangeFee::zar("AltcoinTrader", dec!(0.25), dec!(15)),
        ExchangeFee::zar("Ovex", dec!(0.20), dec!(25)),
    ]
}

/// Loads a fee table from a JSON file, or the built-in table when no path is set.
pub fn load_fee_table(path: Option<&Path>) -> ArbResult<ExchangeFeeTable> {
    let Some(path) = path else {
        let table = ExchangeFeeTable::default();
        info!(exchanges = table.len(), "Using built-in exchange fee table");
        return Ok(table);
    };

    let json = fs::read_to_string(path)
        .map_err(|e| ArbError::data_parsing(format!("reading fee table {}", path.display()), e))?;
    let table = ExchangeFeeTable::from_json_str(&json)?;

    info!(
        path = %path.display(),
        exchanges = table.len(),
        "Loaded exchange fee table"
    );

    Ok(table)
}
