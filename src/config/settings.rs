//! Calculator configuration settings and environment variable handling

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::env;
use std::str::FromStr;
use crate::types::CalculatorInput;

// Fee table constraints
pub const MAX_TRADING_FEE_PCT: Decimal = dec!(10); // sanity ceiling for table rows
pub const MAX_CUSTOM_FEE_PCT: Decimal = dec!(100);

// Calculator defaults
pub const DEFAULT_INVESTMENT_USD: Decimal = dec!(10000);
pub const DEFAULT_USD_TO_ZAR_RATE: Decimal = dec!(18.5);
pub const DEFAULT_MIN_NET_PROFIT_PCT: Decimal = dec!(0.5);

// Monitoring loop
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const MIN_POLL_INTERVAL_SECS: u64 = 5;
pub const MAX_POLL_INTERVAL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct Config {
    pub investment_amount: Decimal,
    pub custom_buy_fee: Option<Decimal>,
    pub custom_sell_fee: Option<Decimal>,
    pub transfer_fee: Option<Decimal>,
    /// Use the buy exchange's withdrawal fee when no transfer fee is set.
    pub apply_withdrawal_fee: bool,
    pub usd_to_zar_rate: Decimal,
    pub min_net_profit_pct: Decimal,
    // Data sources
    pub fee_table_path: Option<String>,
    pub opportunities_path: String,
    // Output
    pub output_dir: String,
    pub save_results: bool,
    /// Write the log file as JSON lines (`LOG_FORMAT=json`).
    pub log_json: bool,
    // Loop
    pub poll_interval_secs: u64,
    pub run_once: bool,
}

impl Config {
    pub fn load() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, falling back to defaults
    /// for missing or unparseable values.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let decimal = |key: &str| lookup(key).and_then(|s| Decimal::from_str(s.trim()).ok());
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            investment_amount: decimal("INVESTMENT_AMOUNT_USD")
                .unwrap_or(DEFAULT_INVESTMENT_USD)
                .max(Decimal::ZERO),
            custom_buy_fee: decimal("CUSTOM_BUY_FEE_PCT"),
            custom_sell_fee: decimal("CUSTOM_SELL_FEE_PCT"),
            transfer_fee: decimal("TRANSFER_FEE_USD"),
            apply_withdrawal_fee: flag("APPLY_WITHDRAWAL_FEE", false),
            usd_to_zar_rate: decimal("USD_TO_ZAR_RATE")
                .filter(|rate| *rate > Decimal::ZERO)
                .unwrap_or(DEFAULT_USD_TO_ZAR_RATE),
            min_net_profit_pct: decimal("MIN_NET_PROFIT_PCT")
                .unwrap_or(DEFAULT_MIN_NET_PROFIT_PCT),
            fee_table_path: lookup("FEE_TABLE_PATH").filter(|s| !s.trim().is_empty()),
            opportunities_path: lookup("OPPORTUNITIES_PATH")
                .unwrap_or_else(|| "data/opportunities.json".to_string()),
            output_dir: lookup("OUTPUT_DIR").unwrap_or_else(|| "output".to_string()),
            save_results: flag("SAVE_RESULTS", true),
            log_json: lookup("LOG_FORMAT")
                .map(|format| format.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            poll_interval_secs: lookup("POLL_INTERVAL_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
                .clamp(MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS),
            run_once: flag("RUN_ONCE", false),
        }
    }

    /// Calculator request built from the configured amount and overrides.
    pub fn calculator_input(&self) -> CalculatorInput {
        CalculatorInput {
            amount: self.investment_amount,
            custom_buy_fee: self.custom_buy_fee,
            custom_sell_fee: self.custom_sell_fee,
            transfer_fee: self.transfer_fee,
        }
    }
}
