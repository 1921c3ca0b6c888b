//! Arbitrage opportunity types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price discrepancy between two exchanges, sourced from the price feeds.
///
/// `buy_price` is quoted in USD on the buy exchange, `sell_price` in ZAR on
/// the sell exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrageOpportunity {
    pub buy_exchange: String,
    pub sell_exchange: String,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

impl ArbitrageOpportunity {
    pub fn new(
        buy_exchange: &str,
        sell_exchange: &str,
        buy_price: Decimal,
        sell_price: Decimal,
    ) -> Self {
        Self {
            buy_exchange: buy_exchange.to_string(),
            sell_exchange: sell_exchange.to_string(),
            buy_price,
            sell_price,
            spread: None,
            route: None,
        }
    }

    /// Route label for logs, e.g. `Binance → LUNO`.
    pub fn route_label(&self) -> String {
        self.route
            .clone()
            .unwrap_or_else(|| format!("{} → {}", self.buy_exchange, self.sell_exchange))
    }
}
