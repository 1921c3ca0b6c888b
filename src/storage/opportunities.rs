//! Arbitrage opportunity loading

use std::fs;
use std::path::Path;
use tracing::debug;
use crate::{
    errors::{ArbError, ArbResult},
    types::ArbitrageOpportunity,
};

/// Reads a JSON array of opportunities as published by the price feed.
pub fn load_opportunities(path: &Path) -> ArbResult<Vec<ArbitrageOpportunity>> {
    let json = fs::read_to_string(path)
        .map_err(|e| ArbError::data_parsing(format!("reading opportunities {}", path.display()), e))?;

    let opportunities: Vec<ArbitrageOpportunity> = serde_json::from_str(&json)
        .map_err(|e| ArbError::data_parsing(format!("parsing opportunities {}", path.display()), e))?;

    debug!(
        path = %path.display(),
        count = opportunities.len(),
        "Loaded arbitrage opportunities"
    );

    Ok(opportunities)
}
