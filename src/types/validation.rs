//! Validation result types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ValidationResult {
    pub price_sanity: bool,
    pub exchanges_known: bool,
    pub distinct_exchanges: bool,
    pub spread_consistent: bool,
    pub all_passed: bool,
    pub warnings: Vec<String>,
}
