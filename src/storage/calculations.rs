//! Calculation result storage

use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::{
    errors::{ArbError, ArbResult},
    types::CalculationRecord,
};

/// Appends the record to `<output_dir>/calculations/calculations_<date>.jsonl`
/// and returns the file written.
pub fn save_calculation(output_dir: &Path, record: &CalculationRecord) -> ArbResult<PathBuf> {
    let dir = output_dir.join("calculations");
    fs::create_dir_all(&dir)
        .map_err(|e| ArbError::data_parsing(format!("creating {}", dir.display()), e))?;

    let filename = dir.join(format!("calculations_{}.jsonl", Utc::now().format("%Y-%m-%d")));

    let line = serde_json::to_string(record)
        .map_err(|e| ArbError::data_parsing("serializing calculation record", e))?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&filename)
        .map_err(|e| ArbError::data_parsing(format!("opening {}", filename.display()), e))?;

    writeln!(file, "{}", line)
        .map_err(|e| ArbError::data_parsing(format!("writing {}", filename.display()), e))?;

    info!(
        record_id = %record.id,
        route = %record.route,
        net_profit = %record.result.net_profit,
        validations_passed = record.validation.all_passed,
        "Saved arbitrage calculation"
    );

    Ok(filename)
}
