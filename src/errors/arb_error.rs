//! Custom error types for the calculator

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArbError {
    #[error("Exchange fee not found for exchange: {exchange}")]
    ExchangeFeeNotFound {
        exchange: String,
    },

    #[error("Invalid buy price ${price}: must be greater than zero to size the position")]
    InvalidBuyPrice {
        price: Decimal,
    },

    #[error("Invalid calculator input: {field} - {reason}")]
    InvalidInput {
        field: String,
        reason: String,
    },

    #[error("Arithmetic overflow while computing {step}")]
    ArithmeticOverflow {
        step: String,
    },

    #[error("Invalid fee table: {reason}")]
    InvalidFeeTable {
        reason: String,
    },

    #[error("Data parsing error: {context}")]
    DataParsing {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ArbError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        ArbError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn overflow(step: &str) -> Self {
        ArbError::ArithmeticOverflow {
            step: step.to_string(),
        }
    }

    pub fn data_parsing(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        ArbError::DataParsing {
            context: context.into(),
            source: source.into(),
        }
    }
}

pub type ArbResult<T> = Result<T, ArbError>;
