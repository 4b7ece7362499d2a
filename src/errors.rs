use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid date: {value:?} ({message})")]
    InvalidDate {
        value: String,
        message: String,
    },

    #[error("invalid amount: {value:?}")]
    InvalidAmount {
        value: String,
    },

    #[error("amount out of range: {amount} overflows the interest calculation")]
    AmountOutOfRange {
        amount: Money,
    },

    #[error("missing field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    pub(crate) fn invalid_date(value: &str, err: impl std::fmt::Display) -> Self {
        LedgerError::InvalidDate {
            value: value.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
