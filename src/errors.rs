use std::result::Result as StdResult;

use thiserror::Error;

use crate::domain::TransactionKind;

/// Unified error type for the store, storage, and configuration layers.
#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Category `{value}` is not a valid {kind} category")]
    InvalidCategory {
        kind: TransactionKind,
        value: String,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, FinanceError>;

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for FinanceError {
    fn from(err: chrono::ParseError) -> Self {
        FinanceError::InvalidInput(format!("invalid date: {err}"))
    }
}
