use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Error type that captures ledger validation and persistence failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid distribution: percentages sum to {total}% (expected 100%)")]
    InvalidDistribution { total: Decimal },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Ledger document `{}` is unreadable: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    /// True for failures caused by caller input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidInput(_) | LedgerError::InvalidDistribution { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
