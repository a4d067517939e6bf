//! Error type for payload decoding and export sinks
//!
//! Tree building and formatting never fail; bad parent references and
//! missing values are handled by policy rather than surfaced as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatementError {
    #[error("failed to decode statements payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to render HTML report: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid statements payload: {0}")]
    InvalidPayload(String),
}

pub type Result<T> = std::result::Result<T, StatementError>;
