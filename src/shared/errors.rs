//! Error handling for the application

use chrono::NaiveDate;
use thiserror::Error;

/// Query-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl QueryError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        QueryError::InvalidQuery(msg.into())
    }
}

/// Synthetic generator errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Degenerate PRNG seed: {0} (must not be a multiple of 2^31 - 1)")]
    DegenerateSeed(u64),

    #[error("Invalid history window: start {start}, phase 2 {phase2}, phase 3 {phase3}, end {end}")]
    InvalidWindow {
        start: NaiveDate,
        phase2: NaiveDate,
        phase3: NaiveDate,
        end: NaiveDate,
    },
}

/// CSV export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer flush failed: {0}")]
    Flush(String),

    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Generator error: {0}")]
    GeneratorError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Output error: {0}")]
    OutputError(String),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        AppError::QueryError(err.to_string())
    }
}

impl From<GeneratorError> for AppError {
    fn from(err: GeneratorError) -> Self {
        AppError::GeneratorError(err.to_string())
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::ExportError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::OutputError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::OutputError(err.to_string())
    }
}
