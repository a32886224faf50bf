use thiserror::Error;

/// datepivot error types
///
/// The aggregation pipeline itself is infallible; these variants cover the
/// CLI's record-loading path only.
#[derive(Error, Debug)]
pub enum DatepivotError {
    /// Input file was not a valid JSON array of objects
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for datepivot
pub type Result<T> = std::result::Result<T, DatepivotError>;
