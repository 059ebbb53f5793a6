//! Error types for the query-tally library.

use thiserror::Error;

/// All errors that can occur in the query-tally library.
#[derive(Error, Debug)]
pub enum TallyError {
    /// Date prefix or timestamp does not match any recognized pattern.
    #[error("Invalid date format: {0:?}")]
    InvalidFormat(String),

    /// Well-formed date naming an impossible calendar value.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// A value was routed to a minute bucket it does not belong to.
    #[error("Invariant violation: value for minute {actual} routed to minute bucket {expected}")]
    InvariantViolation { expected: u32, actual: u32 },

    /// A dataset line could not be turned into a record.
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Requested ranking size is not strictly positive.
    #[error("Invalid size value {0}")]
    InvalidSize(usize),

    /// Configuration file could not be read or decoded.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for query-tally operations.
pub type TallyResult<T> = Result<T, TallyError>;
