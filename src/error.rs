use thiserror::Error;

/// Errors raised while building a denomination set or stocking a till.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TillError {
    #[error("denomination set must contain at least one value")]
    EmptyDenominationSet,

    #[error("denomination values must be positive")]
    ZeroDenomination,

    #[error("denomination {0} listed more than once")]
    DuplicateDenomination(u64),

    #[error("denomination {0} is not part of the till's set")]
    UnknownDenomination(u64),

    #[error("expected {expected} initial counts, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

/// Errors raised while decoding the whitespace-separated input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input while reading {field}")]
    UnexpectedEof { field: String },

    #[error("invalid {field} `{token}`: expected a non-negative integer")]
    InvalidNumber { field: String, token: String },
}
