use thiserror::Error;

/// Main error type for BER/DER transcoding operations
#[derive(Error, Debug)]
pub enum DerNormError {
    #[error("Out of bounds: {0}")]
    OutOfBounds(String),

    #[error("Invalid BER format: {0}")]
    InvalidFormat(String),

    #[error("Truncated structure: {0}")]
    Truncated(String),

    #[error("Recursion limit exceeded: maximum nesting depth is {0}")]
    RecursionLimitExceeded(usize),

    #[error("Output write failed: {0}")]
    IoFailure(#[from] std::io::Error),
}

/// Result type alias for BER/DER transcoding operations
pub type DerNormResult<T> = Result<T, DerNormError>;
