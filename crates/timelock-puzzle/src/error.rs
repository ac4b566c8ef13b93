use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No probable prime found within {steps} steps from a {start_bits}-bit starting point")]
    PrimalitySearchExhausted { start_bits: u32, steps: u64 },

    #[error("Malformed puzzle record: {0}")]
    MalformedRecord(String),

    #[error("Solution does not match commitment (expected {expected}, got {actual})")]
    SolutionMismatch { expected: String, actual: String },

    #[error("Operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
