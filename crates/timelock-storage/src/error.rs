use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("Puzzle record error: {0}")]
    Record(#[from] timelock_puzzle::PuzzleError),

    #[error("Refusing to store a negative integer")]
    NegativeInteger,
}
