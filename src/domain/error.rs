use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Empty document: {0}")]
    EmptyDocument(String),

    #[error("Unsupported document: {0}")]
    UnsupportedDocument(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Row {row_id} out of range (corpus holds {size} chunks)")]
    OutOfRange { row_id: usize, size: usize },

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Generation error: {0}")]
    GenerationFailure(String),

    #[error("Persistence failed: {0}")]
    PersistenceFailure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Timed out after {0}s")]
    Timeout(u64),
}
