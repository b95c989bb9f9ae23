use thiserror::Error;

/// Main error type for slices-graph
#[derive(Error, Debug)]
pub enum SlicesError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Slice not found
    #[error("Slice not found: {0}")]
    SliceNotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using SlicesError
pub type Result<T> = std::result::Result<T, SlicesError>;
