use std::path::PathBuf;
use thiserror::Error;

/// Main error type for irbench
#[derive(Error, Debug)]
pub enum IrBenchError {
    /// Malformed benchmark input file (query or relevance-judgment format)
    #[error("Format error: {0}")]
    Format(String),

    /// A listed document could not be read into the index
    #[error("Cannot ingest document {path}: {source}")]
    Ingest {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The index failed to execute a query
    #[error("Query execution error: {0}")]
    QueryExecution(String),

    /// File system I/O errors (output artifacts, corpus files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient Result type using IrBenchError
pub type Result<T> = std::result::Result<T, IrBenchError>;
