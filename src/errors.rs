//! Error types for the retrieval engine
//!
//! Library code returns [`RagError`]; the binary wraps it in `anyhow`.

use std::any::Any;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for corpus loading, embedding and retrieval
#[derive(Error, Debug)]
pub enum RagError {
    /// A corpus file could not be read or is not valid UTF-8
    #[error("Failed to read corpus file {path}: {source}")]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Embedding model could not be downloaded or constructed
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    /// Tokenizer errors
    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    /// Forward pass or tensor errors
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// Vectors of different length were compared
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The model returned a different number of vectors than texts it was given
    #[error("Embedding count mismatch: expected {expected} vectors, got {actual}")]
    EmbeddingCount { expected: usize, actual: usize },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, RagError>;

impl From<anyhow::Error> for RagError {
    fn from(err: anyhow::Error) -> Self {
        RagError::Generic(format!("{:#}", err))
    }
}

impl From<candle_core::Error> for RagError {
    fn from(err: candle_core::Error) -> Self {
        RagError::Embedding(err.to_string())
    }
}

/// Message carried by a caught panic payload
pub(crate) fn panic_reason(cause: &(dyn Any + Send)) -> String {
    cause
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| cause.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
