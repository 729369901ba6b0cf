//! Error types for the Mayday library.
//!
//! All fallible operations return [`Result`], with [`MaydayError`] as the
//! single crate-wide error type.
//!
//! # Examples
//!
//! ```
//! use mayday::error::{MaydayError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(MaydayError::corpus("category column is not binary"))
//! }
//!
//! assert!(example_operation().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Mayday operations.
#[derive(Error, Debug)]
pub enum MaydayError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Text analysis errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Corpus loading/validation errors
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Model training or prediction errors
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid operation (e.g. transform before fit)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Pipeline artifact serialization errors
    #[error("Artifact error: {0}")]
    Artifact(#[from] bincode::Error),

    /// SQLite errors from the corpus store
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with MaydayError.
pub type Result<T> = std::result::Result<T, MaydayError>;

impl MaydayError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        MaydayError::Analysis(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        MaydayError::Corpus(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        MaydayError::Model(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        MaydayError::InvalidOperation(msg.into())
    }
}
