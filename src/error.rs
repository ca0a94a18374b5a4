//! Error types for the Vinculo library.
//!
//! The ranking core itself never fails: similarity, selection and
//! classification are total functions. Errors only come from the edges of
//! the crate (loading a corpus, validating user-supplied parameters,
//! looking up documents by id), and all of them are represented by
//! [`VinculoError`].
//!
//! # Examples
//!
//! ```
//! use vinculo::error::{VinculoError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(VinculoError::invalid_argument("threshold must be in [0, 1]"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Vinculo operations.
#[derive(Error, Debug)]
pub enum VinculoError {
    /// I/O errors (reading a corpus file, writing output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Corpus-related errors (unexpected layout, unusable records)
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Invalid argument supplied by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested document does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with VinculoError.
pub type Result<T> = std::result::Result<T, VinculoError>;

impl VinculoError {
    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        VinculoError::Corpus(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        VinculoError::InvalidArgument(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        VinculoError::NotFound(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VinculoError::Other(msg.into())
    }
}
