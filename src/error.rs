//! Error types for the Xiphos library.
//!
//! All fallible operations return [`XiphosError`] through the crate-wide
//! [`Result`] alias. Errors are surfaced synchronously to the caller; the
//! library never retries or swallows them.
//!
//! # Examples
//!
//! ```
//! use xiphos::error::{Result, XiphosError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(XiphosError::invalid_argument("Invalid document_id"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Xiphos operations.
#[derive(Error, Debug)]
pub enum XiphosError {
    /// Negative or duplicate document ids, words with control characters,
    /// malformed minus-words and invalid configuration values.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation referenced a document id that is not live.
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O errors (reading corpus files from the CLI).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with XiphosError.
pub type Result<T> = std::result::Result<T, XiphosError>;

impl XiphosError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        XiphosError::InvalidArgument(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        XiphosError::NotFound(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        XiphosError::InvalidArgument(format!("invalid configuration: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        XiphosError::Other(msg.into())
    }

    /// Whether this error is an [`XiphosError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, XiphosError::InvalidArgument(_))
    }

    /// Whether this error is an [`XiphosError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, XiphosError::NotFound(_))
    }
}
