//! Error types for the emend library.
//!
//! All failures are represented by the [`EmendError`] enum. Construction-time
//! problems (unreadable dictionaries, malformed count files) are fatal and
//! surfaced immediately; there is no partially constructed model state.
//!
//! # Examples
//!
//! ```
//! use emend::error::{EmendError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(EmendError::model("empty count table"))
//! }
//!
//! assert!(example_operation().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for emend operations.
#[derive(Error, Debug)]
pub enum EmendError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A malformed or rejected edit token inside an edit path.
    #[error("invalid edit: {0}")]
    InvalidEdit(String),

    /// Model construction errors (empty counts, bad parameters).
    #[error("model error: {0}")]
    Model(String),

    /// Unreadable or malformed resource files (dictionaries, count tables,
    /// digitized transcripts).
    #[error("resource error: {0}")]
    Resource(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error.
    #[error("error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`EmendError`].
pub type Result<T> = std::result::Result<T, EmendError>;

impl EmendError {
    /// Create a new invalid-edit error.
    pub fn invalid_edit<S: Into<String>>(edit: S) -> Self {
        EmendError::InvalidEdit(edit.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        EmendError::Model(msg.into())
    }

    /// Create a new resource error.
    pub fn resource<S: Into<String>>(msg: S) -> Self {
        EmendError::Resource(msg.into())
    }
}
