//! Probability models for noisy-channel spelling correction.
//!
//! The channel side is an edit-error model over character-level edit
//! tokens; the source side is a language model consulted with the words
//! preceding the token under correction.

pub mod edit_error;
pub mod language;
pub mod probability;

// Re-export commonly used types
pub use edit_error::*;
pub use language::*;
pub use probability::*;
