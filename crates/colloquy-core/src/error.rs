//! Unified error type exposed by **`colloquy-core`**.
//!
//! Provider crates should convert their internal errors into one of these
//! variants before bubbling them up to the [`ColloquyClient`].  This keeps
//! the public API small while still conveying rich diagnostic information.
//!
//! [`ColloquyClient`]: crate::client::ColloquyClient

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ColloquyError>;

#[derive(Debug, Error)]
pub enum ColloquyError {
    /// Failure while serialising or deserialising JSON payloads sent to / received
    /// from the LLM provider.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic forwarding of any backend-specific error that doesn’t fit another
    /// category.
    #[error("backend returned an error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid: {0}")]
    Invalid(String),
}
