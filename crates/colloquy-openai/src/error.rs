use colloquy_core::error::ColloquyError;
use reqwest::StatusCode;

/// High-level error type covering every failure mode the client can hit.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    /// The configured API credential does not carry the expected key prefix.
    /// Raised locally, before any network I/O happens.
    #[error("API credential is not a well-formed OpenAI key")]
    InvalidCredentialFormat,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("couldn’t serialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("OpenAI returned non-success status {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl From<OpenAiError> for ColloquyError {
    fn from(value: OpenAiError) -> Self {
        ColloquyError::Backend(Box::new(value))
    }
}
