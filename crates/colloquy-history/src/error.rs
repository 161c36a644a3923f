use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HistoryError>;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("could not access `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored history is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}
