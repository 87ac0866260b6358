//! Error type shared by the fetch, persist and export stages.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection, DNS, timeout or body read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("invalid source url '{0}'")]
    InvalidUrl(String),

    #[error("dataset is not a JSON array of objects: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to serialize JSON: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("i/o error on '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
