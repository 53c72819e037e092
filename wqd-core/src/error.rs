//! Resource-level ingestion errors.
//!
//! These are the only errors the pipeline surfaces. Bad rows, bad values and
//! undersized groups are dropped silently by the downstream stages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Failed to load CSV {locator}: {source}")]
    Io {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "api")]
    #[error("Failed to load CSV {locator}: {source}")]
    Http {
        locator: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to load CSV {locator}: HTTP status {status}")]
    HttpStatus { locator: String, status: u16 },

    #[error("Failed to load CSV: {0}")]
    Decode(String),
}

impl From<csv::Error> for ResourceError {
    fn from(error: csv::Error) -> Self {
        ResourceError::Decode(error.to_string())
    }
}
