//! Error types
//!
//! Each layer of the pipeline has its own error enum. None of them are fatal to a
//! session except `CatalogError::Empty`, which the front end reports to the user.

use std::path::PathBuf;
use thiserror::Error;

/// A source document could not be retrieved or parsed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("{location} is not a valid shop document: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A single raw item could not be turned into a catalog item
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("malformed item '{name}': {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl NormalizeError {
    /// Name of the item that failed, for log lines
    pub fn item_name(&self) -> &str {
        match self {
            NormalizeError::Malformed { name, .. } => name,
        }
    }
}

/// Catalog construction failures
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no shop data could be loaded ({expected} sources tried)")]
    Empty { expected: usize },
}

/// Configuration file failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}
