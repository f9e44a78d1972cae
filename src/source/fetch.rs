//! Source document retrieval
//!
//! Documents live either on disk or behind a static HTTP host. Every fetch in a
//! batch is started at once and the batch waits for all of them to settle; a
//! failure only ever affects its own document.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use futures::future::join_all;

use super::raw::SourceDocument;
use crate::error::FetchError;

/// Where a town document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    /// Interpret a location string: `http(s)://` means a URL, anything else a path
    pub fn parse(location: &str) -> Self {
        if is_url(location) {
            Source::Url(location.to_string())
        } else {
            Source::File(PathBuf::from(location))
        }
    }

    /// Resolve a document name against a base directory or URL prefix
    pub fn resolve(base: &str, name: &str) -> Self {
        if is_url(name) {
            return Source::Url(name.to_string());
        }
        if is_url(base) {
            Source::Url(format!("{}/{}", base.trim_end_matches('/'), name))
        } else if base.is_empty() {
            Source::File(PathBuf::from(name))
        } else {
            Source::File(PathBuf::from(base).join(name))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{}", url),
        }
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Fetches source documents
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bodega/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Failed to configure HTTP client: {}. Using defaults.", e);
                reqwest::Client::new()
            });
        Self { client }
    }

    /// Fetch and parse a single document
    pub async fn fetch(&self, source: &Source) -> Result<SourceDocument, FetchError> {
        log::debug!("Loading {}...", source);
        let bytes = match source {
            Source::File(path) => tokio::fs::read(path).await.map_err(|e| FetchError::Io {
                path: path.clone(),
                source: e,
            })?,
            Source::Url(url) => self.get(url).await?,
        };

        serde_json::from_slice(&bytes).map_err(|e| FetchError::Parse {
            location: source.to_string(),
            source: e,
        })
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let http_err = |e| FetchError::Http {
            url: url.to_string(),
            source: e,
        };

        let response = self.client.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(http_err)?;
        Ok(body.to_vec())
    }

    /// Fetch every source concurrently; results come back in source order
    pub async fn fetch_all(&self, sources: &[Source]) -> Vec<Result<SourceDocument, FetchError>> {
        join_all(sources.iter().map(|source| self.fetch(source))).await
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}
