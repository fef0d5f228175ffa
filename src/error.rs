//! Error types for fetching, extraction, caching and configuration.
//!
//! Errors are layered the same way the pipeline is:
//!
//! - [`FetchError`]: one page retrieval (HTTP status classification, retries, renderer)
//! - [`ExtractError`]: the expected table was not found in a page
//! - [`ScrapeError`]: a cache backfill step, wrapping the two above with the URL or path
//! - [`ConfigError`]: loading or validating [`Settings`](crate::config::Settings)

use std::path::PathBuf;
use thiserror::Error;

/// Failure to retrieve a single page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// 400 or 404: the URL does not name a page on the site.
    #[error("{url} is an unknown URL (status {status})")]
    UnknownResource { url: String, status: u16 },

    /// 429: the site asked us to slow down. Only the retry layer sees this.
    #[error("rate limited by {url}")]
    RateLimited { url: String },

    #[error("error with status code {status} encountered for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("reached maximum retries ({attempts}) for url {url}")]
    RetriesExhausted { url: String, attempts: u32 },

    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("no renderer configured for {url}")]
    RendererUnavailable { url: String },

    #[error("renderer failed for {url}: {reason}")]
    RendererFailed { url: String, reason: String },
}

impl FetchError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. })
    }
}

/// The page did not contain the structure an extractor looks for.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("structure not found: {what}")]
    StructureNotFound { what: String },
}

impl ExtractError {
    pub fn missing(what: impl Into<String>) -> Self {
        ExtractError::StructureNotFound { what: what.into() }
    }
}

/// Failure while backfilling or reading the page cache.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request failed for {url}: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("could not extract {kind} table for {year}: {source}")]
    Extract {
        kind: String,
        year: u16,
        #[source]
        source: ExtractError,
    },

    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScrapeError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid base url {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("url template {template:?} has no {{year}} placeholder")]
    Template { template: String },

    #[error("{0}")]
    Invalid(String),
}
