//! Typed errors for the scraping pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell a
//! transport failure from a page that no longer has the expected structure.

use thiserror::Error;

/// Errors raised while retrieving markup from the document source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS or TLS failure
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Non-success HTTP status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// No response within the allotted time
    #[error("timeout fetching {url}")]
    Timeout { url: String },

    /// Response body could not be read as text
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A structural node the extractor depends on is absent or malformed.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Required element not found
    #[error("missing {context} ({selector})")]
    MissingNode {
        context: &'static str,
        selector: String,
    },

    /// Card group holds fewer cards than the layout requires
    #[error("expected at least {expected} cards, found {found}")]
    CardCount { expected: usize, found: usize },

    /// Report title is not `<name>, <date>, <time>`
    #[error("title does not match `<name>, <date>, <time>`: {title:?}")]
    TitleMismatch { title: String },

    /// Mountain count cell is not an integer
    #[error("invalid mountain count: {value:?}")]
    InvalidCount { value: String },

    /// Mountain row appears before any activity level row
    #[error("mountain row without an activity level: {text:?}")]
    OrphanMountRow { text: String },

    /// Selector string failed to compile
    #[error("invalid selector: {selector}")]
    InvalidSelector { selector: String },
}

/// Registry store failures.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry query failed: {0}")]
    Query(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Rejected source URLs.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Not an absolute http(s) URL
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Host is not the configured document source
    #[error("host not allowed: {host}")]
    ForeignHost { host: String },
}

/// Any failure of a scrape operation.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("rejected source: {0}")]
    Source(#[from] SourceError),
}

impl ScrapeError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Result type alias for scrape operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for extraction over an already parsed document.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
