//! Typed errors for the ingestion library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Every error is scoped to
//! the smallest unit that can be skipped: one item, one page, one record.

use thiserror::Error;

/// Errors that can occur while fetching a listing page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport failure (connect, timeout, body read)
    #[error("HTTP request failed for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Non-success HTTP status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// All retry attempts for a page were exhausted
    #[error("gave up on {url} after {attempts} attempts")]
    RetriesExhausted { url: String, attempts: u32 },
}

/// Errors for a single listing item within a page.
///
/// These never propagate past the parser: a malformed item is skipped
/// with a warning and the rest of the page is still parsed.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required sub-element was not found
    #[error("missing element: {selector}")]
    MissingElement { selector: &'static str },

    /// The listing title anchor has no href
    #[error("listing title anchor has no href")]
    MissingHref,

    /// The href could not be resolved against the site base URL
    #[error("invalid listing link: {href}")]
    InvalidLink { href: String },
}

/// Errors from the durable store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique-constraint violation. Expected and benign on entity
    /// resolution races; the resolver re-reads the winning row.
    #[error("duplicate {collection} key: {key}")]
    Duplicate { collection: &'static str, key: String },

    /// The row that won a duplicate-key conflict could not be re-read.
    /// Entities are never deleted, so this indicates a broken store.
    #[error("{collection} row missing after duplicate-key conflict: {key}")]
    MissingAfterConflict { collection: &'static str, key: String },

    /// Unexpected storage failure
    #[error("database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors that fail one record during ingestion.
///
/// A record-scoped failure is logged with the record's link and the run
/// continues with the next record.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The listing carries no source link, so it has no identity
    #[error("listing has no source link")]
    MissingLink,

    /// The listing carries no company name
    #[error("listing has no company name")]
    MissingCompany,

    /// Entity resolution or upsert failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for per-record ingestion.
pub type IngestResult<T> = std::result::Result<T, IngestError>;
