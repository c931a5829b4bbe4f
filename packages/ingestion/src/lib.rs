//! Job-Listing Ingestion Pipeline
//!
//! Fetches paginated search-result pages from a listings site, parses
//! structured job records out of the markup, normalizes dates and
//! skills, resolves shared reference entities (company, category,
//! skill) without creating duplicates, and persists postings
//! idempotently keyed by their source link.
//!
//! # Design
//!
//! - Page fetches are strictly sequential with a hard minimum delay
//!   between requests; this is deliberate throttling, not a missing
//!   optimization.
//! - Every failure is scoped to the smallest skippable unit: one item,
//!   one page, one record. A run always terminates with a report.
//! - All write races are pushed down to store-enforced uniqueness plus
//!   retry-on-conflict; the pipeline holds no locks.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ingestion::{CrawlConfig, HttpFetcher, ListingParser, MemoryStore};
//! use ingestion::fetchers::FetcherExt;
//! use ingestion::pipeline::run_ingestion;
//! use std::time::Duration;
//!
//! let config = CrawlConfig::new("https://listings.example/search", "백엔드")
//!     .with_page_count(5);
//! let fetcher = HttpFetcher::new().throttled(config.request_delay);
//! let parser = ListingParser::new(&config.base_url)?;
//! let store = MemoryStore::new();
//!
//! let report = run_ingestion(&fetcher, &parser, &store, &config).await;
//! println!("inserted {} postings", report.records_inserted);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (PageFetcher, JobStore)
//! - [`types`] - Listings, entities, configuration
//! - [`normalize`] - Deadline parsing and skill extraction
//! - [`parse`] - Listing page parser
//! - [`resolve`] - Get-or-create entity resolution
//! - [`pipeline`] - Page loop and run orchestration
//! - [`fetchers`] - HTTP fetcher and throttling wrapper
//! - [`stores`] - Storage implementations (memory, postgres)
//! - [`testing`] - Mocks and fixtures for tests

pub mod error;
pub mod fetchers;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod resolve;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{FetchError, IngestError, ParseError, StoreError};
pub use fetchers::{FetcherExt, HttpFetcher, ThrottledFetcher};
pub use parse::ListingParser;
pub use pipeline::{run_ingestion, RunReport};
pub use resolve::{resolve_category, resolve_company, resolve_skill};
pub use stores::MemoryStore;
pub use traits::{fetcher::PageFetcher, store::JobStore};
pub use types::{
    config::CrawlConfig,
    entities::{Category, Company, JobPosting, NewJobPosting, Skill, UpsertOutcome},
    listing::{NormalizedListing, RawListing},
};

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;
