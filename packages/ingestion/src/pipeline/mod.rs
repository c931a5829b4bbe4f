//! The ingestion pipeline: page loop and per-record processing.

pub mod crawl;
pub mod ingest;

pub use crawl::{crawl_pages, fetch_with_retry, search_url, PageHarvest};
pub use ingest::{ingest_listing, run_ingestion, RunReport};
