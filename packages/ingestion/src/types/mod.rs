//! Data types for the ingestion pipeline.

pub mod config;
pub mod entities;
pub mod listing;

pub use config::CrawlConfig;
pub use entities::{Category, Company, JobPosting, NewJobPosting, Skill, UpsertOutcome};
pub use listing::{NormalizedListing, RawListing};
