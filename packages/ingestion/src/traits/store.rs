//! Storage trait for durable entities.
//!
//! The pipeline asks very little of its store: find-by-unique-key and
//! insert-that-respects-uniqueness for the three reference collections,
//! plus an atomic insert-if-absent for job postings. All concurrency
//! safety is pushed down to the store's uniqueness constraints; no
//! in-process locks are used.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::entities::{Category, Company, JobPosting, NewJobPosting, Skill, UpsertOutcome};

/// Durable store for companies, categories, skills, and job postings.
///
/// Insert methods must surface a unique-constraint violation as
/// `StoreError::Duplicate` so the resolver can re-read the row a
/// concurrent caller created. `upsert_job` must be atomic with respect
/// to link uniqueness: insert the full record only if absent, otherwise
/// change nothing and report `AlreadyExists`.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Look up a company by its unique name.
    async fn find_company_by_name(&self, name: &str) -> StoreResult<Option<Company>>;

    /// Insert a company, failing with `Duplicate` if the name exists.
    async fn insert_company(&self, name: &str, location: Option<&str>) -> StoreResult<Company>;

    /// Look up a category by its unique name.
    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>>;

    /// Insert a category, failing with `Duplicate` if the name exists.
    async fn insert_category(&self, name: &str) -> StoreResult<Category>;

    /// Look up a skill by its unique name.
    async fn find_skill_by_name(&self, name: &str) -> StoreResult<Option<Skill>>;

    /// Insert a skill, failing with `Duplicate` if the name exists.
    async fn insert_skill(&self, name: &str) -> StoreResult<Skill>;

    /// Look up a job posting by its unique link.
    async fn find_job_by_link(&self, link: &str) -> StoreResult<Option<JobPosting>>;

    /// Atomically insert a posting if no posting with its link exists.
    ///
    /// Existing postings are never modified; replaying the same listing
    /// any number of times yields exactly one stored record.
    async fn upsert_job(&self, job: &NewJobPosting) -> StoreResult<UpsertOutcome>;
}
