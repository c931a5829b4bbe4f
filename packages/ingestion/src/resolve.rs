//! Entity resolution - get-or-create for shared reference entities.
//!
//! Resolution is race-safe across overlapping runs without any
//! application-level locking: when an insert loses a uniqueness race,
//! the `Duplicate` error is caught and the winning row is re-read.

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::JobStore;
use crate::types::entities::{Category, Company, Skill};

/// Resolve a company by name, creating it on first sighting.
///
/// The listing's location is captured at creation; existing companies
/// are returned as-is and never updated.
pub async fn resolve_company<S: JobStore + ?Sized>(
    store: &S,
    name: &str,
    location: Option<&str>,
) -> StoreResult<Company> {
    if let Some(company) = store.find_company_by_name(name).await? {
        return Ok(company);
    }

    match store.insert_company(name, location).await {
        Ok(company) => Ok(company),
        Err(StoreError::Duplicate { .. }) => {
            debug!(name = %name, "lost company creation race, re-reading");
            store
                .find_company_by_name(name)
                .await?
                .ok_or_else(|| StoreError::MissingAfterConflict {
                    collection: "companies",
                    key: name.to_string(),
                })
        }
        Err(e) => Err(e),
    }
}

/// Resolve a category by name, creating it on first sighting.
pub async fn resolve_category<S: JobStore + ?Sized>(
    store: &S,
    name: &str,
) -> StoreResult<Category> {
    if let Some(category) = store.find_category_by_name(name).await? {
        return Ok(category);
    }

    match store.insert_category(name).await {
        Ok(category) => Ok(category),
        Err(StoreError::Duplicate { .. }) => {
            debug!(name = %name, "lost category creation race, re-reading");
            store
                .find_category_by_name(name)
                .await?
                .ok_or_else(|| StoreError::MissingAfterConflict {
                    collection: "categories",
                    key: name.to_string(),
                })
        }
        Err(e) => Err(e),
    }
}

/// Resolve a skill by name, creating it on first sighting.
pub async fn resolve_skill<S: JobStore + ?Sized>(store: &S, name: &str) -> StoreResult<Skill> {
    if let Some(skill) = store.find_skill_by_name(name).await? {
        return Ok(skill);
    }

    match store.insert_skill(name).await {
        Ok(skill) => Ok(skill),
        Err(StoreError::Duplicate { .. }) => {
            debug!(name = %name, "lost skill creation race, re-reading");
            store
                .find_skill_by_name(name)
                .await?
                .ok_or_else(|| StoreError::MissingAfterConflict {
                    collection: "skills",
                    key: name.to_string(),
                })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreResult;
    use crate::stores::MemoryStore;
    use crate::types::entities::{JobPosting, NewJobPosting, UpsertOutcome};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_resolve_creates_on_first_sighting() {
        let store = MemoryStore::new();

        let company = resolve_company(&store, "Acme", Some("서울")).await.unwrap();
        assert_eq!(company.name, "Acme");
        assert_eq!(company.location.as_deref(), Some("서울"));
        assert_eq!(store.company_count(), 1);
    }

    #[tokio::test]
    async fn test_resolve_returns_existing_without_update() {
        let store = MemoryStore::new();

        let first = resolve_company(&store, "Acme", Some("서울")).await.unwrap();
        let second = resolve_company(&store, "Acme", Some("부산")).await.unwrap();

        assert_eq!(first.id, second.id);
        // Creation-time fields are final
        assert_eq!(second.location.as_deref(), Some("서울"));
        assert_eq!(store.company_count(), 1);
    }

    #[tokio::test]
    async fn test_resolve_is_case_sensitive() {
        let store = MemoryStore::new();

        resolve_company(&store, "Acme", None).await.unwrap();
        resolve_company(&store, "ACME", None).await.unwrap();

        assert_eq!(store.company_count(), 2);
    }

    /// Store whose first company lookup misses while a "concurrent"
    /// caller slips the row in, forcing the insert into the duplicate
    /// branch. This pins down the lost-race path deterministically.
    struct ContendedStore {
        inner: MemoryStore,
        raced: AtomicBool,
    }

    impl ContendedStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                raced: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl JobStore for ContendedStore {
        async fn find_company_by_name(&self, name: &str) -> StoreResult<Option<Company>> {
            if !self.raced.swap(true, Ordering::SeqCst) {
                // Simulate another run winning the race between our
                // lookup and our insert
                self.inner.insert_company(name, Some("elsewhere")).await?;
                return Ok(None);
            }
            self.inner.find_company_by_name(name).await
        }

        async fn insert_company(
            &self,
            name: &str,
            location: Option<&str>,
        ) -> StoreResult<Company> {
            self.inner.insert_company(name, location).await
        }

        async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
            self.inner.find_category_by_name(name).await
        }

        async fn insert_category(&self, name: &str) -> StoreResult<Category> {
            self.inner.insert_category(name).await
        }

        async fn find_skill_by_name(&self, name: &str) -> StoreResult<Option<Skill>> {
            self.inner.find_skill_by_name(name).await
        }

        async fn insert_skill(&self, name: &str) -> StoreResult<Skill> {
            self.inner.insert_skill(name).await
        }

        async fn find_job_by_link(&self, link: &str) -> StoreResult<Option<JobPosting>> {
            self.inner.find_job_by_link(link).await
        }

        async fn upsert_job(&self, job: &NewJobPosting) -> StoreResult<UpsertOutcome> {
            self.inner.upsert_job(job).await
        }
    }

    #[tokio::test]
    async fn test_lost_race_re_reads_winner() {
        let store = ContendedStore::new();

        let company = resolve_company(&store, "Acme", Some("서울")).await.unwrap();

        // We got the concurrent winner's row, not a second record
        assert_eq!(company.location.as_deref(), Some("elsewhere"));
        assert_eq!(store.inner.company_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_resolution_creates_one_company() {
        let store = Arc::new(MemoryStore::new());

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                resolve_company(&*store, "Acme", None).await.unwrap()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }

        assert_eq!(store.company_count(), 1);
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
