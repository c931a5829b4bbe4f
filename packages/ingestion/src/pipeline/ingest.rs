//! Ingestion orchestration - crawl, normalize, resolve, upsert.
//!
//! Error scope is one record: a listing that fails resolution or upsert
//! is logged with its link and counted, and the run moves to the next
//! record. A run always reaches its terminal report; partial success is
//! a valid terminal state, not an error.

use tracing::{info, warn};

use crate::error::IngestError;
use crate::normalize::normalize_listing;
use crate::parse::ListingParser;
use crate::pipeline::crawl::crawl_pages;
use crate::resolve::{resolve_category, resolve_company, resolve_skill};
use crate::traits::{fetcher::PageFetcher, store::JobStore};
use crate::types::config::CrawlConfig;
use crate::types::entities::{NewJobPosting, UpsertOutcome};
use crate::types::listing::RawListing;

/// Counters accumulated over one full ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Pages the crawl tried to fetch
    pub pages_attempted: usize,

    /// Pages abandoned after exhausting retries
    pub pages_failed: usize,

    /// Raw listings that entered record processing
    pub records_seen: usize,

    /// Newly stored postings
    pub records_inserted: usize,

    /// Postings whose link was already stored
    pub records_already_present: usize,

    /// Records that failed resolution or upsert
    pub records_failed: usize,
}

impl RunReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no page or record failed.
    pub fn is_clean(&self) -> bool {
        self.pages_failed == 0 && self.records_failed == 0
    }
}

/// Run one full ingestion: crawl all pages, then push every listing
/// through normalize → resolve → upsert.
pub async fn run_ingestion<F, S>(
    fetcher: &F,
    parser: &ListingParser,
    store: &S,
    config: &CrawlConfig,
) -> RunReport
where
    F: PageFetcher,
    S: JobStore,
{
    info!(
        keyword = %config.keyword,
        pages = config.page_count,
        "ingestion run starting"
    );

    let harvest = crawl_pages(fetcher, parser, config).await;
    let mut report = RunReport {
        pages_attempted: harvest.pages_attempted,
        pages_failed: harvest.pages_failed,
        ..RunReport::new()
    };

    for raw in harvest.listings {
        report.records_seen += 1;
        let link = raw.link.clone();

        match ingest_listing(store, raw).await {
            Ok(UpsertOutcome::Inserted) => report.records_inserted += 1,
            Ok(UpsertOutcome::AlreadyExists) => report.records_already_present += 1,
            Err(e) => {
                warn!(
                    link = link.as_deref().unwrap_or("<no link>"),
                    error = %e,
                    "record ingestion failed"
                );
                report.records_failed += 1;
            }
        }
    }

    info!(
        pages_attempted = report.pages_attempted,
        pages_failed = report.pages_failed,
        records_seen = report.records_seen,
        records_inserted = report.records_inserted,
        records_already_present = report.records_already_present,
        records_failed = report.records_failed,
        "ingestion run complete"
    );

    report
}

/// Ingest a single raw listing: normalize its deadline and skills,
/// resolve its reference entities, and upsert the posting by link.
pub async fn ingest_listing<S: JobStore + ?Sized>(
    store: &S,
    raw: RawListing,
) -> Result<UpsertOutcome, IngestError> {
    let normalized = normalize_listing(raw);

    let link = normalized
        .raw
        .link
        .clone()
        .ok_or(IngestError::MissingLink)?;
    let company_name = normalized
        .raw
        .company
        .as_deref()
        .ok_or(IngestError::MissingCompany)?;

    let company =
        resolve_company(store, company_name, normalized.raw.location.as_deref()).await?;

    let category = match normalized.raw.sector.as_deref() {
        Some(sector) => Some(resolve_category(store, sector).await?),
        None => None,
    };

    let mut skill_ids = Vec::with_capacity(normalized.skills.len());
    for skill_name in &normalized.skills {
        skill_ids.push(resolve_skill(store, skill_name).await?.id);
    }

    let job = NewJobPosting {
        link,
        title: normalized.raw.title,
        company_id: company.id,
        category_id: category.map(|c| c.id),
        skill_ids,
        location: normalized.raw.location,
        experience: normalized.raw.experience,
        education: normalized.raw.education,
        employment_type: normalized.raw.employment_type,
        deadline: normalized.deadline,
        salary: normalized.raw.salary,
    };

    Ok(store.upsert_job(&job).await?)
}
