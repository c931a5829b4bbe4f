//! Scheduled ingestion runs using tokio-cron-scheduler.
//!
//! The scheduler fires the orchestrator on a fixed cadence. Runs have
//! no synchronous caller: every outcome is logged, never returned. Two
//! overlapping runs are harmless since all writes go through
//! store-enforced uniqueness.

use anyhow::Result;
use sqlx::PgPool;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};

use ingestion::fetchers::FetcherExt;
use ingestion::pipeline::run_ingestion;
use ingestion::{CrawlConfig, HttpFetcher, ListingParser, PostgresStore};

use crate::config::Config;

/// Start the crawl schedule
pub async fn start_scheduler(pool: PgPool, config: Config) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;
    let schedule = config.crawl_schedule.clone();

    let crawl_job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
        let pool = pool.clone();
        let config = config.clone();
        Box::pin(async move {
            run_crawl(&pool, &config).await;
        })
    })?;

    scheduler.add(crawl_job).await?;
    scheduler.start().await?;

    tracing::info!(schedule = %schedule, "Crawl schedule started");
    Ok(scheduler)
}

/// Run one full ingestion against the configured listings site.
///
/// All failures end up in the report or the logs; a crawl never takes
/// the process down.
pub async fn run_crawl(pool: &PgPool, config: &Config) {
    tracing::info!(
        keyword = %config.crawl_keyword,
        pages = config.crawl_pages,
        "Scheduled ingestion starting"
    );

    let crawl_config = CrawlConfig::new(&config.crawl_base_url, &config.crawl_keyword)
        .with_page_count(config.crawl_pages)
        .with_request_delay(Duration::from_millis(config.crawler_delay_ms));

    let parser = match ListingParser::new(&crawl_config.base_url) {
        Ok(parser) => parser,
        Err(e) => {
            tracing::error!(base_url = %crawl_config.base_url, error = %e, "Invalid crawl base URL");
            return;
        }
    };

    let fetcher = HttpFetcher::new().throttled(crawl_config.request_delay);
    let store = PostgresStore::new(pool.clone());

    let report = run_ingestion(&fetcher, &parser, &store, &crawl_config).await;

    tracing::info!(
        pages_attempted = report.pages_attempted,
        pages_failed = report.pages_failed,
        records_seen = report.records_seen,
        records_inserted = report.records_inserted,
        records_already_present = report.records_already_present,
        records_failed = report.records_failed,
        "Scheduled ingestion finished"
    );
}
