//! End-to-end pipeline tests over the mock fetcher and memory store.

use std::sync::Arc;

use ingestion::pipeline::{run_ingestion, search_url};
use ingestion::testing::{ListingPageBuilder, MockFetcher};
use ingestion::{CrawlConfig, JobStore, ListingParser, MemoryStore};
use url::Url;

const BASE: &str = "https://www.saramin.co.kr/zf_user/search/recruit";
const KEYWORD: &str = "백엔드";

fn page_url(page: u32) -> String {
    search_url(&Url::parse(BASE).unwrap(), KEYWORD, page).to_string()
}

fn parser() -> ListingParser {
    ListingParser::new(BASE).unwrap()
}

fn config(pages: u32) -> CrawlConfig {
    CrawlConfig::new(BASE, KEYWORD).with_page_count(pages)
}

#[tokio::test]
async fn run_reports_partial_success_with_failed_page_and_repeat_link() {
    // Page 1: three listings, one of which repeats a link that is
    // already stored. Page 2: permanently down.
    let page1 = ListingPageBuilder::new()
        .item_full(
            "Acme Corp",
            "Backend Node.js Engineer",
            "/zf_user/jobs/view?rec_idx=1",
            &["서울", "경력 3년", "대졸", "정규직"],
            "~ 12/31(화)",
            "웹개발",
            "연봉 5,000만원",
        )
        .item("Beta Inc", "Python Developer", "/zf_user/jobs/view?rec_idx=2")
        .item("Gamma Ltd", "Java Engineer", "/zf_user/jobs/view?rec_idx=3")
        .build();

    let fetcher = MockFetcher::new()
        .with_page(&page_url(1), page1)
        .with_failing(&page_url(2));

    let store = MemoryStore::new();

    // Pre-store the repeat link via a prior run of one listing
    let seed = ListingPageBuilder::new()
        .item("Gamma Ltd", "Java Engineer", "/zf_user/jobs/view?rec_idx=3")
        .build();
    let seed_fetcher = MockFetcher::new().with_page(&page_url(1), seed);
    let seed_report = run_ingestion(&seed_fetcher, &parser(), &store, &config(1)).await;
    assert_eq!(seed_report.records_inserted, 1);

    let report = run_ingestion(&fetcher, &parser(), &store, &config(2)).await;

    assert_eq!(report.pages_attempted, 2);
    assert_eq!(report.pages_failed, 1);
    assert_eq!(report.records_seen, 3);
    assert_eq!(report.records_inserted, 2);
    assert_eq!(report.records_already_present, 1);
    assert_eq!(report.records_failed, 0);

    assert_eq!(store.job_count(), 3);
}

#[tokio::test]
async fn permanently_failing_page_is_fetched_once_plus_retries() {
    let fetcher = MockFetcher::new().with_failing(&page_url(1));
    let store = MemoryStore::new();

    let report = run_ingestion(&fetcher, &parser(), &store, &config(1)).await;

    assert_eq!(report.pages_failed, 1);
    assert_eq!(fetcher.calls_for(&page_url(1)), 4);
}

#[tokio::test]
async fn failure_of_one_page_keeps_other_pages_listings() {
    let page = |company: &str, idx: u32| {
        ListingPageBuilder::new()
            .item(company, "Engineer", &format!("/zf_user/jobs/view?rec_idx={idx}"))
            .build()
    };

    let fetcher = MockFetcher::new()
        .with_page(&page_url(1), page("One", 1))
        .with_page(&page_url(2), page("Two", 2))
        .with_failing(&page_url(3))
        .with_page(&page_url(4), page("Four", 4))
        .with_page(&page_url(5), page("Five", 5));

    let store = MemoryStore::new();
    let report = run_ingestion(&fetcher, &parser(), &store, &config(5)).await;

    assert_eq!(report.pages_attempted, 5);
    assert_eq!(report.pages_failed, 1);
    assert_eq!(report.records_inserted, 4);
    assert_eq!(store.job_count(), 4);
}

#[tokio::test]
async fn rerunning_the_same_crawl_inserts_nothing_new() {
    let page1 = ListingPageBuilder::new()
        .item("Acme", "Backend Node.js Engineer", "/zf_user/jobs/view?rec_idx=1")
        .item("Beta", "React Frontend Developer", "/zf_user/jobs/view?rec_idx=2")
        .build();

    let fetcher = MockFetcher::new().with_page(&page_url(1), page1);
    let store = MemoryStore::new();

    let first = run_ingestion(&fetcher, &parser(), &store, &config(1)).await;
    assert_eq!(first.records_inserted, 2);

    let second = run_ingestion(&fetcher, &parser(), &store, &config(1)).await;
    assert_eq!(second.records_inserted, 0);
    assert_eq!(second.records_already_present, 2);
    assert_eq!(second.records_failed, 0);

    assert_eq!(store.job_count(), 2);
    assert_eq!(store.company_count(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn overlapping_runs_do_not_duplicate_postings_or_entities() {
    let page1 = ListingPageBuilder::new()
        .item_full(
            "Acme",
            "Backend Node.js Engineer",
            "/zf_user/jobs/view?rec_idx=1",
            &["서울"],
            "상시채용",
            "웹개발",
            "",
        )
        .build();

    let store = Arc::new(MemoryStore::new());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        let fetcher = MockFetcher::new().with_page(&page_url(1), page1.clone());
        handles.push(tokio::spawn(async move {
            run_ingestion(&fetcher, &parser(), &*store, &config(1)).await
        }));
    }

    let mut inserted_total = 0;
    for handle in handles {
        let report = handle.await.unwrap();
        assert_eq!(report.records_failed, 0);
        inserted_total += report.records_inserted;
    }

    // Exactly one logical insert across all interleavings
    assert_eq!(inserted_total, 1);
    assert_eq!(store.job_count(), 1);
    assert_eq!(store.company_count(), 1);
    assert_eq!(store.category_count(), 1);
    assert_eq!(store.skill_count(), 1);
}

#[tokio::test]
async fn normalized_fields_reach_the_store() {
    let page1 = ListingPageBuilder::new()
        .item_full(
            "Acme",
            "Python/Django 백엔드 개발자",
            "/zf_user/jobs/view?rec_idx=1",
            &["서울 강남구", "경력 3년", "대졸", "정규직"],
            "2024.12.31",
            "웹개발",
            "연봉 5,000만원",
        )
        .build();

    let fetcher = MockFetcher::new().with_page(&page_url(1), page1);
    let store = MemoryStore::new();

    run_ingestion(&fetcher, &parser(), &store, &config(1)).await;

    let job = store
        .find_job_by_link("https://www.saramin.co.kr/zf_user/jobs/view?rec_idx=1")
        .await
        .unwrap()
        .expect("posting stored");

    assert_eq!(job.title.as_deref(), Some("Python/Django 백엔드 개발자"));
    assert_eq!(job.location.as_deref(), Some("서울 강남구"));
    assert_eq!(job.employment_type.as_deref(), Some("정규직"));
    assert_eq!(job.salary.as_deref(), Some("연봉 5,000만원"));
    assert_eq!(
        job.deadline.map(|d| d.date_naive().to_string()),
        Some("2024-12-31".to_string())
    );
    // Python + Django resolved as skills
    assert_eq!(job.skill_ids.len(), 2);
    assert_eq!(store.skill_count(), 2);

    let company = store.find_company_by_name("Acme").await.unwrap().unwrap();
    assert_eq!(company.location.as_deref(), Some("서울 강남구"));
    assert_eq!(job.company_id, company.id);
}
