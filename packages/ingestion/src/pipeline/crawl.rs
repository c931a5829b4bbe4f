//! Page loop - sequential fetch and parse of search-result pages.
//!
//! Pages are fetched strictly one after another; throttling is applied
//! at the fetcher seam. A page that exhausts its retries is abandoned
//! with its listings lost for this run, and the loop continues - one
//! failed page never aborts the crawl.

use tracing::{debug, info, warn};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::parse::ListingParser;
use crate::traits::fetcher::PageFetcher;
use crate::types::config::CrawlConfig;
use crate::types::listing::RawListing;

/// Everything a crawl gathered, plus page-level accounting.
#[derive(Debug, Default)]
pub struct PageHarvest {
    /// Raw listings from all pages that parsed
    pub listings: Vec<RawListing>,

    /// Pages the loop tried to fetch
    pub pages_attempted: usize,

    /// Pages abandoned after exhausting retries
    pub pages_failed: usize,
}

/// Build the search URL for one result page.
pub fn search_url(base: &Url, keyword: &str, page: u32) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("searchType", "search")
        .append_pair("searchword", keyword)
        .append_pair("recruitPage", &page.to_string());
    url
}

/// Fetch one page, retrying up to `max_retries` times on failure.
///
/// Each retry re-issues the identical request. Returns the body on the
/// first success, or `RetriesExhausted` once all attempts failed.
pub async fn fetch_with_retry<F: PageFetcher + ?Sized>(
    fetcher: &F,
    url: &str,
    max_retries: u32,
) -> FetchResult<String> {
    let attempts = max_retries + 1;

    for attempt in 1..=attempts {
        match fetcher.fetch_page(url).await {
            Ok(body) => {
                if attempt > 1 {
                    debug!(url = %url, attempt, "fetch succeeded after retry");
                }
                return Ok(body);
            }
            Err(e) => {
                warn!(url = %url, attempt, error = %e, "page fetch failed");
            }
        }
    }

    Err(FetchError::RetriesExhausted {
        url: url.to_string(),
        attempts,
    })
}

/// Fetch and parse all configured pages for a keyword.
pub async fn crawl_pages<F: PageFetcher>(
    fetcher: &F,
    parser: &ListingParser,
    config: &CrawlConfig,
) -> PageHarvest {
    let mut harvest = PageHarvest::default();

    let base = match Url::parse(&config.base_url) {
        Ok(base) => base,
        Err(e) => {
            warn!(base_url = %config.base_url, error = %e, "invalid search base URL, crawl yields nothing");
            harvest.pages_attempted = config.page_count as usize;
            harvest.pages_failed = config.page_count as usize;
            return harvest;
        }
    };

    for page in 1..=config.page_count {
        let url = search_url(&base, &config.keyword, page);
        harvest.pages_attempted += 1;

        match fetch_with_retry(fetcher, url.as_str(), config.max_retries).await {
            Ok(body) => {
                let listings = parser.parse(&body);
                info!(page, listings = listings.len(), "page crawled");
                harvest.listings.extend(listings);
            }
            Err(e) => {
                warn!(page, error = %e, "abandoning page");
                harvest.pages_failed += 1;
            }
        }
    }

    harvest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ListingPageBuilder, MockFetcher};

    const BASE: &str = "https://www.saramin.co.kr/zf_user/search/recruit";

    fn page_url(page: u32) -> String {
        search_url(&Url::parse(BASE).unwrap(), "백엔드", page).to_string()
    }

    #[test]
    fn test_search_url_encodes_keyword() {
        let url = page_url(2);
        assert!(url.starts_with(BASE));
        assert!(url.contains("searchword=%EB%B0%B1%EC%97%94%EB%93%9C"));
        assert!(url.contains("recruitPage=2"));
    }

    #[tokio::test]
    async fn test_fetch_with_retry_attempt_count() {
        let fetcher = MockFetcher::new().with_failing("https://example.com/down");

        let err = fetch_with_retry(&fetcher, "https://example.com/down", 3)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::RetriesExhausted { attempts: 4, .. }));
        assert_eq!(fetcher.calls_for("https://example.com/down"), 4);
    }

    #[tokio::test]
    async fn test_fetch_with_retry_recovers_from_transient_failure() {
        let fetcher = MockFetcher::new().with_flaky("https://example.com/slow", 2, "<html>ok</html>");

        let body = fetch_with_retry(&fetcher, "https://example.com/slow", 3)
            .await
            .unwrap();

        assert_eq!(body, "<html>ok</html>");
        assert_eq!(fetcher.calls_for("https://example.com/slow"), 3);
    }

    #[tokio::test]
    async fn test_failed_page_does_not_abort_crawl() {
        let page_html = |company: &str| {
            ListingPageBuilder::new()
                .item(company, "Engineer", "/jobs/1")
                .build()
        };

        let fetcher = MockFetcher::new()
            .with_page(&page_url(1), page_html("One"))
            .with_page(&page_url(2), page_html("Two"))
            .with_failing(&page_url(3))
            .with_page(&page_url(4), page_html("Four"))
            .with_page(&page_url(5), page_html("Five"));

        let parser = ListingParser::new(BASE).unwrap();
        let config = CrawlConfig::new(BASE, "백엔드").with_page_count(5);

        let harvest = crawl_pages(&fetcher, &parser, &config).await;

        assert_eq!(harvest.pages_attempted, 5);
        assert_eq!(harvest.pages_failed, 1);
        assert_eq!(harvest.listings.len(), 4);
    }

    #[tokio::test]
    async fn test_invalid_base_url_fails_all_pages() {
        let fetcher = MockFetcher::new();
        let parser = ListingParser::new(BASE).unwrap();
        let config = CrawlConfig::new("not a url", "백엔드").with_page_count(3);

        let harvest = crawl_pages(&fetcher, &parser, &config).await;

        assert_eq!(harvest.pages_attempted, 3);
        assert_eq!(harvest.pages_failed, 3);
        assert!(harvest.listings.is_empty());
        assert!(fetcher.calls().is_empty());
    }
}
