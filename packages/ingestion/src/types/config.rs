//! Crawl configuration.

use std::time::Duration;

/// Configuration for one crawl run.
///
/// The request delay is a hard floor between any two page fetches,
/// including retries. It is enforced at the fetcher seam (see
/// `ThrottledFetcher`), not by the page loop.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Search endpoint of the listings site
    pub base_url: String,

    /// Search keyword (URL-encoded when building page URLs)
    pub keyword: String,

    /// Number of result pages to fetch, starting at page 1
    pub page_count: u32,

    /// Minimum delay between page requests
    pub request_delay: Duration,

    /// Retry attempts after a failed fetch, per page
    pub max_retries: u32,
}

impl CrawlConfig {
    /// Create a config with the default delay (1s) and retry count (3).
    pub fn new(base_url: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            keyword: keyword.into(),
            page_count: 1,
            request_delay: Duration::from_millis(1000),
            max_retries: 3,
        }
    }

    /// Set the number of pages to fetch.
    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = page_count;
        self
    }

    /// Set the minimum delay between requests.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Set the per-page retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}
