//! Mock implementations and fixtures for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::PageFetcher;

/// Mock page fetcher with scripted bodies and failures.
///
/// Clones share state, so a clone can be handed to the pipeline while
/// the test keeps one for assertions.
#[derive(Default, Clone)]
pub struct MockFetcher {
    /// Page bodies by URL
    pages: Arc<RwLock<HashMap<String, String>>>,

    /// URLs that always fail
    fail_urls: Arc<RwLock<HashSet<String>>>,

    /// URLs that fail N times before succeeding
    flaky: Arc<RwLock<HashMap<String, u32>>>,

    /// Every fetched URL, in order
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), body.into());
        self
    }

    /// Make every fetch of `url` fail.
    pub fn with_failing(self, url: impl Into<String>) -> Self {
        self.fail_urls.write().unwrap().insert(url.into());
        self
    }

    /// Make `url` fail `failures` times, then serve `body`.
    pub fn with_flaky(
        self,
        url: impl Into<String>,
        failures: u32,
        body: impl Into<String>,
    ) -> Self {
        let url = url.into();
        self.flaky.write().unwrap().insert(url.clone(), failures);
        self.pages.write().unwrap().insert(url, body.into());
        self
    }

    /// All fetched URLs, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// How many times `url` was fetched.
    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.read().unwrap().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_page(&self, url: &str) -> FetchResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        if self.fail_urls.read().unwrap().contains(url) {
            return Err(FetchError::Status {
                status: 503,
                url: url.to_string(),
            });
        }

        {
            let mut flaky = self.flaky.write().unwrap();
            if let Some(remaining) = flaky.get_mut(url) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(FetchError::Status {
                        status: 503,
                        url: url.to_string(),
                    });
                }
            }
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: url.to_string(),
            })
    }
}

/// Builder for search-result page HTML matching the structure the
/// parser expects.
#[derive(Default)]
pub struct ListingPageBuilder {
    items: Vec<String>,
}

impl ListingPageBuilder {
    /// Start an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a minimal listing item: company, title, relative link.
    pub fn item(self, company: &str, title: &str, href: &str) -> Self {
        self.item_full(company, title, href, &[], "", "", "")
    }

    /// Add a listing item with all fields populated.
    #[allow(clippy::too_many_arguments)]
    pub fn item_full(
        mut self,
        company: &str,
        title: &str,
        href: &str,
        conditions: &[&str],
        deadline: &str,
        sector: &str,
        salary: &str,
    ) -> Self {
        let condition_spans: String = conditions
            .iter()
            .map(|c| format!("<span>{c}</span>"))
            .collect();

        self.items.push(format!(
            r#"<div class="item_recruit">
                <div class="corp_name"><a href="/company">{company}</a></div>
                <h2 class="job_tit"><a href="{href}">{title}</a></h2>
                <div class="job_condition">{condition_spans}</div>
                <div class="job_date"><span class="date">{deadline}</span></div>
                <div class="job_sector">{sector}</div>
                <div class="area_badge"><span class="badge">{salary}</span></div>
            </div>"#
        ));
        self
    }

    /// Add an item whose title anchor is missing, which the parser
    /// must skip without dropping the page.
    pub fn malformed_item(mut self) -> Self {
        self.items.push(
            r#"<div class="item_recruit">
                <div class="corp_name"><a href="/company">Broken Co</a></div>
                <h2 class="job_tit">no anchor here</h2>
            </div>"#
                .to_string(),
        );
        self
    }

    /// Render the page.
    pub fn build(self) -> String {
        format!(
            "<html><body><div class=\"content\">{}</div></body></html>",
            self.items.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_serves_pages() {
        let fetcher = MockFetcher::new().with_page("https://example.com", "<html></html>");

        let body = fetcher.fetch_page("https://example.com").await.unwrap();
        assert_eq!(body, "<html></html>");
        assert_eq!(fetcher.calls_for("https://example.com"), 1);
    }

    #[tokio::test]
    async fn test_mock_fetcher_unknown_url_is_404() {
        let fetcher = MockFetcher::new();

        let err = fetcher.fetch_page("https://example.com/missing").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_flaky_url_recovers() {
        let fetcher = MockFetcher::new().with_flaky("https://example.com", 1, "ok");

        assert!(fetcher.fetch_page("https://example.com").await.is_err());
        assert_eq!(
            fetcher.fetch_page("https://example.com").await.unwrap(),
            "ok"
        );
    }
}
