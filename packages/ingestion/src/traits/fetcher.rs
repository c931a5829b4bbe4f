//! Page fetcher trait.

use async_trait::async_trait;

use crate::error::FetchResult;

/// Fetches one listing page by URL.
///
/// Implementations only perform a single logical fetch; retry and
/// throttling policy live with the caller and wrapper types so mocks
/// exercise the same paths as production fetchers.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page and return its body.
    async fn fetch_page(&self, url: &str) -> FetchResult<String>;
}
