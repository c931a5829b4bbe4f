//! Throttled fetcher wrapper.
//!
//! Wraps any `PageFetcher` with a minimum-delay floor using the
//! governor crate. The floor holds between any two fetches issued
//! through the wrapper, retries included.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchResult;
use crate::traits::fetcher::PageFetcher;

type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A fetcher wrapper that enforces a minimum delay between requests.
///
/// The first fetch proceeds immediately; every subsequent fetch waits
/// until at least `min_delay` has elapsed since the previous one.
/// A zero delay means no throttling: fetches pass straight through.
pub struct ThrottledFetcher<F: PageFetcher> {
    inner: F,
    limiter: Option<Arc<DirectRateLimiter>>,
}

impl<F: PageFetcher> ThrottledFetcher<F> {
    /// Create a throttled fetcher.
    ///
    /// # Arguments
    /// * `fetcher` - The underlying fetcher to wrap
    /// * `min_delay` - Hard floor between consecutive requests; zero
    ///   disables throttling
    pub fn new(fetcher: F, min_delay: Duration) -> Self {
        // governor cannot express an empty period; zero means unthrottled
        let limiter = Quota::with_period(min_delay)
            .map(|quota| Arc::new(RateLimiter::direct(quota)));
        Self {
            inner: fetcher,
            limiter,
        }
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for ThrottledFetcher<F> {
    async fn fetch_page(&self, url: &str) -> FetchResult<String> {
        // Wait out the delay floor before each request
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
        self.inner.fetch_page(url).await
    }
}

/// Extension trait for easy throttling.
pub trait FetcherExt: PageFetcher + Sized {
    /// Wrap this fetcher with a minimum inter-request delay.
    fn throttled(self, min_delay: Duration) -> ThrottledFetcher<Self> {
        ThrottledFetcher::new(self, min_delay)
    }
}

// Implement for all fetchers
impl<F: PageFetcher + Sized> FetcherExt for F {}
