//! Fetcher implementations.

pub mod http;
pub mod throttled;

pub use http::HttpFetcher;
pub use throttled::{FetcherExt, ThrottledFetcher};
