use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub crawl_base_url: String,
    pub crawl_keyword: String,
    pub crawl_pages: u32,
    pub crawler_delay_ms: u64,
    /// Cron expression (six fields, with seconds)
    pub crawl_schedule: String,
    /// Run one ingestion immediately at startup
    pub crawl_on_start: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            crawl_base_url: env::var("CRAWL_BASE_URL").unwrap_or_else(|_| {
                "https://www.saramin.co.kr/zf_user/search/recruit".to_string()
            }),
            crawl_keyword: env::var("CRAWL_KEYWORD").unwrap_or_else(|_| "백엔드".to_string()),
            crawl_pages: env::var("CRAWL_PAGES")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("CRAWL_PAGES must be a valid number")?,
            crawler_delay_ms: env::var("CRAWLER_DELAY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .context("CRAWLER_DELAY_MS must be a valid number")?,
            // Daily at 02:00
            crawl_schedule: env::var("CRAWL_SCHEDULE")
                .unwrap_or_else(|_| "0 0 2 * * *".to_string()),
            crawl_on_start: env::var("CRAWL_ON_START")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}
