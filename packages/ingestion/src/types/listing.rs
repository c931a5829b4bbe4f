//! Listing types - raw parse output and its normalized form.
//!
//! Both types are ephemeral: they live only within one ingestion run.
//! Durable entities are created from them by the upsert stage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One job listing as parsed from a search-results page.
///
/// All fields are optional strings; extraction is best-effort and a
/// missing field is omitted rather than failing the item. A listing
/// without a link is dropped at parse time since it has no identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListing {
    /// Company name
    pub company: Option<String>,

    /// Posting title
    pub title: Option<String>,

    /// Absolute source link (the posting's dedup key)
    pub link: Option<String>,

    /// Work location
    pub location: Option<String>,

    /// Required experience level
    pub experience: Option<String>,

    /// Required education level
    pub education: Option<String>,

    /// Employment type (full-time, contract, ...)
    pub employment_type: Option<String>,

    /// Raw deadline token, as it appears on the page
    pub deadline: Option<String>,

    /// Raw sector / job-category text
    pub sector: Option<String>,

    /// Raw salary badge text (not parsed to a number)
    pub salary: Option<String>,
}

impl RawListing {
    /// Create an empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set the company name.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Set the posting title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the raw deadline token.
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Set the raw sector text.
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }
}

/// A raw listing after deadline and skill normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedListing {
    /// The listing as parsed
    pub raw: RawListing,

    /// Absolute deadline; `None` means no deadline ("always hiring")
    /// or an unrecognized token
    pub deadline: Option<DateTime<Utc>>,

    /// Canonical skill names found in the title (may be empty)
    pub skills: BTreeSet<String>,
}
