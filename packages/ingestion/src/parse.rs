//! Listing page parser.
//!
//! Extracts `RawListing` records from a search-results page using a
//! fixed structural pattern. Parsing is pure over the given body; one
//! malformed item is skipped with a warning and never drops the page.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::error::ParseError;
use crate::types::listing::RawListing;

/// Parser for listing search-result pages.
///
/// Selectors are compiled once at construction. Each item is expected
/// to carry: a company anchor, a title anchor with the posting link, up
/// to four condition spans (location, experience, education, employment
/// type), a deadline token, a sector text, and a salary badge.
pub struct ListingParser {
    base_url: Url,
    item: Selector,
    company: Selector,
    title_link: Selector,
    conditions: Selector,
    deadline: Selector,
    sector: Selector,
    salary: Selector,
}

impl ListingParser {
    /// Create a parser that resolves relative links against `base_url`.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            item: selector(".item_recruit"),
            company: selector(".corp_name a"),
            title_link: selector(".job_tit a"),
            conditions: selector(".job_condition span"),
            deadline: selector(".job_date .date"),
            sector: selector(".job_sector"),
            salary: selector(".area_badge .badge"),
        })
    }

    /// Parse a page body into zero or more raw listings.
    ///
    /// Items whose required elements (title anchor with href) are
    /// missing are skipped with a warning; the rest of the page is
    /// still parsed.
    pub fn parse(&self, body: &str) -> Vec<RawListing> {
        let document = Html::parse_document(body);
        let mut listings = Vec::new();

        for element in document.select(&self.item) {
            match self.parse_item(element) {
                Ok(listing) => listings.push(listing),
                Err(e) => {
                    warn!(error = %e, "skipping malformed listing item");
                }
            }
        }

        listings
    }

    fn parse_item(&self, element: ElementRef<'_>) -> Result<RawListing, ParseError> {
        let title_anchor = element
            .select(&self.title_link)
            .next()
            .ok_or(ParseError::MissingElement {
                selector: ".job_tit a",
            })?;

        let href = title_anchor
            .value()
            .attr("href")
            .ok_or(ParseError::MissingHref)?;
        let link = self
            .base_url
            .join(href)
            .map_err(|_| ParseError::InvalidLink {
                href: href.to_string(),
            })?
            .to_string();

        let company = element
            .select(&self.company)
            .next()
            .and_then(|el| text_of(el));

        let conditions: Vec<String> = element
            .select(&self.conditions)
            .filter_map(|el| text_of(el))
            .collect();

        Ok(RawListing {
            company,
            title: text_of(title_anchor),
            link: Some(link),
            location: conditions.first().cloned(),
            experience: conditions.get(1).cloned(),
            education: conditions.get(2).cloned(),
            employment_type: conditions.get(3).cloned(),
            deadline: element.select(&self.deadline).next().and_then(text_of),
            sector: element.select(&self.sector).next().and_then(text_of),
            salary: element.select(&self.salary).next().and_then(text_of),
        })
    }
}

/// Collapse an element's text, returning `None` when empty.
fn text_of(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Compile a static selector.
fn selector(pattern: &str) -> Selector {
    Selector::parse(pattern).expect("static selector")
}
