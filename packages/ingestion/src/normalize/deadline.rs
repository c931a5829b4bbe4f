//! Deadline token normalization.
//!
//! Listing pages carry deadlines in several shapes: an "always hiring"
//! marker, a relative month/day with a weekday parenthetical, or an
//! absolute date. Normalization fails closed: an unrecognized token
//! yields `None` with a warning and the run continues.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use tracing::warn;

/// Marker for postings with no deadline ("always hiring").
const ALWAYS_HIRING: &str = "상시채용";

/// Normalize a raw deadline token into an absolute timestamp.
///
/// Recognized forms, tried in order:
/// 1. Empty string or "상시채용" → `None` (explicitly no deadline)
/// 2. "~ M/D(weekday)" → current year; rolls to next year if the date
///    has already passed
/// 3. "YYYY.MM.DD" or "YYYY-MM-DD" → parsed directly
/// 4. Anything else → `None`, with a logged warning
pub fn normalize_deadline(token: &str) -> Option<DateTime<Utc>> {
    normalize_deadline_on(token, Utc::now().date_naive())
}

/// Same as [`normalize_deadline`] with an explicit "today", used for
/// year inference on relative dates.
pub fn normalize_deadline_on(token: &str, today: NaiveDate) -> Option<DateTime<Utc>> {
    let token = token.trim();
    if token.is_empty() || token == ALWAYS_HIRING {
        return None;
    }

    if let Some(date) = parse_relative(token, today) {
        return Some(midnight_utc(date));
    }
    if let Some(date) = parse_absolute(token) {
        return Some(midnight_utc(date));
    }

    warn!(token = %token, "unrecognized deadline token");
    None
}

/// Parse "~ M/D(weekday)" style tokens. The weekday parenthetical is
/// ignored; the year is inferred from `today`.
///
/// A month/day that already passed this year rolls to next year: these
/// are deadlines of listings still being served, so a past date would
/// only mean the year boundary was crossed.
fn parse_relative(token: &str, today: NaiveDate) -> Option<NaiveDate> {
    let pattern = regex::Regex::new(r"^~?\s*(\d{1,2})/(\d{1,2})(?:\s*\([^)]*\))?$").unwrap();
    let captures = pattern.captures(token)?;

    let month: u32 = captures.get(1)?.as_str().parse().ok()?;
    let day: u32 = captures.get(2)?.as_str().parse().ok()?;

    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if this_year < today {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
    } else {
        Some(this_year)
    }
}

/// Parse absolute "YYYY.MM.DD" / "YYYY-MM-DD" tokens.
fn parse_absolute(token: &str) -> Option<NaiveDate> {
    for format in ["%Y.%m.%d", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(token, format) {
            return Some(date);
        }
    }
    None
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_always_hiring_is_none() {
        assert_eq!(normalize_deadline("상시채용"), None);
        assert_eq!(normalize_deadline("  상시채용  "), None);
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(normalize_deadline(""), None);
        assert_eq!(normalize_deadline("   "), None);
    }

    #[test]
    fn test_absolute_dotted() {
        let result = normalize_deadline("2024.12.31").unwrap();
        assert_eq!(result.date_naive(), date(2024, 12, 31));
    }

    #[test]
    fn test_absolute_dashed() {
        let result = normalize_deadline("2025-01-15").unwrap();
        assert_eq!(result.date_naive(), date(2025, 1, 15));
    }

    #[test]
    fn test_relative_same_year() {
        let today = date(2024, 6, 1);
        let result = normalize_deadline_on("~ 8/15(목)", today).unwrap();
        assert_eq!(result.date_naive(), date(2024, 8, 15));
    }

    #[test]
    fn test_relative_rolls_to_next_year() {
        let today = date(2024, 12, 20);
        let result = normalize_deadline_on("~ 1/5(일)", today).unwrap();
        assert_eq!(result.date_naive(), date(2025, 1, 5));
    }

    #[test]
    fn test_relative_today_does_not_roll() {
        let today = date(2024, 8, 15);
        let result = normalize_deadline_on("~ 8/15(목)", today).unwrap();
        assert_eq!(result.date_naive(), date(2024, 8, 15));
    }

    #[test]
    fn test_relative_without_weekday() {
        let today = date(2024, 6, 1);
        let result = normalize_deadline_on("~ 7/3", today).unwrap();
        assert_eq!(result.date_naive(), date(2024, 7, 3));
    }

    #[test]
    fn test_garbage_is_none_and_does_not_panic() {
        assert_eq!(normalize_deadline("garbage"), None);
        assert_eq!(normalize_deadline("D-3"), None);
        assert_eq!(normalize_deadline("~ 13/45(월)"), None);
        assert_eq!(normalize_deadline("2024.13.99"), None);
    }

    #[test]
    fn test_midnight_utc() {
        let result = normalize_deadline("2024.12.31").unwrap();
        assert_eq!(result.time(), NaiveTime::MIN);
    }
}
