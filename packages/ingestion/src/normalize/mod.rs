//! Normalization - deadline parsing and skill extraction.

pub mod deadline;
pub mod skills;

pub use deadline::normalize_deadline;
pub use skills::{extract_skills, SKILL_VOCABULARY};

use crate::types::listing::{NormalizedListing, RawListing};

/// Normalize a raw listing: parse its deadline token and extract skills
/// from its title. Both stages fail closed, so this never errors.
pub fn normalize_listing(raw: RawListing) -> NormalizedListing {
    let deadline = raw
        .deadline
        .as_deref()
        .and_then(normalize_deadline);
    let skills = raw
        .title
        .as_deref()
        .map(extract_skills)
        .unwrap_or_default();

    NormalizedListing {
        raw,
        deadline,
        skills,
    }
}
