//! Skill extraction from posting titles.

use std::collections::BTreeSet;

/// Canonical skill vocabulary matched against posting titles.
pub const SKILL_VOCABULARY: [&str; 7] = [
    "JavaScript",
    "Node.js",
    "Python",
    "Java",
    "React",
    "Angular",
    "Django",
];

/// Extract skills mentioned in a posting title.
///
/// Case-sensitive substring match against [`SKILL_VOCABULARY`]. This is
/// a heuristic, not authoritative: false negatives are expected, and a
/// title containing "JavaScript" also yields "Java" (substring match).
/// Returns the empty set when no term appears.
pub fn extract_skills(title: &str) -> BTreeSet<String> {
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| title.contains(**skill))
        .map(|skill| skill.to_string())
        .collect()
}
