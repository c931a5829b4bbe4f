//! Durable entities - companies, categories, skills, and job postings.
//!
//! All four are created lazily by the pipeline and never updated or
//! deleted by it afterwards. Each carries a unique key (name, or link
//! for postings) that the store enforces; that constraint is the only
//! concurrency-control mechanism the pipeline relies on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A company, identified by exact name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Company {
    pub id: Uuid,
    /// Unique key
    pub name: String,
    pub website: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A job-sector category, identified by exact name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Category {
    pub id: Uuid,
    /// Unique key
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A skill, identified by exact name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Skill {
    pub id: Uuid,
    /// Unique key
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A stored job posting.
///
/// The link is the sole dedup key: two listings with different text but
/// the same link are the same posting. The view counter belongs to the
/// read path; ingestion only initializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    /// Unique key
    pub link: String,
    pub title: Option<String>,
    pub company_id: Uuid,
    pub category_id: Option<Uuid>,
    pub skill_ids: Vec<Uuid>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub employment_type: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub salary: Option<String>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a job posting.
///
/// Applied with insert-if-absent semantics keyed by `link`; none of
/// these fields ever overwrite an existing posting.
#[derive(Debug, Clone)]
pub struct NewJobPosting {
    pub link: String,
    pub title: Option<String>,
    pub company_id: Uuid,
    pub category_id: Option<Uuid>,
    pub skill_ids: Vec<Uuid>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub employment_type: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub salary: Option<String>,
}

/// Outcome of an idempotent job upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new posting was stored
    Inserted,
    /// A posting with this link already existed; nothing was changed
    AlreadyExists,
}
