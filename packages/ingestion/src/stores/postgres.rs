//! Postgres storage implementation.
//!
//! Uniqueness lives in the schema (unique indexes on name / link); the
//! store surfaces constraint violations as `StoreError::Duplicate` and
//! expresses the job upsert as a single `ON CONFLICT DO NOTHING`
//! statement, so no application-level locking is needed anywhere.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::JobStore;
use crate::types::entities::{
    Category, Company, JobPosting, NewJobPosting, Skill, UpsertOutcome,
};

/// Postgres SQLSTATE for unique-constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed store.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error, turning unique violations into `Duplicate`.
fn map_insert_err(collection: &'static str, key: &str, e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Duplicate {
                collection,
                key: key.to_string(),
            };
        }
    }
    StoreError::Database(Box::new(e))
}

fn map_err(e: sqlx::Error) -> StoreError {
    StoreError::Database(Box::new(e))
}

/// Posting row without its skill references.
#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    link: String,
    title: Option<String>,
    company_id: Uuid,
    category_id: Option<Uuid>,
    location: Option<String>,
    experience: Option<String>,
    education: Option<String>,
    employment_type: Option<String>,
    deadline: Option<DateTime<Utc>>,
    salary: Option<String>,
    views: i64,
    created_at: DateTime<Utc>,
}

impl JobRow {
    fn into_posting(self, skill_ids: Vec<Uuid>) -> JobPosting {
        JobPosting {
            id: self.id,
            link: self.link,
            title: self.title,
            company_id: self.company_id,
            category_id: self.category_id,
            skill_ids,
            location: self.location,
            experience: self.experience,
            education: self.education,
            employment_type: self.employment_type,
            deadline: self.deadline,
            salary: self.salary,
            views: self.views,
            created_at: self.created_at,
        }
    }
}

#[async_trait]
impl JobStore for PostgresStore {
    async fn find_company_by_name(&self, name: &str) -> StoreResult<Option<Company>> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn insert_company(&self, name: &str, location: Option<&str>) -> StoreResult<Company> {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (id, name, location)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(location)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_err("companies", name, e))
    }

    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn insert_category(&self, name: &str) -> StoreResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_err("categories", name, e))
    }

    async fn find_skill_by_name(&self, name: &str) -> StoreResult<Option<Skill>> {
        sqlx::query_as::<_, Skill>("SELECT * FROM skills WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn insert_skill(&self, name: &str) -> StoreResult<Skill> {
        sqlx::query_as::<_, Skill>("INSERT INTO skills (id, name) VALUES ($1, $2) RETURNING *")
            .bind(Uuid::new_v4())
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_insert_err("skills", name, e))
    }

    async fn find_job_by_link(&self, link: &str) -> StoreResult<Option<JobPosting>> {
        let row = sqlx::query_as::<_, JobRow>("SELECT * FROM job_postings WHERE link = $1")
            .bind(link)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let skill_ids: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT skill_id FROM job_posting_skills WHERE job_posting_id = $1",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;

        Ok(Some(
            row.into_posting(skill_ids.into_iter().map(|(id,)| id).collect()),
        ))
    }

    async fn upsert_job(&self, job: &NewJobPosting) -> StoreResult<UpsertOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_err)?;

        // Insert wins or silently yields to the existing row; RETURNING
        // only fires when the insert won
        let inserted: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO job_postings (
                id, link, title, company_id, category_id,
                location, experience, education, employment_type,
                deadline, salary
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (link) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&job.link)
        .bind(job.title.as_deref())
        .bind(job.company_id)
        .bind(job.category_id)
        .bind(job.location.as_deref())
        .bind(job.experience.as_deref())
        .bind(job.education.as_deref())
        .bind(job.employment_type.as_deref())
        .bind(job.deadline)
        .bind(job.salary.as_deref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_err)?;

        let Some((job_id,)) = inserted else {
            tx.rollback().await.map_err(map_err)?;
            return Ok(UpsertOutcome::AlreadyExists);
        };

        for skill_id in &job.skill_ids {
            sqlx::query(
                "INSERT INTO job_posting_skills (job_posting_id, skill_id) VALUES ($1, $2)",
            )
            .bind(job_id)
            .bind(skill_id)
            .execute(&mut *tx)
            .await
            .map_err(map_err)?;
        }

        tx.commit().await.map_err(map_err)?;
        Ok(UpsertOutcome::Inserted)
    }
}
