//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::JobStore;
use crate::types::entities::{
    Category, Company, JobPosting, NewJobPosting, Skill, UpsertOutcome,
};

/// In-memory store keyed the same way the durable schema is: reference
/// entities by name, postings by link.
///
/// Useful for tests and development. Check-and-insert happens under a
/// single write lock, which gives the same atomicity the database's
/// unique constraints provide.
pub struct MemoryStore {
    companies: RwLock<HashMap<String, Company>>,
    categories: RwLock<HashMap<String, Category>>,
    skills: RwLock<HashMap<String, Skill>>,
    jobs: RwLock<HashMap<String, JobPosting>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            companies: RwLock::new(HashMap::new()),
            categories: RwLock::new(HashMap::new()),
            skills: RwLock::new(HashMap::new()),
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored companies.
    pub fn company_count(&self) -> usize {
        self.companies.read().unwrap().len()
    }

    /// Number of stored categories.
    pub fn category_count(&self) -> usize {
        self.categories.read().unwrap().len()
    }

    /// Number of stored skills.
    pub fn skill_count(&self) -> usize {
        self.skills.read().unwrap().len()
    }

    /// Number of stored job postings.
    pub fn job_count(&self) -> usize {
        self.jobs.read().unwrap().len()
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn find_company_by_name(&self, name: &str) -> StoreResult<Option<Company>> {
        Ok(self.companies.read().unwrap().get(name).cloned())
    }

    async fn insert_company(&self, name: &str, location: Option<&str>) -> StoreResult<Company> {
        let mut companies = self.companies.write().unwrap();
        match companies.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                collection: "companies",
                key: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                let company = Company {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    website: None,
                    location: location.map(str::to_string),
                    industry: None,
                    description: None,
                    created_at: Utc::now(),
                };
                slot.insert(company.clone());
                Ok(company)
            }
        }
    }

    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        Ok(self.categories.read().unwrap().get(name).cloned())
    }

    async fn insert_category(&self, name: &str) -> StoreResult<Category> {
        let mut categories = self.categories.write().unwrap();
        match categories.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                collection: "categories",
                key: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                let category = Category {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    description: None,
                    created_at: Utc::now(),
                };
                slot.insert(category.clone());
                Ok(category)
            }
        }
    }

    async fn find_skill_by_name(&self, name: &str) -> StoreResult<Option<Skill>> {
        Ok(self.skills.read().unwrap().get(name).cloned())
    }

    async fn insert_skill(&self, name: &str) -> StoreResult<Skill> {
        let mut skills = self.skills.write().unwrap();
        match skills.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                collection: "skills",
                key: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                let skill = Skill {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    description: None,
                    created_at: Utc::now(),
                };
                slot.insert(skill.clone());
                Ok(skill)
            }
        }
    }

    async fn find_job_by_link(&self, link: &str) -> StoreResult<Option<JobPosting>> {
        Ok(self.jobs.read().unwrap().get(link).cloned())
    }

    async fn upsert_job(&self, job: &NewJobPosting) -> StoreResult<UpsertOutcome> {
        let mut jobs = self.jobs.write().unwrap();
        match jobs.entry(job.link.clone()) {
            Entry::Occupied(_) => Ok(UpsertOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(JobPosting {
                    id: Uuid::new_v4(),
                    link: job.link.clone(),
                    title: job.title.clone(),
                    company_id: job.company_id,
                    category_id: job.category_id,
                    skill_ids: job.skill_ids.clone(),
                    location: job.location.clone(),
                    experience: job.experience.clone(),
                    education: job.education.clone(),
                    employment_type: job.employment_type.clone(),
                    deadline: job.deadline,
                    salary: job.salary.clone(),
                    views: 0,
                    created_at: Utc::now(),
                });
                Ok(UpsertOutcome::Inserted)
            }
        }
    }
}
