use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::query::Source;

pub const COMPANY_NOT_FOUND: &str = "Company not found";
pub const DESCRIPTION_NOT_AVAILABLE: &str = "Description not available";
pub const LOCATION_NOT_SPECIFIED: &str = "Location not specified";

/// What a search-results card yields before the detail page is fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialJobListing {
    pub url: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub source: Option<Source>,
}

/// Fields read from a single job page. Missing fields hold the sentinel
/// strings above rather than real data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetails {
    pub company: String,
    pub description: String,
    pub location: String,
}

impl JobDetails {
    pub fn from_parts(
        company: Option<String>,
        description: Option<String>,
        location: Option<String>,
    ) -> Self {
        Self {
            company: company.unwrap_or_else(|| COMPANY_NOT_FOUND.to_string()),
            description: description.unwrap_or_else(|| DESCRIPTION_NOT_AVAILABLE.to_string()),
            location: location.unwrap_or_else(|| LOCATION_NOT_SPECIFIED.to_string()),
        }
    }

    pub fn known_company(&self) -> Option<&str> {
        known(&self.company, COMPANY_NOT_FOUND)
    }

    pub fn known_description(&self) -> Option<&str> {
        known(&self.description, DESCRIPTION_NOT_AVAILABLE)
    }

    pub fn known_location(&self) -> Option<&str> {
        known(&self.location, LOCATION_NOT_SPECIFIED)
    }
}

fn known<'a>(value: &'a str, sentinel: &str) -> Option<&'a str> {
    let value = value.trim();
    (!value.is_empty() && value != sentinel).then_some(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractType {
    Cdi,
    Cdd,
    Alternance,
    Stage,
    Freelance,
    Interim,
}

impl ContractType {
    /// Priority order used when several labels appear in the same text.
    pub const ALL: [ContractType; 6] = [
        ContractType::Cdi,
        ContractType::Cdd,
        ContractType::Alternance,
        ContractType::Stage,
        ContractType::Freelance,
        ContractType::Interim,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Cdi => "CDI",
            ContractType::Cdd => "CDD",
            ContractType::Alternance => "alternance",
            ContractType::Stage => "stage",
            ContractType::Freelance => "freelance",
            ContractType::Interim => "intérim",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub url: String,
    pub location: String,
    pub country: String,
    pub source: Source,
    pub technologies: Vec<String>,
    pub remote: bool,
    pub contract_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub scraped_at: DateTime<Utc>,
}

impl JobListing {
    /// True when any of `terms` occurs in the title, company or description.
    pub fn mentions_any(&self, terms: &[String]) -> bool {
        let haystack = format!("{} {} {}", self.title, self.company, self.description).to_lowercase();
        terms
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .any(|t| haystack.contains(&t))
    }

    /// Insert or refresh a listing, keyed by its URL-derived id.
    pub async fn upsert(pool: &PgPool, job: &JobListing) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO job_listings (id, title, company, description, url, location, country, source, technologies, remote, contract_type, salary_min, salary_max, salary_range, posted_at, scraped_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             ON CONFLICT (id) DO UPDATE SET title = EXCLUDED.title, company = EXCLUDED.company, description = EXCLUDED.description, location = EXCLUDED.location, technologies = EXCLUDED.technologies, remote = EXCLUDED.remote, contract_type = EXCLUDED.contract_type, salary_min = EXCLUDED.salary_min, salary_max = EXCLUDED.salary_max, salary_range = EXCLUDED.salary_range, scraped_at = EXCLUDED.scraped_at, updated_at = NOW()",
        )
        .bind(&job.id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.description)
        .bind(&job.url)
        .bind(&job.location)
        .bind(&job.country)
        .bind(job.source.as_str())
        .bind(&job.technologies)
        .bind(job.remote)
        .bind(&job.contract_type)
        .bind(job.salary_min)
        .bind(job.salary_max)
        .bind(&job.salary_range)
        .bind(job.posted_at)
        .bind(job.scraped_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Upsert every listing, logging failures. Returns how many were saved.
    pub async fn save_all(pool: &PgPool, jobs: &[JobListing]) -> usize {
        let mut saved = 0;
        for job in jobs {
            match Self::upsert(pool, job).await {
                Ok(()) => saved += 1,
                Err(e) => tracing::error!("Failed to save job {}: {e}", job.url),
            }
        }
        tracing::info!("Saved {saved}/{} jobs", jobs.len());
        saved
    }
}
