// Scraper layer: one adapter per job board behind a shared trait, plus the
// detail-fetch pipeline and the search orchestrator that drive them.

pub mod extract;
pub mod fetch;
pub mod indeed;
pub mod linkedin;
pub mod search;
pub mod selectors;
pub mod welcometothejungle;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::models::job::{JobDetails, JobListing, PartialJobListing};
use crate::models::query::{JobSearchQuery, Source};
use crate::scrapers::extract::{
    clean_text, extract_contract_type, extract_salary, extract_technologies, generate_id,
    is_remote,
};
use crate::scrapers::fetch::PageFetcher;

pub use indeed::IndeedScraper;
pub use linkedin::LinkedInScraper;
pub use welcometothejungle::WelcomeToTheJungleScraper;

pub const COUNTRY: &str = "France";

/// Characters that encodeURIComponent does NOT encode.
const QUERY_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Site-specific half of the scraper: URL scheme and markup knowledge.
///
/// Implementations hold no per-request state, so one instance serves every
/// query for the life of the process.
pub trait SiteScraper: Send + Sync {
    fn source(&self) -> Source;

    fn build_search_url(&self, query: &JobSearchQuery) -> String;

    /// Parse a search-results page into candidate listings, skipping cards
    /// without a title or URL.
    fn extract_job_listings(&self, html: &str) -> Vec<PartialJobListing>;

    /// Parse a job page. Fields that cannot be found hold sentinel values.
    fn extract_job_details(&self, html: &str) -> JobDetails;
}

/// Encode `params` as a query string, in the order given.
pub fn query_string(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_VALUE_SET),
                utf8_percent_encode(value, QUERY_VALUE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Immutable source -> adapter mapping, built once at startup.
#[derive(Clone, Default)]
pub struct ScraperRegistry {
    scrapers: HashMap<Source, Arc<dyn SiteScraper>>,
}

impl ScraperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the LinkedIn, Indeed and Welcome to the Jungle adapters.
    pub fn with_default_sites() -> Self {
        Self::new()
            .register(LinkedInScraper)
            .register(IndeedScraper)
            .register(WelcomeToTheJungleScraper)
    }

    pub fn register(mut self, scraper: impl SiteScraper + 'static) -> Self {
        self.scrapers.insert(scraper.source(), Arc::new(scraper));
        self
    }

    pub fn get(&self, source: Source) -> Option<&dyn SiteScraper> {
        self.scrapers.get(&source).map(|s| s.as_ref())
    }
}

/// Fetch a candidate's job page and assemble the full listing.
///
/// Returns `None` without touching the network when the candidate lacks a
/// URL, title or source, and `None` (logged) when the fetch fails.
pub async fn get_job_details(
    scraper: &dyn SiteScraper,
    fetcher: &dyn PageFetcher,
    partial: &PartialJobListing,
    timeout: Duration,
) -> Option<JobListing> {
    let (Some(url), Some(title), Some(source)) = (
        partial.url.as_deref().filter(|u| !u.trim().is_empty()),
        partial.title.as_deref().filter(|t| !t.trim().is_empty()),
        partial.source,
    ) else {
        return None;
    };

    let html = match fetcher.fetch(url, timeout).await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("Failed to get job details for {source}: {url}: {e}");
            return None;
        }
    };

    let details = scraper.extract_job_details(&html);
    let description = details.known_description().unwrap_or_default();
    let salary = extract_salary(description);

    let company = details
        .known_company()
        .or(partial.company.as_deref())
        .unwrap_or(details.company.as_str());
    let location = details
        .known_location()
        .or(partial.location.as_deref())
        .unwrap_or(COUNTRY);

    let now = Utc::now();
    Some(JobListing {
        id: generate_id(url),
        title: clean_text(title),
        company: clean_text(company),
        description: clean_text(details.description.as_str()),
        url: url.to_string(),
        location: clean_text(location),
        country: COUNTRY.to_string(),
        source,
        technologies: extract_technologies(description, title),
        remote: is_remote(description),
        contract_type: extract_contract_type(description)
            .map(|c| c.as_str().to_string())
            .unwrap_or_default(),
        salary_min: salary.as_ref().map(|s| s.min),
        salary_max: salary.as_ref().map(|s| s.max),
        salary_range: salary.map(|s| s.range),
        posted_at: now,
        scraped_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{COMPANY_NOT_FOUND, DESCRIPTION_NOT_AVAILABLE};
    use crate::scrapers::fetch::testing::StaticFetcher;

    const JOB_URL: &str = "https://www.linkedin.com/jobs/view/12345/";

    const JOB_PAGE: &str = r#"
        <div class="top-card-layout__card"><h2>Tech Company</h2></div>
        <div class="description__text">
            <p>CDI en télétravail partiel. React, TypeScript et Node.js.</p>
            <p>Salaire 50k-70k€ selon profil.</p>
        </div>
        <div class="top-card-layout__secondary-text">Paris, Île-de-France</div>
    "#;

    fn candidate() -> PartialJobListing {
        PartialJobListing {
            url: Some(JOB_URL.to_string()),
            title: Some("  Senior   React Developer ".to_string()),
            company: Some("Card Company".to_string()),
            location: Some("Lyon".to_string()),
            source: Some(Source::Linkedin),
        }
    }

    #[tokio::test]
    async fn assembles_listing_from_detail_page() {
        let fetcher = StaticFetcher::new().with_page(JOB_URL, JOB_PAGE);
        let job = get_job_details(&LinkedInScraper, &fetcher, &candidate(), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(job.id, generate_id(JOB_URL));
        assert_eq!(job.title, "Senior React Developer");
        assert_eq!(job.company, "Tech Company");
        assert_eq!(job.location, "Paris, Île-de-France");
        assert_eq!(job.country, "France");
        assert_eq!(job.source, Source::Linkedin);
        assert_eq!(job.contract_type, "CDI");
        assert!(job.remote);
        assert_eq!(job.salary_min, Some(50_000));
        assert_eq!(job.salary_max, Some(70_000));
        assert_eq!(job.salary_range.as_deref(), Some("50k-70k€"));
        assert_eq!(job.technologies, vec!["react", "node", "typescript"]);
        assert!(!job.description.contains("  "));
        assert_eq!(job.posted_at, job.scraped_at);
    }

    #[tokio::test]
    async fn missing_required_fields_skip_the_fetch() {
        let fetcher = StaticFetcher::new().with_page(JOB_URL, JOB_PAGE);

        let mut no_url = candidate();
        no_url.url = None;
        let mut no_title = candidate();
        no_title.title = Some("   ".into());
        let mut no_source = candidate();
        no_source.source = None;

        for partial in [no_url, no_title, no_source] {
            let job =
                get_job_details(&LinkedInScraper, &fetcher, &partial, Duration::from_secs(1)).await;
            assert!(job.is_none());
        }
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_fetch_returns_none() {
        let fetcher = StaticFetcher::new();
        let job =
            get_job_details(&LinkedInScraper, &fetcher, &candidate(), Duration::from_secs(1)).await;

        assert!(job.is_none());
        assert_eq!(fetcher.calls(), vec![JOB_URL.to_string()]);
    }

    #[tokio::test]
    async fn sentinels_fall_back_to_candidate_fields() {
        let fetcher = StaticFetcher::new().with_page(JOB_URL, "<div>nothing useful</div>");
        let job = get_job_details(&LinkedInScraper, &fetcher, &candidate(), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(job.company, "Card Company");
        assert_eq!(job.location, "Lyon");
        assert_eq!(job.description, DESCRIPTION_NOT_AVAILABLE);
        assert!(job.technologies.contains(&"react".to_string()));
        assert_eq!(job.contract_type, "");
        assert!(!job.remote);
        assert_eq!(job.salary_min, None);

        let mut bare = candidate();
        bare.company = None;
        bare.location = None;
        let job = get_job_details(&LinkedInScraper, &fetcher, &bare, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(job.company, COMPANY_NOT_FOUND);
        assert_eq!(job.location, "France");
    }

    #[test]
    fn registry_resolves_registered_sources_only() {
        let registry = ScraperRegistry::new().register(IndeedScraper);
        assert!(registry.get(Source::Indeed).is_some());
        assert!(registry.get(Source::Linkedin).is_none());
        let defaults = ScraperRegistry::with_default_sites();
        for source in Source::all() {
            assert_eq!(defaults.get(source).map(|s| s.source()), Some(source));
        }
    }

    #[test]
    fn query_string_matches_encode_uri_component() {
        assert_eq!(
            query_string(&[("keywords", "C++ Dev"), ("location", "Île-de-France")]),
            "keywords=C%2B%2B%20Dev&location=%C3%8Ele-de-France"
        );
    }
}
