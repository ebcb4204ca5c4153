use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::config::Config;
use crate::error::AppError;
use crate::models::job::JobListing;
use crate::models::query::{JobSearchQuery, Source};
use crate::scrapers::fetch::PageFetcher;
use crate::scrapers::{ScraperRegistry, SiteScraper, get_job_details};

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Detail pages fetched per source, taken from the top of the results.
    pub detail_limit: usize,
    /// Detail fetches in flight at once within a source.
    pub detail_concurrency: usize,
    /// Pause between two sources.
    pub source_delay: Duration,
    pub search_timeout: Duration,
    pub detail_timeout: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            detail_limit: 20,
            detail_concurrency: 10,
            source_delay: Duration::from_secs(2),
            search_timeout: Duration::from_secs(15),
            detail_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&Config> for SearchOptions {
    fn from(config: &Config) -> Self {
        Self {
            detail_limit: config.detail_limit,
            detail_concurrency: config.detail_concurrency,
            source_delay: Duration::from_millis(config.source_delay_ms),
            search_timeout: Duration::from_secs(config.search_timeout_secs),
            detail_timeout: Duration::from_secs(config.detail_timeout_secs),
        }
    }
}

/// Fans a query out over the registered job boards.
pub struct JobSearch {
    registry: ScraperRegistry,
    fetcher: Arc<dyn PageFetcher>,
    options: SearchOptions,
}

impl JobSearch {
    pub fn new(
        registry: ScraperRegistry,
        fetcher: Arc<dyn PageFetcher>,
        options: SearchOptions,
    ) -> Self {
        Self {
            registry,
            fetcher,
            options,
        }
    }

    /// Scrape every requested source in order and return the merged,
    /// URL-deduplicated listings. Failures are logged per source or per job
    /// and never abort the whole search.
    pub async fn search_jobs(&self, query: &JobSearchQuery) -> Vec<JobListing> {
        let mut all_jobs = Vec::new();

        for (i, &source) in query.sources.iter().enumerate() {
            let Some(scraper) = self.registry.get(source) else {
                tracing::warn!("No scraper registered for source '{source}', skipping");
                continue;
            };

            match self.search_source(scraper, query).await {
                Ok(jobs) => {
                    tracing::info!("{source}: {} jobs scraped", jobs.len());
                    all_jobs.extend(jobs);
                }
                Err(e) => tracing::error!("Failed to scrape {source}: {e}"),
            }

            if i + 1 < query.sources.len() && !self.options.source_delay.is_zero() {
                tokio::time::sleep(self.options.source_delay).await;
            }
        }

        let found = all_jobs.len();
        let jobs = dedupe_by_url(all_jobs);
        let jobs = exclude_terms(jobs, &query.exclude_terms);
        tracing::info!(
            "Search '{}' over {:?}: {found} scraped, {} returned",
            query.poste,
            query.sources.iter().map(Source::as_str).collect::<Vec<_>>(),
            jobs.len()
        );
        jobs
    }

    async fn search_source(
        &self,
        scraper: &dyn SiteScraper,
        query: &JobSearchQuery,
    ) -> Result<Vec<JobListing>, AppError> {
        let url = scraper.build_search_url(query);
        let html = self.fetcher.fetch(&url, self.options.search_timeout).await?;

        let mut candidates = scraper.extract_job_listings(&html);
        tracing::debug!("{}: {} candidates on {url}", scraper.source(), candidates.len());
        candidates.truncate(self.options.detail_limit);

        let fetcher = self.fetcher.as_ref();
        let timeout = self.options.detail_timeout;
        let jobs: Vec<JobListing> = stream::iter(candidates)
            .map(|partial| async move {
                get_job_details(scraper, fetcher, &partial, timeout).await
            })
            .buffered(self.options.detail_concurrency.max(1))
            .filter_map(|job| async move { job })
            .collect()
            .await;

        Ok(jobs)
    }
}

/// Keep the first listing seen for each URL, preserving order.
pub fn dedupe_by_url(jobs: Vec<JobListing>) -> Vec<JobListing> {
    let mut seen = HashSet::new();
    jobs.into_iter()
        .filter(|job| seen.insert(job.url.clone()))
        .collect()
}

/// Drop listings mentioning any of the user's excluded terms.
pub fn exclude_terms(jobs: Vec<JobListing>, terms: &[String]) -> Vec<JobListing> {
    if terms.iter().all(|t| t.trim().is_empty()) {
        return jobs;
    }
    jobs.into_iter().filter(|job| !job.mentions_any(terms)).collect()
}
