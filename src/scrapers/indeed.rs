use std::sync::LazyLock;

use crate::models::job::{JobDetails, PartialJobListing};
use crate::models::query::{JobSearchQuery, Source};
use crate::scrapers::selectors::{Lookup, SiteMarkup, SiteSelectors};
use crate::scrapers::{SiteScraper, query_string};

const BASE_URL: &str = "https://www.indeed.fr";

const CARDS: &[&str] = &[
    ".job_seen_beacon",
    r#"[data-testid="job-card"]"#,
    "li div.cardOutline",
];

const CARD_TITLE: &[Lookup] = &[
    Lookup::Text(".jobTitle"),
    Lookup::Text(r#"[data-testid="job-title"]"#),
    Lookup::FirstText("h2"),
];

const CARD_URL: &[Lookup] = &[
    Lookup::Attr(".jcs-JobTitle", "href"),
    Lookup::Attr(r#"[data-testid="job-title"] a"#, "href"),
    Lookup::Attr(r#"a[data-testid="job-title"]"#, "href"),
    Lookup::Attr(r#"a[href*="jk="]"#, "href"),
];

const CARD_COMPANY: &[Lookup] = &[
    Lookup::Text(".companyName"),
    Lookup::Text(r#"[data-testid="company-name"]"#),
];

const CARD_LOCATION: &[Lookup] = &[
    Lookup::Text(".companyLocation"),
    Lookup::Text(r#"[data-testid="text-location"]"#),
    Lookup::Text(r#"[data-testid="job-location"]"#),
];

const DETAIL_COMPANY: &[Lookup] = &[
    Lookup::Text(r#"[data-testid="inlineHeader-companyName"]"#),
    Lookup::Text(".jobsearch-CompanyInfoWithoutHeaderImage"),
    Lookup::Text(".job-company-name"),
];

const DETAIL_DESCRIPTION: &[Lookup] = &[
    Lookup::Text("#jobDescriptionText"),
    Lookup::Text("#jobDescription"),
    Lookup::Text(".job-description"),
];

const DETAIL_LOCATION: &[Lookup] = &[
    Lookup::Text(r#"[data-testid="job-location"]"#),
    Lookup::Text(r#"[data-testid="inlineHeader-companyLocation"]"#),
    Lookup::FirstText(".jobsearch-JobInfoHeader-item"),
    Lookup::Text(".job-location"),
];

const MARKUP: SiteMarkup = SiteMarkup {
    cards: CARDS,
    card_title: CARD_TITLE,
    card_url: CARD_URL,
    card_company: CARD_COMPANY,
    card_location: CARD_LOCATION,
    detail_company: DETAIL_COMPANY,
    detail_description: DETAIL_DESCRIPTION,
    detail_location: DETAIL_LOCATION,
};

static SELECTORS: LazyLock<SiteSelectors> = LazyLock::new(|| MARKUP.compile());

/// Indeed France search.
pub struct IndeedScraper;

impl SiteScraper for IndeedScraper {
    fn source(&self) -> Source {
        Source::Indeed
    }

    fn build_search_url(&self, query: &JobSearchQuery) -> String {
        let keywords = query.keywords();
        let mut params = vec![
            ("q", keywords.as_str()),
            ("l", query.location_or_default()),
            ("sort", "date"),
            // Posted in the last day
            ("fromage", "1"),
        ];
        if query.remote_only {
            params.push(("filter", "6"));
        }
        format!("{BASE_URL}/jobs?{}", query_string(&params))
    }

    fn extract_job_listings(&self, html: &str) -> Vec<PartialJobListing> {
        SELECTORS.listings(html, BASE_URL, self.source())
    }

    fn extract_job_details(&self, html: &str) -> JobDetails {
        SELECTORS.details(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{COMPANY_NOT_FOUND, DESCRIPTION_NOT_AVAILABLE, LOCATION_NOT_SPECIFIED};

    fn query() -> JobSearchQuery {
        JobSearchQuery {
            sources: vec![Source::Indeed],
            poste: "React Developer".into(),
            technologies: vec![],
            location: None,
            exclude_terms: vec!["stage".into()],
            remote_only: false,
        }
    }

    #[test]
    fn builds_search_url() {
        assert_eq!(
            IndeedScraper.build_search_url(&query()),
            "https://www.indeed.fr/jobs?q=React%20Developer&l=France&sort=date&fromage=1"
        );
    }

    #[test]
    fn remote_filter_only_when_requested() {
        let mut q = query();
        q.location = Some("Lyon".into());
        q.remote_only = true;

        let url = IndeedScraper.build_search_url(&q);
        assert!(url.contains("l=Lyon"));
        assert!(url.ends_with("&filter=6"));
        assert!(!IndeedScraper.build_search_url(&query()).contains("filter="));
    }

    #[test]
    fn extracts_listings() {
        let html = r#"
            <div class="job_seen_beacon">
              <h2 class="jobTitle">Senior React Developer</h2>
              <a class="jcs-JobTitle" href="/rc/clk?jk=12345"></a>
              <span class="companyName">Tech Corp</span>
              <span class="companyLocation">Paris, France</span>
            </div>
            <div class="job_seen_beacon">
              <h2 class="jobTitle">Frontend Developer</h2>
              <a class="jcs-JobTitle" href="/rc/clk?jk=67890"></a>
              <span class="companyName">StartupXYZ</span>
              <span class="companyLocation">Remote</span>
            </div>
        "#;

        let results = IndeedScraper.extract_job_listings(html);

        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0],
            PartialJobListing {
                url: Some("https://www.indeed.fr/rc/clk?jk=12345".into()),
                title: Some("Senior React Developer".into()),
                company: Some("Tech Corp".into()),
                location: Some("Paris, France".into()),
                source: Some(Source::Indeed),
            }
        );
        assert_eq!(results[1].title.as_deref(), Some("Frontend Developer"));
        assert_eq!(results[1].location.as_deref(), Some("Remote"));
    }

    #[test]
    fn extracts_listings_from_test_id_markup() {
        let html = r#"
            <div data-testid="job-card">
              <h2 data-testid="job-title">Backend Developer</h2>
              <a data-testid="job-title" href="/viewjob?jk=11111"></a>
              <span data-testid="company-name">DevInc</span>
              <span data-testid="job-location">Lyon</span>
            </div>
        "#;

        let results = IndeedScraper.extract_job_listings(html);

        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].url.as_deref(),
            Some("https://www.indeed.fr/viewjob?jk=11111")
        );
        assert_eq!(results[0].title.as_deref(), Some("Backend Developer"));
        assert_eq!(results[0].company.as_deref(), Some("DevInc"));
        assert_eq!(results[0].location.as_deref(), Some("Lyon"));
    }

    #[test]
    fn skips_incomplete_cards() {
        let html = r#"
            <div class="job_seen_beacon"><span class="companyName">Tech Corp</span></div>
            <div class="job_seen_beacon"><h2 class="jobTitle">Some Job</h2></div>
        "#;

        assert!(IndeedScraper.extract_job_listings(html).is_empty());
        assert!(IndeedScraper.extract_job_listings("").is_empty());
    }

    #[test]
    fn extracts_details() {
        let html = r#"
            <div data-testid="inlineHeader-companyName">Tech Company</div>
            <div id="jobDescriptionText">
              <p>We are looking for a skilled React developer with experience in TypeScript and Node.js.</p>
            </div>
            <div data-testid="job-location">Paris, Île-de-France, France</div>
        "#;

        let details = IndeedScraper.extract_job_details(html);

        assert_eq!(details.company, "Tech Company");
        assert!(details.description.contains("TypeScript and Node.js"));
        assert_eq!(details.location, "Paris, Île-de-France, France");
    }

    #[test]
    fn details_from_alternative_markup() {
        let html = r#"
            <div class="jobsearch-CompanyInfoWithoutHeaderImage">Alternate Company</div>
            <div id="jobDescription">Job description with React skills required</div>
            <div class="jobsearch-JobInfoHeader-item">Marseille, France</div>
        "#;

        let details = IndeedScraper.extract_job_details(html);

        assert_eq!(details.company, "Alternate Company");
        assert!(details.description.contains("Job description with React skills"));
        assert_eq!(details.location, "Marseille, France");
    }

    #[test]
    fn missing_details_use_sentinels() {
        let details = IndeedScraper.extract_job_details("<div>No job details here</div>");
        assert_eq!(details.company, COMPANY_NOT_FOUND);
        assert_eq!(details.description, DESCRIPTION_NOT_AVAILABLE);
        assert_eq!(details.location, LOCATION_NOT_SPECIFIED);
    }
}
