use std::sync::LazyLock;

use crate::models::job::{JobDetails, PartialJobListing};
use crate::models::query::{JobSearchQuery, Source};
use crate::scrapers::selectors::{Lookup, SiteMarkup, SiteSelectors};
use crate::scrapers::{SiteScraper, query_string};

const BASE_URL: &str = "https://www.welcometothejungle.com";

// The site ships generated class names that change with every redesign,
// hence the long chains.
const CARDS: &[&str] = &[
    ".wui-grid .wui-grid-item",
    r#"[data-testid="job-card"]"#,
    ".job-card",
    r#"li[data-testid="search-results-list-item-wrapper"]"#,
    "article",
];

const CARD_TITLE: &[Lookup] = &[
    Lookup::Text(".wh-jx-iboGJB"),
    Lookup::Text(r#"[data-testid="job-title"]"#),
    Lookup::FirstText("h3"),
    Lookup::FirstText("h4"),
    Lookup::FirstText(".sc-1b9rrsc-0"),
];

const CARD_URL: &[Lookup] = &[
    Lookup::Attr("a", "href"),
    Lookup::Attr(r#"[href*="/fr/companies/"]"#, "href"),
    Lookup::Attr(r#"a[href*="/jobs/"]"#, "href"),
];

const CARD_COMPANY: &[Lookup] = &[
    Lookup::Text(".wh-jx-hfjyAG"),
    Lookup::Text(r#"[data-testid="company-name"]"#),
    Lookup::Text(".company-name"),
    Lookup::Text(".sc-1g0y0qj-1"),
];

const CARD_LOCATION: &[Lookup] = &[
    Lookup::Text(".location"),
    Lookup::Text(r#"[data-testid="location"]"#),
    Lookup::Text(".job-location"),
];

const DETAIL_COMPANY: &[Lookup] = &[
    Lookup::Text(".wh-jx-hlXceE"),
    Lookup::Text(r#"[data-testid="company-name"]"#),
    Lookup::FirstText(".company-info h3"),
    Lookup::Text(".sc-1b9rrsc-2"),
    Lookup::Text(".sc-1f14bvs-3"),
];

const DETAIL_DESCRIPTION: &[Lookup] = &[
    Lookup::Text(".wh-jx-jkMRMX"),
    Lookup::Text(r#"[data-testid="job-description"]"#),
    Lookup::Text(".description-section"),
    Lookup::Text(".sc-1b9rrsc-4"),
    Lookup::FirstText(r#"section[class*="description"]"#),
];

const DETAIL_LOCATION: &[Lookup] = &[
    Lookup::Text(".wh-jx-ehQYlW"),
    Lookup::Text(r#"[data-testid="location"]"#),
    Lookup::Text(".location-section"),
    Lookup::Text(".sc-1b9rrsc-5"),
    Lookup::FirstText(r#"div[class*="location"]"#),
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

/// Welcome to the Jungle, French job board.
pub struct WelcomeToTheJungleScraper;

impl SiteScraper for WelcomeToTheJungleScraper {
    fn source(&self) -> Source {
        Source::Welcometothejungle
    }

    fn build_search_url(&self, query: &JobSearchQuery) -> String {
        let keywords = query.keywords();
        let mut params = vec![
            ("query", keywords.as_str()),
            ("location", query.location_or_default()),
            ("sortBy", "mostRecent"),
        ];
        if query.remote_only {
            params.push(("contract_type", "FULL_TIME_REMOTE"));
        }
        params.push(("page", "1"));
        format!("{BASE_URL}/fr/jobs?{}", query_string(&params))
    }

    fn extract_job_listings(&self, html: &str) -> Vec<PartialJobListing> {
        SELECTORS.listings(html, BASE_URL, self.source())
    }

    fn extract_job_details(&self, html: &str) -> JobDetails {
        SELECTORS.details(html)
    }
}
