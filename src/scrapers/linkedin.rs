use std::sync::LazyLock;

use crate::models::job::{JobDetails, PartialJobListing};
use crate::models::query::{JobSearchQuery, Source};
use crate::scrapers::selectors::{Lookup, SiteMarkup, SiteSelectors};
use crate::scrapers::{SiteScraper, query_string};

const BASE_URL: &str = "https://www.linkedin.com";

const CARDS: &[&str] = &[
    ".jobs-search__results-list li",
    "div.base-search-card",
    r#"[data-automation-id="job-card"]"#,
];

const CARD_TITLE: &[Lookup] = &[
    Lookup::Text(".base-card__full-link"),
    Lookup::Text(".base-search-card__title"),
    Lookup::Text(r#"[data-automation-id="job-title"]"#),
];

const CARD_URL: &[Lookup] = &[
    Lookup::Attr(".base-card__full-link", "href"),
    Lookup::Attr(r#"a[data-automation-id="job-title"]"#, "href"),
    Lookup::Attr(r#"a[href*="/jobs/view/"]"#, "href"),
];

const CARD_COMPANY: &[Lookup] = &[
    Lookup::Text(".base-search-card__subtitle a"),
    Lookup::Text(".base-search-card__subtitle"),
    Lookup::Text(r#"[data-automation-id="company-name"]"#),
];

const CARD_LOCATION: &[Lookup] = &[
    Lookup::Text(".job-search-card__location"),
    Lookup::FirstText(".job-card-container__metadata-item"),
    Lookup::Text(r#"[data-automation-id="location"]"#),
];

const DETAIL_COMPANY: &[Lookup] = &[
    Lookup::Text(".top-card-layout__card"),
    Lookup::Text(r#"[data-automation-id="companyName"]"#),
    Lookup::Text(".job-details-jobs-unified-top-card__company-name a"),
];

const DETAIL_DESCRIPTION: &[Lookup] = &[
    Lookup::Text(".description__text"),
    Lookup::Text(".show-more-less-html__markup"),
    Lookup::Text(".jobs-description__content"),
];

const DETAIL_LOCATION: &[Lookup] = &[
    Lookup::Text(".top-card-layout__secondary-text"),
    Lookup::Text(r#"[data-automation-id="location"]"#),
    Lookup::FirstText(".job-details-jobs-unified-top-card__bullet-item-v2"),
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

/// Public LinkedIn job search (guest markup).
pub struct LinkedInScraper;

impl SiteScraper for LinkedInScraper {
    fn source(&self) -> Source {
        Source::Linkedin
    }

    fn build_search_url(&self, query: &JobSearchQuery) -> String {
        let keywords = query.keywords();
        let mut params = vec![
            ("keywords", keywords.as_str()),
            ("location", query.location_or_default()),
            // Posted in the last 24 hours
            ("f_TPR", "r86400"),
        ];
        if query.remote_only {
            params.push(("f_WT", "2"));
        }
        format!("{BASE_URL}/jobs/search/?{}", query_string(&params))
    }

    fn extract_job_listings(&self, html: &str) -> Vec<PartialJobListing> {
        SELECTORS.listings(html, BASE_URL, self.source())
    }

    fn extract_job_details(&self, html: &str) -> JobDetails {
        SELECTORS.details(html)
    }
}
