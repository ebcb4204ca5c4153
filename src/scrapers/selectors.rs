//! Ordered selector fallback chains.
//!
//! Each field is looked up through a list of strategies tried in order; the
//! first one that produces a non-empty value wins. A site describes its
//! markup as a [`SiteMarkup`] constant and compiles it once into
//! [`SiteSelectors`].

use scraper::{ElementRef, Html, Selector};

use crate::models::job::{JobDetails, PartialJobListing};
use crate::models::query::Source;
use crate::scrapers::extract::{build_full_url, clean_text};

#[derive(Debug, Clone, Copy)]
pub enum Lookup {
    /// Text of every element matching the selector, concatenated.
    Text(&'static str),
    /// Text of the first element matching the selector.
    FirstText(&'static str),
    /// Attribute of the first matching element that carries it.
    Attr(&'static str, &'static str),
}

#[derive(Debug, Clone, Copy)]
enum Read {
    Text,
    FirstText,
    Attr(&'static str),
}

/// A fallback chain with its selectors parsed up front. Invalid selectors
/// are logged and left out.
pub struct Chain {
    steps: Vec<(Selector, Read)>,
}

impl Chain {
    pub fn new(lookups: &[Lookup]) -> Self {
        let steps = lookups
            .iter()
            .filter_map(|lookup| {
                let (css, read) = match *lookup {
                    Lookup::Text(css) => (css, Read::Text),
                    Lookup::FirstText(css) => (css, Read::FirstText),
                    Lookup::Attr(css, attr) => (css, Read::Attr(attr)),
                };
                Some((parse(css)?, read))
            })
            .collect();
        Self { steps }
    }

    /// First non-empty result, trying each step in order.
    pub fn first_match(&self, scope: ElementRef<'_>) -> Option<String> {
        self.steps
            .iter()
            .find_map(|(selector, read)| resolve(scope, selector, *read))
    }
}

fn resolve(scope: ElementRef<'_>, selector: &Selector, read: Read) -> Option<String> {
    let value = match read {
        Read::Text => {
            let text: String = scope.select(selector).flat_map(|el| el.text()).collect();
            clean_text(text.as_str())
        }
        Read::FirstText => {
            let element = scope.select(selector).next()?;
            clean_text(element.text().collect::<String>().as_str())
        }
        Read::Attr(attr) => scope
            .select(selector)
            .filter_map(|el| el.value().attr(attr))
            .map(str::trim)
            .find(|value| !value.is_empty())?
            .to_string(),
    };
    (!value.is_empty()).then_some(value)
}

/// Card selectors tried in order; the first one matching anything wins.
pub struct CardChain {
    selectors: Vec<Selector>,
}

impl CardChain {
    pub fn new(chain: &[&str]) -> Self {
        Self {
            selectors: chain.iter().filter_map(|css| parse(css)).collect(),
        }
    }

    pub fn select<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        self.selectors
            .iter()
            .map(|selector| document.select(selector).collect::<Vec<_>>())
            .find(|cards| !cards.is_empty())
            .unwrap_or_default()
    }
}

/// Raw selector chains for one job board.
pub struct SiteMarkup {
    pub cards: &'static [&'static str],
    pub card_title: &'static [Lookup],
    pub card_url: &'static [Lookup],
    pub card_company: &'static [Lookup],
    pub card_location: &'static [Lookup],
    pub detail_company: &'static [Lookup],
    pub detail_description: &'static [Lookup],
    pub detail_location: &'static [Lookup],
}

impl SiteMarkup {
    pub fn compile(&self) -> SiteSelectors {
        SiteSelectors {
            cards: CardChain::new(self.cards),
            card_title: Chain::new(self.card_title),
            card_url: Chain::new(self.card_url),
            card_company: Chain::new(self.card_company),
            card_location: Chain::new(self.card_location),
            detail_company: Chain::new(self.detail_company),
            detail_description: Chain::new(self.detail_description),
            detail_location: Chain::new(self.detail_location),
        }
    }
}

/// Compiled [`SiteMarkup`], shared by every request to the site.
pub struct SiteSelectors {
    cards: CardChain,
    card_title: Chain,
    card_url: Chain,
    card_company: Chain,
    card_location: Chain,
    detail_company: Chain,
    detail_description: Chain,
    detail_location: Chain,
}

impl SiteSelectors {
    /// Candidate listings from a search-results page. Cards without a title
    /// or URL are skipped; relative URLs are resolved against `base_url`.
    pub fn listings(&self, html: &str, base_url: &str, source: Source) -> Vec<PartialJobListing> {
        let document = Html::parse_document(html);

        self.cards
            .select(&document)
            .into_iter()
            .filter_map(|card| {
                let title = self.card_title.first_match(card)?;
                let url = self.card_url.first_match(card)?;
                Some(PartialJobListing {
                    url: Some(build_full_url(&url, base_url)),
                    title: Some(title),
                    company: self.card_company.first_match(card),
                    location: self.card_location.first_match(card),
                    source: Some(source),
                })
            })
            .collect()
    }

    pub fn details(&self, html: &str) -> JobDetails {
        let document = Html::parse_document(html);
        let root = document.root_element();

        JobDetails::from_parts(
            self.detail_company.first_match(root),
            self.detail_description.first_match(root),
            self.detail_location.first_match(root),
        )
    }
}

fn parse(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Invalid selector '{css}': {e:?}");
            None
        }
    }
}
