//! Pure helpers deriving structured fields from free text.

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::models::job::ContractType;

/// Closed vocabulary for technology tags, in output order.
pub const TECH_KEYWORDS: [&str; 23] = [
    "react",
    "vue",
    "angular",
    "node",
    "python",
    "java",
    "javascript",
    "typescript",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "mongodb",
    "postgresql",
    "mysql",
    "graphql",
    "rest api",
    "git",
    "ci/cd",
    "jenkins",
    "terraform",
    "ansible",
];

const ID_LEN: usize = 16;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static SALARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{2,3})[kK](?:\s*-\s*([0-9]{2,3})[kK])?(?:\s*€)?").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salary {
    pub min: i32,
    pub max: i32,
    pub range: String,
}

/// Collapse whitespace runs and trim. `None` yields an empty string.
pub fn clean_text<'a>(text: impl Into<Option<&'a str>>) -> String {
    match text.into() {
        Some(text) => WHITESPACE.replace_all(text.trim(), " ").into_owned(),
        None => String::new(),
    }
}

/// Prefix relative links with the site's base URL.
pub fn build_full_url(url: &str, base_url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{base_url}{url}")
    }
}

/// Stable 16-character listing id: the leading hex digits of SHA-256(url).
pub fn generate_id(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(ID_LEN);
    id
}

/// First "50k-70k€" / "60K" style figure in `text`, in absolute euros.
pub fn extract_salary(text: &str) -> Option<Salary> {
    let caps = SALARY.captures(text)?;
    let first = caps.get(1)?.as_str().parse::<i32>().ok()? * 1000;
    let second = match caps.get(2) {
        Some(m) => m.as_str().parse::<i32>().ok()? * 1000,
        None => first,
    };

    Some(Salary {
        min: first.min(second),
        max: first.max(second),
        range: caps.get(0)?.as_str().to_string(),
    })
}

/// Vocabulary entries contained in the description or title.
///
/// Plain substring matching, so "java" also fires on "javascript".
pub fn extract_technologies(description: &str, title: &str) -> Vec<String> {
    let text = format!("{description} {title}").to_lowercase();
    TECH_KEYWORDS
        .iter()
        .filter(|tech| text.contains(*tech))
        .map(|tech| tech.to_string())
        .collect()
}

pub fn extract_contract_type(description: &str) -> Option<ContractType> {
    let text = description.to_lowercase();
    ContractType::ALL
        .into_iter()
        .find(|kind| text.contains(&kind.as_str().to_lowercase()))
}

pub fn is_remote(description: &str) -> bool {
    let text = description.to_lowercase();
    text.contains("remote") || text.contains("télétravail")
}
