use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The job boards we know how to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Linkedin,
    Indeed,
    Welcometothejungle,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Linkedin => "linkedin",
            Source::Indeed => "indeed",
            Source::Welcometothejungle => "welcometothejungle",
        }
    }

    pub fn all() -> [Source; 3] {
        [Source::Linkedin, Source::Indeed, Source::Welcometothejungle]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linkedin" => Ok(Source::Linkedin),
            "indeed" => Ok(Source::Indeed),
            "welcometothejungle" | "wttj" => Ok(Source::Welcometothejungle),
            other => Err(format!("unknown source '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchQuery {
    /// Unknown source names are logged and dropped rather than failing the
    /// whole query.
    #[serde(deserialize_with = "known_sources")]
    pub sources: Vec<Source>,
    pub poste: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub exclude_terms: Vec<String>,
    #[serde(default)]
    pub remote_only: bool,
}

fn known_sources<'de, D>(deserializer: D) -> Result<Vec<Source>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    Ok(names
        .iter()
        .filter_map(|name| match name.parse::<Source>() {
            Ok(source) => Some(source),
            Err(e) => {
                tracing::warn!("Skipping {e}");
                None
            }
        })
        .collect())
}

impl JobSearchQuery {
    /// `poste` followed by every technology, space separated.
    pub fn keywords(&self) -> String {
        std::iter::once(self.poste.as_str())
            .chain(self.technologies.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn location_or_default(&self) -> &str {
        match self.location.as_deref().map(str::trim) {
            Some(location) if !location.is_empty() => location,
            _ => "France",
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.sources.is_empty() {
            return Err("At least one source is required".to_string());
        }
        if self.poste.trim().is_empty() {
            return Err("poste is required".to_string());
        }
        Ok(())
    }
}
