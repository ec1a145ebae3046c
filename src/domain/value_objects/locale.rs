use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// `ko`, `ko-KR`, `ko_KR`, `es-419`
static LOCALE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{2,3})(?:[-_]([A-Za-z]{2}|[0-9]{3}))?$").expect("Invalid locale regex")
});

/// Language with an optional region, used to pick message templates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    pub fn parse(tag: &str) -> Result<Self, DomainError> {
        let captures = LOCALE_TAG_REGEX
            .captures(tag.trim())
            .ok_or_else(|| DomainError::InvalidLocale(tag.to_string()))?;

        Ok(Self {
            language: captures[1].to_lowercase(),
            region: captures.get(2).map(|m| m.as_str().to_uppercase()),
        })
    }

    pub fn korean() -> Self {
        Self {
            language: "ko".to_string(),
            region: None,
        }
    }

    pub fn english() -> Self {
        Self {
            language: "en".to_string(),
            region: None,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Canonical tag, e.g. `ko-KR`
    pub fn tag(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// Bundle keys to try, most specific first. The root bundle is not
    /// included; callers append it.
    pub fn candidates(&self) -> Vec<String> {
        let mut tags = vec![self.tag()];
        if self.region.is_some() {
            tags.push(self.language.clone());
        }
        tags
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::korean()
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag()
    }
}
