//! Localized text.
//!
//! ```text
//! LocaleBundleIndex
//! ├── labels   : Locale → StringTable
//! ├── messages : Locale → StringTable
//! └── errors   : Locale → StringTable
//! ```

pub mod bundle;
pub mod format;

pub use bundle::{BundleCategory, LocaleBundleIndex, TextLookup};
pub use format::substitute;

use crate::error::SatchelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language with an optional region, e.g. `de` or `de_DE`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: None,
        }
    }

    pub fn with_region(language: &str, region: &str) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: Some(region.to_ascii_uppercase()),
        }
    }

    /// Parse `de`, `de_DE`, `de-DE` or a POSIX value like `de_DE.UTF-8@euro`.
    /// `C` and `POSIX` carry no language and yield `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.split(['.', '@']).next().unwrap_or("").trim();
        if tag.is_empty() || tag == "C" || tag == "POSIX" {
            return None;
        }

        let mut parts = tag.split(['_', '-']);
        let language = parts.next().filter(|l| is_subtag(l, 2, 8))?;
        match parts.next() {
            None => Some(Self::new(language)),
            Some(region) if is_subtag(region, 2, 3) => Some(Self::with_region(language, region)),
            Some(_) => None,
        }
    }

    /// Locale of the process environment (`LC_ALL`, `LC_MESSAGES`, `LANG`)
    pub fn from_env() -> Option<Self> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| Self::parse(&value))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Bundle name suffixes from most to least specific: `["de_DE", "de"]`
    pub fn candidates(&self) -> Vec<String> {
        let mut candidates = Vec::with_capacity(2);
        if let Some(region) = &self.region {
            candidates.push(format!("{}_{}", self.language, region));
        }
        candidates.push(self.language.clone());
        candidates
    }
}

fn is_subtag(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric())
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = SatchelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SatchelError::InvalidArgument(format!("invalid locale '{}'", s)))
    }
}
