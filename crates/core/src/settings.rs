use crate::error::Result;
use crate::font::DEFAULT_FONT_EXTENSIONS;
use crate::locale::Locale;
use crate::raster::DEFAULT_IMAGE_EXTENSIONS;
use satchel_plugin::ExtensionFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const ROOT_ENV: &str = "SATCHEL_RESOURCE_ROOT";
pub const LOCALE_ENV: &str = "SATCHEL_LOCALE";

/// Where resources live and which files count as images and fonts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub resource_root: PathBuf,
    pub default_locale: Option<String>,
    pub image_extensions: Vec<String>,
    pub font_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resource_root: PathBuf::from("resources"),
            default_locale: None,
            image_extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            font_extensions: DEFAULT_FONT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply `SATCHEL_RESOURCE_ROOT` and `SATCHEL_LOCALE` overrides
    pub fn apply_env(mut self) -> Self {
        if let Ok(root) = std::env::var(ROOT_ENV) {
            if !root.is_empty() {
                self.resource_root = PathBuf::from(root);
            }
        }
        if let Ok(locale) = std::env::var(LOCALE_ENV) {
            if !locale.is_empty() {
                self.default_locale = Some(locale);
            }
        }
        self
    }

    /// Configured locale, else the process environment, else `en`
    pub fn resolved_locale(&self) -> Locale {
        if let Some(tag) = &self.default_locale {
            match Locale::parse(tag) {
                Some(locale) => return locale,
                None => warn!("Ignoring unparsable default locale '{}'", tag),
            }
        }
        Locale::from_env().unwrap_or_else(|| Locale::new("en"))
    }

    pub fn image_filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(&self.image_extensions)
    }

    pub fn font_filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(&self.font_extensions)
    }
}
