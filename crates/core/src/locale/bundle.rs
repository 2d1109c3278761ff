//! Per-category, per-locale string tables.
//!
//! Each (category, locale) pair is either unloaded or holds exactly one
//! table. `load` moves a pair to loaded; only `clear` moves every pair back.
//!
//! Resolving `base` for `de_DE` tries, in order:
//! `base_de_DE`, `base_de`, the default locale's chain, then `base`
//! (each with a `.properties` suffix). The first hit is merged over its
//! less specific parents and stored under the requested locale.

use super::Locale;
use super::format::substitute;
use crate::codec::{StringTable, decode_text, parse_properties};
use crate::error::{Result, SatchelError};
use satchel_plugin::ResourceDiscoverer;
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::io;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tracing::{debug, warn};

const BUNDLE_SUFFIX: &str = ".properties";

/// Kind of text a bundle holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleCategory {
    Labels,
    Messages,
    Errors,
}

impl BundleCategory {
    pub const ALL: [BundleCategory; 3] = [
        BundleCategory::Labels,
        BundleCategory::Messages,
        BundleCategory::Errors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BundleCategory::Labels => "labels",
            BundleCategory::Messages => "messages",
            BundleCategory::Errors => "errors",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

/// Outcome of a single text lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextLookup {
    Found(String),
    /// The key was empty or whitespace
    BlankKey,
    /// Nothing was loaded for this category and locale
    LocaleNotLoaded(Locale),
    /// A table is loaded but has no such key
    KeyMissing(Locale),
}

impl TextLookup {
    pub fn into_value(self) -> Option<String> {
        match self {
            TextLookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, TextLookup::Found(_))
    }
}

type CategoryTables = HashMap<Locale, Arc<StringTable>>;

/// Loaded string tables for labels, messages and errors
pub struct LocaleBundleIndex {
    discoverer: Arc<dyn ResourceDiscoverer>,
    default_locale: RwLock<Locale>,
    tables: RwLock<HashMap<BundleCategory, CategoryTables>>,
}

impl LocaleBundleIndex {
    pub fn new(discoverer: Arc<dyn ResourceDiscoverer>, default_locale: Locale) -> Self {
        Self {
            discoverer,
            default_locale: RwLock::new(default_locale),
            tables: RwLock::new(HashMap::new()),
        }
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Change the locale used when a call passes none.
    /// Already loaded tables stay under the locale they were loaded for.
    pub fn set_default_locale(&self, locale: Locale) {
        *self
            .default_locale
            .write()
            .unwrap_or_else(PoisonError::into_inner) = locale;
    }

    /// Load the table for `base_name` (e.g. `language/labels`) into `category`.
    ///
    /// Fails with [`SatchelError::BundleNotFound`] when no resource exists
    /// for any locale in the fallback chain, including the bare base name.
    /// Returns the number of keys in the loaded table.
    pub fn load(
        &self,
        category: BundleCategory,
        base_name: &str,
        locale: Option<&Locale>,
    ) -> Result<usize> {
        let locale = self.locale_or_default(locale);
        let table = self.resolve_table(base_name, &locale)?;
        let count = table.len();

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables
            .entry(category)
            .or_default()
            .insert(locale.clone(), Arc::new(table));

        debug!(
            "Loaded {} {} keys from '{}' for {}",
            count,
            category.as_str(),
            base_name,
            locale
        );
        Ok(count)
    }

    fn resolve_table(&self, base_name: &str, locale: &Locale) -> Result<StringTable> {
        let default_locale = self.default_locale();
        let mut chains = vec![locale];
        if default_locale != *locale {
            chains.push(&default_locale);
        }

        for candidate_locale in chains {
            let candidates = candidate_locale.candidates();
            for (idx, suffix) in candidates.iter().enumerate() {
                let name = format!("{}_{}{}", base_name, suffix, BUNDLE_SUFFIX);
                if !self.discoverer.exists(&name) {
                    continue;
                }
                // The hit plus its less specific parents, most general first
                let mut layers = vec![format!("{}{}", base_name, BUNDLE_SUFFIX)];
                layers.extend(
                    candidates[idx..]
                        .iter()
                        .rev()
                        .map(|s| format!("{}_{}{}", base_name, s, BUNDLE_SUFFIX)),
                );
                return self.merge_layers(&layers);
            }
        }

        let base = format!("{}{}", base_name, BUNDLE_SUFFIX);
        if self.discoverer.exists(&base) {
            return self.merge_layers(&[base]);
        }

        Err(SatchelError::BundleNotFound {
            base_name: base_name.to_string(),
            locale: locale.to_string(),
        })
    }

    fn merge_layers(&self, layers: &[String]) -> Result<StringTable> {
        let mut table = StringTable::new();
        for name in layers {
            match self.discoverer.read(name) {
                Ok(bytes) => table.extend(parse_properties(&decode_text(&bytes))),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(table)
    }

    /// Look up `key`, reporting why nothing was found
    pub fn resolve(&self, category: BundleCategory, key: &str, locale: Option<&Locale>) -> TextLookup {
        if key.trim().is_empty() {
            return TextLookup::BlankKey;
        }
        let locale = self.locale_or_default(locale);
        let tables = self.read_tables();
        match tables.get(&category).and_then(|c| c.get(&locale)) {
            None => TextLookup::LocaleNotLoaded(locale),
            Some(table) => match table.get(key) {
                Some(value) => TextLookup::Found(value.clone()),
                None => TextLookup::KeyMissing(locale),
            },
        }
    }

    /// Template for `key`, or `""` when the locale is not loaded or the key
    /// is missing (both logged as warnings)
    pub fn lookup(&self, category: BundleCategory, key: &str, locale: Option<&Locale>) -> String {
        match self.resolve(category, key, locale) {
            TextLookup::Found(value) => value,
            TextLookup::BlankKey => String::new(),
            TextLookup::LocaleNotLoaded(locale) => {
                warn!(
                    "No {} bundle loaded for {}; load one before looking up '{}'",
                    category.as_str(),
                    locale,
                    key
                );
                String::new()
            }
            TextLookup::KeyMissing(locale) => {
                warn!(
                    "No value found for the key '{}' in the {} bundle for {}",
                    key,
                    category.as_str(),
                    locale
                );
                String::new()
            }
        }
    }

    /// [`lookup`](Self::lookup) with `suffix` appended to a non-empty result
    pub fn lookup_with_suffix(
        &self,
        category: BundleCategory,
        key: &str,
        suffix: &str,
        locale: Option<&Locale>,
    ) -> String {
        let mut value = self.lookup(category, key, locale);
        if !value.is_empty() {
            value.push_str(suffix);
        }
        value
    }

    /// [`lookup`](Self::lookup) with placeholders replaced by `args`
    pub fn lookup_formatted(
        &self,
        category: BundleCategory,
        key: &str,
        locale: Option<&Locale>,
        args: &[&dyn Display],
    ) -> String {
        substitute(&self.lookup(category, key, locale), args)
    }

    pub fn label(&self, key: &str, locale: Option<&Locale>) -> String {
        self.lookup(BundleCategory::Labels, key, locale)
    }

    pub fn message(&self, key: &str, locale: Option<&Locale>) -> String {
        self.lookup(BundleCategory::Messages, key, locale)
    }

    pub fn error_text(&self, key: &str, locale: Option<&Locale>) -> String {
        self.lookup(BundleCategory::Errors, key, locale)
    }

    pub fn label_keys(&self, locale: Option<&Locale>) -> HashSet<String> {
        self.keys(BundleCategory::Labels, locale)
    }

    pub fn message_keys(&self, locale: Option<&Locale>) -> HashSet<String> {
        self.keys(BundleCategory::Messages, locale)
    }

    pub fn error_keys(&self, locale: Option<&Locale>) -> HashSet<String> {
        self.keys(BundleCategory::Errors, locale)
    }

    /// Keys of the table loaded for `category` and `locale`; empty if none is loaded
    pub fn keys(&self, category: BundleCategory, locale: Option<&Locale>) -> HashSet<String> {
        let locale = self.locale_or_default(locale);
        let tables = self.read_tables();
        match tables.get(&category).and_then(|c| c.get(&locale)) {
            Some(table) => table.keys().cloned().collect(),
            None => {
                warn!("No {} bundle loaded for {}", category.as_str(), locale);
                HashSet::new()
            }
        }
    }

    /// Locales with a loaded table in `category`
    pub fn loaded_locales(&self, category: BundleCategory) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self
            .read_tables()
            .get(&category)
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default();
        locales.sort();
        locales
    }

    /// Unload every table of every category
    pub fn clear(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn locale_or_default(&self, locale: Option<&Locale>) -> Locale {
        locale.cloned().unwrap_or_else(|| self.default_locale())
    }

    fn read_tables(&self) -> RwLockReadGuard<'_, HashMap<BundleCategory, CategoryTables>> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }
}
