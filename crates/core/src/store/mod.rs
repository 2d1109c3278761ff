//! Keyed asset store shared by the image and font caches.
//!
//! A store maps a normalized string key to one decoded asset. Bulk loading
//! runs the pipeline:
//!
//! ```text
//! ResourceDiscoverer ──▶ AssetDecoder ──▶ KeyPolicy ──▶ KeyedAssetStore
//!   (names + bytes)       (typed asset)     (key)        (key → Arc<A>)
//! ```
//!
//! Decoding happens outside the lock; the decoded batch is published under a
//! single write guard, so readers see either the old or the new content.

pub mod variant;

pub use variant::VariantResolver;

use rayon::prelude::*;
use satchel_plugin::{AssetDecoder, ExtensionFilter, ResourceDiscoverer, ResourceEntry};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How a resource name becomes a store key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Lower-cased file stem: `fonts/Menomonia.ttf` → `menomonia`.
    /// Resources differing only by extension overwrite each other.
    Stem,
    /// Lower-cased `stem-extension`: `images/red.png` → `red-png`.
    /// Every format of a base name gets its own key. A name without an
    /// extension keys as its bare stem (`LICENSE` → `license`, not `license-`).
    StemWithExtension,
}

impl KeyPolicy {
    pub fn derive(&self, entry: &ResourceEntry) -> Option<String> {
        let stem = entry.stem();
        if stem.is_empty() {
            return None;
        }
        let key = match (self, entry.extension()) {
            (KeyPolicy::StemWithExtension, Some(ext)) => format!("{}-{}", stem, ext),
            _ => stem.to_string(),
        };
        Some(key.to_lowercase())
    }
}

/// Result of a bulk load
#[derive(Debug, Default, Clone)]
pub struct LoadReport {
    /// Resources the discoverer returned
    pub discovered: usize,
    /// Resources decoded and inserted
    pub loaded: usize,
    /// Resources that could not be read or decoded
    pub failed: usize,
    /// Resources with no derivable key
    pub skipped: usize,
    pub duration: Duration,
}

/// Thread-safe key → asset map
pub struct KeyedAssetStore<A> {
    kind: &'static str,
    policy: KeyPolicy,
    entries: RwLock<HashMap<String, Arc<A>>>,
}

impl<A: Send + Sync> KeyedAssetStore<A> {
    /// `kind` names the asset kind in log output ("image", "font")
    pub fn new(kind: &'static str, policy: KeyPolicy) -> Self {
        Self {
            kind,
            policy,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> KeyPolicy {
        self.policy
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Discover, decode and insert every resource under `scope` matching `filter`.
    ///
    /// Per-resource failures are logged and counted, never propagated.
    /// Keys already present are replaced by the freshly decoded asset.
    pub fn load_all(
        &self,
        discoverer: &dyn ResourceDiscoverer,
        decoder: &dyn AssetDecoder<A>,
        scope: &str,
        filter: &ExtensionFilter,
    ) -> LoadReport {
        let start = Instant::now();
        let mut report = LoadReport::default();

        let resources: Vec<ResourceEntry> = discoverer.discover(scope, filter).collect();
        report.discovered = resources.len();
        debug!(
            "{} found {} {} resources in scope '{}'",
            discoverer.name(),
            resources.len(),
            self.kind,
            scope
        );

        let decoded: Vec<Decoded<A>> = resources
            .par_iter()
            .map(|entry| self.decode_entry(discoverer, decoder, entry))
            .collect();

        let mut batch = Vec::with_capacity(decoded.len());
        for outcome in decoded {
            match outcome {
                Decoded::Asset(key, asset) => batch.push((key, Arc::new(asset))),
                Decoded::Failed => report.failed += 1,
                Decoded::NoKey => report.skipped += 1,
            }
        }
        report.loaded = batch.len();

        if !batch.is_empty() {
            let mut entries = self.write();
            entries.extend(batch);
        }

        report.duration = start.elapsed();
        info!(
            "{} {} assets loaded ({} failed, {} discovered) in {:?}",
            report.loaded, self.kind, report.failed, report.discovered, report.duration
        );
        report
    }

    fn decode_entry(
        &self,
        discoverer: &dyn ResourceDiscoverer,
        decoder: &dyn AssetDecoder<A>,
        entry: &ResourceEntry,
    ) -> Decoded<A> {
        let Some(key) = self.policy.derive(entry) else {
            debug!("No key derivable for {}", entry.name);
            return Decoded::NoKey;
        };

        let bytes = match discoverer.read(&entry.name) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read {} {}: {}", self.kind, entry.name, e);
                return Decoded::Failed;
            }
        };

        match decoder.decode(entry, &bytes) {
            Ok(asset) => Decoded::Asset(key, asset),
            Err(e) => {
                warn!(
                    "Failed to decode {} {} with {}: {}",
                    self.kind,
                    entry.name,
                    decoder.name(),
                    e
                );
                Decoded::Failed
            }
        }
    }

    /// Store `asset` under `key`, replacing any previous entry
    pub fn insert(&self, key: impl Into<String>, asset: A) {
        self.write().insert(key.into(), Arc::new(asset));
    }

    /// The canonical asset for `key`. A miss is logged, not an error.
    pub fn get(&self, key: &str) -> Option<Arc<A>> {
        let found = self.read().get(key).cloned();
        if found.is_none() {
            warn!("{} with name {} is not available", self.kind, key);
        }
        found
    }

    /// A derived copy of the asset under `key`; the stored entry is untouched
    pub fn get_variant(&self, key: &str, params: &A::Params) -> Option<A>
    where
        A: VariantResolver,
    {
        self.get(key).map(|canonical| canonical.resolve(params))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    pub fn keys(&self) -> HashSet<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<A>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<A>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

enum Decoded<A> {
    Asset(String, A),
    Failed,
    NoKey,
}
