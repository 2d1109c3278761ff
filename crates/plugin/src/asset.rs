//! Resource and asset trait definitions.
//!
//! This module defines the abstractions the caches are built on:
//! - Resource discovery (enumerating named resources under a scope)
//! - Asset decoding (bytes of one resource into a typed asset)
//! - Font programs (the parsed font a decoder hands to the font cache)

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::PathBuf;

/// Error type for capability operations
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ==================== Resources ====================

/// A resource found by a discoverer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Root-relative name, `/`-separated (e.g. `images/red/20x20_red.png`)
    pub name: String,
    /// Location on disk, if the resource is backed by a file
    pub path: Option<PathBuf>,
}

impl ResourceEntry {
    pub fn new(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            path: Some(path),
        }
    }

    /// Entry without a backing file (in-memory or synthetic resources)
    pub fn virtual_entry(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    /// Last path segment of the name
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// File name without its final extension
    pub fn stem(&self) -> &str {
        let file_name = self.file_name();
        match file_name.rfind('.') {
            Some(0) | None => file_name,
            Some(idx) => &file_name[..idx],
        }
    }

    /// Final extension without the dot, if any
    pub fn extension(&self) -> Option<&str> {
        let file_name = self.file_name();
        match file_name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&file_name[idx + 1..]),
        }
    }
}

/// Set of recognized name suffixes (e.g. `.png`).
///
/// Matching is case-sensitive; list both `.png` and `.PNG` to accept both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self::default();
        for suffix in suffixes {
            filter.add(suffix);
        }
        filter
    }

    /// Add a suffix; duplicates are ignored
    pub fn add(&mut self, suffix: impl Into<String>) {
        let suffix = suffix.into();
        if !suffix.is_empty() && !self.suffixes.contains(&suffix) {
            self.suffixes.push(suffix);
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

/// Resource discoverer - knows which resources exist and how to read them
pub trait ResourceDiscoverer: Send + Sync {
    /// Enumerate resources under `scope` whose names match `filter`.
    /// An empty scope means the whole searchable root.
    fn discover(
        &self,
        scope: &str,
        filter: &ExtensionFilter,
    ) -> Box<dyn Iterator<Item = ResourceEntry> + Send + '_>;

    /// Read the bytes of one named resource.
    /// Fails with `ErrorKind::NotFound` if no such resource exists.
    fn read(&self, name: &str) -> std::io::Result<Vec<u8>>;

    /// Whether a resource with this name exists
    fn exists(&self, name: &str) -> bool {
        self.read(name).is_ok()
    }

    /// Discoverer name (for logging/debugging)
    fn name(&self) -> &str;
}

// ==================== Decoding ====================

/// Asset decoder - knows how to turn the bytes of a resource into `A`
pub trait AssetDecoder<A>: Send + Sync {
    /// Decode one resource. `entry` is passed for error reporting and
    /// format hints (e.g. the extension).
    fn decode(&self, entry: &ResourceEntry, bytes: &[u8]) -> Result<A, BoxError>;

    /// Decoder name (for logging/debugging)
    fn name(&self) -> &str;
}

/// Placement of one glyph rendered at a pixel size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Offset of the bitmap's left edge from the pen position
    pub xmin: i32,
    /// Offset of the bitmap's bottom edge from the baseline
    pub ymin: i32,
    /// Bitmap width in pixels
    pub width: usize,
    /// Bitmap height in pixels
    pub height: usize,
    /// Horizontal pen advance in pixels
    pub advance_width: f32,
}

/// A parsed font program as produced by a font decoder
pub trait FontProgram: Send + Sync + Debug {
    /// Face name from the font's naming table, if present
    fn face_name(&self) -> Option<&str>;

    /// Number of glyphs in the program
    fn glyph_count(&self) -> usize;

    /// Metrics of `ch` rendered at `px` pixels per em
    fn metrics(&self, ch: char, px: f32) -> GlyphMetrics;

    /// Coverage bitmap of `ch` at `px` pixels per em, row-major,
    /// `width * height` bytes
    fn rasterize(&self, ch: char, px: f32) -> (GlyphMetrics, Vec<u8>);
}
