//! Font cache.
//!
//! Fonts are keyed by lower-cased file stem, so `Menomonia.ttf` and
//! `menomonia.otf` share the key `menomonia` and the later one wins.
//! A cached face is the freshly parsed program at size 1, plain style and
//! identity transform; callers ask for sized/styled/transformed variants.

use crate::codec::FontdueDecoder;
use crate::error::{Result, SatchelError};
use crate::store::{KeyPolicy, KeyedAssetStore, LoadReport, VariantResolver};
use glam::{Affine2, Vec2};
use satchel_plugin::{
    AssetDecoder, ExtensionFilter, FontProgram, GlyphMetrics, ResourceDiscoverer, ResourceEntry,
};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Font suffixes recognized when no filter is given
pub const DEFAULT_FONT_EXTENSIONS: &[&str] = &[".ttf"];

/// Point size of a freshly decoded face
pub const CANONICAL_SIZE: f32 = 1.0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => FontStyle::Plain,
            (true, false) => FontStyle::Bold,
            (false, true) => FontStyle::Italic,
            (true, true) => FontStyle::BoldItalic,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }
}

/// A font program with presentation attributes.
///
/// Variants share the immutable program and differ only in attributes.
#[derive(Debug, Clone)]
pub struct FontFace {
    program: Arc<dyn FontProgram>,
    size: f32,
    style: FontStyle,
    transform: Affine2,
}

impl FontFace {
    pub fn new(program: Arc<dyn FontProgram>) -> Self {
        Self {
            program,
            size: CANONICAL_SIZE,
            style: FontStyle::Plain,
            transform: Affine2::IDENTITY,
        }
    }

    pub fn program(&self) -> &Arc<dyn FontProgram> {
        &self.program
    }

    pub fn face_name(&self) -> Option<&str> {
        self.program.face_name()
    }

    pub fn glyph_count(&self) -> usize {
        self.program.glyph_count()
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn is_bold(&self) -> bool {
        self.style.is_bold()
    }

    pub fn is_italic(&self) -> bool {
        self.style.is_italic()
    }

    /// Transform applied to glyph outlines
    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    /// Metrics of `ch` at this face's size
    pub fn metrics(&self, ch: char) -> GlyphMetrics {
        self.program.metrics(ch, self.size)
    }

    /// Coverage bitmap of `ch` at this face's size.
    /// Style and transform are left to the caller's renderer.
    pub fn rasterize(&self, ch: char) -> (GlyphMetrics, Vec<u8>) {
        self.program.rasterize(ch, self.size)
    }

    /// Pen advance after `ch`, mapped through the face transform
    pub fn advance(&self, ch: char) -> Vec2 {
        let advance = self.metrics(ch).advance_width;
        self.transform.transform_vector2(Vec2::new(advance, 0.0))
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_transform(mut self, transform: Affine2) -> Self {
        self.transform = transform;
        self
    }
}

impl PartialEq for FontFace {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.program, &other.program)
            && self.size == other.size
            && self.style == other.style
            && self.transform == other.transform
    }
}

/// Requested font attributes. Each present field replaces the cached one;
/// they are applied in the order size, style, transform.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FontParams {
    /// Point size
    pub size: Option<f32>,
    pub style: Option<FontStyle>,
    /// Transform for glyph outlines
    pub transform: Option<Affine2>,
}

impl FontParams {
    pub fn sized(size: f32) -> Self {
        Self::default().with_size(size)
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_transform(mut self, transform: Affine2) -> Self {
        self.transform = Some(transform);
        self
    }
}

impl VariantResolver for FontFace {
    type Params = FontParams;

    fn resolve(&self, params: &FontParams) -> Self {
        let mut face = self.clone();
        if let Some(size) = params.size {
            face = face.with_size(size);
        }
        if let Some(style) = params.style {
            face = face.with_style(style);
        }
        if let Some(transform) = params.transform {
            face = face.with_transform(transform);
        }
        face
    }
}

/// All fonts of an application, keyed by lower-cased file stem
pub struct FontCache {
    store: KeyedAssetStore<FontFace>,
    discoverer: Arc<dyn ResourceDiscoverer>,
    decoder: Arc<dyn AssetDecoder<FontFace>>,
    default_filter: ExtensionFilter,
}

impl FontCache {
    pub fn new(discoverer: Arc<dyn ResourceDiscoverer>) -> Self {
        Self::with_decoder(discoverer, Arc::new(FontdueDecoder))
    }

    pub fn with_decoder(
        discoverer: Arc<dyn ResourceDiscoverer>,
        decoder: Arc<dyn AssetDecoder<FontFace>>,
    ) -> Self {
        Self {
            store: KeyedAssetStore::new("font", KeyPolicy::Stem),
            discoverer,
            decoder,
            default_filter: ExtensionFilter::new(DEFAULT_FONT_EXTENSIONS.iter().copied()),
        }
    }

    pub fn with_default_filter(mut self, filter: ExtensionFilter) -> Self {
        self.default_filter = filter;
        self
    }

    pub fn default_filter(&self) -> &ExtensionFilter {
        &self.default_filter
    }

    pub fn load_all_fonts(&self, scope: &str) -> LoadReport {
        self.load_all_fonts_with(scope, &self.default_filter)
    }

    pub fn load_all_fonts_with(&self, scope: &str, filter: &ExtensionFilter) -> LoadReport {
        self.store
            .load_all(self.discoverer.as_ref(), self.decoder.as_ref(), scope, filter)
    }

    /// Decode the file at `path` and store it under `key`
    pub fn load_font_from_path(&self, key: &str, path: &Path) -> Result<()> {
        let name = path.display().to_string();
        let bytes = std::fs::read(path)?;
        let entry = ResourceEntry::new(name.clone(), path.to_path_buf());
        let face = self.decoder.decode(&entry, &bytes).map_err(|e| {
            warn!("Failed to decode font {}: {}", name, e);
            SatchelError::Decode {
                resource: name,
                message: e.to_string(),
            }
        })?;
        self.store.insert(key, face);
        Ok(())
    }

    pub fn insert_font(&self, key: impl Into<String>, face: FontFace) {
        self.store.insert(key, face);
    }

    /// The cached face as decoded
    pub fn font(&self, key: &str) -> Option<Arc<FontFace>> {
        self.store.get(key)
    }

    /// A face derived from the cached one per `params`
    pub fn derived_font(&self, key: &str, params: &FontParams) -> Option<FontFace> {
        self.store.get_variant(key, params)
    }

    pub fn font_keys(&self) -> HashSet<String> {
        self.store.keys()
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn store(&self) -> &KeyedAssetStore<FontFace> {
        &self.store
    }
}
