//! Tests for the font cache with a stub font program

use satchel_core::resource::DirectoryDiscoverer;
use satchel_core::{FontCache, FontFace, FontParams, FontStyle};
use satchel_plugin::{AssetDecoder, BoxError, FontProgram, GlyphMetrics, ResourceEntry};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Font "program" whose file content is its face name
#[derive(Debug)]
struct NamedProgram(String);

impl FontProgram for NamedProgram {
    fn face_name(&self) -> Option<&str> {
        Some(&self.0)
    }

    fn glyph_count(&self) -> usize {
        0
    }

    fn metrics(&self, _ch: char, px: f32) -> GlyphMetrics {
        GlyphMetrics {
            width: px as usize,
            height: px as usize,
            advance_width: px,
            ..GlyphMetrics::default()
        }
    }

    fn rasterize(&self, ch: char, px: f32) -> (GlyphMetrics, Vec<u8>) {
        let metrics = self.metrics(ch, px);
        (metrics, vec![0; metrics.width * metrics.height])
    }
}

struct NamedDecoder;

impl AssetDecoder<FontFace> for NamedDecoder {
    fn decode(&self, _entry: &ResourceEntry, bytes: &[u8]) -> Result<FontFace, BoxError> {
        let name = std::str::from_utf8(bytes)?.trim().to_string();
        if name.is_empty() {
            return Err("empty font file".into());
        }
        Ok(FontFace::new(Arc::new(NamedProgram(name))))
    }

    fn name(&self) -> &str {
        "Named Decoder"
    }
}

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn stub_cache(temp: &TempDir) -> FontCache {
    FontCache::with_decoder(
        Arc::new(DirectoryDiscoverer::new(temp.path())),
        Arc::new(NamedDecoder),
    )
}

#[test]
fn test_fonts_keyed_by_lowercase_stem() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "fonts/Menomonia.ttf", "Menomonia");
    write(temp.path(), "fonts/Arial.ttf", "Arial");
    write(temp.path(), "fonts/LICENSE.txt", "text");
    let cache = stub_cache(&temp);

    let report = cache.load_all_fonts("fonts");
    assert_eq!(report.loaded, 2);

    let expected: HashSet<String> = ["menomonia", "arial"].iter().map(|s| s.to_string()).collect();
    assert_eq!(cache.font_keys(), expected);
    assert_eq!(cache.font("menomonia").unwrap().face_name(), Some("Menomonia"));
    assert!(cache.font("Menomonia").is_none());
}

#[test]
fn test_same_stem_collapses_to_one_key() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "fonts/a/Same.ttf", "First");
    write(temp.path(), "fonts/b/same.ttf", "Second");
    let cache = stub_cache(&temp);

    let report = cache.load_all_fonts("fonts");
    assert_eq!(report.loaded, 2);
    assert_eq!(cache.font_keys().len(), 1);
    assert!(cache.font("same").is_some());
}

#[test]
fn test_derived_font_leaves_canonical() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "fonts/Menomonia.ttf", "Menomonia");
    let cache = stub_cache(&temp);
    cache.load_all_fonts("");

    let params = FontParams::sized(26.0).with_style(FontStyle::Bold);
    let derived = cache.derived_font("menomonia", &params).unwrap();
    assert_eq!(derived.size(), 26.0);
    assert!(derived.is_bold());
    assert!(!derived.is_italic());

    let canonical = cache.font("menomonia").unwrap();
    assert_eq!(canonical.size(), 1.0);
    assert_eq!(canonical.style(), FontStyle::Plain);
    assert!(Arc::ptr_eq(canonical.program(), derived.program()));

    assert_eq!(derived.metrics('M').height, 26);
    assert_eq!(canonical.metrics('M').height, 1);
}

#[test]
fn test_empty_params_return_canonical_copy() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "fonts/Plain.ttf", "Plain");
    let cache = stub_cache(&temp);
    cache.load_all_fonts("fonts");

    let copy = cache.derived_font("plain", &FontParams::default()).unwrap();
    assert_eq!(&copy, cache.font("plain").unwrap().as_ref());
    assert!(cache.derived_font("missing", &FontParams::default()).is_none());
}

#[test]
fn test_undecodable_font_counts_as_failed() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "fonts/Empty.ttf", "");
    write(temp.path(), "fonts/Good.ttf", "Good");
    let cache = stub_cache(&temp);

    let report = cache.load_all_fonts("fonts");
    assert_eq!(report.failed, 1);
    assert_eq!(report.loaded, 1);
    assert!(cache.font("empty").is_none());
}

#[test]
fn test_fontdue_rejects_garbage() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "fonts/Broken.ttf", "not a font");
    let cache = FontCache::new(Arc::new(DirectoryDiscoverer::new(temp.path())));

    let report = cache.load_all_fonts("fonts");
    assert_eq!(report.failed, 1);
    assert!(cache.font_keys().is_empty());

    let err = cache.load_font_from_path("broken", &temp.path().join("fonts/Broken.ttf"));
    assert!(err.is_err());
}

#[test]
fn test_clear() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "fonts/Menomonia.ttf", "Menomonia");
    let cache = stub_cache(&temp);
    cache.load_all_fonts("fonts");
    cache.clear();

    assert!(cache.font_keys().is_empty());
    assert!(cache.font("menomonia").is_none());
}
