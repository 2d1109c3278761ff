use crate::font::FontFace;
use fontdue::{Font, FontSettings, Metrics};
use satchel_plugin::{AssetDecoder, BoxError, FontProgram, GlyphMetrics, ResourceEntry};
use std::fmt;
use std::sync::Arc;

/// TrueType/OpenType program parsed by `fontdue`
pub struct FontdueProgram {
    font: Font,
}

impl FontdueProgram {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BoxError> {
        let font = Font::from_bytes(bytes, FontSettings::default())?;
        Ok(Self { font })
    }
}

impl fmt::Debug for FontdueProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontdueProgram")
            .field("name", &self.font.name())
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl FontProgram for FontdueProgram {
    fn face_name(&self) -> Option<&str> {
        self.font.name()
    }

    fn glyph_count(&self) -> usize {
        self.font.glyph_count() as usize
    }

    fn metrics(&self, ch: char, px: f32) -> GlyphMetrics {
        glyph_metrics(self.font.metrics(ch, px))
    }

    fn rasterize(&self, ch: char, px: f32) -> (GlyphMetrics, Vec<u8>) {
        let (metrics, coverage) = self.font.rasterize(ch, px);
        (glyph_metrics(metrics), coverage)
    }
}

fn glyph_metrics(metrics: Metrics) -> GlyphMetrics {
    GlyphMetrics {
        xmin: metrics.xmin,
        ymin: metrics.ymin,
        width: metrics.width,
        height: metrics.height,
        advance_width: metrics.advance_width,
    }
}

/// Decodes `.ttf`/`.otf` resources into canonical [`FontFace`]s
#[derive(Debug, Default, Clone, Copy)]
pub struct FontdueDecoder;

impl AssetDecoder<FontFace> for FontdueDecoder {
    fn decode(&self, _entry: &ResourceEntry, bytes: &[u8]) -> Result<FontFace, BoxError> {
        let program = FontdueProgram::from_bytes(bytes)?;
        Ok(FontFace::new(Arc::new(program)))
    }

    fn name(&self) -> &str {
        "Fontdue Decoder"
    }
}
