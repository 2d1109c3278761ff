use satchel_core::settings::Settings;
use satchel_core::{FontParams, FontStyle, ImageParams, SatchelError};
use std::path::Path;

pub fn image(
    settings: &Settings,
    key: &str,
    width: i32,
    height: i32,
    out: &Path,
    scope: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = crate::load_context(settings, scope);
    let scaled = context
        .images
        .scaled_image(key, &ImageParams::scale_to(width, height))
        .ok_or_else(|| missing("image", key))?;

    scaled.save(out)?;
    let (w, h) = scaled.dimensions();
    println!("Wrote {} ({} x {}) to {}", key, w, h, out.display());
    Ok(())
}

pub fn font(
    settings: &Settings,
    key: &str,
    size: Option<f32>,
    bold: bool,
    italic: bool,
    scope: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = crate::load_context(settings, scope);

    let mut params = FontParams::default();
    if let Some(size) = size {
        params = params.with_size(size);
    }
    if bold || italic {
        params = params.with_style(FontStyle::from_flags(bold, italic));
    }

    let face = context
        .fonts
        .derived_font(key, &params)
        .ok_or_else(|| missing("font", key))?;

    println!("Key:    {}", key);
    println!("Face:   {}", face.face_name().unwrap_or("unnamed"));
    println!("Size:   {}", face.size());
    println!("Style:  {:?}", face.style());
    println!("Glyphs: {}", face.glyph_count());
    Ok(())
}

fn missing(kind: &str, key: &str) -> SatchelError {
    SatchelError::InvalidArgument(format!("no {} cached under '{}'", kind, key))
}
