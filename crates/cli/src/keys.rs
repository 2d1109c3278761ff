use clap::ValueEnum;
use satchel_core::settings::Settings;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CacheKind {
    Images,
    Fonts,
}

#[derive(Tabled)]
struct KeyRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Details")]
    details: String,
}

pub fn run(
    settings: &Settings,
    kind: CacheKind,
    scope: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = crate::load_context(settings, scope);

    let mut rows: Vec<KeyRow> = match kind {
        CacheKind::Images => context
            .images
            .image_keys()
            .into_iter()
            .filter_map(|key| {
                let image = context.images.image(&key)?;
                let (width, height) = image.dimensions();
                Some(KeyRow {
                    key,
                    details: format!("{} x {}", width, height),
                })
            })
            .collect(),
        CacheKind::Fonts => context
            .fonts
            .font_keys()
            .into_iter()
            .filter_map(|key| {
                let face = context.fonts.font(&key)?;
                Some(KeyRow {
                    key,
                    details: format!(
                        "{} ({} glyphs)",
                        face.face_name().unwrap_or("unnamed"),
                        face.glyph_count()
                    ),
                })
            })
            .collect(),
    };

    if rows.is_empty() {
        println!("No {:?} found under {}", kind, settings.resource_root.display());
        return Ok(());
    }

    rows.sort_by(|a, b| a.key.cmp(&b.key));
    println!("{}", Table::new(rows));
    Ok(())
}
