use satchel_core::settings::Settings;
use satchel_core::{Result, ResourceContext};
use std::path::Path;
use std::sync::Arc;

/// Builds the resource context an application shares for its lifetime.
///
/// Fonts and images are bulk loaded from the whole resource root; text
/// bundles and config resources are loaded on demand by the caller.
pub fn build_default_context(settings: &Settings) -> Arc<ResourceContext> {
    let context = ResourceContext::from_settings(settings);

    if settings.resource_root.is_dir() {
        let fonts = context.fonts.load_all_fonts("");
        let images = context.images.load_all_images("");
        tracing::info!(
            "Resource root {} ready: {} fonts, {} images",
            settings.resource_root.display(),
            fonts.loaded,
            images.loaded
        );
    } else {
        tracing::warn!(
            "Resource root {} is not a directory; caches start empty",
            settings.resource_root.display()
        );
    }

    Arc::new(context)
}

/// Settings from `path` (or defaults when none is given) with environment
/// overrides applied
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    Ok(settings.apply_env())
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    Some(satchel_core::logging::init_logging(component, to_stderr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_core::BundleCategory;

    #[test]
    fn test_context_over_missing_root_is_empty() {
        let settings = Settings {
            resource_root: "/nonexistent/satchel/resources".into(),
            ..Settings::default()
        };
        let context = build_default_context(&settings);
        assert!(context.images.image_keys().is_empty());
        assert!(context.fonts.font_keys().is_empty());
    }

    #[test]
    fn test_context_shares_root() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("language")).unwrap();
        std::fs::write(temp.path().join("language/labels.properties"), "ok=OK").unwrap();

        let settings = Settings {
            resource_root: temp.path().to_path_buf(),
            default_locale: Some("en".to_string()),
            ..Settings::default()
        };
        let context = build_default_context(&settings);
        context
            .texts
            .load(BundleCategory::Labels, "language/labels", None)
            .unwrap();
        assert_eq!(context.texts.label("ok", None), "OK");
    }
}
