mod assets;
mod keys;
mod text;

use clap::{Parser, Subcommand};
use satchel_core::ResourceContext;
use satchel_core::settings::Settings;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "satchel",
    version,
    about = "Inspect the fonts, images, config and localized text of a resource tree",
    long_about = "Satchel loads bundled application resources into in-memory caches and serves them \
                  by key. These commands load a resource root the way an application would and print \
                  what the caches hold."
)]
pub struct Cli {
    /// Resource root directory (overrides settings and SATCHEL_RESOURCE_ROOT)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// JSON settings file
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Also log to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the keys of a cache
    Keys {
        #[arg(value_enum)]
        kind: keys::CacheKind,
        /// Only load resources below this directory of the root
        #[arg(long)]
        scope: Option<String>,
    },
    /// Print one config value
    Config {
        /// Properties resource, relative to the root
        #[arg(value_name = "FILE")]
        file: String,
        key: String,
        /// Fail when the key is missing instead of printing nothing
        #[arg(long)]
        strict: bool,
    },
    /// Print one localized text
    Text {
        /// labels, messages or errors
        category: String,
        /// Bundle base name, e.g. language/labels
        base: String,
        key: String,
        /// Locale such as de_DE; defaults to the configured locale
        #[arg(long)]
        locale: Option<String>,
        /// Appended to a non-empty result
        #[arg(long)]
        suffix: Option<String>,
        /// Values for {} placeholders
        args: Vec<String>,
    },
    /// Write a scaled copy of a cached image
    Image {
        key: String,
        #[arg(long)]
        width: i32,
        #[arg(long)]
        height: i32,
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        #[arg(long)]
        scope: Option<String>,
    },
    /// Describe a derived font
    Font {
        key: String,
        #[arg(long)]
        size: Option<f32>,
        #[arg(long)]
        bold: bool,
        #[arg(long)]
        italic: bool,
        #[arg(long)]
        scope: Option<String>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = satchel_runtime::init_logging("cli", cli.verbose);

    let settings = resolve_settings(&cli)?;
    tracing::debug!("Using resource root {}", settings.resource_root.display());

    match cli.command {
        Commands::Keys { kind, scope } => keys::run(&settings, kind, scope.as_deref()),
        Commands::Config { file, key, strict } => text::config(&settings, &file, &key, strict),
        Commands::Text {
            category,
            base,
            key,
            locale,
            suffix,
            args,
        } => text::run(
            &settings,
            text::TextRequest {
                category: &category,
                base: &base,
                key: &key,
                locale: locale.as_deref(),
                suffix: suffix.as_deref(),
                args: &args,
            },
        ),
        Commands::Image {
            key,
            width,
            height,
            out,
            scope,
        } => assets::image(&settings, &key, width, height, &out, scope.as_deref()),
        Commands::Font {
            key,
            size,
            bold,
            italic,
            scope,
        } => assets::font(&settings, &key, size, bold, italic, scope.as_deref()),
    }
}

fn resolve_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = satchel_runtime::load_settings(cli.settings.as_deref())?;
    if let Some(root) = &cli.root {
        settings.resource_root = root.clone();
    }
    Ok(settings)
}

/// Context with fonts and images loaded from `scope`, or the whole root
pub(crate) fn load_context(settings: &Settings, scope: Option<&str>) -> Arc<ResourceContext> {
    match scope {
        None => satchel_runtime::build_default_context(settings),
        Some(scope) => {
            let context = ResourceContext::from_settings(settings);
            context.fonts.load_all_fonts(scope);
            context.images.load_all_images(scope);
            Arc::new(context)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, name: &str, content: &str) {
        let path = root.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn resource_tree() -> (TempDir, Settings) {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "language/messages.properties", "greet=Hello {}!\n");
        write(temp.path(), "config/app.properties", "title=Satchel\n");
        write(temp.path(), "fonts/Broken.ttf", "not a font");
        let settings = Settings {
            resource_root: temp.path().to_path_buf(),
            default_locale: Some("en".to_string()),
            ..Settings::default()
        };
        (temp, settings)
    }

    fn text_request<'a>(category: &'a str, base: &'a str, args: &'a [String]) -> text::TextRequest<'a> {
        text::TextRequest {
            category,
            base,
            key: "greet",
            locale: None,
            suffix: None,
            args,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_text_with_args() {
        let cli = Cli::try_parse_from([
            "satchel", "--root", "res", "text", "messages", "language/messages", "greet",
            "--locale", "de_DE", "Tom",
        ])
        .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("res")));
        match cli.command {
            Commands::Text { locale, args, .. } => {
                assert_eq!(locale.as_deref(), Some("de_DE"));
                assert_eq!(args, vec!["Tom".to_string()]);
            }
            _ => panic!("expected text command"),
        }
    }

    #[test]
    fn test_text_against_resource_tree() {
        let (_temp, settings) = resource_tree();
        let args = vec!["Tom".to_string()];

        assert!(text::run(&settings, text_request("messages", "language/messages", &args)).is_ok());
        assert!(text::run(&settings, text_request("sounds", "language/messages", &args)).is_err());
        assert!(text::run(&settings, text_request("labels", "language/labels", &args)).is_err());
    }

    #[test]
    fn test_config_strict_and_lenient() {
        let (_temp, settings) = resource_tree();

        assert!(text::config(&settings, "config/app.properties", "title", true).is_ok());
        assert!(text::config(&settings, "config/app.properties", "width", false).is_ok());
        let err = text::config(&settings, "config/app.properties", "width", true).unwrap_err();
        assert!(err.to_string().contains("width"));
        assert!(text::config(&settings, "config/missing.properties", "title", false).is_err());
    }

    #[test]
    fn test_keys_and_missing_assets() {
        let (_temp, settings) = resource_tree();

        assert!(keys::run(&settings, keys::CacheKind::Fonts, None).is_ok());
        assert!(keys::run(&settings, keys::CacheKind::Images, Some("images")).is_ok());
        assert!(assets::font(&settings, "broken", Some(12.0), true, false, Some("fonts")).is_err());

        let out = settings.resource_root.join("out.png");
        assert!(assets::image(&settings, "nothing-png", 4, 4, &out, None).is_err());
        assert!(!out.exists());
    }
}
