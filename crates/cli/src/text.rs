use satchel_core::settings::Settings;
use satchel_core::{BundleCategory, Locale, ResourceContext, SatchelError};
use std::fmt::Display;

pub struct TextRequest<'a> {
    pub category: &'a str,
    pub base: &'a str,
    pub key: &'a str,
    pub locale: Option<&'a str>,
    pub suffix: Option<&'a str>,
    pub args: &'a [String],
}

pub fn run(settings: &Settings, request: TextRequest<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let category = BundleCategory::parse(request.category).ok_or_else(|| {
        SatchelError::InvalidArgument(format!(
            "unknown category '{}', expected labels, messages or errors",
            request.category
        ))
    })?;
    let locale: Option<Locale> = request.locale.map(str::parse::<Locale>).transpose()?;

    let context = ResourceContext::from_settings(settings);
    let texts = &context.texts;
    texts.load(category, request.base, locale.as_ref())?;

    let text = match request.suffix {
        Some(suffix) => texts.lookup_with_suffix(category, request.key, suffix, locale.as_ref()),
        None => {
            let args: Vec<&dyn Display> = request.args.iter().map(|a| a as &dyn Display).collect();
            texts.lookup_formatted(category, request.key, locale.as_ref(), &args)
        }
    };
    println!("{}", text);
    Ok(())
}

pub fn config(
    settings: &Settings,
    file: &str,
    key: &str,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = ResourceContext::from_settings(settings);
    context.config.load(file)?;

    let value = if strict {
        context.config.get(key)?
    } else {
        context.config.get_opt(key).unwrap_or_default()
    };
    println!("{}", value);
    Ok(())
}
