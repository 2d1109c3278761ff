//! Positional placeholders in message templates.
//!
//! `{}` takes the next argument, `{N}` takes argument `N`. A placeholder
//! without a matching argument is left as written.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt::Display;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d*)\}").expect("placeholder pattern is valid"));

pub fn substitute(template: &str, args: &[&dyn Display]) -> String {
    let mut next = 0;
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let index = match caps.get(1).map(|m| m.as_str()).filter(|d| !d.is_empty()) {
                Some(digits) => digits.parse::<usize>().ok(),
                None => {
                    next += 1;
                    Some(next - 1)
                }
            };
            match index.and_then(|i| args.get(i)) {
                Some(arg) => arg.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
