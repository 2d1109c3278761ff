//! Flat `key=value` tables in the `.properties` format.
//!
//! Supported: `#`/`!` comment lines, `=`, `:` or whitespace separators,
//! backslash line continuation, escapes `\t \n \r \f \uXXXX`, and any other
//! escaped character standing for itself. Later duplicates override earlier ones.

use std::collections::HashMap;

pub type StringTable = HashMap<String, String>;

/// Bytes to text: UTF-8 when valid, otherwise ISO-8859-1
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

pub fn parse_properties(text: &str) -> StringTable {
    let mut table = StringTable::new();
    let mut lines = text.lines();

    while let Some(raw) = lines.next() {
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = String::from(line);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        table.insert(unescape(key), unescape(value));
    }

    table
}

/// An odd number of trailing backslashes continues the line
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches([' ', '\t', '\u{c}']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t', '\u{c}']);
    }
    (key, rest)
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        out.push(decoded);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    // Malformed escape, keep it literally
                    _ => out.push_str("\\u"),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_and_comments() {
        let table = parse_properties(
            "# comment\n\
             ! also a comment\n\
             \n\
             serverMode=local\n\
             port : 8080\n\
             name   Satchel App\n\
             empty=\n",
        );
        assert_eq!(table.len(), 4);
        assert_eq!(table["serverMode"], "local");
        assert_eq!(table["port"], "8080");
        assert_eq!(table["name"], "Satchel App");
        assert_eq!(table["empty"], "");
    }

    #[test]
    fn test_continuation_and_escapes() {
        let table = parse_properties(
            "greeting=Hello \\\n    World\n\
             path=C:\\\\temp\n\
             tab=a\\tb\n\
             umlaut=Gr\\u00fc\\u00dfe\n\
             key\\=with\\:sep=value\n",
        );
        assert_eq!(table["greeting"], "Hello World");
        assert_eq!(table["path"], "C:\\temp");
        assert_eq!(table["tab"], "a\tb");
        assert_eq!(table["umlaut"], "Grüße");
        assert_eq!(table["key=with:sep"], "value");
    }

    #[test]
    fn test_later_duplicates_override() {
        let table = parse_properties("a=1\na=2\n");
        assert_eq!(table["a"], "2");
    }

    #[test]
    fn test_decode_text_falls_back_to_latin1() {
        assert_eq!(decode_text("Grüße".as_bytes()), "Grüße");
        assert_eq!(decode_text(&[0x47, 0x72, 0xFC, 0xDF, 0x65]), "Grüße");
    }
}
