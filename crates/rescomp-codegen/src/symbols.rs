//! C symbol names and literal formatting.
//!
//! # Examples
//!
//! ```
//! use rescomp_codegen::symbols;
//!
//! assert_eq!(symbols::make_identifier("images/icon-16.png"), "images_icon_16_png");
//! assert_eq!(symbols::folder_symbol("assets", ""), "assets_root");
//! assert_eq!(symbols::folder_symbol("assets", "web/css"), "assets_dir_web_css");
//! assert_eq!(symbols::file_symbol("assets", "web/site.css"), "assets_file_web_site_css");
//! assert_eq!(symbols::include_guard("assets"), "ASSETS_H");
//! assert_eq!(symbols::c_string("say \"hi\"\n"), r#""say \"hi\"\n""#);
//! ```

use std::fmt::Write;

/// Bytes per line in generated blobs.
pub const BYTES_PER_LINE: usize = 12;

/// Replaces every character that is not ASCII alphanumeric with `_`.
///
/// The empty path (the root) maps to `root`.
#[must_use]
pub fn make_identifier(path: &str) -> String {
    if path.is_empty() {
        return "root".to_string();
    }
    path.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Returns `true` if `name` can prefix generated C symbols.
#[must_use]
pub fn is_valid_base_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Symbol of a folder: `{name}_root` for the root, `{name}_dir_{id}` otherwise.
#[must_use]
pub fn folder_symbol(name: &str, path: &str) -> String {
    if path.is_empty() {
        format!("{name}_root")
    } else {
        format!("{name}_dir_{}", make_identifier(path))
    }
}

/// Symbol of a file: `{name}_file_{id}`.
#[must_use]
pub fn file_symbol(name: &str, path: &str) -> String {
    format!("{name}_file_{}", make_identifier(path))
}

/// Include guard for a header generated under `name`.
#[must_use]
pub fn include_guard(name: &str) -> String {
    format!("{}_H", make_identifier(name).to_ascii_uppercase())
}

/// Renders `value` as a quoted C string literal.
///
/// Control characters without a short escape become `\xNN`; the literal is
/// split after such an escape when a hex digit follows, so the escape
/// cannot swallow it.
#[must_use]
pub fn c_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut after_hex_escape = false;
    for c in value.chars() {
        if after_hex_escape && c.is_ascii_hexdigit() {
            out.push_str("\"\"");
        }
        after_hex_escape = false;
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if u32::from(c) < 0x20 => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
                after_hex_escape = true;
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Formats `data` as `0xNN` values, [`BYTES_PER_LINE`] per line.
///
/// Every line but the last ends with a comma.
#[must_use]
pub fn hex_lines(data: &[u8]) -> Vec<String> {
    let chunks = data.chunks(BYTES_PER_LINE).count();
    data.chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| {
            let mut line = chunk
                .iter()
                .map(|byte| format!("0x{byte:02x}"))
                .collect::<Vec<_>>()
                .join(", ");
            if i + 1 < chunks {
                line.push(',');
            }
            line
        })
        .collect()
}
