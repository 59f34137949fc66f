//! Recognition of `#include "file"` lines.

use once_cell::sync::Lazy;
use regex::Regex;

static INCLUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^#include\s+"(.+?)""#).expect("valid include regex"));

static STRICT_INCLUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^#include\s+"([^"]+)"\s*$"#).expect("valid strict include regex"));

static QUOTED_FORM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^#include\s+""#).expect("valid quoted form regex"));

/// Returns the quoted identifier if `line` is an include directive.
///
/// Leading and trailing whitespace is ignored and anything after the closing
/// quote is not inspected. Angle-bracket includes are not directives here.
pub fn parse_include(line: &str) -> Option<&str> {
    INCLUDE_RE
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether the line is written in the quoted include form but is not a clean
/// directive (unterminated quote, empty name, trailing text).
pub fn is_malformed_include(line: &str) -> bool {
    let trimmed = line.trim();
    QUOTED_FORM_RE.is_match(trimmed) && !STRICT_INCLUDE_RE.is_match(trimmed)
}
