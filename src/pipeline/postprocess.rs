//! Optional cleanup of the model's answer.
//!
//! Models asked for structured output (JSON, Markdown) regularly wrap the
//! whole answer in a ```` ```json ```` fence. With `--strip-fences` the
//! wrapper is removed so the output can be piped straight into `jq` or a
//! file. Fences inside the answer are left alone.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```[A-Za-z0-9_+-]*[ \t]*\r?\n(.*?)\r?\n```\s*$").unwrap());

/// Remove one fence that encloses the entire (trimmed) text.
///
/// Returns the input unchanged when it is not wrapped, or when the wrapped
/// body itself contains a fence (i.e. the first and last fence belong to
/// different blocks).
pub fn strip_code_fences(input: &str) -> String {
    match RE_OUTER_FENCES.captures(input.trim()) {
        Some(caps) if !caps[1].contains("```") => caps[1].to_string(),
        _ => input.to_string(),
    }
}
