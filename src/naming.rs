use std::sync::OnceLock;

use regex::Regex;

/// Extension every exported file carries.
pub const EXPORT_EXTENSION: &str = ".us.txt";

static DISALLOWED_RE: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

fn disallowed_re() -> &'static Regex {
    DISALLOWED_RE.get_or_init(|| Regex::new(r"[^\w\s-]").unwrap())
}

fn whitespace_re() -> &'static Regex {
    WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Lowercase `text`, drop punctuation and join words with underscores.
///
/// Word characters, whitespace and `-` are kept; whitespace runs become a
/// single `_`; leading and trailing underscores are trimmed.
pub fn sanitize_filename(text: &str) -> String {
    let text = disallowed_re().replace_all(text, "");
    let text = whitespace_re().replace_all(&text, "_");
    text.to_lowercase().trim_matches('_').to_string()
}

/// Sanitized part of a title after its first colon, or the whole title.
///
/// `"eNcounter Refresh: Loading Screen"` becomes `"loading_screen"`.
pub fn extract_title_suffix(title: &str) -> String {
    let suffix = match title.split_once(':') {
        Some((_, rest)) => rest.trim(),
        None => title,
    };
    sanitize_filename(suffix)
}

/// Default export filename: `{prefix}_{id}_{title suffix}.us.txt`.
pub fn generate_filename(
    id: impl std::fmt::Display,
    title: &str,
    product_prefix: &str,
) -> String {
    let suffix = extract_title_suffix(title);
    format!("{product_prefix}_{id}_{suffix}{EXPORT_EXTENSION}")
}

/// Make sure `filename` ends in `.us.txt`, completing a partial extension.
pub fn ensure_extension(filename: &str) -> String {
    if filename.ends_with(EXPORT_EXTENSION) {
        filename.to_string()
    } else if let Some(stem) = filename.strip_suffix(".txt") {
        format!("{stem}{EXPORT_EXTENSION}")
    } else if filename.ends_with(".us") {
        format!("{filename}.txt")
    } else {
        format!("{filename}{EXPORT_EXTENSION}")
    }
}
