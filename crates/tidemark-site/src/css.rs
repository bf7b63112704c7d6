use regex::Regex;
use std::sync::OnceLock;

/// Collapses every whitespace run to a single space.
///
/// Crude but effective for hand-written stylesheets; string contents are
/// not treated specially.
pub fn minify_css(source: &str) -> String {
    static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    let whitespace_regex =
        WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

    whitespace_regex.replace_all(source, " ").into_owned()
}
