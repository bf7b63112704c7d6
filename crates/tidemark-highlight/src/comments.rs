use crate::change::Change;
use crate::classify::Category;
use regex::Regex;
use std::sync::OnceLock;

/// Finds `//` comments running to end of line.
///
/// This scan is independent of the syntax tree on purpose: its changes are
/// appended after the tree-derived ones so comment ranges are the last
/// word on the characters they cover.
pub fn line_comment_changes(source: &str) -> Vec<Change> {
    static LINE_COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    let line_comment_regex = LINE_COMMENT_REGEX
        .get_or_init(|| Regex::new(r"//.+").expect("Invalid line comment regex"));

    line_comment_regex
        .find_iter(source)
        .map(|m| Change::new(Category::Comment, m.range()))
        .collect()
}

/// Finds `/* ... */` comments, tolerating a missing terminator by running
/// to end of input.
pub fn block_comment_changes(source: &str) -> Vec<Change> {
    let mut out = Vec::new();
    let mut offset = 0;

    while let Some(found) = source[offset..].find("/*") {
        let start = offset + found;
        let end = match source[start + 2..].find("*/") {
            Some(i) => start + 2 + i + 2,
            None => source.len(),
        };
        out.push(Change::new(Category::Comment, start..end));
        offset = end;
    }

    out
}
