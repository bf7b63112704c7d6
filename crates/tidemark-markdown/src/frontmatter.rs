use std::collections::BTreeMap;

/// Key/value pairs from a document's front-matter block.
pub type Metadata = BTreeMap<String, String>;

/// The line delimiting a front-matter block on both sides.
pub const DELIMITER: &str = "---";

/// Splits a leading `---`-delimited metadata block off a document.
///
/// The input is trimmed first. A document that does not open with a
/// delimiter line simply has no front matter: the trimmed text comes back
/// unchanged with empty metadata. The same applies to a malformed block
/// (a line without the `": "` separator, or no closing delimiter) — this
/// function never fails.
pub fn split_front_matter(source: &str) -> (Metadata, String) {
    let source = source.trim();

    let Some(mut rest) = source.strip_prefix("---\n") else {
        return (Metadata::new(), source.to_string());
    };

    let mut data = Metadata::new();

    loop {
        let Some((line, tail)) = rest.split_once('\n') else {
            // Ran out of lines without seeing the closing delimiter.
            return (Metadata::new(), source.to_string());
        };

        if line == DELIMITER {
            return (data, tail.to_string());
        }

        let Some((key, value)) = line.split_once(": ") else {
            return (Metadata::new(), source.to_string());
        };

        data.insert(key.to_string(), value.to_string());
        rest = tail;
    }
}
