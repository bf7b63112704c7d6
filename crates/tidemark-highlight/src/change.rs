use crate::classify::Category;
use std::ops::Range;

/// One pending highlight annotation, in byte offsets of the *original*
/// snippet. Offsets are only reinterpreted against the growing output at
/// application time, via the running shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub category: Category,
    pub start: usize,
    pub end: usize,
}

impl Change {
    pub fn new(category: Category, span: Range<usize>) -> Self {
        Self {
            category,
            start: span.start,
            end: span.end,
        }
    }
}

/// Stable sort by (start, end). Changes with identical spans keep their
/// collection order, which is how later-appended comment ranges end up
/// applied after tree-derived ones. Genuinely overlapping (non-nested)
/// ranges have no defined precedence and produce interleaved spans.
pub fn sort_changes(changes: &mut [Change]) {
    changes.sort_by_key(|c| (c.start, c.end));
}

/// Folds sorted changes over the snippet, carrying `(output, shift)`.
///
/// Each change's offsets are shifted by the total length the markup
/// inserted so far has added. A start landing exactly on a newline advances
/// by one so a span never wraps a leading line break.
pub fn apply_changes(source: &str, changes: &[Change]) -> String {
    let folded = changes
        .iter()
        .fold((source.to_string(), 0usize), |(out, shift), change| {
            apply_one(out, shift, change)
        });
    folded.0
}

fn apply_one(out: String, shift: usize, change: &Change) -> (String, usize) {
    let end = (change.end + shift).min(out.len());
    let mut pos = (change.start + shift).min(end);
    if out.as_bytes().get(pos) == Some(&b'\n') {
        pos = (pos + 1).min(end);
    }

    let wrapped = format!(
        "<span class=\"ts-{}\">{}</span>",
        change.category.css_class(),
        &out[pos..end]
    );
    let next_shift = shift + wrapped.len() - (end - pos);
    let next = format!("{}{}{}", &out[..pos], wrapped, &out[end..]);
    (next, next_shift)
}
