//! TypeScript syntax highlighting over a full tree-sitter walk.
//!
//! The walk classifies node spans into [`Category`] changes, two raw-text
//! scans add comment ranges, and the sorted changes are folded back over
//! the original snippet as `<span class="ts-...">` wrappers with a running
//! length shift.
//!
//! Malformed input is a hard failure: a parse tree containing error nodes
//! surfaces as [`HighlightError`] instead of partial output.

mod change;
mod classify;
mod comments;

pub use change::{Change, apply_changes, sort_changes};
pub use classify::{Category, classify_kind};

use thiserror::Error;
use tree_sitter::{Node, Parser};

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("tree-sitter rejected the TypeScript grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("snippet is not valid TypeScript (error near byte {offset})")]
    Parse { offset: usize },
}

/// Highlights a TypeScript/JavaScript snippet as an HTML fragment.
///
/// The output is the original text with `<span class="ts-<category>">`
/// wrappers inserted; bytes outside the wrapped ranges are untouched.
pub fn highlight(source: &str) -> Result<String, HighlightError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())?;

    // parse() only returns None on cancellation, which we never request.
    let tree = parser
        .parse(source, None)
        .ok_or(HighlightError::Parse { offset: 0 })?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(HighlightError::Parse {
            offset: first_error_offset(root),
        });
    }

    let mut changes = Vec::new();
    collect_changes(root, &mut changes);
    changes.extend(comments::line_comment_changes(source));
    changes.extend(comments::block_comment_changes(source));
    sort_changes(&mut changes);

    Ok(apply_changes(source, &changes))
}

/// Walks the whole tree, emitting a change for every classified span.
///
/// Classified nodes are terminal. Template substitutions and call
/// expressions get their special-cased spans before the table applies, so
/// a substitution's `}` reads as keyword rather than bracket and a callee
/// identifier is marked even though identifiers are otherwise plain.
fn collect_changes(node: Node<'_>, changes: &mut Vec<Change>) {
    if node.kind() == "template_substitution" {
        // `${` ... `}` — delimiters highlight as keyword, like the
        // original template delimiters they are.
        changes.push(Change::new(
            Category::Keyword,
            node.start_byte()..node.start_byte() + 2,
        ));
        changes.push(Change::new(
            Category::Keyword,
            node.end_byte().saturating_sub(1)..node.end_byte(),
        ));
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            collect_changes(child, changes);
        }
        return;
    }

    if node.kind() == "call_expression"
        && let Some(callee) = node.child_by_field_name("function")
    {
        match callee.kind() {
            "identifier" => changes.push(Change::new(Category::Call, callee.byte_range())),
            "member_expression" => {
                if let Some(property) = callee.child_by_field_name("property") {
                    changes.push(Change::new(Category::Call, property.byte_range()));
                }
            }
            _ => {}
        }
    }

    if let Some(category) = classify_kind(node.kind()) {
        changes.push(Change::new(category, node.byte_range()));
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_changes(child, changes);
    }
}

fn first_error_offset(node: Node<'_>) -> usize {
    if node.is_error() || node.is_missing() {
        return node.start_byte();
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            return first_error_offset(child);
        }
    }
    node.start_byte()
}
