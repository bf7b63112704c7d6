use crate::inline::{Leaf, parse_leafs};
use regex::Regex;
use std::sync::OnceLock;

/// A structural (paragraph-level) markdown construct.
///
/// `Text` is the working variant the segmentation passes carve up; a fully
/// parsed document contains none (every survivor becomes a `Paragraph`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Text { value: String },
    Code { lang: Option<String>, value: String },
    Heading { level: u8, value: String },
    Paragraph { value: Vec<Leaf> },
}

impl Block {
    fn empty_text() -> Self {
        Block::Text {
            value: String::new(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Block::Text { value } | Block::Code { value, .. } | Block::Heading { value, .. } => {
                value.is_empty()
            }
            Block::Paragraph { value } => value.is_empty(),
        }
    }

    /// Appends a raw line (with its newline) while a pass is accumulating
    /// into a `Text` or `Code` block. Other variants are never the
    /// accumulator.
    fn push_line(&mut self, line: &str) {
        if let Block::Text { value } | Block::Code { value, .. } = self {
            value.push_str(line);
            value.push('\n');
        }
    }
}

/// Marker opening and closing a fenced code block.
pub const FENCE: &str = "```";

/// Runs the ordered segmentation passes over a raw document body.
///
/// The order is load-bearing: fences must be carved out before headings and
/// paragraph splits ever look at the text, or `#` inside code would read as
/// a heading. Every pass rewrites only `Text` blocks and drops empty
/// leftovers.
pub fn segment(body: &str) -> Vec<Block> {
    let mut blocks = vec![Block::Text {
        value: body.to_string(),
    }];

    blocks = rewrite_text(blocks, separate_code);
    blocks = rewrite_text(blocks, separate_paragraphs);
    blocks = rewrite_text(blocks, separate_headings);
    blocks = rewrite_text(blocks, into_paragraph);

    blocks
}

/// Applies `f` to every `Text` block, splicing its output in place, then
/// filters out empty-valued blocks.
fn rewrite_text<F>(blocks: Vec<Block>, f: F) -> Vec<Block>
where
    F: Fn(&str) -> Vec<Block>,
{
    blocks
        .into_iter()
        .flat_map(|block| match block {
            Block::Text { value } => f(&value),
            other => vec![other],
        })
        .filter(|block| !block.is_empty())
        .collect()
}

/// Code pass: a line starting with three backticks toggles code mode,
/// capturing the rest of that line as the language tag on open. An
/// unterminated fence silently closes at the block boundary.
fn separate_code(value: &str) -> Vec<Block> {
    let mut out = vec![Block::empty_text()];
    let mut code = false;

    for line in value.split('\n') {
        if let Some(tag) = line.strip_prefix(FENCE) {
            if code {
                out.push(Block::empty_text());
            } else {
                out.push(Block::Code {
                    lang: (!tag.is_empty()).then(|| tag.to_string()),
                    value: String::new(),
                });
            }
            code = !code;
            continue;
        }

        if let Some(last) = out.last_mut() {
            last.push_line(line);
        }
    }

    out
}

/// Paragraph-split pass: blank-line separators cut a text run into
/// paragraphs-to-be.
fn separate_paragraphs(value: &str) -> Vec<Block> {
    value
        .split("\n\n")
        .filter(|s| !s.is_empty())
        .map(|s| Block::Text {
            value: s.to_string(),
        })
        .collect()
}

/// Heading pass: a line opening with 1–6 `#` characters becomes a heading
/// at that level, marker stripped and nothing else — the leading space
/// after the `#` run is kept as-is.
fn separate_headings(value: &str) -> Vec<Block> {
    static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
    let heading_regex =
        HEADING_REGEX.get_or_init(|| Regex::new(r"^#{1,6}").expect("Invalid heading regex"));

    let mut out = vec![Block::empty_text()];

    for line in value.split('\n') {
        if let Some(m) = heading_regex.find(line) {
            out.push(Block::Heading {
                level: m.end() as u8,
                value: line[m.end()..].to_string(),
            });
            continue;
        }

        if !matches!(out.last(), Some(Block::Text { .. })) {
            out.push(Block::empty_text());
        }
        if let Some(last) = out.last_mut() {
            last.push_line(line);
        }
    }

    out
}

/// Final pass: every surviving `Text` block becomes a `Paragraph` by
/// running the inline tokenizer; an unconsumed remainder tails on as plain
/// text.
fn into_paragraph(value: &str) -> Vec<Block> {
    let (mut leafs, rest) = parse_leafs(value);
    if !rest.is_empty() {
        leafs.push(Leaf::Text { value: rest });
    }
    vec![Block::Paragraph { value: leafs }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headings_only(body: &str) -> Vec<Block> {
        // The heading pass in isolation, so tests can look at the exact
        // marker stripping without the earlier passes' trailing newlines.
        rewrite_text(
            vec![Block::Text {
                value: body.to_string(),
            }],
            separate_headings,
        )
    }

    #[test]
    fn fence_between_paragraphs_yields_three_blocks() {
        let blocks = segment("before\n\n```ts\ncode\n```\nafter");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
        assert_eq!(
            blocks[1],
            Block::Code {
                lang: Some("ts".to_string()),
                value: "code\n".to_string(),
            }
        );
        assert!(matches!(blocks[2], Block::Paragraph { .. }));
    }

    #[test]
    fn heading_strips_only_the_hash_run() {
        let blocks = headings_only("# Title\nbody");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    value: " Title".to_string(),
                },
                Block::Text {
                    value: "body\n".to_string(),
                },
            ]
        );
    }

    #[test]
    fn heading_inside_fence_stays_code() {
        let blocks = segment("```\n# not a heading\n```");
        assert_eq!(
            blocks,
            vec![Block::Code {
                lang: None,
                value: "# not a heading\n".to_string(),
            }]
        );
    }

    #[test]
    fn unterminated_fence_closes_at_block_end() {
        let blocks = segment("```js\nlet x = 1");
        assert_eq!(
            blocks,
            vec![Block::Code {
                lang: Some("js".to_string()),
                value: "let x = 1\n".to_string(),
            }]
        );
    }

    #[test]
    fn seven_hashes_cap_at_level_six() {
        let blocks = headings_only("####### deep");
        assert_eq!(
            blocks,
            vec![Block::Heading {
                level: 6,
                value: "# deep".to_string(),
            }]
        );
    }

    #[test]
    fn blank_lines_split_paragraphs() {
        let blocks = segment("one\n\ntwo");
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| matches!(b, Block::Paragraph { .. })));
    }

    #[test]
    fn headings_interrupt_text_runs() {
        let blocks = headings_only("intro\n## Mid\noutro");
        assert_eq!(
            blocks,
            vec![
                Block::Text {
                    value: "intro\n".to_string(),
                },
                Block::Heading {
                    level: 2,
                    value: " Mid".to_string(),
                },
                Block::Text {
                    value: "outro\n".to_string(),
                },
            ]
        );
    }

    #[test]
    fn no_text_blocks_survive_segmentation() {
        let blocks = segment("# a heading\n\npara\n\n```\ncode\n```");
        assert!(!blocks.is_empty());
        assert!(blocks.iter().all(|b| !matches!(b, Block::Text { .. })));
        assert!(blocks.iter().all(|b| !b.is_empty()));
    }
}
