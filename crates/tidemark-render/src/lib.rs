//! Renders a parsed block tree to an HTML string.
//!
//! Fenced code in the TypeScript family goes through the highlighter; all
//! other content is emitted as-is. No HTML escaping happens here — input
//! is assumed pre-sanitized by the caller.

use std::fmt::Write;

use thiserror::Error;
use tidemark_highlight::{HighlightError, highlight};
use tidemark_markdown::{Block, Leaf};

/// Language tags routed through the syntax highlighter.
pub const HIGHLIGHT_LANGS: [&str; 3] = ["ts", "tsx", "js"];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to highlight code block: {0}")]
    Highlight(#[from] HighlightError),
}

/// Renders blocks in order into one HTML string.
///
/// A highlight failure stops the render and propagates; whether to fall
/// back to something else is the caller's call.
pub fn render_blocks(blocks: &[Block]) -> Result<String, RenderError> {
    let mut out = String::new();

    for block in blocks {
        match block {
            Block::Text { value } => {
                // Segmentation never emits these; surfacing one loudly in
                // the output beats hiding a broken pipeline.
                write!(out, "<pre style=\"color:red\">{value}</pre>").unwrap();
            }
            Block::Code { lang, value } => {
                let highlighted = lang
                    .as_deref()
                    .is_some_and(|l| HIGHLIGHT_LANGS.contains(&l));
                if highlighted {
                    let code = highlight(value)?;
                    write!(out, "<pre class=\"ts\"><code>{code}</code></pre>").unwrap();
                } else {
                    write!(out, "<pre><code>{value}</code></pre>").unwrap();
                }
            }
            Block::Heading { level, value } => {
                write!(out, "<h{level}>{value}</h{level}>").unwrap();
            }
            Block::Paragraph { value } => {
                out.push_str("<p>");
                render_leafs(value, &mut out);
                out.push_str("</p>");
            }
        }
    }

    Ok(out)
}

fn render_leafs(leafs: &[Leaf], out: &mut String) {
    for leaf in leafs {
        match leaf {
            Leaf::Text { value } => out.push_str(value),
            Leaf::Bold { value } => wrap_children("strong", value, out),
            Leaf::Italic { value } => wrap_children("em", value, out),
            Leaf::Code { value } => wrap_children("code", value, out),
            Leaf::Link { href, value } => {
                write!(out, "<a href=\"{href}\">").unwrap();
                render_leafs(value, out);
                out.push_str("</a>");
            }
            Leaf::Img { src, alt } => {
                write!(out, "<img src=\"{src}\" alt=\"{alt}\" />").unwrap();
            }
        }
    }
}

fn wrap_children(tag: &str, leafs: &[Leaf], out: &mut String) {
    write!(out, "<{tag}>").unwrap();
    render_leafs(leafs, out);
    write!(out, "</{tag}>").unwrap();
}
