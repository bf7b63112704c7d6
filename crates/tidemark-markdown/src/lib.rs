//! Markdown parsing core: front matter, block segmentation, and the inline
//! leaf tokenizer, composed into one text → structure pipeline.
//!
//! Everything here is a pure function over in-memory text. Rendering lives
//! in `tidemark-render`; the filesystem and network belong to the I/O
//! crates.

pub mod block;
pub mod frontmatter;
pub mod inline;

pub use block::{Block, segment};
pub use frontmatter::{Metadata, split_front_matter};
pub use inline::{Leaf, parse_leafs};

/// Parses a complete document into its metadata and ordered block tree.
pub fn parse_document(source: &str) -> (Metadata, Vec<Block>) {
    let (metadata, body) = split_front_matter(source);
    (metadata, segment(&body))
}
