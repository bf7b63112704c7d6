use crate::SiteError;
use tidemark_markdown::parse_document;
use tidemark_render::render_blocks;

/// Literal marker in the HTML shell that rendered posts replace.
pub const MAIN_SLOT: &str = "<main></main>";

/// Runs a post's markdown through the full pipeline and splices the
/// result into the shell template.
///
/// The rest of the shell comes through byte-identical; a post whose code
/// fails to highlight propagates the error so the caller can decide what
/// to serve instead.
pub fn render_page(template: &str, markdown: &str) -> Result<String, SiteError> {
    let (_metadata, blocks) = parse_document(markdown);
    let article = render_blocks(&blocks)?;
    Ok(template.replace(MAIN_SLOT, &format!("<main>{article}</main>")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHELL: &str = "<html><body><main></main><footer>f</footer></body></html>";

    #[test]
    fn article_lands_between_main_tags() {
        let page = render_page(SHELL, "# Hi").unwrap();
        assert!(page.contains("<main><h1> Hi</h1>"));
        assert!(page.contains("</main><footer>f</footer>"));
    }

    #[test]
    fn shell_outside_the_slot_is_untouched() {
        let page = render_page(SHELL, "plain").unwrap();
        let start = page.find("<main>").unwrap();
        let end = page.find("</main>").unwrap() + "</main>".len();
        let mut outside = String::new();
        outside.push_str(&page[..start]);
        outside.push_str(MAIN_SLOT);
        outside.push_str(&page[end..]);
        assert_eq!(outside, SHELL);
    }

    #[test]
    fn shell_without_slot_passes_through() {
        let page = render_page("<html>no slot</html>", "# x").unwrap();
        assert_eq!(page, "<html>no slot</html>");
    }

    #[test]
    fn broken_highlight_propagates() {
        let result = render_page(SHELL, "```ts\nconst = ;\n```");
        assert!(matches!(result, Err(SiteError::Render(_))));
    }
}
