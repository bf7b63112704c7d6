/// Highlight categories, each rendered as a `ts-<class>` span class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Keyword,
    Keyword2,
    Type,
    StringLiteral,
    NumericLiteral,
    Call,
    Bracket,
    Comment,
}

impl Category {
    pub fn css_class(self) -> &'static str {
        match self {
            Category::Keyword => "keyword",
            Category::Keyword2 => "keyword2",
            Category::Type => "type",
            Category::StringLiteral => "string-literal",
            Category::NumericLiteral => "numeric-literal",
            Category::Call => "call",
            Category::Bracket => "bracket",
            Category::Comment => "comment",
        }
    }
}

/// Classification table keyed on tree-sitter node kinds.
///
/// A classified node is terminal for the walk: its children are never
/// descended into, so a `predefined_type` wins over the `string` token it
/// contains. Comments are deliberately absent — comment ranges come from
/// the raw-text scans, not the tree.
pub fn classify_kind(kind: &str) -> Option<Category> {
    Some(match kind {
        // keyword
        "const" | "false" | "interface" | "let" | "null" | "of" | "true" | "type" | "undefined"
        | "var" => Category::Keyword,
        // keyword2
        "as" | "await" | "export" | "for" | "from" | "if" | "import" => Category::Keyword2,
        // type positions: declared names, references, primitives
        "type_identifier" | "predefined_type" => Category::Type,
        // literals
        "string" => Category::StringLiteral,
        "number" => Category::NumericLiteral,
        // template string pieces (substitution delimiters are handled by
        // the walk before this table sees them)
        "string_fragment" | "`" => Category::StringLiteral,
        // brackets
        "(" | ")" | "[" | "]" | "{" | "}" => Category::Bracket,
        _ => return None,
    })
}
