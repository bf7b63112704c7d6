use regex::Regex;
use std::sync::OnceLock;

/// An inline (within-paragraph) markdown construct.
///
/// Styled variants own their children; a leaf tree belongs to exactly one
/// paragraph block and never shares nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    /// Plain text between (or inside) styled spans.
    Text { value: String },
    /// `**bold**`
    Bold { value: Vec<Leaf> },
    /// `*italic*`
    Italic { value: Vec<Leaf> },
    /// `` `code` `` — a raw zone, nothing nests inside.
    Code { value: Vec<Leaf> },
    /// `[text](url)` — the label is parsed for styles, never for more links.
    Link { href: String, value: Vec<Leaf> },
    /// `![alt](url)` — no children.
    Img { src: String, alt: String },
}

/// Inline style spans that wrap child leafs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Bold,
    Italic,
    Code,
}

impl Style {
    const fn marker(self) -> &'static str {
        match self {
            Style::Bold => "**",
            Style::Italic => "*",
            Style::Code => "`",
        }
    }

    fn wrap(self, value: Vec<Leaf>) -> Leaf {
        match self {
            Style::Bold => Leaf::Bold { value },
            Style::Italic => Leaf::Italic { value },
            Style::Code => Leaf::Code { value },
        }
    }
}

/// A token that can open (or close) an inline construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Style(Style),
    Image,
    Link,
}

impl Token {
    const fn marker(self) -> &'static str {
        match self {
            Token::Style(style) => style.marker(),
            Token::Image => "![",
            Token::Link => "[",
        }
    }
}

/// The span a scanner is currently inside, deciding which tokens are active
/// and which token closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    /// Top level. Never closes, only ends at end of input.
    Document,
    Style(Style),
    /// A link label. Styles apply, brackets do not; never closes (the label
    /// text is cut out by the anchored pattern before parsing).
    Label,
}

const ALL_TOKENS: [Token; 5] = [
    Token::Style(Style::Bold),
    Token::Style(Style::Italic),
    Token::Style(Style::Code),
    Token::Image,
    Token::Link,
];

const LABEL_TOKENS: [Token; 3] = [
    Token::Style(Style::Bold),
    Token::Style(Style::Italic),
    Token::Style(Style::Code),
];

const CODE_TOKENS: [Token; 1] = [Token::Style(Style::Code)];

impl SpanKind {
    fn active_tokens(self) -> &'static [Token] {
        match self {
            SpanKind::Style(Style::Code) => &CODE_TOKENS,
            SpanKind::Label => &LABEL_TOKENS,
            _ => &ALL_TOKENS,
        }
    }

    fn closer(self) -> Option<Token> {
        match self {
            SpanKind::Style(style) => Some(Token::Style(style)),
            SpanKind::Document | SpanKind::Label => None,
        }
    }
}

/// Parses inline text into a sequence of [`Leaf`]s.
///
/// Returns the leafs plus any unconsumed remainder. The top level never
/// closes, so the remainder is empty unless a caller-visible invariant is
/// broken upstream; callers append it as trailing plain text.
pub fn parse_leafs(source: &str) -> (Vec<Leaf>, String) {
    let (leafs, rest, _closed) = parse_span(source, SpanKind::Document);
    (leafs, rest.to_string())
}

/// Recursive scanner for one enclosing span.
///
/// The `bool` reports whether the span's closing marker was actually seen.
/// An unterminated span degrades at the call site: its opener becomes
/// literal text and its children splice in unwrapped.
fn parse_span(source: &str, kind: SpanKind) -> (Vec<Leaf>, &str, bool) {
    let mut leafs: Vec<Leaf> = Vec::new();
    let mut rest = source;

    loop {
        let found = find_token(rest, kind.active_tokens());
        push_text(&mut leafs, found.pre);

        let Some(token) = found.token else {
            return (leafs, "", false);
        };

        if Some(token) == kind.closer() {
            return (leafs, found.rest, true);
        }

        match token {
            Token::Style(style) => {
                let (inner, after, closed) = parse_span(found.rest, SpanKind::Style(style));
                if closed {
                    leafs.push(style.wrap(inner));
                } else {
                    push_text(&mut leafs, style.marker().to_string());
                    splice(&mut leafs, inner);
                }
                rest = after;
            }
            Token::Image => match match_link(found.rest) {
                Some(m) => {
                    leafs.push(Leaf::Img {
                        src: m.url.to_string(),
                        alt: m.label.to_string(),
                    });
                    rest = m.rest;
                }
                None => {
                    push_text(&mut leafs, Token::Image.marker().to_string());
                    rest = found.rest;
                }
            },
            Token::Link => match match_link(found.rest) {
                Some(m) => {
                    let (value, _, _) = parse_span(m.label, SpanKind::Label);
                    leafs.push(Leaf::Link {
                        href: m.url.to_string(),
                        value,
                    });
                    rest = m.rest;
                }
                None => {
                    push_text(&mut leafs, Token::Link.marker().to_string());
                    rest = found.rest;
                }
            },
        }
    }
}

struct Found<'a> {
    pre: String,
    token: Option<Token>,
    rest: &'a str,
}

/// Scans for the earliest active token, resolving backslash escapes into the
/// literal text collected along the way. On a position tie the longest
/// marker wins, so `**` beats `*`.
fn find_token<'a>(text: &'a str, active: &[Token]) -> Found<'a> {
    let mut pre = String::new();
    let mut i = 0;

    while i < text.len() {
        if text.as_bytes()[i] == b'\\' && i + 1 < text.len() {
            let next = &text[i + 1..];
            if let Some(c) = next.chars().next() {
                pre.push(c);
                i += 1 + c.len_utf8();
                continue;
            }
        }

        let hit = active
            .iter()
            .copied()
            .filter(|t| text[i..].starts_with(t.marker()))
            .max_by_key(|t| t.marker().len());
        if let Some(token) = hit {
            return Found {
                pre,
                token: Some(token),
                rest: &text[i + token.marker().len()..],
            };
        }

        if let Some(c) = text[i..].chars().next() {
            pre.push(c);
            i += c.len_utf8();
        }
    }

    Found {
        pre,
        token: None,
        rest: "",
    }
}

struct LinkMatch<'a> {
    label: &'a str,
    url: &'a str,
    rest: &'a str,
}

/// Anchored `text](url)` match immediately after an opening bracket token.
/// The URL must carry a scheme and a domain separator; anything else means
/// the bracket was ordinary text.
fn match_link(after_bracket: &str) -> Option<LinkMatch<'_>> {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    let link_regex = LINK_REGEX.get_or_init(|| {
        Regex::new(r"^([^\]]*)\]\((https?://[^)]+\.[^)]+)\)").expect("Invalid link regex")
    });

    let caps = link_regex.captures(after_bracket)?;
    let all = caps.get(0)?;
    let label = caps.get(1)?.as_str();
    let url = caps.get(2)?.as_str();

    Some(LinkMatch {
        label,
        url,
        rest: &after_bracket[all.end()..],
    })
}

/// Appends literal text, merging with a trailing text leaf so degraded
/// markers and their following text come out as one leaf.
fn push_text(leafs: &mut Vec<Leaf>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Leaf::Text { value }) = leafs.last_mut() {
        value.push_str(&text);
        return;
    }
    leafs.push(Leaf::Text { value: text });
}

fn splice(leafs: &mut Vec<Leaf>, inner: Vec<Leaf>) {
    for leaf in inner {
        match leaf {
            Leaf::Text { value } => push_text(leafs, value),
            other => leafs.push(other),
        }
    }
}
