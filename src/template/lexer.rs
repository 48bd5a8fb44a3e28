// template/lexer.rs

//! # Template Lexer Module
//!
//! Extracts `{{ ... }}` directives from raw template text and turns the
//! template into a flat stream of typed tokens.
//!
//! Tag extraction is positional: every `{{` and every `}}` is recorded in
//! discovery order, and the i-th opening is paired with the i-th closing.
//! Pairing is not brace-depth aware, so `{{a {{b}}` yields a single directive
//! spanning both openings.

use std::fmt;
use std::ops::Range;

/// The role a directive plays in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `{{name}}`
    Variable,
    /// `{{#if name}}`
    IfOpen,
    /// `{{/if}}`
    IfClose,
    /// `{{#each name}}`
    EachOpen,
    /// `{{/each}}`
    EachClose,
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DirectiveKind::Variable => "variable",
            DirectiveKind::IfOpen => "if-open",
            DirectiveKind::IfClose => "if-close",
            DirectiveKind::EachOpen => "each-open",
            DirectiveKind::EachClose => "each-close",
        };
        f.pad(label)
    }
}

/// A directive exactly as captured from the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Raw text including the surrounding braces.
    pub raw: String,
    /// Byte range of `raw` in the source text.
    pub span: Range<usize>,
    pub kind: DirectiveKind,
    /// Identifier after `#if`/`#each`, or the whole normalized text otherwise.
    pub name: String,
}

impl Directive {
    /// Builds a directive from its raw text, classifying it by the normalized
    /// form (all braces and spaces removed).
    pub fn new(raw: &str, span: Range<usize>) -> Self {
        let normalized = normalize(raw);

        let (kind, name) = if let Some(rest) = normalized.strip_prefix("#if") {
            (DirectiveKind::IfOpen, rest.to_string())
        } else if let Some(rest) = normalized.strip_prefix("#each") {
            (DirectiveKind::EachOpen, rest.to_string())
        } else if normalized.starts_with("/if") {
            (DirectiveKind::IfClose, normalized)
        } else if normalized.starts_with("/each") {
            (DirectiveKind::EachClose, normalized)
        } else {
            (DirectiveKind::Variable, normalized)
        };

        Self {
            raw: raw.to_string(),
            span,
            kind,
            name,
        }
    }
}

/// A piece of the template: either literal text or a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    Tag(Directive),
}

/// Strips every `{`, `}` and space from a directive's raw text.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '{' | '}' | ' ')).collect()
}

/// Extracts all directives from `text`, in source order.
///
/// Unmatched trailing openings are dropped, as is any pair whose closing
/// braces would run past the end of the text or whose closing braces come
/// before its opening braces.
pub fn extract_directives(text: &str) -> Vec<Directive> {
    let bytes = text.as_bytes();
    let mut openings = Vec::new();
    let mut closings = Vec::new();

    for (index, pair) in bytes.windows(2).enumerate() {
        match pair {
            [b'{', b'{'] => openings.push(index),
            [b'}', b'}'] => closings.push(index),
            _ => {}
        }
    }

    openings
        .into_iter()
        .zip(closings)
        .filter_map(|(start, end)| {
            let stop = end + 2;
            if end < start || stop > bytes.len() {
                return None;
            }
            // Braces are ASCII, so both ends sit on char boundaries.
            Some(Directive::new(&text[start..stop], start..stop))
        })
        .collect()
}

/// Splits `text` into literal text and directive tokens.
///
/// A directive overlapping one already emitted (possible with runs of three
/// or more braces) is skipped; its bytes are already covered.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for directive in extract_directives(text) {
        if directive.span.start < cursor {
            log::trace!("Skipping overlapping directive {:?}", directive.raw);
            continue;
        }
        if directive.span.start > cursor {
            tokens.push(Token::Text(text[cursor..directive.span.start].to_string()));
        }
        cursor = directive.span.end;
        tokens.push(Token::Tag(directive));
    }

    if cursor < text.len() {
        tokens.push(Token::Text(text[cursor..].to_string()));
    }

    tokens
}
