// template/parser.rs

//! # Template Parser Module
//!
//! Lays the token stream out as a flat arena of nodes. A block node is
//! followed by its body nodes and then by a [`Node::Close`] holding the
//! closing tag; the block node stores the arena index of that `Close`.
//! Nothing in the arena nests, so neither parsing, rendering nor dropping
//! recurses with template depth.

use super::lexer::{Directive, DirectiveKind, Token};
use super::matcher::match_closers;

/// A node of the parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text copied to the output.
    Text(String),
    /// `{{name}}`, also used for closing tags that have no opener.
    Variable(Directive),
    /// A block opening whose closing tag could not be found. Emitted verbatim.
    Unmatched(Directive),
    /// `{{#if name}}`; the body runs up to the `Close` node at `close`.
    Conditional { open: Directive, close: usize },
    /// `{{#each name}}`; the body runs up to the `Close` node at `close`.
    Iteration { open: Directive, close: usize },
    /// Closing tag of the enclosing block.
    Close(Directive),
}

/// Parses a token slice into the node arena.
///
/// A block only takes its closer when the closer lies inside the block that
/// encloses it; otherwise the opening is [`Node::Unmatched`] and the closer
/// is resolved later as a stray tag.
pub fn parse(tokens: &[Token]) -> Vec<Node> {
    let closers = match_closers(tokens);
    let mut nodes = Vec::with_capacity(tokens.len());
    // (arena index of the block node, token index of its closer)
    let mut open_blocks: Vec<(usize, usize)> = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        let directive = match token {
            Token::Text(text) => {
                nodes.push(Node::Text(text.clone()));
                continue;
            }
            Token::Tag(directive) => directive,
        };

        if let Some(&(block, closer)) = open_blocks.last() {
            if closer == index {
                let close_at = nodes.len();
                nodes.push(Node::Close(directive.clone()));
                if let Node::Conditional { close, .. } | Node::Iteration { close, .. } =
                    &mut nodes[block]
                {
                    *close = close_at;
                }
                open_blocks.pop();
                continue;
            }
        }

        if !matches!(directive.kind, DirectiveKind::IfOpen | DirectiveKind::EachOpen) {
            nodes.push(Node::Variable(directive.clone()));
            continue;
        }

        let scope_end = open_blocks.last().map_or(tokens.len(), |&(_, closer)| closer);
        match closers[index] {
            Some(closer) if closer < scope_end => {
                open_blocks.push((nodes.len(), closer));
                let open = directive.clone();
                nodes.push(if directive.kind == DirectiveKind::IfOpen {
                    Node::Conditional { open, close: 0 }
                } else {
                    Node::Iteration { open, close: 0 }
                });
            }
            _ => {
                log::debug!("No closing tag found for {:?}, leaving it in place", directive.raw);
                nodes.push(Node::Unmatched(directive.clone()));
            }
        }
    }

    nodes
}
