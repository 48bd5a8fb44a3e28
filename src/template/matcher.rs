// template/matcher.rs

//! # Block Matcher Module
//!
//! Pairs block openings (`{{#if}}`, `{{#each}}`) with their closing tags.
//! [`match_closers`] builds the whole table in a single pass over the token
//! stream; [`closing_offset`] and [`closer_index`] answer the same question
//! for one opening. Matching works on indices into an immutable token slice;
//! nothing is removed from the stream.

use super::lexer::{DirectiveKind, Token};

/// Opening/closing kinds of one block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockKind {
    pub open: DirectiveKind,
    pub close: DirectiveKind,
}

pub const IF_BLOCK: BlockKind = BlockKind {
    open: DirectiveKind::IfOpen,
    close: DirectiveKind::IfClose,
};

pub const EACH_BLOCK: BlockKind = BlockKind {
    open: DirectiveKind::EachOpen,
    close: DirectiveKind::EachClose,
};

fn kind_of(token: &Token) -> Option<DirectiveKind> {
    match token {
        Token::Tag(directive) => Some(directive.kind),
        Token::Text(_) => None,
    }
}

/// Offset, among the closers of `block` that follow `head`, of the closer
/// that belongs to the block opened at `head`.
///
/// Openings of the same kind seen after the head push their closers further
/// out; tags of the other block kind are ignored entirely. If the walk runs
/// off the end, the number of closers already skipped is returned, which
/// then names a closer that does not exist.
pub fn closing_offset(tokens: &[Token], head: usize, block: BlockKind) -> usize {
    let mut offset = 0;
    let mut start = 0;
    let mut end = 0;

    for token in tokens.iter().skip(head + 1) {
        let Some(kind) = kind_of(token) else {
            continue;
        };

        if kind == block.open {
            start += 1;
            continue;
        }

        if kind == block.close {
            if start == end {
                return offset;
            }
            end += 1;
            offset += 1;
        }
    }

    offset
}

/// Index of the `offset`-th (0-based) closer of `block` at or after `from`.
pub fn closer_index(tokens: &[Token], from: usize, block: BlockKind, offset: usize) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(from)
        .filter(|(_, token)| kind_of(token) == Some(block.close))
        .nth(offset)
        .map(|(index, _)| index)
}

/// Closing-tag index for every block opening in `tokens`, in one pass.
///
/// Conditionals are depth matched with a stack of open `{{#if}}` indices,
/// which pairs each opening with the same closer [`closing_offset`] and
/// [`closer_index`] would find. Iteration blocks always take the very next
/// `{{/each}}`, so an `{{#each}}` nested directly inside another closes the
/// outer one. Entries for non-openings, and openings without a closer, are
/// `None`.
pub fn match_closers(tokens: &[Token]) -> Vec<Option<usize>> {
    let mut closers = vec![None; tokens.len()];
    let mut open_ifs = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match kind_of(token) {
            Some(DirectiveKind::IfOpen) => open_ifs.push(index),
            Some(DirectiveKind::IfClose) => {
                if let Some(open) = open_ifs.pop() {
                    closers[open] = Some(index);
                }
            }
            _ => {}
        }
    }

    let mut next_each_close = None;
    for (index, token) in tokens.iter().enumerate().rev() {
        match kind_of(token) {
            Some(DirectiveKind::EachClose) => next_each_close = Some(index),
            Some(DirectiveKind::EachOpen) => closers[index] = next_each_close,
            _ => {}
        }
    }

    closers
}
