//! Cursor helpers shared by the IDE features.

use rowan::TokenAtOffset;

use crate::base::{TextRange, TextSize};
use crate::parser::variables::variable_ranges;
use crate::parser::{AstNode, Cell, SyntaxNode, SyntaxToken};

/// The cell under `offset`. A cursor right after a cell's last character
/// still counts as inside it.
pub fn cell_at(root: &SyntaxNode, offset: TextSize) -> Option<Cell> {
    let cell_of = |token: SyntaxToken| token.parent_ancestors().find_map(Cell::cast);
    match root.token_at_offset(offset) {
        TokenAtOffset::None => None,
        TokenAtOffset::Single(token) => cell_of(token),
        TokenAtOffset::Between(left, right) => cell_of(right).or_else(|| cell_of(left)),
    }
}

/// The innermost `${...}` of `text` containing `offset` (relative to `text`).
pub fn variable_at(text: &str, offset: TextSize) -> Option<TextRange> {
    let outer = variable_ranges(text)
        .into_iter()
        .find(|range| range.contains_inclusive(offset))?;

    // skip the sigil and braces and look for a nested variable
    let inner = TextRange::new(outer.start() + TextSize::from(2), outer.end() - TextSize::from(1));
    if inner.is_empty() || !inner.contains_inclusive(offset) {
        return Some(outer);
    }
    let nested = variable_at(&text[inner], offset - inner.start())
        .map(|range| range + inner.start());
    Some(nested.unwrap_or(outer))
}

/// Text typed so far in the cell ending at `offset`.
///
/// Cells are separated by two or more spaces or a tab, so the prefix is
/// everything after the last separator on the line.
pub fn typed_prefix(text: &str, offset: TextSize) -> &str {
    let mut end = usize::from(offset).min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let line_start = text[..end].rfind('\n').map_or(0, |idx| idx + 1);
    let line = &text[line_start..end];
    let cell_start = [
        line.rfind("  ").map(|idx| idx + 2),
        line.rfind('\t').map(|idx| idx + 1),
    ]
    .into_iter()
    .flatten()
    .max()
    .unwrap_or(0);
    line[cell_start..].trim_start()
}

/// Uppercase the first letter of every whitespace-separated word.
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}
