//! Variable token scanning inside cells.
//!
//! Variables are not tokens of their own: a cell like `Hello ${name}!` is a
//! single WORD run. These helpers find the `${...}`, `@{...}`, `&{...}` and
//! `%{...}` occurrences in cell text, honouring nesting (`${a${b}}`).

use rowan::{TextRange, TextSize};

/// Sigils that open a variable when followed by `{`.
pub const VARIABLE_SIGILS: &[u8] = b"$@&%";

/// Ranges of the outermost variable tokens in `text`, relative to its start.
pub fn variable_ranges(text: &str) -> Vec<TextRange> {
    let bytes = text.as_bytes();
    let mut ranges = Vec::new();
    let mut i = 0;
    while i + 1 < bytes.len() {
        let escaped = i > 0 && bytes[i - 1] == b'\\';
        if VARIABLE_SIGILS.contains(&bytes[i]) && bytes[i + 1] == b'{' && !escaped {
            if let Some(end) = matching_brace(bytes, i + 1) {
                ranges.push(TextRange::new(
                    TextSize::from(i as u32),
                    TextSize::from((end + 1) as u32),
                ));
                i = end + 1;
                continue;
            }
        }
        i += 1;
    }
    ranges
}

/// Index of the `}` closing the `{` at `open`.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strip the assignment mark from `${x} =` / `${x}=`.
pub fn strip_assignment(text: &str) -> &str {
    text.trim_end().trim_end_matches('=').trim_end()
}

/// True when the whole cell is one variable, optionally followed by `=`.
pub fn is_variable_cell(text: &str) -> bool {
    let text = strip_assignment(text);
    match variable_ranges(text).as_slice() {
        [range] => range.start() == TextSize::from(0) && range.end() == TextSize::of(text),
        _ => false,
    }
}
