//! Name normalization and matcher patterns for keywords and variables.
//!
//! Robot Framework compares names case-insensitively and treats spaces and
//! underscores loosely. These helpers turn declared names into regex sources
//! that encode those rules, so a declaration can be tested against any
//! invocation text with a single `is_match`.

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::parser::variables::{VARIABLE_SIGILS, variable_ranges};

fn is_name_blank(c: char) -> bool {
    c.is_whitespace() || c == '_'
}

/// Turn a function-style name into keyword form.
///
/// `go_to_page` becomes `go to page` and `goToPage` becomes `go To Page`.
/// Text that is not a single identifier (anything with spaces, dots, or
/// variables) comes back trimmed but otherwise unchanged.
pub fn function_to_keyword(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() || !name.chars().all(unicode_ident::is_xid_continue) {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c == '_' {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
        } else {
            let boundary = c.is_uppercase()
                && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
            if boundary && !out.ends_with(' ') {
                out.push(' ');
            }
            out.push(c);
        }
        prev = Some(c);
    }
    out.trim_end().to_string()
}

/// Python function name for keyword text: `Go To Page` becomes `go_to_page`.
pub fn keyword_to_function(text: &str) -> String {
    normalize_keyword_name(text).replace(' ', "_")
}

/// Identity key of a keyword name: lowercase, blank runs collapsed to one space.
pub fn normalize_keyword_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split(is_name_blank).filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

/// Escape literal text, making every blank run match any blank run.
fn push_keyword_literal(out: &mut String, literal: &str) {
    let mut in_blank = false;
    for c in literal.chars() {
        if is_name_blank(c) {
            if !in_blank {
                out.push_str(r"[\s_]+");
                in_blank = true;
            }
        } else {
            out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
            in_blank = false;
        }
    }
}

/// Regex source matching invocations of keyword `name`, optionally qualified
/// as `namespace.name`. Embedded arguments (`Open ${page} Page`) match any text.
pub fn keyword_pattern(namespace: Option<&str>, name: &str) -> String {
    let mut body = String::new();
    let mut last = 0;
    for range in variable_ranges(name) {
        let start = usize::from(range.start());
        push_keyword_literal(&mut body, &name[last..start]);
        body.push_str(".*?");
        last = usize::from(range.end());
    }
    push_keyword_literal(&mut body, &name[last..]);

    match namespace.filter(|ns| !ns.is_empty()) {
        Some(ns) => format!(r"^(?:{}\.)?{}$", regex::escape(ns), body),
        None => format!("^{}$", body),
    }
}

/// Name between the delimiters of a `${name}` declaration.
pub fn variable_name(text: &str) -> &str {
    let bytes = text.as_bytes();
    let wrapped = bytes.len() >= 3
        && VARIABLE_SIGILS.contains(&bytes[0])
        && bytes[1] == b'{'
        && text.ends_with('}');
    if wrapped { &text[2..text.len() - 1] } else { text }
}

fn push_variable_literal(out: &mut String, literal: &str) {
    for c in literal.chars().filter(|c| !is_name_blank(*c)) {
        out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        out.push_str(r"[\s_]*");
    }
}

/// Regex source matching usages of the variable declared as `text`.
///
/// Any sigil is accepted, blanks inside the name are insignificant, and
/// item (`${x}[0]`) or attribute (`${x.attr}`) access still refers to `${x}`.
/// Variables nested inside the declared name match any text.
pub fn variable_pattern(text: &str) -> String {
    let name = variable_name(text);
    let mut body = String::from(r"[\s_]*");
    let mut last = 0;
    for range in variable_ranges(name) {
        let start = usize::from(range.start());
        push_variable_literal(&mut body, &name[last..start]);
        body.push_str(".*?");
        last = usize::from(range.end());
    }
    push_variable_literal(&mut body, &name[last..]);
    format!(r"^[$@&%]\{{{}(?:[.\[].*)?\}}(?:\[.*\])*$", body)
}

/// Compile a pattern case-insensitively. Logs and yields `None` on failure.
pub fn compile_pattern(pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(err) => {
            warn!(pattern, %err, "failed to compile name pattern");
            None
        }
    }
}
