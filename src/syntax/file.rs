//! Syntax file wrapper for parsed Robot Framework files.
//!
//! Bundles the rowan parse result with a line index and a version stamp.
//! The stamp changes on every text replacement; caches built from the tree
//! record the stamp they were computed at and are dropped when it moves.

use crate::base::LineIndex;
use crate::parser::{AstNode, Parse, SourceFile, SyntaxError, parse};

/// A parsed Robot Framework document.
#[derive(Debug, Clone)]
pub struct SyntaxFile {
    /// The underlying rowan parse result
    parse: Parse,
    line_index: LineIndex,
    version: u64,
}

// Two SyntaxFiles are equal if they describe the same tree at the same version.
impl PartialEq for SyntaxFile {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && self.parse == other.parse
    }
}

impl Eq for SyntaxFile {}

impl SyntaxFile {
    /// Parse `source` as version 0.
    pub fn new(source: &str) -> Self {
        Self {
            parse: parse(source),
            line_index: LineIndex::new(source),
            version: 0,
        }
    }

    /// Replace the text, reparsing and bumping the version.
    pub fn set_text(&mut self, source: &str) {
        self.parse = parse(source);
        self.line_index = LineIndex::new(source);
        self.version += 1;
    }

    /// Get the underlying parse result
    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    /// Get the root source file AST node
    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.parse.syntax())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Check if parsing had errors
    pub fn has_errors(&self) -> bool {
        !self.parse.errors.is_empty()
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    /// Get the source text of the file
    pub fn source_text(&self) -> String {
        self.parse.syntax().text().to_string()
    }
}
