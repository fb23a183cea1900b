//! Salsa database definition and queries.

use std::sync::Arc;

use crate::base::FileId;
use crate::parser::keywords::HeadingKind;
use crate::syntax::SyntaxFile;

use super::file::RobotFile;

// ============================================================================
// INPUTS
// ============================================================================

/// Input: The raw text content of a file.
///
/// Set this explicitly when a file is opened or changed.
#[salsa::input]
pub struct FileText {
    pub file: FileId,
    #[return_ref]
    pub text: String,
}

// ============================================================================
// DATABASE
// ============================================================================

/// The root Salsa database.
///
/// Memoizes parsing and per-file outlines. Queries are invalidated when
/// their `FileText` input changes.
#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {
    fn salsa_event(&self, _event: &dyn Fn() -> salsa::Event) {}
}

impl RootDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// PARSE RESULT
// ============================================================================

/// Parsed document plus its error messages.
///
/// Robot documents always produce a tree, so there is no failure variant.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseResult {
    pub syntax_file: Arc<SyntaxFile>,
    pub errors: Vec<String>,
}

// Manual Eq impl for Salsa tracking
impl Eq for ParseResult {}

impl ParseResult {
    pub fn new(syntax_file: SyntaxFile) -> Self {
        let errors = syntax_file
            .errors()
            .iter()
            .map(|e| e.message.clone())
            .collect();
        Self {
            syntax_file: Arc::new(syntax_file),
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Sections and names a document declares, independent of its imports.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileOutline {
    pub headings: Vec<HeadingKind>,
    pub keywords: Vec<String>,
    pub variables: Vec<String>,
}

// ============================================================================
// TRACKED QUERIES
// ============================================================================

/// Parse a file.
///
/// Memoized; recomputed only when the `FileText` input changes.
#[salsa::tracked]
pub fn parse_file(db: &dyn salsa::Database, file_text: FileText) -> ParseResult {
    ParseResult::new(SyntaxFile::new(file_text.text(db)))
}

/// Outline of a file's own declarations, built on top of [`parse_file`].
#[salsa::tracked]
pub fn file_outline(db: &dyn salsa::Database, file_text: FileText) -> FileOutline {
    let syntax_file = parse_file(db, file_text).syntax_file;
    let file = RobotFile::from_syntax(file_text.file(db), (*syntax_file).clone());
    FileOutline {
        headings: file.headings().iter().map(|heading| heading.kind).collect(),
        keywords: file
            .defined_keywords()
            .iter()
            .map(|keyword| keyword.name().to_string())
            .collect(),
        variables: file
            .own_defined_variables()
            .iter()
            .map(|variable| variable.text().to_string())
            .collect(),
    }
}
