//! Diagnostics for robot documents.
//!
//! Two sources feed this module: syntax errors collected by the parser, and
//! the unused-import check, which flags `Resource` imports that no keyword
//! invocation or variable usage in the importing document resolves into.

use std::sync::Arc;

use super::file::{ImportDecl, RobotFile};
use super::imports::{ImportContext, resolve_import};
use super::symbols::ImportType;
use crate::base::{FileId, LineIndex, TextRange};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: FileId,
    /// Start line (0-indexed).
    pub start_line: u32,
    /// Start column (0-indexed).
    pub start_col: u32,
    /// End line (0-indexed).
    pub end_line: u32,
    /// End column (0-indexed).
    pub end_col: u32,
    /// Byte range the line/column pairs were computed from.
    pub range: TextRange,
    pub severity: Severity,
    /// Error/warning code (e.g., "W0001").
    pub code: Option<Arc<str>>,
    pub message: Arc<str>,
}

impl Diagnostic {
    fn new(
        file: FileId,
        line_index: &LineIndex,
        range: TextRange,
        severity: Severity,
        message: impl Into<Arc<str>>,
    ) -> Self {
        let (start, end) = line_index.range_to_line_cols(range);
        Self {
            file,
            start_line: start.line,
            start_col: start.col,
            end_line: end.line,
            end_col: end.col,
            range,
            severity,
            code: None,
            message: message.into(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(
        file: FileId,
        line_index: &LineIndex,
        range: TextRange,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self::new(file, line_index, range, Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(
        file: FileId,
        line_index: &LineIndex,
        range: TextRange,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self::new(file, line_index, range, Severity::Warning, message)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
///
/// - **E0001-E0099**: errors
/// - **W0001-W0099**: warnings
pub mod codes {
    /// Malformed document structure.
    pub const SYNTAX_ERROR: &str = "E0001";

    /// Resource import nothing in the document uses.
    pub const UNUSED_IMPORT: &str = "W0001";
}

/// Message attached to unused imports.
pub const UNUSED_IMPORT_MESSAGE: &str = "Import not used";

// ============================================================================
// CHECKS
// ============================================================================

/// Parser errors of `file` as diagnostics.
pub fn syntax_diagnostics(file: &RobotFile) -> Vec<Diagnostic> {
    let line_index = file.syntax().line_index();
    file.syntax()
        .errors()
        .iter()
        .map(|error| {
            Diagnostic::error(file.id(), line_index, error.range, error.message.as_str())
                .with_code(codes::SYNTAX_ERROR)
        })
        .collect()
}

/// Whether `import` of `file` is a resource import nothing in `file` uses.
///
/// Library and variable-file imports are never reported, nor is a resource
/// import whose target cannot be resolved.
pub fn is_import_unused(ctx: &dyn ImportContext, file: &RobotFile, import: &ImportDecl) -> bool {
    if import.import_type != ImportType::Resource {
        return false;
    }
    let Some(target) = resolve_import(ctx, file.id(), import).and_then(|f| f.file_id()) else {
        return false;
    };
    !file
        .files_from_invoked_keywords_and_variables(ctx)
        .contains(&target)
}

/// One warning per unused resource import, on the import's first argument.
pub fn unused_imports(ctx: &dyn ImportContext, file: &RobotFile) -> Vec<Diagnostic> {
    let imports: Vec<_> = file
        .imports()
        .into_iter()
        .filter(|import| import.import_type == ImportType::Resource)
        .collect();
    if imports.is_empty() {
        return Vec::new();
    }

    let used = file.files_from_invoked_keywords_and_variables(ctx);
    let line_index = file.syntax().line_index();
    imports
        .iter()
        .filter(|import| {
            resolve_import(ctx, file.id(), import)
                .and_then(|target| target.file_id())
                .is_some_and(|target| !used.contains(&target))
        })
        .map(|import| {
            Diagnostic::warning(file.id(), line_index, import.range, UNUSED_IMPORT_MESSAGE)
                .with_code(codes::UNUSED_IMPORT)
        })
        .collect()
}

/// Every diagnostic for `file`: syntax errors first, then unused imports.
pub fn file_diagnostics(ctx: &dyn ImportContext, file: &RobotFile) -> Vec<Diagnostic> {
    let mut diagnostics = syntax_diagnostics(file);
    diagnostics.extend(unused_imports(ctx, file));
    diagnostics
}
