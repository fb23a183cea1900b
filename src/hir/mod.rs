//! High-level IR (HIR): the symbol model of robot documents.
//!
//! ## Key Types
//!
//! - [`RobotFile`] - A document with its cached per-section symbols
//! - [`DefinedKeyword`], [`DefinedVariable`] - Declarations with matchers
//! - [`KeywordFile`] - What an import resolves to (resource, library, variables)
//! - [`Workspace`] - All documents plus the shared project state
//! - [`RootDatabase`] - Salsa database for memoized parsing and outlines
//!
//! ## Query Layers
//!
//! ```text
//! RobotFile::headings()              ← per-section extraction (version-stamped)
//!     │
//!     ▼
//! imported_files(ctx, transitive)    ← import resolution with a cycle guard
//!     │
//!     ▼
//! defined_keywords / defined_variables
//!     │
//!     ▼
//! resolve_keyword / resolve_variable ← first match wins, own file first
//!     │
//!     ▼
//! unused_imports(ctx, file)          ← diagnostics
//! ```

mod builtins;
mod db;
mod diagnostics;
mod file;
mod imports;
mod library;
mod pattern;
mod resolve;
mod symbols;
mod workspace;

pub use builtins::{ProjectData, RESERVED_VARIABLES};
pub use db::{FileOutline, FileText, ParseResult, RootDatabase, file_outline, parse_file};
pub use diagnostics::{
    Diagnostic, Severity, UNUSED_IMPORT_MESSAGE, codes, file_diagnostics, is_import_unused,
    syntax_diagnostics, unused_imports,
};
pub use file::{
    HeadingData, ImportDecl, KeywordInvocation, RobotFile, TestCase, VariableUsage,
};
pub use imports::{ImportContext, KeywordFile, library_namespace, resolve_import};
pub use library::{InMemoryLibraries, LibraryProvider, NoLibraries, PyClass, PyMember, PyModule};
pub use pattern::{
    compile_pattern, function_to_keyword, keyword_pattern, keyword_to_function,
    normalize_keyword_name, variable_name, variable_pattern,
};
pub use resolve::{FileScope, resolve_keyword, resolve_variable};
pub use symbols::{
    DefinedKeyword, DefinedVariable, ImportType, SymbolLocation, VariableScope, Visibility,
};
pub use workspace::Workspace;
