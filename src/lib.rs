//! # robot-base
//!
//! Core library for Robot Framework analysis: parsing, the keyword and
//! variable symbol model, import resolution, and editor features.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → IDE features (completion, goto, references, run markers)
//!   ↓
//! hir       → Symbol model, import resolution, Salsa queries
//!   ↓
//! project   → Options, workspace loading
//!   ↓
//! syntax    → SyntaxFile (parse + line index + version stamp)
//!   ↓
//! parser    → Logos lexer, line-oriented parser, typed AST
//!   ↓
//! base      → Primitives (FileId, TextRange, LineIndex, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → project → hir → ide)
// ============================================================================

/// Foundation types: FileId, TextRange, LineIndex
pub mod base;

/// Parser: Logos lexer, rowan CST, typed AST wrappers
pub mod parser;

/// Syntax: parsed documents with version stamps
pub mod syntax;

/// High-level IR: keywords, variables, imports and resolution
pub mod hir;

/// IDE features: completion, goto-definition, find-references, run markers
pub mod ide;

/// Project management: options and workspace loading
pub mod project;

// Re-export commonly needed items
pub use parser::keywords;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};

pub use hir::{DefinedKeyword, DefinedVariable, Workspace};
pub use ide::{Analysis, AnalysisHost};
pub use project::{LoadError, RobotOptions, WorkspaceLoader};
pub use syntax::SyntaxFile;
