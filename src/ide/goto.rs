//! Go-to-definition implementation.
//!
//! The cell under the cursor decides what is resolved:
//! a variable inside any cell, a keyword call, or the target of an import.

use std::sync::Arc;

use super::text_utils::{cell_at, variable_at};
use crate::base::{FileId, LineCol, TextRange, TextSize};
use crate::hir::{
    FileScope, ImportContext, KeywordFile, RobotFile, SymbolLocation, Workspace, resolve_import,
};
use crate::parser::{AstNode, SyntaxKind};

/// Result of a go-to-definition request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoResult {
    /// The targets to jump to.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Create a result with a single target.
    pub fn single(target: GotoTarget) -> Self {
        Self {
            targets: vec![target],
        }
    }

    /// Check if any targets were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GotoKind {
    Keyword,
    Variable,
    /// A robot document named by a `Resource` import.
    File,
    /// A library or variable file.
    Library,
}

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    pub kind: GotoKind,
    pub name: Arc<str>,
    pub location: SymbolLocation,
    /// Start and end position, for targets inside a robot document.
    pub span: Option<(LineCol, LineCol)>,
}

impl GotoTarget {
    fn new(workspace: &Workspace, kind: GotoKind, name: &str, location: SymbolLocation) -> Self {
        let span = match &location {
            SymbolLocation::File { file, range } => workspace
                .file(*file)
                .map(|target| target.syntax().line_index().range_to_line_cols(*range)),
            SymbolLocation::Library { .. } => None,
        };
        Self {
            kind,
            name: name.into(),
            location,
            span,
        }
    }

    /// The robot document to open, if the target lives in one.
    pub fn file(&self) -> Option<FileId> {
        self.location.file()
    }
}

/// Find the definition of whatever is under `offset` in `file`.
pub fn goto_definition(workspace: &Workspace, file: FileId, offset: TextSize) -> GotoResult {
    let Some(robot_file) = workspace.file(file) else {
        return GotoResult::empty();
    };
    let Some(root) = robot_file.syntax().source_file() else {
        return GotoResult::empty();
    };
    let Some(cell) = cell_at(root.syntax(), offset) else {
        return GotoResult::empty();
    };
    let cell_range = cell.range();
    let text = cell.text();
    let scope = FileScope::new(workspace, robot_file);

    if let Some(variable) = variable_at(&text, offset - cell_range.start()) {
        let usage = &text[variable];
        return match scope.resolve_variable(usage, offset) {
            Some(definition) => GotoResult::single(GotoTarget::new(
                workspace,
                GotoKind::Variable,
                definition.text(),
                definition.location().clone(),
            )),
            None => GotoResult::empty(),
        };
    }

    match cell.kind() {
        SyntaxKind::KEYWORD_CALL => match scope.resolve_keyword(&text) {
            Some(keyword) => GotoResult::single(GotoTarget::new(
                workspace,
                GotoKind::Keyword,
                keyword.name(),
                keyword.location().clone(),
            )),
            None => GotoResult::empty(),
        },
        SyntaxKind::ARGUMENT => goto_import_target(workspace, robot_file, cell_range),
        _ => GotoResult::empty(),
    }
}

fn goto_import_target(workspace: &Workspace, file: &RobotFile, range: TextRange) -> GotoResult {
    let Some(decl) = file.imports().into_iter().find(|decl| decl.range == range) else {
        return GotoResult::empty();
    };
    let target = match resolve_import(workspace, file.id(), &decl) {
        Some(KeywordFile::Robot(target)) => GotoTarget::new(
            workspace,
            GotoKind::File,
            &decl.target,
            SymbolLocation::File {
                file: target,
                range: TextRange::empty(TextSize::from(0)),
            },
        ),
        Some(KeywordFile::Library { class, .. }) => GotoTarget::new(
            workspace,
            GotoKind::Library,
            &decl.target,
            SymbolLocation::Library {
                library: class.qualified_name.clone(),
                member: Default::default(),
            },
        ),
        Some(KeywordFile::Variables(module)) => GotoTarget::new(
            workspace,
            GotoKind::Library,
            &decl.target,
            SymbolLocation::Library {
                library: module.qualified_name.clone(),
                member: Default::default(),
            },
        ),
        None => return GotoResult::empty(),
    };
    GotoResult::single(target)
}
