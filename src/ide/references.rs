//! Find-references for keywords.

use super::text_utils::cell_at;
use crate::base::{FileId, LineCol, TextRange, TextSize};
use crate::hir::{DefinedKeyword, FileScope, ImportContext, RobotFile, SymbolLocation, Workspace};
use crate::parser::{AstNode, SyntaxKind};

/// A reference to a keyword.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub file: FileId,
    pub range: TextRange,
    pub start: LineCol,
    pub end: LineCol,
    /// Whether this is the declaration rather than an invocation.
    pub is_definition: bool,
}

impl Reference {
    fn new(file: &RobotFile, range: TextRange, is_definition: bool) -> Self {
        let (start, end) = file.syntax().line_index().range_to_line_cols(range);
        Self {
            file: file.id(),
            range,
            start,
            end,
            is_definition,
        }
    }
}

/// Result of a find-references request.
#[derive(Clone, Debug, Default)]
pub struct ReferenceResult {
    /// The keyword the references point to.
    pub definition: Option<DefinedKeyword>,
    pub references: Vec<Reference>,
}

impl ReferenceResult {
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }
}

/// The keyword declared or invoked at `offset`.
fn keyword_at(workspace: &Workspace, file: &RobotFile, offset: TextSize) -> Option<DefinedKeyword> {
    let root = file.syntax().source_file()?;
    let cell = cell_at(root.syntax(), offset)?;
    match cell.kind() {
        SyntaxKind::DEF_NAME => {
            let location = SymbolLocation::File {
                file: file.id(),
                range: cell.range(),
            };
            file.defined_keywords()
                .into_iter()
                .find(|keyword| *keyword.location() == location)
        }
        SyntaxKind::KEYWORD_CALL => FileScope::new(workspace, file).resolve_keyword(&cell.text()),
        _ => None,
    }
}

/// Every invocation of the keyword at `offset`, across the whole workspace.
pub fn find_keyword_references(
    workspace: &Workspace,
    file: FileId,
    offset: TextSize,
    include_declaration: bool,
) -> ReferenceResult {
    let Some(definition) = workspace
        .file(file)
        .and_then(|robot_file| keyword_at(workspace, robot_file, offset))
    else {
        return ReferenceResult::default();
    };

    let mut references = Vec::new();
    if include_declaration {
        if let SymbolLocation::File { file, range } = definition.location() {
            if let Some(owner) = workspace.file(*file) {
                references.push(Reference::new(owner, *range, true));
            }
        }
    }
    for robot_file in workspace.files() {
        for invocation in robot_file.keyword_references(workspace, Some(&definition)) {
            references.push(Reference::new(robot_file, invocation.range, false));
        }
    }
    tracing::debug!(keyword = definition.name(), count = references.len(), "found keyword references");

    ReferenceResult {
        definition: Some(definition),
        references,
    }
}
