//! AnalysisHost and Analysis: the state owner and its read-only snapshots.
//!
//! The `AnalysisHost` owns the [`Workspace`] and is the single writer.
//! `Analysis` borrows it immutably, so every query made through one snapshot
//! sees the same documents.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.set_file_content("/p/suite.robot", "*** Test Cases ***\nT\n    Log    hi\n");
//!
//! let analysis = host.analysis();
//! let file = analysis.get_file_id("/p/suite.robot").unwrap();
//! let items = analysis.completions(file, 2, 4);
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::base::{FileId, LineCol, TextSize};
use crate::hir::{
    DefinedKeyword, DefinedVariable, Diagnostic, ImportContext, KeywordFile, LibraryProvider,
    RobotFile, Workspace, file_diagnostics, resolve_keyword, resolve_variable, unused_imports,
};
use crate::parser::SyntaxError;
use crate::project::RobotOptions;
use crate::syntax::SyntaxFile;

use super::{
    CompletionItem, GotoResult, ReferenceResult, RunMarker, completions, find_keyword_references,
    goto_definition, run_marker_at, run_markers,
};

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `set_file_content()` and `remove_file()`,
/// then get a consistent snapshot via `analysis()`.
#[derive(Default)]
pub struct AnalysisHost {
    workspace: Workspace,
}

impl AnalysisHost {
    /// Create a host without an embedded-language library provider.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_libraries(libraries: Arc<dyn LibraryProvider>) -> Self {
        Self {
            workspace: Workspace::with_libraries(libraries),
        }
    }

    /// Set the content of a file, parsing it and storing the result.
    ///
    /// Returns parse errors if any.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> Vec<SyntaxError> {
        let id = self.workspace.set_file_text(Path::new(path), content);
        self.workspace
            .file(id)
            .map(|file| file.syntax().errors().to_vec())
            .unwrap_or_default()
    }

    /// Store a document parsed elsewhere.
    pub fn insert_syntax(&mut self, path: &Path, file: SyntaxFile) -> FileId {
        self.workspace.insert_syntax(path, file)
    }

    /// Remove a file. Returns whether it was present.
    pub fn remove_file(&mut self, path: &str) -> bool {
        let removed = self.workspace.remove_file(Path::new(path));
        if removed {
            tracing::debug!(path, "removed file");
        }
        removed
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.workspace.has_file(Path::new(path))
    }

    /// Get the number of files loaded.
    pub fn file_count(&self) -> usize {
        self.workspace.file_count()
    }

    pub fn options(&self) -> &RobotOptions {
        self.workspace.options()
    }

    pub fn set_options(&mut self, options: RobotOptions) {
        self.workspace.set_options(options);
    }

    /// Read the options from a config file in `root`, defaults if there is none.
    pub fn load_config(&mut self, root: &Path) {
        self.set_options(RobotOptions::load(root));
    }

    /// Swap the library provider, dropping the cached built-ins.
    pub fn set_library_provider(&mut self, libraries: Arc<dyn LibraryProvider>) {
        self.workspace.set_libraries(libraries);
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            workspace: &self.workspace,
        }
    }

    /// Get the FileId for a path, if it exists.
    pub fn get_file_id(&self, path: &str) -> Option<FileId> {
        self.workspace.lookup(Path::new(path))
    }

    /// Get the path for a FileId, if it exists.
    pub fn get_file_path(&self, file_id: FileId) -> Option<&Path> {
        self.workspace.path(file_id)
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }
}

/// An immutable snapshot of the analysis state.
///
/// Positions are 0-indexed line/column pairs; a position outside the
/// document yields an empty answer.
#[derive(Clone, Copy)]
pub struct Analysis<'a> {
    workspace: &'a Workspace,
}

impl<'a> Analysis<'a> {
    fn file(&self, file_id: FileId) -> Option<&'a RobotFile> {
        self.workspace.file(file_id)
    }

    fn offset(&self, file_id: FileId, line: u32, col: u32) -> Option<TextSize> {
        self.file(file_id)?
            .syntax()
            .line_index()
            .offset(LineCol::new(line, col))
    }

    // ==================== Editor features ====================

    /// Get completions at a position.
    pub fn completions(&self, file_id: FileId, line: u32, col: u32) -> Vec<CompletionItem> {
        match self.offset(file_id, line, col) {
            Some(offset) => completions(self.workspace, file_id, offset),
            None => Vec::new(),
        }
    }

    /// Go to definition at a position.
    pub fn goto_definition(&self, file_id: FileId, line: u32, col: u32) -> GotoResult {
        match self.offset(file_id, line, col) {
            Some(offset) => goto_definition(self.workspace, file_id, offset),
            None => GotoResult::empty(),
        }
    }

    /// Find all invocations of the keyword at a position.
    pub fn find_references(
        &self,
        file_id: FileId,
        line: u32,
        col: u32,
        include_declaration: bool,
    ) -> ReferenceResult {
        match self.offset(file_id, line, col) {
            Some(offset) => {
                find_keyword_references(self.workspace, file_id, offset, include_declaration)
            }
            None => ReferenceResult::default(),
        }
    }

    pub fn run_markers(&self, file_id: FileId) -> Vec<RunMarker> {
        run_markers(self.workspace, file_id)
    }

    pub fn run_marker_at(&self, file_id: FileId, line: u32, col: u32) -> Option<RunMarker> {
        let offset = self.offset(file_id, line, col)?;
        run_marker_at(self.workspace, file_id, offset)
    }

    /// Syntax errors and unused imports of a file.
    pub fn diagnostics(&self, file_id: FileId) -> Vec<Diagnostic> {
        self.file(file_id)
            .map(|file| file_diagnostics(self.workspace, file))
            .unwrap_or_default()
    }

    pub fn unused_imports(&self, file_id: FileId) -> Vec<Diagnostic> {
        self.file(file_id)
            .map(|file| unused_imports(self.workspace, file))
            .unwrap_or_default()
    }

    // ==================== Symbol queries ====================

    /// Resolve keyword invocation `text` as if written in `file_id`.
    pub fn resolve_keyword(&self, file_id: FileId, text: &str) -> Option<DefinedKeyword> {
        resolve_keyword(self.workspace, self.file(file_id)?, text)
    }

    /// Resolve variable usage `text` as if written at a position of `file_id`.
    pub fn resolve_variable(
        &self,
        file_id: FileId,
        text: &str,
        line: u32,
        col: u32,
    ) -> Option<DefinedVariable> {
        let offset = self.offset(file_id, line, col)?;
        resolve_variable(self.workspace, self.file(file_id)?, text, offset)
    }

    /// Keywords declared in the file itself.
    pub fn defined_keywords(&self, file_id: FileId) -> Vec<DefinedKeyword> {
        self.file(file_id)
            .map(RobotFile::defined_keywords)
            .unwrap_or_default()
    }

    /// Variables visible from the file: its own, its imports' and the built-ins.
    pub fn defined_variables(&self, file_id: FileId) -> Vec<DefinedVariable> {
        self.file(file_id)
            .map(|file| file.defined_variables(self.workspace))
            .unwrap_or_default()
    }

    /// Imported files, transitively when the options allow it.
    pub fn imported_files(&self, file_id: FileId) -> Vec<KeywordFile> {
        let transitive = self.workspace.options().allow_transitive_imports;
        self.file(file_id)
            .map(|file| file.imported_files(self.workspace, transitive))
            .unwrap_or_default()
    }

    // ==================== Accessors ====================

    pub fn workspace(&self) -> &'a Workspace {
        self.workspace
    }

    pub fn options(&self) -> &'a RobotOptions {
        self.workspace.options()
    }

    /// Get the file path for a FileId.
    pub fn get_file_path(&self, file_id: FileId) -> Option<&'a Path> {
        self.workspace.path(file_id)
    }

    /// Get the FileId for a path.
    pub fn get_file_id(&self, path: &str) -> Option<FileId> {
        self.workspace.lookup(Path::new(path))
    }
}
