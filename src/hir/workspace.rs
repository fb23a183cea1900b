//! The set of documents analysed together.
//!
//! [`Workspace`] maps paths to stable [`FileId`]s, owns every [`RobotFile`],
//! and carries the project-wide pieces import resolution needs (library
//! provider, built-in cache, options). It is the production
//! [`ImportContext`].

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;

use super::builtins::ProjectData;
use super::file::RobotFile;
use super::imports::ImportContext;
use super::library::{LibraryProvider, NoLibraries};
use crate::base::FileId;
use crate::project::RobotOptions;
use crate::syntax::SyntaxFile;

pub struct Workspace {
    path_to_id: IndexMap<PathBuf, FileId>,
    id_to_path: IndexMap<FileId, PathBuf>,
    files: IndexMap<FileId, RobotFile>,
    next_id: u32,
    libraries: Arc<dyn LibraryProvider>,
    project: ProjectData,
    options: RobotOptions,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_libraries(Arc::new(NoLibraries))
    }

    pub fn with_libraries(libraries: Arc<dyn LibraryProvider>) -> Self {
        Self {
            path_to_id: IndexMap::new(),
            id_to_path: IndexMap::new(),
            files: IndexMap::new(),
            next_id: 0,
            libraries,
            project: ProjectData::new(),
            options: RobotOptions::default(),
        }
    }

    /// The id of `path`, assigning a fresh one on first sight.
    pub fn file_id(&mut self, path: &Path) -> FileId {
        if let Some(&id) = self.path_to_id.get(path) {
            return id;
        }
        let id = FileId::new(self.next_id);
        self.next_id += 1;
        self.path_to_id.insert(path.to_owned(), id);
        self.id_to_path.insert(id, path.to_owned());
        id
    }

    /// The id of a path that holds a document.
    pub fn lookup(&self, path: &Path) -> Option<FileId> {
        self.path_to_id
            .get(path)
            .copied()
            .filter(|id| self.files.contains_key(id))
    }

    pub fn path(&self, file: FileId) -> Option<&Path> {
        self.id_to_path.get(&file).map(PathBuf::as_path)
    }

    /// Create or update the document at `path`.
    pub fn set_file_text(&mut self, path: &Path, text: &str) -> FileId {
        let id = self.file_id(path);
        match self.files.get_mut(&id) {
            Some(file) => file.set_text(text),
            None => {
                self.files.insert(id, RobotFile::new(id, text));
            }
        }
        id
    }

    /// Insert a document parsed elsewhere (the workspace loader parses in
    /// parallel). Replaces any previous document at `path`.
    pub fn insert_syntax(&mut self, path: &Path, syntax: SyntaxFile) -> FileId {
        let id = self.file_id(path);
        self.files.insert(id, RobotFile::from_syntax(id, syntax));
        id
    }

    /// Forget the document at `path`. Its id is retired, never reused.
    pub fn remove_file(&mut self, path: &Path) -> bool {
        let Some(id) = self.path_to_id.shift_remove(path) else {
            return false;
        };
        self.id_to_path.shift_remove(&id);
        self.files.shift_remove(&id).is_some()
    }

    pub fn has_file(&self, path: &Path) -> bool {
        self.lookup(path).is_some()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Every document, in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &RobotFile> {
        self.files.values()
    }

    pub fn set_options(&mut self, options: RobotOptions) {
        self.options = options;
    }

    /// Swap the library provider. Cached built-ins depend on it and are dropped.
    pub fn set_libraries(&mut self, libraries: Arc<dyn LibraryProvider>) {
        self.libraries = libraries;
        self.project.reset();
    }

    fn find_by_suffix(&self, target: &Path) -> Option<FileId> {
        let suffix: PathBuf = target
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();
        if suffix.as_os_str().is_empty() {
            return None;
        }
        self.files
            .keys()
            .copied()
            .find(|id| self.path(*id).is_some_and(|path| path.ends_with(&suffix)))
    }
}

impl ImportContext for Workspace {
    fn file(&self, file: FileId) -> Option<&RobotFile> {
        self.files.get(&file)
    }

    /// Relative targets resolve against the importing document's directory;
    /// failing that, any known document whose path ends with the target wins.
    fn resolve_resource(&self, from: FileId, target: &str) -> Option<FileId> {
        let directory = self.path(from).and_then(Path::parent);
        let expanded = expand_path_variables(target, directory);
        let target = Path::new(&expanded);

        let candidate = match directory {
            Some(directory) if target.is_relative() => directory.join(target),
            _ => target.to_path_buf(),
        };
        let resolved = self
            .lookup(&normalize_path(&candidate))
            .or_else(|| self.find_by_suffix(target));
        if resolved.is_none() {
            tracing::trace!(file = %from, target = %expanded, "resource path not in workspace");
        }
        resolved
    }

    fn libraries(&self) -> &dyn LibraryProvider {
        self.libraries.as_ref()
    }

    fn project(&self) -> &ProjectData {
        &self.project
    }

    fn options(&self) -> &RobotOptions {
        &self.options
    }
}

/// Substitute `${CURDIR}` and `${/}`, and use `/` as the only separator.
fn expand_path_variables(target: &str, directory: Option<&Path>) -> String {
    let mut expanded = target.trim().replace("${/}", "/").replace('\\', "/");
    if let Some(directory) = directory {
        expanded = expanded.replace("${CURDIR}", &directory.to_string_lossy());
    }
    expanded
}

/// Lexically resolve `.` and `..` components.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
