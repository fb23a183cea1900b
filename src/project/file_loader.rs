//! Finding and reading robot documents on disk.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::LoadError;
use crate::base::constants::ROBOT_EXTENSIONS;
use crate::syntax::SyntaxFile;

/// Lowercased extension of `path`, if any.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

pub fn is_robot_file(path: &Path) -> bool {
    get_extension(path).is_some_and(|ext| ROBOT_EXTENSIONS.contains(&ext.as_str()))
}

pub fn validate_extension(path: &Path) -> Result<(), LoadError> {
    if is_robot_file(path) {
        Ok(())
    } else {
        Err(LoadError::UnsupportedExtension(path.to_path_buf()))
    }
}

/// Every robot document below `dir`, sorted for a stable load order.
/// Hidden directories are skipped.
pub fn collect_file_paths(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    let walker = WalkDir::new(dir).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with('.'))
    });
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_robot_file(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn load_file(path: &Path) -> Result<String, LoadError> {
    validate_extension(path)?;
    std::fs::read_to_string(path).map_err(|err| LoadError::io(path, err))
}

/// Parse in-memory content (an unsaved editor buffer, say).
pub fn parse_content(content: &str) -> SyntaxFile {
    SyntaxFile::new(content)
}

pub fn load_and_parse(path: &Path) -> Result<SyntaxFile, LoadError> {
    let content = load_file(path)?;
    Ok(parse_content(&content))
}
