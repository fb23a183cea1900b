//! Helpers for setting up analysis hosts.

#![allow(dead_code)]

use std::sync::Arc;

use robot::base::{FileId, LineCol};
use robot::hir::{InMemoryLibraries, LibraryProvider};
use robot::ide::AnalysisHost;

/// Creates an AnalysisHost with multiple files.
pub fn analysis_from_sources(files: &[(&str, &str)]) -> AnalysisHost {
    analysis_with_libraries(files, Arc::new(InMemoryLibraries::new()))
}

/// Creates an AnalysisHost with multiple files and a library provider.
pub fn analysis_with_libraries(
    files: &[(&str, &str)],
    libraries: Arc<dyn LibraryProvider>,
) -> AnalysisHost {
    let mut host = AnalysisHost::with_libraries(libraries);
    for (path, content) in files {
        let errors = host.set_file_content(path, content);
        assert!(
            errors.is_empty(),
            "Parse errors in '{}': {:?}",
            path,
            errors
        );
    }
    host
}

/// FileId of `path`, panicking with a readable message when it is missing.
pub fn file_id(host: &AnalysisHost, path: &str) -> FileId {
    host.get_file_id(path)
        .unwrap_or_else(|| panic!("'{}' should be in the host", path))
}

/// Line/column of the first occurrence of `needle` in `source`, shifted by `offset` bytes.
pub fn position_of(source: &str, needle: &str, offset: usize) -> LineCol {
    let start = source
        .find(needle)
        .unwrap_or_else(|| panic!("'{}' not found in source", needle))
        + offset;
    let line = source[..start].matches('\n').count() as u32;
    let line_start = source[..start].rfind('\n').map_or(0, |idx| idx + 1);
    LineCol::new(line, (start - line_start) as u32)
}
