//! Gutter markers for runnable test cases and tasks.

use std::sync::Arc;

use crate::base::{FileId, LineCol, TextRange, TextSize};
use crate::hir::{ImportContext, Workspace};

/// A test case or task that can be run from its name cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunMarker {
    pub name: Arc<str>,
    /// Range of the name cell.
    pub range: TextRange,
    pub start: LineCol,
    pub end: LineCol,
}

/// One marker per test case of `file`, in document order.
pub fn run_markers(workspace: &Workspace, file: FileId) -> Vec<RunMarker> {
    let Some(robot_file) = workspace.file(file) else {
        return Vec::new();
    };
    let line_index = robot_file.syntax().line_index();
    robot_file
        .test_cases()
        .into_iter()
        .map(|test_case| {
            let (start, end) = line_index.range_to_line_cols(test_case.range);
            RunMarker {
                name: test_case.name,
                range: test_case.range,
                start,
                end,
            }
        })
        .collect()
}

/// The marker whose name cell contains `offset`.
pub fn run_marker_at(workspace: &Workspace, file: FileId, offset: TextSize) -> Option<RunMarker> {
    run_markers(workspace, file)
        .into_iter()
        .find(|marker| marker.range.contains_inclusive(offset))
}
