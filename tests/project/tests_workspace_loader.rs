//! Workspace loading from a real directory.

use std::fs;
use std::path::Path;

use robot::ide::AnalysisHost;
use robot::project::{LoadError, WorkspaceLoader};

use crate::helpers::source_fixtures::*;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_load_directory_resolves_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "resources/login.resource", LOGIN_RESOURCE);
    write(
        root,
        "tests/suite.robot",
        &LOGIN_SUITE.replace("login.resource", "../resources/login.resource"),
    );
    write(root, "tests/notes.md", "not a robot file");
    write(root, ".venv/lib/ignored.robot", "*** Keywords ***\nIgnored\n");

    let mut host = AnalysisHost::new();
    let loaded = WorkspaceLoader::new()
        .load_directory_into_host(root, &mut host)
        .unwrap();
    assert_eq!(loaded, 2);
    assert_eq!(host.file_count(), 2);

    let suite_path = root.join("tests/suite.robot");
    let suite = host.get_file_id(&suite_path.to_string_lossy()).unwrap();
    let analysis = host.analysis();
    assert!(analysis.resolve_keyword(suite, "Go To Page").is_some());
    assert!(analysis.unused_imports(suite).is_empty());
}

#[test]
fn test_config_file_sets_options() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "robot-analysis.toml",
        "[options]\ncapitalize_keywords = false\nallow_transitive_imports = false\n",
    );
    write(root, "suite.robot", "*** Test Cases ***\nT\n    Log    hi\n");

    let mut host = AnalysisHost::new();
    WorkspaceLoader::new()
        .load_directory_into_host(root, &mut host)
        .unwrap();
    assert!(!host.options().capitalize_keywords);
    assert!(!host.options().allow_transitive_imports);
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), ".robot-analysis.toml", "[options\nbroken");

    let mut host = AnalysisHost::new();
    host.load_config(dir.path());
    assert!(host.options().capitalize_keywords);
    assert!(host.options().allow_transitive_imports);
}

#[test]
fn test_load_single_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "login.resource", LOGIN_RESOURCE);
    let path = dir.path().join("login.resource");

    let mut host = AnalysisHost::new();
    let id = WorkspaceLoader::new().load_file_into_host(&path, &mut host).unwrap();
    assert_eq!(host.get_file_path(id), Some(path.as_path()));
    assert_eq!(host.analysis().defined_keywords(id).len(), 2);
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "lib.py", "def helper(): pass\n");
    let loader = WorkspaceLoader::new();
    let mut host = AnalysisHost::new();

    let err = loader
        .load_directory_into_host(dir.path().join("lib.py"), &mut host)
        .unwrap_err();
    assert!(matches!(err, LoadError::NotADirectory(_)));

    let err = loader
        .load_file_into_host(dir.path().join("lib.py"), &mut host)
        .unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedExtension(_)));

    let err = loader
        .load_file_into_host(dir.path().join("missing.robot"), &mut host)
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(host.file_count(), 0);
}
