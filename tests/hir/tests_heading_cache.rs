//! The per-file heading cache follows document edits.

use std::sync::Arc;

use robot::hir::ImportContext;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_headings_reused_until_edit() {
    let mut host = analysis_from_sources(&[("/p/login.resource", LOGIN_RESOURCE)]);
    let id = file_id(&host, "/p/login.resource");

    let (first, version) = {
        let file = host.workspace().file(id).unwrap();
        (file.headings(), file.version())
    };
    let again = host.workspace().file(id).unwrap().headings();
    assert!(Arc::ptr_eq(&first, &again));

    host.set_file_content("/p/login.resource", "*** Keywords ***\nRenamed\n    No Operation\n");
    let file = host.workspace().file(id).unwrap();
    assert!(file.version() > version);
    let edited = file.headings();
    assert!(!Arc::ptr_eq(&first, &edited));
    assert_eq!(edited.len(), 1);
}

#[test]
fn test_edits_change_resolution() {
    let mut host = analysis_from_sources(&[
        ("/p/login.resource", LOGIN_RESOURCE),
        ("/p/suite.robot", LOGIN_SUITE),
    ]);
    let suite = file_id(&host, "/p/suite.robot");
    assert!(host.analysis().resolve_keyword(suite, "Go To Page").is_some());

    host.set_file_content("/p/login.resource", "*** Keywords ***\nGo Elsewhere\n    No Operation\n");
    assert!(host.analysis().resolve_keyword(suite, "Go To Page").is_none());
    assert!(host.analysis().resolve_keyword(suite, "Go Elsewhere").is_some());

    host.remove_file("/p/login.resource");
    assert!(host.analysis().resolve_keyword(suite, "Go Elsewhere").is_none());
}

#[test]
fn test_import_edits_apply_on_next_query() {
    let mut host = analysis_from_sources(&[
        ("/p/login.resource", LOGIN_RESOURCE),
        ("/p/suite.robot", LOGIN_SUITE),
    ]);
    let suite = file_id(&host, "/p/suite.robot");
    assert_eq!(host.analysis().imported_files(suite).len(), 1);

    let without_import = LOGIN_SUITE.replace("Resource    login.resource\n", "");
    host.set_file_content("/p/suite.robot", &without_import);
    assert!(host.analysis().imported_files(suite).is_empty());
    assert!(host.analysis().resolve_keyword(suite, "Go To Page").is_none());

    host.set_file_content("/p/suite.robot", LOGIN_SUITE);
    assert!(host.analysis().resolve_keyword(suite, "Go To Page").is_some());
}

#[test]
fn test_partial_document_degrades_gracefully() {
    let mut host = analysis_from_sources(&[]);
    let errors = host.set_file_content(
        "/p/suite.robot",
        "*** Settings ***\nLibrary\n*** Keywords ***\nHalf Typed\n    Log    ${unfinished\n",
    );
    assert!(!errors.is_empty());

    let id = file_id(&host, "/p/suite.robot");
    let keywords = host.analysis().defined_keywords(id);
    assert_eq!(keywords.len(), 1);
    assert_eq!(keywords[0].name(), "Half Typed");
}
