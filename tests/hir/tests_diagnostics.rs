//! Unused-import and syntax diagnostics.

use robot::hir::{Severity, UNUSED_IMPORT_MESSAGE, codes};
use robot::LineCol;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_used_resource_is_not_flagged() {
    let host = analysis_from_sources(&[
        ("/p/login.resource", LOGIN_RESOURCE),
        ("/p/suite.robot", LOGIN_SUITE),
    ]);
    let suite = file_id(&host, "/p/suite.robot");
    assert!(host.analysis().unused_imports(suite).is_empty());
}

#[test]
fn test_unused_resource_is_flagged_on_its_argument() {
    let suite = "\
*** Settings ***
Resource    login.resource

*** Test Cases ***
T
    Log    nothing from the resource
";
    let host = analysis_from_sources(&[
        ("/p/login.resource", LOGIN_RESOURCE),
        ("/p/suite.robot", suite),
    ]);
    let suite_id = file_id(&host, "/p/suite.robot");
    let diagnostics = host.analysis().unused_imports(suite_id);

    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.code.as_deref(), Some(codes::UNUSED_IMPORT));
    assert_eq!(&*diagnostic.message, UNUSED_IMPORT_MESSAGE);
    let start = position_of(suite, "login.resource", 0);
    assert_eq!(LineCol::new(diagnostic.start_line, diagnostic.start_col), start);
    assert_eq!(&suite[diagnostic.range], "login.resource");
}

#[test]
fn test_variable_usage_counts_as_use() {
    let suite = "\
*** Settings ***
Resource    login.resource

*** Test Cases ***
T
    Log    ${LOGIN URL}
";
    let host = analysis_from_sources(&[
        ("/p/login.resource", LOGIN_RESOURCE),
        ("/p/suite.robot", suite),
    ]);
    assert!(
        host.analysis()
            .unused_imports(file_id(&host, "/p/suite.robot"))
            .is_empty()
    );
}

#[test]
fn test_unresolved_and_library_imports_are_never_flagged() {
    let suite = "\
*** Settings ***
Resource    missing.resource
Library    Collections
Variables    settings.py
";
    let host = analysis_from_sources(&[("/p/suite.robot", suite)]);
    assert!(
        host.analysis()
            .unused_imports(file_id(&host, "/p/suite.robot"))
            .is_empty()
    );
}

#[test]
fn test_only_the_unused_one_of_two_imports() {
    let other = "*** Keywords ***\nNever Used\n    No Operation\n";
    let suite = "\
*** Settings ***
Resource    login.resource
Resource    other.resource

*** Test Cases ***
T
    Submit Credentials
";
    let host = analysis_from_sources(&[
        ("/p/login.resource", LOGIN_RESOURCE),
        ("/p/other.resource", other),
        ("/p/suite.robot", suite),
    ]);
    let diagnostics = host.analysis().unused_imports(file_id(&host, "/p/suite.robot"));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(&suite[diagnostics[0].range], "other.resource");
}

#[test]
fn test_syntax_errors_come_first() {
    let mut host = analysis_from_sources(&[("/p/login.resource", LOGIN_RESOURCE)]);
    let errors = host.set_file_content(
        "/p/suite.robot",
        "*** Bogus ***\n*** Settings ***\nResource    login.resource\n",
    );
    assert_eq!(errors.len(), 1);

    let diagnostics = host.analysis().diagnostics(file_id(&host, "/p/suite.robot"));
    let found: Vec<_> = diagnostics.iter().map(|d| d.code.as_deref()).collect();
    assert_eq!(found, vec![Some(codes::SYNTAX_ERROR), Some(codes::UNUSED_IMPORT)]);
    assert_eq!(diagnostics[0].severity, Severity::Error);
}
