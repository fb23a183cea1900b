//! Find references tests for the IDE layer.

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

const SECOND_SUITE: &str = "\
*** Settings ***
Resource    login.resource

*** Test Cases ***
Smoke
    When go to page    /
";

fn host() -> robot::AnalysisHost {
    analysis_from_sources(&[
        ("/p/login.resource", LOGIN_RESOURCE),
        ("/p/suite.robot", LOGIN_SUITE),
        ("/p/smoke.robot", SECOND_SUITE),
    ])
}

#[test]
fn test_find_references_for_definition() {
    let host = host();
    let analysis = host.analysis();
    let resource = file_id(&host, "/p/login.resource");

    let position = position_of(LOGIN_RESOURCE, "Go To Page", 1);
    let result = analysis.find_references(resource, position.line, position.col, false);

    assert_eq!(result.definition.as_ref().map(|k| k.name()), Some("Go To Page"));
    // two in suite.robot, one Gherkin-prefixed in smoke.robot
    assert_eq!(result.len(), 3);
    let suite = file_id(&host, "/p/suite.robot");
    let smoke = file_id(&host, "/p/smoke.robot");
    assert_eq!(result.references.iter().filter(|r| r.file == suite).count(), 2);
    assert_eq!(result.references.iter().filter(|r| r.file == smoke).count(), 1);
}

#[test]
fn test_find_references_include_declaration() {
    let host = host();
    let analysis = host.analysis();
    let suite = file_id(&host, "/p/suite.robot");

    let position = position_of(LOGIN_SUITE, "GO TO PAGE", 0);
    let result = analysis.find_references(suite, position.line, position.col, true);

    assert_eq!(result.len(), 4);
    let declarations: Vec<_> = result.references.iter().filter(|r| r.is_definition).collect();
    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations[0].file, file_id(&host, "/p/login.resource"));
}

#[test]
fn test_find_references_spans() {
    let host = host();
    let analysis = host.analysis();
    let resource = file_id(&host, "/p/login.resource");

    let position = position_of(LOGIN_RESOURCE, "Submit Credentials", 0);
    let result = analysis.find_references(resource, position.line, position.col, false);
    assert_eq!(result.len(), 1);
    let reference = &result.references[0];
    assert_eq!(reference.start, position_of(LOGIN_SUITE, "submit_credentials", 0));
    assert_eq!(reference.end.col - reference.start.col, "submit_credentials".len() as u32);
}

#[test]
fn test_no_references_off_keyword() {
    let host = host();
    let resource = file_id(&host, "/p/login.resource");
    assert!(host.analysis().find_references(resource, 0, 2, true).is_empty());
}
