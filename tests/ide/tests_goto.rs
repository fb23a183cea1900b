//! Go-to-definition tests for the IDE layer.

use robot::LineCol;
use robot::ide::GotoKind;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

fn host() -> robot::AnalysisHost {
    analysis_from_sources(&[
        ("/p/login.resource", LOGIN_RESOURCE),
        ("/p/suite.robot", LOGIN_SUITE),
    ])
}

#[test]
fn test_goto_keyword_in_resource() {
    let host = host();
    let analysis = host.analysis();
    let suite = file_id(&host, "/p/suite.robot");
    let resource = file_id(&host, "/p/login.resource");

    let position = position_of(LOGIN_SUITE, "submit_credentials", 3);
    let result = analysis.goto_definition(suite, position.line, position.col);
    assert_eq!(result.targets.len(), 1);
    let target = &result.targets[0];
    assert_eq!(target.kind, GotoKind::Keyword);
    assert_eq!(target.file(), Some(resource));
    assert_eq!(
        target.span.map(|(start, _)| start),
        Some(position_of(LOGIN_RESOURCE, "Submit Credentials", 0))
    );
}

#[test]
fn test_goto_variable_across_spellings() {
    let host = host();
    let analysis = host.analysis();
    let suite = file_id(&host, "/p/suite.robot");

    let position = position_of(LOGIN_SUITE, "${login_url}", 4);
    let result = analysis.goto_definition(suite, position.line, position.col);
    assert_eq!(result.targets[0].kind, GotoKind::Variable);
    assert_eq!(&*result.targets[0].name, "${LOGIN URL}");
    assert_eq!(result.targets[0].span.map(|(start, _)| start), Some(LineCol::new(1, 0)));
}

#[test]
fn test_goto_resource_import() {
    let host = host();
    let analysis = host.analysis();
    let suite = file_id(&host, "/p/suite.robot");

    let position = position_of(LOGIN_SUITE, "login.resource", 2);
    let result = analysis.goto_definition(suite, position.line, position.col);
    assert_eq!(result.targets[0].kind, GotoKind::File);
    assert_eq!(result.targets[0].file(), Some(file_id(&host, "/p/login.resource")));
}

#[test]
fn test_goto_nothing() {
    let host = host();
    let analysis = host.analysis();
    let suite = file_id(&host, "/p/suite.robot");

    // test case name
    let position = position_of(LOGIN_SUITE, "Valid Login", 2);
    assert!(analysis.goto_definition(suite, position.line, position.col).is_empty());
    // past the end of the document
    assert!(analysis.goto_definition(suite, 99, 0).is_empty());
}
