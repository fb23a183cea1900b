//! Own vs. defined variables and import-kind folding.

use std::sync::Arc;

use robot::hir::{ImportContext, InMemoryLibraries, PyClass, PyMember, PyModule};

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

fn texts<'a>(variables: impl IntoIterator<Item = &'a robot::DefinedVariable>) -> Vec<&'a str> {
    variables.into_iter().map(|v| v.text()).collect()
}

#[test]
fn test_own_variables_exclude_imports() {
    let host = analysis_from_sources(&[
        ("/p/login.resource", LOGIN_RESOURCE),
        ("/p/suite.robot", LOGIN_SUITE),
    ]);
    let suite = file_id(&host, "/p/suite.robot");
    let own = host.workspace().file(suite).unwrap().own_defined_variables();
    let defined = host.analysis().defined_variables(suite);

    assert!(own.is_empty());
    assert!(texts(&defined).contains(&"${LOGIN URL}"));
}

#[test]
fn test_without_imports_own_equals_defined() {
    let source = "\
*** Variables ***
${HOST}    localhost

*** Test Cases ***
T
    ${result}=    Get Value
";
    let host = analysis_from_sources(&[("/p/suite.robot", source)]);
    let suite = file_id(&host, "/p/suite.robot");
    let own = host.workspace().file(suite).unwrap().own_defined_variables();
    let defined = host.analysis().defined_variables(suite);
    assert_eq!(texts(&own), vec!["${HOST}", "${result}"]);
    assert_eq!(own, defined);
}

#[test]
fn test_without_imports_defined_adds_only_built_ins() {
    let libraries = InMemoryLibraries::new()
        .with_module(PyModule::new("robot.libraries.BuiltIn", vec![], vec![]));
    let source = "*** Variables ***\n${HOST}    localhost\n";
    let host = analysis_with_libraries(&[("/p/suite.robot", source)], Arc::new(libraries));
    let suite = file_id(&host, "/p/suite.robot");
    let own = host.workspace().file(suite).unwrap().own_defined_variables();
    let defined = host.analysis().defined_variables(suite);

    let extra: Vec<_> = defined.iter().filter(|v| !own.contains(v)).collect();
    assert!(!extra.is_empty());
    assert!(extra.iter().all(|v| v.location().file().is_none()));
    assert!(texts(extra.iter().copied()).contains(&"${TEST NAME}"));
    assert!(own.iter().all(|v| defined.contains(v)));
}

#[test]
fn test_library_import_contributes_no_variables() {
    let libraries = InMemoryLibraries::new().with_module(PyModule::new(
        "settings",
        vec![PyMember::new("reload_settings", false)],
        vec!["API_TOKEN".into()],
    ));
    let library_suite = "*** Settings ***\nLibrary    settings\n";
    let variables_suite = "*** Settings ***\nVariables    settings\n";
    let host = analysis_with_libraries(
        &[
            ("/p/library.robot", library_suite),
            ("/p/variables.robot", variables_suite),
        ],
        Arc::new(libraries),
    );
    let analysis = host.analysis();

    let through_library = analysis.defined_variables(file_id(&host, "/p/library.robot"));
    assert!(!texts(&through_library).contains(&"${API_TOKEN}"));
    // the module still provides keywords
    assert!(
        analysis
            .resolve_keyword(file_id(&host, "/p/library.robot"), "Reload Settings")
            .is_some()
    );

    let through_variables = analysis.defined_variables(file_id(&host, "/p/variables.robot"));
    assert!(texts(&through_variables).contains(&"${API_TOKEN}"));
}

#[test]
fn test_resource_import_contributes_variables() {
    let libraries = InMemoryLibraries::new()
        .with_class(PyClass::new("Helpers", vec![PyMember::new("helper", false)]));
    let resource = "*** Variables ***\n${TIMEOUT}    5s\n";
    let suite = "*** Settings ***\nResource    timeouts.resource\nLibrary    Helpers\n";
    let host = analysis_with_libraries(
        &[("/p/timeouts.resource", resource), ("/p/suite.robot", suite)],
        Arc::new(libraries),
    );
    let defined = host.analysis().defined_variables(file_id(&host, "/p/suite.robot"));
    assert_eq!(texts(&defined), vec!["${TIMEOUT}"]);
}

#[test]
fn test_local_variables_stay_in_their_definition() {
    let source = "\
*** Test Cases ***
First
    ${first}=    Get Value
    Log    ${first}

Second
    Log    ${first}
";
    let host = analysis_from_sources(&[("/p/suite.robot", source)]);
    let analysis = host.analysis();
    let suite = file_id(&host, "/p/suite.robot");

    let inside = position_of(source, "Log    ${first}", 9);
    assert!(
        analysis
            .resolve_variable(suite, "${first}", inside.line, inside.col)
            .is_some()
    );
    let outside = position_of(source, "Second", 0);
    assert!(
        analysis
            .resolve_variable(suite, "${first}", outside.line + 1, 10)
            .is_none()
    );
}
