//! Completion tests for the IDE layer.

use std::sync::Arc;

use robot::hir::{InMemoryLibraries, PyModule};
use robot::ide::{CompletionItem, CompletionKind, TailKind};
use rstest::rstest;

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

fn labels(items: &[CompletionItem], kind: CompletionKind) -> Vec<&str> {
    items
        .iter()
        .filter(|item| item.kind == kind)
        .map(|item| &*item.label)
        .collect()
}

const SUITE: &str = "\
*** Settings ***
Resource    login.resource
Variables    settings

*** Variables ***
${USER}    admin

*** Test Cases ***
T
    Log    x

*** Keywords ***
Local Helper
    Log    y
";

fn completions_at(needle: &str) -> Vec<CompletionItem> {
    let libraries = InMemoryLibraries::new()
        .with_module(PyModule::new("settings", vec![], vec!["API_TOKEN".into()]));
    let host = analysis_with_libraries(
        &[("/p/login.resource", LOGIN_RESOURCE), ("/p/suite.robot", SUITE)],
        Arc::new(libraries),
    );
    let suite = file_id(&host, "/p/suite.robot");
    let position = position_of(SUITE, needle, 0);
    host.analysis().completions(suite, position.line, position.col)
}

#[rstest]
#[case("Log    x", true)]
#[case("Log    y", false)]
fn test_definition_sections(#[case] needle: &str, #[case] in_test_case: bool) {
    let items = completions_at(needle);

    assert!(labels(&items, CompletionKind::Heading).contains(&"*** Keywords ***"));
    assert!(labels(&items, CompletionKind::BracketSetting).contains(&"[Tags]") || !in_test_case);
    assert!(!labels(&items, CompletionKind::SyntaxMarker).is_empty());
    assert_eq!(!labels(&items, CompletionKind::Gherkin).is_empty(), in_test_case);
    assert!(labels(&items, CompletionKind::Import).is_empty());

    let keywords = labels(&items, CompletionKind::Keyword);
    assert!(keywords.contains(&"Go To Page"));
    assert!(keywords.contains(&"Submit Credentials"));
    assert!(keywords.contains(&"Local Helper"));

    let variables = labels(&items, CompletionKind::Variable);
    assert!(variables.contains(&"${USER}"));
    assert!(variables.contains(&"${LOGIN"));
    assert!(variables.contains(&"${API_TOKEN}"));
}

#[test]
fn test_settings_section() {
    let items = completions_at("Variables    settings");
    assert!(labels(&items, CompletionKind::Import).contains(&"Resource"));
    assert!(!labels(&items, CompletionKind::Setting).is_empty());
    assert!(labels(&items, CompletionKind::Keyword).is_empty());
    assert!(labels(&items, CompletionKind::Gherkin).is_empty());
    assert!(labels(&items, CompletionKind::Variable).contains(&"${USER}"));
}

#[test]
fn test_variables_section_offers_headings_only() {
    let items = completions_at("${USER}");
    assert!(!items.is_empty());
    assert!(items.iter().all(|item| item.kind == CompletionKind::Heading));
}

#[test]
fn test_tails() {
    let items = completions_at("Log    x");
    let tail_of = |label: &str| {
        items
            .iter()
            .find(|item| &*item.label == label)
            .map(|item| item.tail)
    };
    assert_eq!(tail_of("*** Settings ***"), Some(TailKind::NewLine));
    assert_eq!(tail_of("Given"), Some(TailKind::Space));
    assert_eq!(tail_of("Go To Page"), Some(TailKind::SuperSpace));
    assert_eq!(tail_of("Submit Credentials"), Some(TailKind::None));
}

#[test]
fn test_typed_prefix_filters() {
    let source = "*** Settings ***\nResource    login.resource\n\n*** Test Cases ***\nT\n    sub";
    let host = analysis_from_sources(&[
        ("/p/login.resource", LOGIN_RESOURCE),
        ("/p/suite.robot", source),
    ]);
    let suite = file_id(&host, "/p/suite.robot");
    let items = host.analysis().completions(suite, 5, 7);
    let found: Vec<_> = items.iter().map(|item| &*item.label).collect();
    assert_eq!(found, vec!["Submit Credentials"]);
}

#[test]
fn test_variables_offered_once() {
    let items = completions_at("Log    x");
    let variables = labels(&items, CompletionKind::Variable);
    for expected in ["${API_TOKEN}", "${USER}"] {
        assert_eq!(
            variables.iter().filter(|label| **label == expected).count(),
            1,
            "{} in {:?}",
            expected,
            variables
        );
    }
}
