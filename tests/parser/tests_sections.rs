//! Section headings, cells and losslessness.

use robot::keywords::HeadingKind;
use robot::parser::{AstNode, SourceFile, SyntaxKind, parse};
use rstest::rstest;

fn source_file(text: &str) -> SourceFile {
    SourceFile::cast(parse(text).syntax()).unwrap()
}

#[rstest]
#[case("*** Settings ***", HeadingKind::Settings)]
#[case("*** Setting ***", HeadingKind::Settings)]
#[case("***Variables***", HeadingKind::Variables)]
#[case("*** Test Cases ***", HeadingKind::TestCases)]
#[case("*** testcases ***", HeadingKind::TestCases)]
#[case("*** Tasks ***", HeadingKind::Tasks)]
#[case("*** Keywords ***", HeadingKind::Keywords)]
#[case("*** User Keywords ***", HeadingKind::Keywords)]
#[case("*** Comments ***", HeadingKind::Comments)]
#[case("* Settings", HeadingKind::Settings)]
fn test_heading_kinds(#[case] heading: &str, #[case] expected: HeadingKind) {
    let text = format!("{}\n", heading);
    let sections: Vec<_> = source_file(&text).sections().collect();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].kind(), expected);
}

#[rstest]
#[case("*** Settings ***\nLibrary    Collections\n")]
#[case("*** Test Cases ***\nT\n\tLog\thi\n")]
#[case("*** Keywords ***\nK\n    [Arguments]    ${a}\n    ...    ${b}\n")]
#[case("no heading at all\n*** Variables ***\n${X}    1")]
#[case("*** Test Cases ***\r\nT\r\n    Log    crlf\r\n")]
#[case("*** Broken\n    ${unclosed\n")]
fn test_parse_is_lossless(#[case] text: &str) {
    assert_eq!(parse(text).syntax().text().to_string(), text);
}

#[test]
fn test_pipe_free_cells_split_on_two_spaces() {
    let text = "*** Test Cases ***\nT\n    Open Browser    http://x y    chrome\n";
    let root = parse(text).syntax();
    let arguments: Vec<_> = root
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::ARGUMENT)
        .map(|node| node.text().to_string())
        .collect();
    assert_eq!(arguments, vec!["http://x y", "chrome"]);
}

#[test]
fn test_imports_and_definitions() {
    let text = "\
*** Settings ***
Library    SeleniumLibrary    WITH NAME    Web
Resource    common.resource

*** Keywords ***
Open Site
    [Arguments]    ${url}
    Go To    ${url}
";
    let file = source_file(text);
    let sections: Vec<_> = file.sections().collect();

    let imports: Vec<_> = sections[0].imports().collect();
    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0].target().map(|t| t.text()), Some("SeleniumLibrary".to_string()));

    let definitions: Vec<_> = sections[1].definitions().collect();
    assert_eq!(definitions.len(), 1);
    assert!(!definitions[0].is_test_case());
    assert_eq!(definitions[0].name().map(|n| n.text()), Some("Open Site".to_string()));
    assert_eq!(definitions[0].declared_arguments().len(), 1);
}
