//! Keyword matching and identity.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rstest::rstest;
use robot::base::{FileId, TextRange, TextSize};
use robot::hir::{DefinedKeyword, SymbolLocation};

use crate::helpers::analysis_helpers::*;
use crate::helpers::source_fixtures::*;

fn location() -> SymbolLocation {
    SymbolLocation::File {
        file: FileId::new(0),
        range: TextRange::empty(TextSize::from(0)),
    }
}

fn hash_of(keyword: &DefinedKeyword) -> u64 {
    let mut hasher = DefaultHasher::new();
    keyword.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// MATCHING
// =============================================================================

#[rstest]
#[case("Go To Page")]
#[case("go to page")]
#[case("GO TO PAGE")]
#[case("go_to_page")]
#[case("Go   To Page")]
#[case("  go to page  ")]
fn test_keyword_matches_invocation(#[case] invocation: &str) {
    let keyword = DefinedKeyword::new(None, "Go To Page", false, location());
    assert!(keyword.matches(invocation), "'{}' should match", invocation);
}

#[rstest]
#[case("Go To Pages")]
#[case("Go To")]
#[case("Go To Page Now")]
#[case("Open Page")]
fn test_keyword_rejects_other_names(#[case] invocation: &str) {
    let keyword = DefinedKeyword::new(None, "Go To Page", false, location());
    assert!(!keyword.matches(invocation), "'{}' should not match", invocation);
}

#[test]
fn test_embedded_arguments_match_any_value() {
    let keyword = DefinedKeyword::new(None, "Select ${item} From List", true, location());
    assert!(keyword.matches("Select apple from list"));
    assert!(keyword.matches("select \"two words\" FROM LIST"));
    assert!(!keyword.matches("Select apple"));
}

#[test]
fn test_namespace_is_optional() {
    let keyword = DefinedKeyword::new(Some("Collections"), "append_to_list", true, location());
    assert_eq!(keyword.name(), "append to list");
    assert!(keyword.matches("Append To List"));
    assert!(keyword.matches("Collections.Append To List"));
    assert!(!keyword.matches("String.Append To List"));
}

// =============================================================================
// IDENTITY
// =============================================================================

#[test]
fn test_identity_ignores_arguments() {
    let with_args = DefinedKeyword::new(None, "Go To Page", true, location());
    let without_args = DefinedKeyword::new(None, "go to page", false, location());
    assert_eq!(with_args, without_args);
    assert_eq!(hash_of(&with_args), hash_of(&without_args));
}

#[test]
fn test_function_style_names_split_on_case() {
    let keyword = DefinedKeyword::new(None, "Go To Page", false, location());
    assert!(keyword.matches("GoToPage"));
}

#[test]
fn test_identity_differs_by_name() {
    let a = DefinedKeyword::new(None, "Go To Page", false, location());
    let b = DefinedKeyword::new(None, "Go To Pages", false, location());
    assert_ne!(a, b);
}

// =============================================================================
// THROUGH THE ANALYSIS
// =============================================================================

#[test]
fn test_invocations_resolve_across_spellings() {
    let host = analysis_from_sources(&[
        ("/p/login.resource", LOGIN_RESOURCE),
        ("/p/suite.robot", LOGIN_SUITE),
    ]);
    let analysis = host.analysis();
    let suite = file_id(&host, "/p/suite.robot");
    let resource = file_id(&host, "/p/login.resource");

    for text in ["Go To Page", "GO TO PAGE", "go_to_page", "submit_credentials"] {
        let keyword = analysis
            .resolve_keyword(suite, text)
            .unwrap_or_else(|| panic!("'{}' should resolve", text));
        assert_eq!(keyword.location().file(), Some(resource));
    }
    assert!(analysis.resolve_keyword(suite, "Go To Pages").is_none());
}
