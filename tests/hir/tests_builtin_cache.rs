//! Built-in and library keywords are computed once per project.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use robot::hir::{ImportContext, InMemoryLibraries, LibraryProvider, PyClass, PyMember, PyModule};

use crate::helpers::analysis_helpers::*;

/// Counts `BuiltIn` class lookups made against the wrapped provider.
struct CountingLibraries {
    inner: InMemoryLibraries,
    built_in_lookups: AtomicUsize,
}

impl CountingLibraries {
    fn lookups(&self) -> usize {
        self.built_in_lookups.load(Ordering::SeqCst)
    }
}

impl LibraryProvider for CountingLibraries {
    fn find_class(&self, name: &str) -> Option<Arc<PyClass>> {
        if name == "BuiltIn" {
            self.built_in_lookups.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.find_class(name)
    }

    fn find_module(&self, name: &str) -> Option<Arc<PyModule>> {
        self.inner.find_module(name)
    }
}

fn counting_libraries() -> Arc<CountingLibraries> {
    let members = (0..100)
        .map(|i| PyMember::new(format!("kw_{}", i), false))
        .collect();
    let inner = InMemoryLibraries::new()
        .with_class(PyClass::new("robot.libraries.BuiltIn.BuiltIn", members))
        .with_class(PyClass::new(
            "robot.libraries.Collections.Collections",
            vec![PyMember::new("append_to_list", true)],
        ))
        .with_module(PyModule::new("robot.libraries.BuiltIn", vec![], vec![]));
    Arc::new(CountingLibraries {
        inner,
        built_in_lookups: AtomicUsize::new(0),
    })
}

const SUITE: &str = "\
*** Settings ***
Library    Collections

*** Test Cases ***
Uses Built Ins
    Kw 99
    Append To List    ${list}    item
";

#[test]
fn test_repeated_resolves_do_not_query_provider() {
    let libraries = counting_libraries();
    let host = analysis_with_libraries(&[("/p/suite.robot", SUITE)], libraries.clone());
    let suite = file_id(&host, "/p/suite.robot");
    let analysis = host.analysis();

    assert!(analysis.resolve_keyword(suite, "Kw 99").is_some());
    assert_eq!(libraries.lookups(), 1);

    for _ in 0..5 {
        let keyword = analysis.resolve_keyword(suite, "kw 99").unwrap();
        assert_eq!(keyword.namespace(), Some("BuiltIn"));
        assert!(analysis.resolve_keyword(suite, "Collections.Append To List").is_some());
        assert!(!analysis.completions(suite, 5, 4).is_empty());
    }
    assert_eq!(libraries.lookups(), 1);
}

#[test]
fn test_built_in_keywords_are_shared() {
    let libraries = counting_libraries();
    let host = analysis_with_libraries(&[("/p/suite.robot", SUITE)], libraries);
    let project = host.workspace().project();
    let provider = host.workspace().libraries();

    let first = project.built_in_keywords(provider);
    let second = project.built_in_keywords(provider);
    assert_eq!(first.len(), 100);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_swapping_provider_drops_cached_keywords() {
    let libraries = counting_libraries();
    let mut host = analysis_with_libraries(&[("/p/suite.robot", SUITE)], libraries);
    let suite = file_id(&host, "/p/suite.robot");
    assert!(host.analysis().resolve_keyword(suite, "Kw 99").is_some());

    host.set_library_provider(Arc::new(InMemoryLibraries::new()));
    assert!(host.analysis().resolve_keyword(suite, "Kw 99").is_none());
}
