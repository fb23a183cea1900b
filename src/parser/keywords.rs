//! Reserved words of the Robot Framework plain-text format.
//!
//! Everything here is matched the way the engine matches it: case-insensitive,
//! and with spaces inside setting names ignored (`Suite Setup` ≡ `suitesetup`).

/// Kind of a `*** Heading ***` section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeadingKind {
    Settings,
    Variables,
    TestCases,
    Tasks,
    Keywords,
    Comments,
    Unknown,
}

impl HeadingKind {
    /// Classify a heading line such as `*** Test Cases ***`.
    pub fn from_heading_text(text: &str) -> Self {
        let name = normalize(text.trim().trim_matches('*'));
        match name.as_str() {
            "setting" | "settings" => HeadingKind::Settings,
            "variable" | "variables" => HeadingKind::Variables,
            "testcase" | "testcases" => HeadingKind::TestCases,
            "task" | "tasks" => HeadingKind::Tasks,
            "keyword" | "keywords" | "userkeyword" | "userkeywords" => HeadingKind::Keywords,
            "comment" | "comments" => HeadingKind::Comments,
            _ => HeadingKind::Unknown,
        }
    }

    pub fn is_settings(self) -> bool {
        self == HeadingKind::Settings
    }

    /// Tasks are test cases under another name.
    pub fn contains_test_cases(self) -> bool {
        matches!(self, HeadingKind::TestCases | HeadingKind::Tasks)
    }

    pub fn contains_keyword_definitions(self) -> bool {
        self == HeadingKind::Keywords
    }

    pub fn contains_variable_definitions(self) -> bool {
        self == HeadingKind::Variables
    }
}

/// Syntax category a recommendation word belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordCategory {
    Heading,
    Setting,
    Import,
    BracketSetting,
    Gherkin,
    SyntaxMarker,
}

/// A reserved word offered by completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecommendationWord {
    /// Text the user types to find the word.
    pub lookup: &'static str,
    /// Text inserted into the document.
    pub presentation: &'static str,
}

const fn word(lookup: &'static str, presentation: &'static str) -> RecommendationWord {
    RecommendationWord {
        lookup,
        presentation,
    }
}

const HEADINGS: &[RecommendationWord] = &[
    word("Settings", "*** Settings ***"),
    word("Variables", "*** Variables ***"),
    word("Test Cases", "*** Test Cases ***"),
    word("Tasks", "*** Tasks ***"),
    word("Keywords", "*** Keywords ***"),
    word("Comments", "*** Comments ***"),
];

const SETTINGS: &[RecommendationWord] = &[
    word("Documentation", "Documentation"),
    word("Metadata", "Metadata"),
    word("Suite Setup", "Suite Setup"),
    word("Suite Teardown", "Suite Teardown"),
    word("Test Setup", "Test Setup"),
    word("Test Teardown", "Test Teardown"),
    word("Test Template", "Test Template"),
    word("Test Timeout", "Test Timeout"),
    word("Test Tags", "Test Tags"),
    word("Force Tags", "Force Tags"),
    word("Default Tags", "Default Tags"),
    word("Task Setup", "Task Setup"),
    word("Task Teardown", "Task Teardown"),
    word("Task Template", "Task Template"),
    word("Task Timeout", "Task Timeout"),
    word("Keyword Tags", "Keyword Tags"),
];

const IMPORTS: &[RecommendationWord] = &[
    word("Library", "Library"),
    word("Resource", "Resource"),
    word("Variables", "Variables"),
];

const BRACKET_SETTINGS: &[RecommendationWord] = &[
    word("Documentation", "[Documentation]"),
    word("Tags", "[Tags]"),
    word("Setup", "[Setup]"),
    word("Teardown", "[Teardown]"),
    word("Template", "[Template]"),
    word("Timeout", "[Timeout]"),
    word("Arguments", "[Arguments]"),
    word("Return", "[Return]"),
];

const GHERKIN: &[RecommendationWord] = &[
    word("Given", "Given"),
    word("When", "When"),
    word("Then", "Then"),
    word("And", "And"),
    word("But", "But"),
];

const SYNTAX_MARKERS: &[RecommendationWord] = &[
    word("FOR", "FOR"),
    word("IN", "IN"),
    word("IN RANGE", "IN RANGE"),
    word("IN ENUMERATE", "IN ENUMERATE"),
    word("IN ZIP", "IN ZIP"),
    word("END", "END"),
    word("IF", "IF"),
    word("ELSE IF", "ELSE IF"),
    word("ELSE", "ELSE"),
    word("WHILE", "WHILE"),
    word("TRY", "TRY"),
    word("EXCEPT", "EXCEPT"),
    word("FINALLY", "FINALLY"),
    word("BREAK", "BREAK"),
    word("CONTINUE", "CONTINUE"),
    word("RETURN", "RETURN"),
];

/// Reserved words of a category, in presentation order.
pub fn recommendations(category: WordCategory) -> &'static [RecommendationWord] {
    match category {
        WordCategory::Heading => HEADINGS,
        WordCategory::Setting => SETTINGS,
        WordCategory::Import => IMPORTS,
        WordCategory::BracketSetting => BRACKET_SETTINGS,
        WordCategory::Gherkin => GHERKIN,
        WordCategory::SyntaxMarker => SYNTAX_MARKERS,
    }
}

/// Lowercase and drop spaces, the engine's setting-name normalization.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// `Library`, `Resource`, or `Variables`.
pub fn is_import_setting(name: &str) -> bool {
    matches!(normalize(name).as_str(), "library" | "resource" | "variables")
}

/// Settings whose first value is a keyword invocation.
pub fn is_fixture_setting(name: &str) -> bool {
    matches!(
        normalize(name).as_str(),
        "suitesetup"
            | "suiteteardown"
            | "testsetup"
            | "testteardown"
            | "testtemplate"
            | "tasksetup"
            | "taskteardown"
            | "tasktemplate"
    )
}

/// Bracket settings known to the engine, compared without brackets.
pub fn is_known_bracket_setting(name: &str) -> bool {
    let inner = name.trim_start_matches('[').trim_end_matches(']');
    let normalized = normalize(inner);
    BRACKET_SETTINGS
        .iter()
        .any(|w| normalize(w.lookup) == normalized)
}

/// Bracket settings whose first value is a keyword invocation.
pub fn is_fixture_bracket_setting(name: &str) -> bool {
    matches!(
        normalize(name).as_str(),
        "[setup]" | "[teardown]" | "[template]"
    )
}

/// `[Arguments]`, whose values declare local variables.
pub fn is_arguments_bracket_setting(name: &str) -> bool {
    normalize(name) == "[arguments]"
}

/// Control structure markers. Matched case-sensitively, like the engine does.
pub fn is_control_marker(cell: &str) -> bool {
    matches!(
        cell,
        "FOR"
            | ":FOR"
            | "END"
            | "IF"
            | "ELSE IF"
            | "ELSE"
            | "WHILE"
            | "TRY"
            | "EXCEPT"
            | "FINALLY"
            | "BREAK"
            | "CONTINUE"
            | "RETURN"
    )
}

/// Separators between loop variables and loop values.
pub fn is_loop_in_marker(cell: &str) -> bool {
    matches!(cell, "IN" | "IN RANGE" | "IN ENUMERATE" | "IN ZIP")
}

/// Strip a leading Gherkin prefix (`Given`, `When`, ...) from a keyword invocation.
pub fn strip_gherkin_prefix(text: &str) -> Option<&str> {
    let (first, rest) = text.trim_start().split_once(char::is_whitespace)?;
    GHERKIN
        .iter()
        .any(|w| w.lookup.eq_ignore_ascii_case(first))
        .then(|| rest.trim_start())
        .filter(|rest| !rest.is_empty())
}
