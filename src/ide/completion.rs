//! Completion suggestions implementation.
//!
//! Candidates depend on the section the cursor is in:
//!
//! | section              | offered                                                  |
//! |----------------------|----------------------------------------------------------|
//! | anywhere             | headings                                                 |
//! | test cases / tasks   | bracket settings, markers, Gherkin, keywords, variables  |
//! | keywords             | bracket settings, markers, keywords, variables           |
//! | settings             | settings, imports, variables                             |
//!
//! Only candidates with a lookup string starting with the text typed so far
//! in the current cell are returned.

use std::sync::Arc;

use indexmap::IndexSet;

use super::text_utils::{capitalize_words, typed_prefix};
use crate::base::{FileId, TextSize};
use crate::hir::{
    DefinedKeyword, DefinedVariable, FileScope, HeadingData, ImportContext, Workspace,
};
use crate::parser::keywords::{RecommendationWord, WordCategory, recommendations};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Heading,
    Setting,
    Import,
    BracketSetting,
    Gherkin,
    SyntaxMarker,
    Keyword,
    Variable,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Heading => 9,  // Module
            CompletionKind::Setting => 10, // Property
            CompletionKind::Import => 9,   // Module
            CompletionKind::BracketSetting => 10,
            CompletionKind::Gherkin | CompletionKind::SyntaxMarker => 14, // Keyword
            CompletionKind::Keyword => 3,  // Function
            CompletionKind::Variable => 6, // Variable
        }
    }
}

/// What the editor appends after inserting the item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TailKind {
    None,
    /// A single space.
    Space,
    /// A cell separator: two spaces, reusing spaces already there.
    SuperSpace,
    NewLine,
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    pub kind: CompletionKind,
    /// Strings the typed prefix is matched against.
    pub lookup_strings: Vec<Arc<str>>,
    pub tail: TailKind,
}

impl CompletionItem {
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind, tail: TailKind) -> Self {
        let label = label.into();
        Self {
            lookup_strings: vec![label.clone()],
            label,
            kind,
            tail,
        }
    }

    /// Add lookup strings, skipping duplicates.
    pub fn with_lookup_strings<I, S>(mut self, strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        for string in strings {
            let string = string.into();
            if !self.lookup_strings.contains(&string) {
                self.lookup_strings.push(string);
            }
        }
        self
    }

    /// Case-insensitive prefix match against any lookup string.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.to_lowercase();
        self.lookup_strings
            .iter()
            .any(|lookup| lookup.to_lowercase().starts_with(&prefix))
    }
}

fn syntax_items(category: WordCategory, kind: CompletionKind, tail: TailKind) -> Vec<CompletionItem> {
    recommendations(category)
        .iter()
        .map(|&RecommendationWord { lookup, presentation }| {
            CompletionItem::new(presentation, kind, tail).with_lookup_strings([
                lookup.to_string(),
                capitalize_words(lookup),
                capitalize_words(presentation),
                presentation.to_lowercase(),
            ])
        })
        .collect()
}

fn keyword_item(keyword: &DefinedKeyword, capitalize: bool) -> CompletionItem {
    let text = keyword.name();
    let label = if capitalize {
        capitalize_words(text)
    } else {
        text.to_string()
    };
    let tail = if keyword.has_arguments() {
        TailKind::SuperSpace
    } else {
        TailKind::None
    };
    CompletionItem::new(label, CompletionKind::Keyword, tail).with_lookup_strings([
        text.to_string(),
        capitalize_words(text),
        text.to_lowercase(),
    ])
}

fn variable_item(variable: &DefinedVariable) -> CompletionItem {
    let text = variable.lookup();
    // only the first word is inserted
    let word = text.split_whitespace().next().unwrap_or(text);
    CompletionItem::new(word, CompletionKind::Variable, TailKind::None).with_lookup_strings([
        text.to_string(),
        capitalize_words(text),
        text.to_lowercase(),
        word.to_string(),
        word.to_lowercase(),
    ])
}

/// Completion candidates at `offset` in `file`.
pub fn completions(workspace: &Workspace, file: FileId, offset: TextSize) -> Vec<CompletionItem> {
    let Some(robot_file) = workspace.file(file) else {
        return Vec::new();
    };
    let heading = robot_file.heading_at(offset);
    let in_test_cases = heading.as_ref().is_some_and(HeadingData::contains_test_cases);
    let in_keywords = heading
        .as_ref()
        .is_some_and(HeadingData::contains_keyword_definitions);
    let in_settings = heading.as_ref().is_some_and(HeadingData::is_settings);

    let mut items = syntax_items(WordCategory::Heading, CompletionKind::Heading, TailKind::NewLine);
    if in_test_cases || in_keywords {
        items.extend(syntax_items(
            WordCategory::BracketSetting,
            CompletionKind::BracketSetting,
            TailKind::SuperSpace,
        ));
        items.extend(syntax_items(
            WordCategory::SyntaxMarker,
            CompletionKind::SyntaxMarker,
            TailKind::SuperSpace,
        ));
    }
    if in_test_cases {
        items.extend(syntax_items(WordCategory::Gherkin, CompletionKind::Gherkin, TailKind::Space));
    }
    if in_settings {
        items.extend(syntax_items(WordCategory::Setting, CompletionKind::Setting, TailKind::SuperSpace));
        items.extend(syntax_items(WordCategory::Import, CompletionKind::Import, TailKind::SuperSpace));
    }

    if in_test_cases || in_keywords || in_settings {
        let scope = FileScope::new(workspace, robot_file);
        if in_test_cases || in_keywords {
            let capitalize = workspace.options().capitalize_keywords;
            let keywords: IndexSet<&DefinedKeyword> = scope.keywords().collect();
            items.extend(keywords.into_iter().map(|keyword| keyword_item(keyword, capitalize)));
        }

        let variables: IndexSet<&DefinedVariable> = scope.variables_at(offset).collect();
        items.extend(variables.into_iter().map(variable_item));
    }

    let text = robot_file.syntax().source_text();
    let prefix = typed_prefix(&text, offset);
    if !prefix.is_empty() {
        items.retain(|item| item.matches_prefix(prefix));
    }
    items
}
