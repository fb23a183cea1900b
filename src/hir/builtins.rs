//! Project-wide built-in symbols.
//!
//! The engine reserves a fixed set of variables (`${CURDIR}`, `${TEST NAME}`,
//! ...). They are offered only when the `BuiltIn` module is resolvable.
//! Reserved variables, the `BuiltIn` library and the keywords of every
//! imported library are computed once per [`ProjectData`] and shared
//! read-only by every file.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::imports::KeywordFile;
use super::library::{LibraryProvider, PyClass};
use super::symbols::{DefinedKeyword, DefinedVariable, SymbolLocation, VariableScope, Visibility};
use crate::base::constants::ROBOT_BUILT_IN_MODULE;

/// Engine-reserved variables and their scopes.
pub const RESERVED_VARIABLES: &[(&str, VariableScope)] = &[
    ("${CURDIR}", VariableScope::Global),
    ("${TEMPDIR}", VariableScope::Global),
    ("${EXECDIR}", VariableScope::Global),
    ("${/}", VariableScope::Global),
    ("${:}", VariableScope::Global),
    ("${\\n}", VariableScope::Global),
    ("${SPACE}", VariableScope::Global),
    ("${True}", VariableScope::Global),
    ("${False}", VariableScope::Global),
    ("${None}", VariableScope::Global),
    ("${null}", VariableScope::Global),
    ("${EMPTY}", VariableScope::Global),
    ("@{EMPTY}", VariableScope::Global),
    ("&{EMPTY}", VariableScope::Global),
    ("${TEST NAME}", VariableScope::Test),
    ("@{TEST TAGS}", VariableScope::Test),
    ("${TEST DOCUMENTATION}", VariableScope::Test),
    ("${TEST STATUS}", VariableScope::Test),
    ("${TEST MESSAGE}", VariableScope::Test),
    ("${PREV TEST NAME}", VariableScope::Global),
    ("${PREV TEST STATUS}", VariableScope::Global),
    ("${PREV TEST MESSAGE}", VariableScope::Global),
    ("${SUITE NAME}", VariableScope::Suite),
    ("${SUITE SOURCE}", VariableScope::Suite),
    ("${SUITE DOCUMENTATION}", VariableScope::Suite),
    ("&{SUITE METADATA}", VariableScope::Suite),
    ("${SUITE STATUS}", VariableScope::Suite),
    ("${SUITE MESSAGE}", VariableScope::Suite),
    ("${KEYWORD STATUS}", VariableScope::Local),
    ("${KEYWORD MESSAGE}", VariableScope::Local),
    ("${LOG LEVEL}", VariableScope::Global),
    ("${OUTPUT FILE}", VariableScope::Global),
    ("${LOG FILE}", VariableScope::Global),
    ("${REPORT FILE}", VariableScope::Global),
    ("${DEBUG FILE}", VariableScope::Global),
    ("${OUTPUT DIR}", VariableScope::Global),
    ("&{OPTIONS}", VariableScope::Global),
];

/// Project-scoped state shared by every file of one workspace.
#[derive(Debug, Default)]
pub struct ProjectData {
    built_in_library: Mutex<Option<Option<KeywordFile>>>,
    built_in_variables: Mutex<Option<Arc<[DefinedVariable]>>>,
    /// Keyword lists keyed by (namespace, qualified class name).
    library_keywords: Mutex<FxHashMap<(SmolStr, SmolStr), Arc<[DefinedKeyword]>>>,
}

impl ProjectData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserved variables, computed by the first caller and then shared.
    ///
    /// Empty when the `BuiltIn` module cannot be resolved. The empty result is
    /// cached too; call [`ProjectData::reset`] after the library set changes.
    pub fn built_in_variables(&self, libraries: &dyn LibraryProvider) -> Arc<[DefinedVariable]> {
        let mut cached = self.built_in_variables.lock();
        if let Some(variables) = cached.as_ref() {
            return variables.clone();
        }

        let variables: Arc<[DefinedVariable]> =
            if libraries.find_module(ROBOT_BUILT_IN_MODULE).is_some() {
                RESERVED_VARIABLES
                    .iter()
                    .map(|&(text, scope)| {
                        DefinedVariable::new(
                            text,
                            scope,
                            Visibility::Everywhere,
                            SymbolLocation::Library {
                                library: ROBOT_BUILT_IN_MODULE.into(),
                                member: text.into(),
                            },
                        )
                    })
                    .collect()
            } else {
                Arc::from(Vec::new())
            };
        tracing::debug!(
            count = variables.len(),
            "initialized built-in variables"
        );
        *cached = Some(variables.clone());
        variables
    }

    /// The always-imported `BuiltIn` library, looked up once.
    pub fn built_in_library(&self, libraries: &dyn LibraryProvider) -> Option<KeywordFile> {
        self.built_in_library
            .lock()
            .get_or_insert_with(|| KeywordFile::built_in(libraries))
            .clone()
    }

    /// Keywords of the `BuiltIn` library; empty when it cannot be resolved.
    pub fn built_in_keywords(&self, libraries: &dyn LibraryProvider) -> Arc<[DefinedKeyword]> {
        match self.built_in_library(libraries) {
            Some(KeywordFile::Library { namespace, class }) => {
                self.library_keywords(&namespace, &class)
            }
            _ => Arc::from(Vec::new()),
        }
    }

    /// Keywords of `class` imported under `namespace`, built on first use.
    pub fn library_keywords(&self, namespace: &SmolStr, class: &PyClass) -> Arc<[DefinedKeyword]> {
        let key = (namespace.clone(), class.qualified_name.clone());
        if let Some(keywords) = self.library_keywords.lock().get(&key) {
            return keywords.clone();
        }

        let keywords: Arc<[DefinedKeyword]> = class
            .members
            .iter()
            .map(|member| {
                DefinedKeyword::new(
                    Some(namespace.as_str()),
                    &member.name,
                    member.has_arguments,
                    SymbolLocation::Library {
                        library: class.qualified_name.clone(),
                        member: member.name.clone(),
                    },
                )
            })
            .collect();
        tracing::debug!(
            library = %class.qualified_name,
            namespace = %namespace,
            count = keywords.len(),
            "initialized library keywords"
        );
        self.library_keywords
            .lock()
            .entry(key)
            .or_insert(keywords)
            .clone()
    }

    /// Drop cached built-ins and library keywords; the next caller recomputes them.
    pub fn reset(&self) {
        *self.built_in_library.lock() = None;
        *self.built_in_variables.lock() = None;
        self.library_keywords.lock().clear();
    }
}
