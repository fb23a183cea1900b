//! Keyword and variable resolution.
//!
//! Resolution is first-match over an ordered candidate list:
//!
//! 1. keywords declared in the file itself
//! 2. keywords of every imported resource and library, in import order
//!    (`BuiltIn` first)
//! 3. the same search without a Gherkin prefix (`Given`, `When`, ...)
//! 4. a direct member lookup in each imported library
//!
//! Variables resolve against built-ins, own declarations, and the variables
//! of resource and variable-file imports. Declarations local to the
//! enclosing test case or keyword win over file-level ones.
//!
//! Absence of a result means "no information", never an error.

use std::sync::Arc;

use smol_str::SmolStr;

use super::file::RobotFile;
use super::imports::{ImportContext, KeywordFile};
use super::library::PyClass;
use super::pattern::keyword_to_function;
use super::symbols::{DefinedKeyword, DefinedVariable, ImportType, SymbolLocation, Visibility};
use crate::base::constants::NAMESPACE_SEPARATOR;
use crate::base::{FileId, TextSize};
use crate::parser::keywords::strip_gherkin_prefix;

// ============================================================================
// FILE SCOPE (computed once per query batch)
// ============================================================================

/// Everything visible from one file, gathered once for repeated lookups.
pub struct FileScope<'a> {
    ctx: &'a dyn ImportContext,
    file: FileId,
    own_keywords: Vec<DefinedKeyword>,
    imported_keywords: Vec<DefinedKeyword>,
    libraries: Vec<(SmolStr, Arc<PyClass>)>,
    variables: Vec<DefinedVariable>,
}

impl<'a> FileScope<'a> {
    pub fn new(ctx: &'a dyn ImportContext, file: &RobotFile) -> Self {
        let include_transitive = ctx.options().allow_transitive_imports;
        let mut imported_keywords = Vec::new();
        let mut libraries = Vec::new();
        for imported in file.imported_files(ctx, include_transitive) {
            if imported.import_type() == ImportType::Variables {
                continue;
            }
            imported_keywords.extend(imported.defined_keywords(ctx));
            if let KeywordFile::Library { namespace, class } = imported {
                libraries.push((namespace, class));
            }
        }

        Self {
            ctx,
            file: file.id(),
            own_keywords: file.defined_keywords(),
            imported_keywords,
            libraries,
            variables: file.defined_variables(ctx),
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    /// Keywords in resolution order: own first, then imported.
    pub fn keywords(&self) -> impl Iterator<Item = &DefinedKeyword> {
        self.own_keywords.iter().chain(self.imported_keywords.iter())
    }

    /// Every variable visible at `offset`.
    pub fn variables_at(&self, offset: TextSize) -> impl Iterator<Item = &DefinedVariable> {
        self.variables
            .iter()
            .filter(move |variable| variable.is_in_scope(self.file, offset))
    }

    fn find_keyword(&self, text: &str) -> Option<&DefinedKeyword> {
        self.keywords().find(|keyword| keyword.matches(text))
    }

    /// Resolve invocation `text` to its declaration.
    pub fn resolve_keyword(&self, text: &str) -> Option<DefinedKeyword> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.find_keyword(text)
            .or_else(|| strip_gherkin_prefix(text).and_then(|rest| self.find_keyword(rest)))
            .cloned()
            .or_else(|| self.resolve_library_member(text))
    }

    /// Ask the library provider for a member named like `text`.
    ///
    /// `Namespace.Keyword Name` only searches the library imported under that
    /// namespace; plain text searches every imported library.
    pub fn resolve_library_member(&self, text: &str) -> Option<DefinedKeyword> {
        let (namespace, name) = match text.rsplit_once(NAMESPACE_SEPARATOR) {
            Some((ns, name)) if !ns.is_empty() && !name.trim().is_empty() => (Some(ns), name),
            _ => (None, text),
        };
        let function = keyword_to_function(name);
        let provider = self.ctx.libraries();

        self.libraries
            .iter()
            .filter(|(library_ns, _)| namespace.is_none_or(|ns| library_ns.eq_ignore_ascii_case(ns)))
            .find_map(|(library_ns, class)| {
                let member = provider.find_member(&class.qualified_name, &function)?;
                Some(DefinedKeyword::new(
                    Some(library_ns.as_str()),
                    &member.name,
                    member.has_arguments,
                    SymbolLocation::Library {
                        library: class.qualified_name.clone(),
                        member: member.name.clone(),
                    },
                ))
            })
    }

    /// Resolve a `${...}` usage at `offset`.
    pub fn resolve_variable(&self, text: &str, offset: TextSize) -> Option<&DefinedVariable> {
        let candidates = || {
            self.variables_at(offset)
                .filter(|variable| variable.matches(text))
        };
        candidates()
            .find(|variable| matches!(variable.visibility(), Visibility::Within { .. }))
            .or_else(|| candidates().next())
    }
}

// ============================================================================
// ONE-SHOT QUERIES
// ============================================================================

/// Resolve a keyword invocation written in `file`.
pub fn resolve_keyword(
    ctx: &dyn ImportContext,
    file: &RobotFile,
    text: &str,
) -> Option<DefinedKeyword> {
    FileScope::new(ctx, file).resolve_keyword(text)
}

/// Resolve a variable usage written in `file` at `offset`.
pub fn resolve_variable(
    ctx: &dyn ImportContext,
    file: &RobotFile,
    text: &str,
    offset: TextSize,
) -> Option<DefinedVariable> {
    FileScope::new(ctx, file)
        .resolve_variable(text, offset)
        .cloned()
}
