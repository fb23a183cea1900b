//! Keyword and variable symbols.
//!
//! A [`DefinedKeyword`] or [`DefinedVariable`] is a declaration together with
//! a matcher that answers "does this invocation text refer to me?". Both are
//! immutable values produced by per-file extraction (see `file.rs`) or by the
//! library provider, and are cheap to clone.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use regex::Regex;
use smol_str::SmolStr;

use super::pattern::{
    compile_pattern, function_to_keyword, keyword_pattern, normalize_keyword_name,
    variable_pattern,
};
use crate::base::{FileId, TextRange, TextSize};
use crate::parser::variables::{VARIABLE_SIGILS, strip_assignment};

// ============================================================================
// LOCATIONS
// ============================================================================

/// Where a symbol is declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolLocation {
    /// A declaration cell in a robot document.
    File { file: FileId, range: TextRange },
    /// A member of an embedded-language library class or module.
    Library { library: SmolStr, member: SmolStr },
}

impl SymbolLocation {
    pub fn file(&self) -> Option<FileId> {
        match self {
            SymbolLocation::File { file, .. } => Some(*file),
            SymbolLocation::Library { .. } => None,
        }
    }

    pub fn range(&self) -> Option<TextRange> {
        match self {
            SymbolLocation::File { range, .. } => Some(*range),
            SymbolLocation::Library { .. } => None,
        }
    }
}

// ============================================================================
// IMPORTS
// ============================================================================

/// Kind of an import setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportType {
    Library,
    Resource,
    Variables,
}

impl ImportType {
    /// Classify the first cell of an import row.
    pub fn from_setting(name: &str) -> Option<Self> {
        match crate::parser::keywords::normalize(name).as_str() {
            "library" => Some(ImportType::Library),
            "resource" => Some(ImportType::Resource),
            "variables" => Some(ImportType::Variables),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportType::Library => "Library",
            ImportType::Resource => "Resource",
            ImportType::Variables => "Variables",
        }
    }
}

// ============================================================================
// KEYWORDS
// ============================================================================

/// A keyword declaration: user keyword, or library member.
///
/// Identity is the normalized name only; two keywords with the same name
/// from different sources collapse in sets. Use [`DefinedKeyword::is_same_symbol`]
/// to compare declarations.
#[derive(Clone)]
pub struct DefinedKeyword {
    name: Arc<str>,
    key: Arc<str>,
    namespace: Option<SmolStr>,
    has_arguments: bool,
    matcher: Option<Regex>,
    location: SymbolLocation,
}

impl DefinedKeyword {
    pub fn new(
        namespace: Option<&str>,
        name: &str,
        has_arguments: bool,
        location: SymbolLocation,
    ) -> Self {
        let name = function_to_keyword(name);
        let matcher = compile_pattern(&keyword_pattern(namespace, &name));
        Self {
            key: normalize_keyword_name(&name).into(),
            name: name.into(),
            namespace: namespace.filter(|ns| !ns.is_empty()).map(SmolStr::new),
            has_arguments,
            matcher,
            location,
        }
    }

    /// Keyword name as displayed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized name used for identity.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn has_arguments(&self) -> bool {
        self.has_arguments
    }

    pub fn location(&self) -> &SymbolLocation {
        &self.location
    }

    /// Whether `text`, as written at an invocation site, refers to this keyword.
    pub fn matches(&self, text: &str) -> bool {
        let text = function_to_keyword(text);
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(text.trim()))
    }

    /// Same name and same declaration site.
    pub fn is_same_symbol(&self, other: &DefinedKeyword) -> bool {
        self.key == other.key && self.location == other.location
    }
}

impl PartialEq for DefinedKeyword {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for DefinedKeyword {}

impl Hash for DefinedKeyword {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for DefinedKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinedKeyword")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("has_arguments", &self.has_arguments)
            .field("location", &self.location)
            .finish()
    }
}

impl fmt::Display for DefinedKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// VARIABLES
// ============================================================================

/// Lifetime of a variable value at run time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariableScope {
    Global,
    Suite,
    Test,
    Local,
}

/// Where a variable can be referenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Everywhere,
    /// Inside a single test case or keyword body.
    Within { file: FileId, range: TextRange },
}

/// A variable declaration.
///
/// The matcher is compiled on first use and lives as long as the value,
/// which in turn lives as long as the owning file's heading cache.
#[derive(Clone)]
pub struct DefinedVariable {
    text: Arc<str>,
    scope: VariableScope,
    visibility: Visibility,
    matcher: OnceLock<Option<Regex>>,
    location: SymbolLocation,
}

impl DefinedVariable {
    /// `text` is the declaration as written; a trailing `=` is dropped.
    pub fn new(
        text: &str,
        scope: VariableScope,
        visibility: Visibility,
        location: SymbolLocation,
    ) -> Self {
        Self {
            text: strip_assignment(text.trim()).into(),
            scope,
            visibility,
            matcher: OnceLock::new(),
            location,
        }
    }

    /// Declaration text, e.g. `${HOST}`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text offered by completion.
    pub fn lookup(&self) -> &str {
        &self.text
    }

    pub fn scope(&self) -> VariableScope {
        self.scope
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn location(&self) -> &SymbolLocation {
        &self.location
    }

    /// Declared names that embed other variables, like `${a${b}}`.
    pub fn is_nested(&self) -> bool {
        let closers = self.text.matches('}').count();
        let openers = self
            .text
            .as_bytes()
            .windows(2)
            .filter(|w| VARIABLE_SIGILS.contains(&w[0]) && w[1] == b'{')
            .count();
        closers > 1 && openers > 1
    }

    /// Whether the variable is visible at `offset` in `file`.
    pub fn is_in_scope(&self, file: FileId, offset: TextSize) -> bool {
        match self.visibility {
            Visibility::Everywhere => true,
            Visibility::Within { file: owner, range } => {
                owner == file && range.contains_inclusive(offset)
            }
        }
    }

    /// Whether `text` (a `${...}` usage) refers to this variable.
    pub fn matches(&self, text: &str) -> bool {
        self.matcher
            .get_or_init(|| compile_pattern(&variable_pattern(&self.text)))
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(strip_assignment(text.trim())))
    }
}

impl PartialEq for DefinedVariable {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.visibility == other.visibility
    }
}

impl Eq for DefinedVariable {}

impl Hash for DefinedVariable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.visibility.hash(state);
    }
}

impl fmt::Debug for DefinedVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinedVariable")
            .field("text", &self.text)
            .field("scope", &self.scope)
            .field("visibility", &self.visibility)
            .field("location", &self.location)
            .finish()
    }
}

impl fmt::Display for DefinedVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
