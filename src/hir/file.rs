//! Per-document symbol model.
//!
//! A [`RobotFile`] owns a parsed document and lazily extracts one
//! [`HeadingData`] per section: declared keywords, test cases, variables,
//! imports, keyword invocations, and variable usages. The extraction is
//! cached together with the syntax version it was built from, so a text
//! change drops every derived value (including compiled variable matchers)
//! at once.
//!
//! Cross-file queries take an [`ImportContext`] and never mutate anything
//! but the cache.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::imports::{ImportContext, KeywordFile, resolve_import};
use super::resolve::FileScope;
use super::symbols::{
    DefinedKeyword, DefinedVariable, ImportType, SymbolLocation, VariableScope, Visibility,
};
use crate::base::{FileId, TextRange, TextSize};
use crate::parser::keywords::{self, HeadingKind};
use crate::parser::variables::{is_variable_cell, variable_ranges};
use crate::parser::{AstNode, BodyRow, BracketSetting, Definition, Section, SourceFile};
use crate::syntax::SyntaxFile;

// ============================================================================
// EXTRACTED DATA
// ============================================================================

/// An import setting as written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImportDecl {
    pub import_type: ImportType,
    /// First argument: library name, resource path, or variable file.
    pub target: Arc<str>,
    /// `WITH NAME` / `AS` alias of a library import.
    pub alias: Option<SmolStr>,
    /// Range of the target cell.
    pub range: TextRange,
}

/// A test case or task.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TestCase {
    pub name: Arc<str>,
    /// Range of the name cell.
    pub range: TextRange,
    /// Range of the whole definition, body included.
    pub body_range: TextRange,
}

/// A keyword invocation site.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeywordInvocation {
    pub text: Arc<str>,
    pub range: TextRange,
}

/// A `${...}` occurrence that reads a variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariableUsage {
    pub text: Arc<str>,
    pub range: TextRange,
}

/// Everything extracted from one `*** Section ***`.
#[derive(Clone, Debug)]
pub struct HeadingData {
    pub kind: HeadingKind,
    pub range: TextRange,
    pub keywords: Vec<DefinedKeyword>,
    pub test_cases: Vec<TestCase>,
    pub variables: Vec<DefinedVariable>,
    pub imports: Vec<ImportDecl>,
    pub invocations: Vec<KeywordInvocation>,
    pub variable_usages: Vec<VariableUsage>,
}

impl HeadingData {
    fn new(kind: HeadingKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            keywords: Vec::new(),
            test_cases: Vec::new(),
            variables: Vec::new(),
            imports: Vec::new(),
            invocations: Vec::new(),
            variable_usages: Vec::new(),
        }
    }

    pub fn is_settings(&self) -> bool {
        self.kind.is_settings()
    }

    pub fn contains_test_cases(&self) -> bool {
        self.kind.contains_test_cases()
    }

    pub fn contains_keyword_definitions(&self) -> bool {
        self.kind.contains_keyword_definitions()
    }
}

// ============================================================================
// ROBOT FILE
// ============================================================================

type HeadingCache = Option<(u64, Arc<[HeadingData]>)>;

/// A robot document and its cached symbol model.
pub struct RobotFile {
    id: FileId,
    syntax: SyntaxFile,
    headings: RwLock<HeadingCache>,
}

impl fmt::Debug for RobotFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobotFile")
            .field("id", &self.id)
            .field("version", &self.syntax.version())
            .finish()
    }
}

impl RobotFile {
    pub fn new(id: FileId, text: &str) -> Self {
        Self::from_syntax(id, SyntaxFile::new(text))
    }

    pub fn from_syntax(id: FileId, syntax: SyntaxFile) -> Self {
        Self {
            id,
            syntax,
            headings: RwLock::new(None),
        }
    }

    /// Replace the document text. Derived data is rebuilt on next access.
    pub fn set_text(&mut self, text: &str) {
        self.syntax.set_text(text);
        *self.headings.get_mut() = None;
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn syntax(&self) -> &SyntaxFile {
        &self.syntax
    }

    pub fn version(&self) -> u64 {
        self.syntax.version()
    }

    /// Per-section data, rebuilt when the syntax version moved.
    pub fn headings(&self) -> Arc<[HeadingData]> {
        let version = self.syntax.version();
        if let Some((cached_version, headings)) = self.headings.read().as_ref() {
            if *cached_version == version {
                return headings.clone();
            }
        }

        let headings: Arc<[HeadingData]> = match self.syntax.source_file() {
            Some(source) => collect_headings(self.id, &source).into(),
            None => Arc::from(Vec::new()),
        };
        tracing::trace!(file = %self.id, version, count = headings.len(), "collected headings");
        *self.headings.write() = Some((version, headings.clone()));
        headings
    }

    /// Variables declared in this document. Never looks at imports.
    pub fn own_defined_variables(&self) -> Vec<DefinedVariable> {
        let mut results = IndexSet::new();
        for heading in self.headings().iter() {
            results.extend(heading.variables.iter().cloned());
        }
        results.into_iter().collect()
    }

    /// Keywords declared in this document.
    pub fn defined_keywords(&self) -> Vec<DefinedKeyword> {
        let mut results = IndexSet::new();
        for heading in self.headings().iter() {
            results.extend(heading.keywords.iter().cloned());
        }
        results.into_iter().collect()
    }

    /// Built-ins, own variables, and the own variables of every resource
    /// and variable-file import. Library imports never contribute.
    pub fn defined_variables(&self, ctx: &dyn ImportContext) -> Vec<DefinedVariable> {
        let mut results: IndexSet<DefinedVariable> = IndexSet::new();
        results.extend(
            ctx.project()
                .built_in_variables(ctx.libraries())
                .iter()
                .cloned(),
        );
        results.extend(self.own_defined_variables());

        let include_transitive = ctx.options().allow_transitive_imports;
        for imported in self.imported_files(ctx, include_transitive) {
            if matches!(
                imported.import_type(),
                ImportType::Variables | ImportType::Resource
            ) {
                results.extend(imported.own_defined_variables(ctx));
            }
        }
        results.into_iter().collect()
    }

    /// Import declarations of every section, in document order.
    pub fn imports(&self) -> Vec<ImportDecl> {
        self.headings()
            .iter()
            .flat_map(|heading| heading.imports.iter().cloned())
            .collect()
    }

    /// Resolved imports, `BuiltIn` first, in first-seen order.
    ///
    /// With `include_transitive`, the direct imports of each imported
    /// resource are followed too; a target already collected is never
    /// visited again, so import cycles terminate.
    pub fn imported_files(&self, ctx: &dyn ImportContext, include_transitive: bool) -> Vec<KeywordFile> {
        let mut results = IndexSet::new();
        if let Some(built_in) = ctx.project().built_in_library(ctx.libraries()) {
            results.insert(built_in);
        }
        for heading in self.headings().iter() {
            for decl in &heading.imports {
                if let Some(file) = resolve_import(ctx, self.id, decl) {
                    add_keyword_files(ctx, &mut results, file, include_transitive);
                }
            }
        }
        results.into_iter().collect()
    }

    /// Documents that provide a keyword or variable this one actually uses.
    pub fn files_from_invoked_keywords_and_variables(
        &self,
        ctx: &dyn ImportContext,
    ) -> FxHashSet<FileId> {
        let scope = FileScope::new(ctx, self);
        let mut results = FxHashSet::default();
        for heading in self.headings().iter() {
            for invocation in &heading.invocations {
                if let Some(file) = scope
                    .resolve_keyword(&invocation.text)
                    .and_then(|keyword| keyword.location().file())
                {
                    results.insert(file);
                }
            }
            for usage in &heading.variable_usages {
                if let Some(file) = scope
                    .resolve_variable(&usage.text, usage.range.start())
                    .and_then(|variable| variable.location().file())
                {
                    results.insert(file);
                }
            }
        }
        results
    }

    /// Invocation sites resolving to `definition`, or every invocation site.
    pub fn keyword_references(
        &self,
        ctx: &dyn ImportContext,
        definition: Option<&DefinedKeyword>,
    ) -> Vec<KeywordInvocation> {
        let headings = self.headings();
        let invocations = headings.iter().flat_map(|heading| heading.invocations.iter());
        let Some(definition) = definition else {
            return invocations.cloned().collect();
        };

        let scope = FileScope::new(ctx, self);
        invocations
            .filter(|invocation| {
                scope
                    .resolve_keyword(&invocation.text)
                    .is_some_and(|keyword| keyword.is_same_symbol(definition))
            })
            .cloned()
            .collect()
    }

    pub fn test_cases(&self) -> Vec<TestCase> {
        self.headings()
            .iter()
            .flat_map(|heading| heading.test_cases.iter().cloned())
            .collect()
    }

    /// The section containing `offset`.
    pub fn heading_at(&self, offset: TextSize) -> Option<HeadingData> {
        self.headings()
            .iter()
            .find(|heading| heading.range.contains_inclusive(offset))
            .cloned()
    }
}

fn add_keyword_files(
    ctx: &dyn ImportContext,
    results: &mut IndexSet<KeywordFile>,
    current: KeywordFile,
    include_transitive: bool,
) {
    if !results.insert(current.clone()) || !include_transitive {
        return;
    }
    for file in current.imported_files(ctx) {
        if results.contains(&file) {
            tracing::trace!(target = ?file, "import already collected, skipping");
            continue;
        }
        add_keyword_files(ctx, results, file, true);
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Keywords whose first argument declares a variable.
fn set_variable_scope(keyword: &str) -> Option<VariableScope> {
    match keywords::normalize(keyword).replace('_', "").as_str() {
        "setglobalvariable" => Some(VariableScope::Global),
        "setsuitevariable" => Some(VariableScope::Suite),
        "settestvariable" | "settaskvariable" => Some(VariableScope::Test),
        _ => None,
    }
}

struct Extractor {
    file: FileId,
    data: HeadingData,
}

impl Extractor {
    fn location(&self, range: TextRange) -> SymbolLocation {
        SymbolLocation::File {
            file: self.file,
            range,
        }
    }

    fn add_usages(&mut self, text: &str, range: TextRange) {
        for local in variable_ranges(text) {
            self.data.variable_usages.push(VariableUsage {
                text: text[local].into(),
                range: local + range.start(),
            });
        }
    }

    fn add_invocation(&mut self, text: String, range: TextRange) {
        self.data.invocations.push(KeywordInvocation {
            text: text.into(),
            range,
        });
    }

    fn add_variable(&mut self, text: &str, range: TextRange, scope: VariableScope, visibility: Visibility) {
        let location = self.location(range);
        self.data
            .variables
            .push(DefinedVariable::new(text, scope, visibility, location));
    }

    fn section(&mut self, section: &Section) {
        match self.data.kind {
            HeadingKind::Settings => self.settings(section),
            HeadingKind::Variables => self.variables(section),
            HeadingKind::TestCases | HeadingKind::Tasks | HeadingKind::Keywords => {
                for definition in section.definitions() {
                    self.definition(&definition);
                }
            }
            HeadingKind::Comments | HeadingKind::Unknown => {}
        }
    }

    fn settings(&mut self, section: &Section) {
        for import in section.imports() {
            let import_type = import
                .setting_name()
                .and_then(|name| ImportType::from_setting(&name.text()));
            let arguments: Vec<_> = import.arguments().collect();
            for argument in &arguments {
                self.add_usages(&argument.text(), argument.range());
            }
            let (Some(import_type), Some(target)) = (import_type, arguments.first()) else {
                continue;
            };
            let alias = arguments
                .windows(2)
                .find(|pair| matches!(pair[0].text().as_str(), "WITH NAME" | "AS"))
                .map(|pair| SmolStr::new(pair[1].text()));
            self.data.imports.push(ImportDecl {
                import_type,
                target: target.text().into(),
                alias,
                range: target.range(),
            });
        }

        for setting in section.settings() {
            if let Some(call) = setting.keyword_call() {
                self.add_invocation(call.text(), call.range());
            }
            for argument in setting.arguments() {
                self.add_usages(&argument.text(), argument.range());
            }
        }
    }

    fn variables(&mut self, section: &Section) {
        for definition in section.variables() {
            if let Some(name) = definition.name() {
                let text = name.text();
                if is_variable_cell(&text) {
                    self.add_variable(&text, name.range(), VariableScope::Suite, Visibility::Everywhere);
                }
            }
            for value in definition.values() {
                self.add_usages(&value.text(), value.range());
            }
        }
    }

    fn definition(&mut self, definition: &Definition) {
        let body_range = definition.range();
        let local = Visibility::Within {
            file: self.file,
            range: body_range,
        };
        let assignment_scope = if definition.is_test_case() {
            VariableScope::Test
        } else {
            VariableScope::Local
        };

        if let Some(name) = definition.name() {
            let text = name.text();
            if definition.is_test_case() {
                self.data.test_cases.push(TestCase {
                    name: text.as_str().into(),
                    range: name.range(),
                    body_range,
                });
            } else {
                let has_arguments =
                    !definition.declared_arguments().is_empty() || !variable_ranges(&text).is_empty();
                let location = self.location(name.range());
                self.data
                    .keywords
                    .push(DefinedKeyword::new(None, &text, has_arguments, location));
            }
        }

        for row in definition.body() {
            for assignment in row.assignments() {
                // `[Arguments]    ${a}=default` declares `${a}`
                let text = assignment.text();
                let Some(declared) = variable_ranges(&text).into_iter().next() else {
                    continue;
                };
                let range = declared + assignment.range().start();
                self.add_variable(&text[declared], range, assignment_scope, local);
            }

            let call = row.keyword_call();
            let arguments: Vec<_> = row.arguments().collect();
            if let Some(call) = &call {
                self.add_invocation(call.text(), call.range());
                if let (Some(scope), Some(first)) = (set_variable_scope(&call.text()), arguments.first()) {
                    let text = first.text();
                    if is_variable_cell(&text) {
                        self.add_variable(&text, first.range(), scope, Visibility::Everywhere);
                    }
                }
            }
            for argument in &arguments {
                self.add_usages(&argument.text(), argument.range());
            }
            if let BodyRow::Setting(setting) = &row {
                if setting.is_arguments() {
                    self.argument_defaults(setting);
                }
            }
        }
    }
}

impl Extractor {
    /// Default values of `[Arguments]` may read other variables.
    fn argument_defaults(&mut self, setting: &BracketSetting) {
        for assignment in setting.assignments() {
            let text = assignment.text();
            if let Some((_, default)) = text.split_once('=') {
                let offset = TextSize::of(&text[..text.len() - default.len()]);
                let range = TextRange::at(assignment.range().start() + offset, TextSize::of(default));
                self.add_usages(default, range);
            }
        }
    }
}

fn collect_headings(file: FileId, source: &SourceFile) -> Vec<HeadingData> {
    source
        .sections()
        .map(|section| {
            let mut extractor = Extractor {
                file,
                data: HeadingData::new(section.kind(), section.range()),
            };
            extractor.section(&section);
            extractor.data
        })
        .collect()
}
