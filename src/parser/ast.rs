//! Typed AST wrappers over the untyped rowan CST
//!
//! These provide a convenient API for accessing Robot Framework constructs.

use super::keywords::HeadingKind;
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use rowan::TextRange;

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    fn range(&self) -> TextRange {
        self.syntax().text_range()
    }
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $($kind:ident)|+) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.children().find_map(N::cast)
}

fn children<N: AstNode>(node: &SyntaxNode) -> impl Iterator<Item = N> + use<N> {
    node.children().filter_map(N::cast)
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn sections(&self) -> impl Iterator<Item = Section> + use<> {
        children(&self.0)
    }
}

// ============================================================================
// Sections
// ============================================================================

ast_node!(Section, SECTION);

impl Section {
    pub fn heading(&self) -> Option<Heading> {
        child(&self.0)
    }

    pub fn kind(&self) -> HeadingKind {
        self.heading()
            .map_or(HeadingKind::Unknown, |heading| heading.kind())
    }

    pub fn imports(&self) -> impl Iterator<Item = Import> + use<> {
        children(&self.0)
    }

    pub fn settings(&self) -> impl Iterator<Item = Setting> + use<> {
        children(&self.0)
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableDefinition> + use<> {
        children(&self.0)
    }

    /// Test cases, tasks, and user keywords of this section.
    pub fn definitions(&self) -> impl Iterator<Item = Definition> + use<> {
        children(&self.0)
    }
}

ast_node!(Heading, HEADING);

impl Heading {
    /// Heading line without the line break.
    pub fn text(&self) -> String {
        self.0.text().to_string().trim_end().to_string()
    }

    pub fn kind(&self) -> HeadingKind {
        HeadingKind::from_heading_text(&self.text())
    }
}

// ============================================================================
// Cells
// ============================================================================

/// Any single-cell node: names, calls, arguments, assignments, markers.
ast_node!(
    Cell,
    DEF_NAME | SETTING_NAME | VARIABLE_DEF_ID | ASSIGNMENT | KEYWORD_CALL | ARGUMENT | CONTROL_MARKER
);

impl Cell {
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

ast_node!(KeywordCall, KEYWORD_CALL);

impl KeywordCall {
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

ast_node!(Argument, ARGUMENT);

impl Argument {
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

ast_node!(Assignment, ASSIGNMENT);

impl Assignment {
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

fn first_cell_of(node: &SyntaxNode, kind: SyntaxKind) -> Option<Cell> {
    node.children()
        .filter(|n| n.kind() == kind)
        .find_map(Cell::cast)
}

// ============================================================================
// Settings section rows
// ============================================================================

ast_node!(Import, IMPORT);

impl Import {
    /// `Library`, `Resource`, or `Variables` as written.
    pub fn setting_name(&self) -> Option<Cell> {
        first_cell_of(&self.0, SyntaxKind::SETTING_NAME)
    }

    /// The imported name or path.
    pub fn target(&self) -> Option<Argument> {
        child(&self.0)
    }

    pub fn arguments(&self) -> impl Iterator<Item = Argument> + use<> {
        children(&self.0)
    }
}

ast_node!(Setting, SETTING);

impl Setting {
    pub fn name(&self) -> Option<Cell> {
        first_cell_of(&self.0, SyntaxKind::SETTING_NAME)
    }

    /// Keyword invoked by a fixture setting such as `Suite Setup`.
    pub fn keyword_call(&self) -> Option<KeywordCall> {
        child(&self.0)
    }

    pub fn arguments(&self) -> impl Iterator<Item = Argument> + use<> {
        children(&self.0)
    }
}

// ============================================================================
// Variables section rows
// ============================================================================

ast_node!(VariableDefinition, VARIABLE_DEF);

impl VariableDefinition {
    /// The declared `${NAME}` cell, possibly followed by `=`.
    pub fn name(&self) -> Option<Cell> {
        first_cell_of(&self.0, SyntaxKind::VARIABLE_DEF_ID)
    }

    pub fn values(&self) -> impl Iterator<Item = Argument> + use<> {
        children(&self.0)
    }
}

// ============================================================================
// Test cases and keywords
// ============================================================================

ast_node!(Definition, TEST_CASE_DEF | KEYWORD_DEF);

impl Definition {
    pub fn is_test_case(&self) -> bool {
        self.0.kind() == SyntaxKind::TEST_CASE_DEF
    }

    pub fn name(&self) -> Option<Cell> {
        first_cell_of(&self.0, SyntaxKind::DEF_NAME)
    }

    pub fn body(&self) -> impl Iterator<Item = BodyRow> + use<> {
        children(&self.0)
    }

    pub fn bracket_settings(&self) -> impl Iterator<Item = BracketSetting> + use<> {
        children(&self.0)
    }

    /// `[Arguments]` declarations, in order.
    pub fn declared_arguments(&self) -> Vec<Assignment> {
        self.bracket_settings()
            .filter(BracketSetting::is_arguments)
            .flat_map(|setting| setting.assignments().collect::<Vec<_>>())
            .collect()
    }
}

/// A row inside a test case or keyword body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BodyRow {
    Keyword(KeywordStatement),
    Control(ControlStatement),
    Setting(BracketSetting),
}

impl AstNode for BodyRow {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::KEYWORD_STMT | SyntaxKind::CONTROL_STMT | SyntaxKind::BRACKET_SETTING
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::KEYWORD_STMT => Some(Self::Keyword(KeywordStatement(node))),
            SyntaxKind::CONTROL_STMT => Some(Self::Control(ControlStatement(node))),
            SyntaxKind::BRACKET_SETTING => Some(Self::Setting(BracketSetting(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Keyword(n) => n.syntax(),
            Self::Control(n) => n.syntax(),
            Self::Setting(n) => n.syntax(),
        }
    }
}

impl BodyRow {
    /// Keyword invoked by this row, if any.
    pub fn keyword_call(&self) -> Option<KeywordCall> {
        child(self.syntax())
    }

    /// Variables this row assigns.
    pub fn assignments(&self) -> impl Iterator<Item = Assignment> + use<> {
        children(self.syntax())
    }

    pub fn arguments(&self) -> impl Iterator<Item = Argument> + use<> {
        children(self.syntax())
    }
}

ast_node!(BracketSetting, BRACKET_SETTING);

impl BracketSetting {
    pub fn name(&self) -> Option<Cell> {
        first_cell_of(&self.0, SyntaxKind::SETTING_NAME)
    }

    pub fn is_arguments(&self) -> bool {
        self.name()
            .is_some_and(|name| super::keywords::is_arguments_bracket_setting(&name.text()))
    }

    pub fn keyword_call(&self) -> Option<KeywordCall> {
        child(&self.0)
    }

    pub fn assignments(&self) -> impl Iterator<Item = Assignment> + use<> {
        children(&self.0)
    }

    pub fn arguments(&self) -> impl Iterator<Item = Argument> + use<> {
        children(&self.0)
    }
}

ast_node!(KeywordStatement, KEYWORD_STMT);

impl KeywordStatement {
    pub fn assignments(&self) -> impl Iterator<Item = Assignment> + use<> {
        children(&self.0)
    }

    pub fn keyword_call(&self) -> Option<KeywordCall> {
        child(&self.0)
    }

    pub fn arguments(&self) -> impl Iterator<Item = Argument> + use<> {
        children(&self.0)
    }
}

ast_node!(ControlStatement, CONTROL_STMT);

impl ControlStatement {
    pub fn marker(&self) -> Option<Cell> {
        first_cell_of(&self.0, SyntaxKind::CONTROL_MARKER)
    }

    /// Loop variables of a `FOR` row.
    pub fn assignments(&self) -> impl Iterator<Item = Assignment> + use<> {
        children(&self.0)
    }

    pub fn arguments(&self) -> impl Iterator<Item = Argument> + use<> {
        children(&self.0)
    }
}
