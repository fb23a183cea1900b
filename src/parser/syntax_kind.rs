//! Syntax kinds for the Rowan-based CST
//!
//! Robot Framework is cell-oriented: tokens are cell words, the separators
//! between cells, and line breaks. Nodes group cells into statements, and
//! statements into sections.

/// All syntax kinds (tokens and nodes) in a Robot Framework document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TOKENS
    // =========================================================================
    WORD = 0,  // run of non-blank characters
    SPACE,     // single space inside a cell
    SEPARATOR, // two or more spaces, or a tab
    NEWLINE,   // \n or \r\n
    ERROR_TOKEN,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    PREAMBLE, // lines before the first heading
    SECTION,  // heading plus everything up to the next heading
    HEADING,  // the `*** Name ***` line

    // Section rows
    SETTING,         // `Suite Setup    Open Browser`
    IMPORT,          // `Library    Collections`
    VARIABLE_DEF,    // `${NAME}    value`
    TEST_CASE_DEF,   // test case or task, with its body
    KEYWORD_DEF,     // user keyword, with its body
    STATEMENT,       // row in a section we do not interpret
    KEYWORD_STMT,    // body row that invokes a keyword
    CONTROL_STMT,    // body row starting with FOR/IF/END/...
    BRACKET_SETTING, // `[Arguments]    ${a}`

    // Cells
    DEF_NAME,        // name cell of a test case or keyword
    SETTING_NAME,    // first cell of a setting, import, or bracket setting
    VARIABLE_DEF_ID, // declared name cell in the Variables section
    ASSIGNMENT,      // `${x}=` before a call, loop variables, `[Arguments]` cells
    KEYWORD_CALL,    // the invoked keyword cell
    ARGUMENT,        // any other value cell
    CONTROL_MARKER,  // FOR, IN, END, IF, ...
    COMMENT,         // `# ...` to end of line

    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Tokens that carry no cell content.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::SPACE | Self::SEPARATOR | Self::NEWLINE)
    }

    /// Nodes that wrap exactly one cell.
    pub fn is_cell(self) -> bool {
        matches!(
            self,
            Self::DEF_NAME
                | Self::SETTING_NAME
                | Self::VARIABLE_DEF_ID
                | Self::ASSIGNMENT
                | Self::KEYWORD_CALL
                | Self::ARGUMENT
                | Self::CONTROL_MARKER
        )
    }

    /// Row-level nodes that may be extended by `...` continuation lines.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::SETTING
                | Self::IMPORT
                | Self::VARIABLE_DEF
                | Self::STATEMENT
                | Self::KEYWORD_STMT
                | Self::CONTROL_STMT
                | Self::BRACKET_SETTING
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: SyntaxKind is repr(u16), contiguous from 0, and bounds-checked above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RobotLanguage {}

impl rowan::Language for RobotLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<RobotLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<RobotLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<RobotLanguage>;
