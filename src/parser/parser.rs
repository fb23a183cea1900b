//! Line-oriented parser for Robot Framework plain-text files
//!
//! Builds a rowan GreenNode tree from tokens. The format is row based, so
//! the parser first groups tokens into lines and cells, then decides per
//! section what each row is and which role every cell plays in it.
//! Parsing never fails: problems are recorded as errors and the row is kept.

use super::keywords::{self, HeadingKind};
use super::lexer::{Token, tokenize};
use super::syntax_kind::SyntaxKind;
use super::variables::is_variable_cell;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse a Robot Framework document into a CST
pub fn parse(input: &str) -> Parse {
    let tokens = tokenize(input);
    let lines = split_lines(input, &tokens);
    let mut parser = Parser::new(&tokens, &lines);
    parser.parse_source_file();
    parser.finish()
}

// ============================================================================
// Lines and cells
// ============================================================================

/// A cell: one or more words joined by single spaces.
#[derive(Debug, Clone, Copy)]
struct Cell<'a> {
    /// First token index.
    start: usize,
    /// One past the last token index.
    end: usize,
    text: &'a str,
}

#[derive(Debug, Clone)]
struct Line<'a> {
    /// One past the last token index, newline included.
    end: usize,
    cells: Vec<Cell<'a>>,
    /// Token range of a trailing `# comment`.
    comment: Option<(usize, usize)>,
    /// Line starts with blank space.
    indented: bool,
    range: TextRange,
}

impl<'a> Line<'a> {
    fn is_blank(&self) -> bool {
        self.cells.is_empty()
    }

    fn is_continuation(&self) -> bool {
        self.cells.first().is_some_and(|c| c.text == "...")
    }

    fn is_heading(&self) -> bool {
        !self.indented && self.cells.first().is_some_and(|c| c.text.starts_with('*'))
    }

    /// Line text without the line break and trailing blanks.
    fn text(&self, tokens: &[Token<'a>]) -> String {
        match (self.cells.first(), self.cells.last()) {
            (Some(first), Some(last)) => tokens[first.start..last.end]
                .iter()
                .map(|t| t.text)
                .collect(),
            _ => String::new(),
        }
    }
}

fn token_end(token: &Token<'_>) -> TextSize {
    token.offset + TextSize::of(token.text)
}

fn split_lines<'a>(input: &'a str, tokens: &[Token<'a>]) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    let mut idx = 0;
    while idx < tokens.len() {
        let line_start = idx;
        let mut cells: Vec<Cell<'a>> = Vec::new();
        let mut open: Option<(usize, usize)> = None;
        let mut comment: Option<(usize, usize)> = None;

        while idx < tokens.len() {
            let token = &tokens[idx];
            match token.kind {
                SyntaxKind::NEWLINE => break,
                SyntaxKind::SEPARATOR => {
                    if let Some((s, e)) = open.take() {
                        cells.push(make_cell(input, tokens, s, e));
                    }
                }
                SyntaxKind::SPACE => {}
                _ => {
                    if let Some((_, ref mut c_end)) = comment {
                        *c_end = idx + 1;
                    } else if open.is_none() && token.text.starts_with('#') {
                        comment = Some((idx, idx + 1));
                    } else {
                        let start = open.map_or(idx, |(s, _)| s);
                        open = Some((start, idx + 1));
                    }
                }
            }
            idx += 1;
        }
        if let Some((s, e)) = open.take() {
            cells.push(make_cell(input, tokens, s, e));
        }
        // include the line break
        if idx < tokens.len() {
            idx += 1;
        }

        let indented = matches!(
            tokens[line_start].kind,
            SyntaxKind::SEPARATOR | SyntaxKind::SPACE
        );
        let range = TextRange::new(tokens[line_start].offset, token_end(&tokens[idx - 1]));
        lines.push(Line {
            end: idx,
            cells,
            comment,
            indented,
            range,
        });
    }
    lines
}

fn make_cell<'a>(input: &'a str, tokens: &[Token<'a>], start: usize, end: usize) -> Cell<'a> {
    let range = TextRange::new(tokens[start].offset, token_end(&tokens[end - 1]));
    Cell {
        start,
        end,
        text: &input[range],
    }
}

// ============================================================================
// Cell roles
// ============================================================================

/// Row shapes decide which node kind each cell of a row gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowShape {
    Setting { fixture: bool },
    Import,
    VariableDef,
    Bracket { fixture: bool, arguments: bool },
    KeywordStmt,
    Control,
    Generic,
}

/// Assigns roles to the cells of one row, across continuation lines.
struct CellRoles {
    shape: RowShape,
    index: usize,
    seen_call: bool,
    in_loop_vars: bool,
}

impl CellRoles {
    fn new(shape: RowShape) -> Self {
        Self {
            shape,
            index: 0,
            seen_call: false,
            in_loop_vars: false,
        }
    }

    fn next(&mut self, text: &str) -> Option<SyntaxKind> {
        let index = self.index;
        self.index += 1;
        let role = match self.shape {
            RowShape::Generic => return None,
            RowShape::Import => {
                if index == 0 {
                    SyntaxKind::SETTING_NAME
                } else {
                    SyntaxKind::ARGUMENT
                }
            }
            RowShape::VariableDef => {
                if index == 0 {
                    SyntaxKind::VARIABLE_DEF_ID
                } else {
                    SyntaxKind::ARGUMENT
                }
            }
            RowShape::Setting { fixture } | RowShape::Bracket { fixture, arguments: false } => {
                if index == 0 {
                    SyntaxKind::SETTING_NAME
                } else if fixture && !self.seen_call {
                    self.seen_call = true;
                    SyntaxKind::KEYWORD_CALL
                } else {
                    SyntaxKind::ARGUMENT
                }
            }
            RowShape::Bracket { arguments: true, .. } => {
                if index == 0 {
                    SyntaxKind::SETTING_NAME
                } else {
                    SyntaxKind::ASSIGNMENT
                }
            }
            RowShape::KeywordStmt => {
                if self.seen_call {
                    SyntaxKind::ARGUMENT
                } else if is_variable_cell(text) {
                    SyntaxKind::ASSIGNMENT
                } else {
                    self.seen_call = true;
                    SyntaxKind::KEYWORD_CALL
                }
            }
            RowShape::Control => {
                if index == 0 {
                    self.in_loop_vars = matches!(text, "FOR" | ":FOR");
                    SyntaxKind::CONTROL_MARKER
                } else if keywords::is_loop_in_marker(text) {
                    self.in_loop_vars = false;
                    SyntaxKind::CONTROL_MARKER
                } else if self.in_loop_vars {
                    SyntaxKind::ASSIGNMENT
                } else if keywords::is_control_marker(text) {
                    SyntaxKind::CONTROL_MARKER
                } else {
                    SyntaxKind::ARGUMENT
                }
            }
        };
        Some(role)
    }
}

// ============================================================================
// Parser
// ============================================================================

/// The parser state
struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    lines: &'t [Line<'a>],
    /// Next token to emit.
    pos: usize,
    /// Next line to parse.
    line: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>], lines: &'t [Line<'a>]) -> Self {
        Self {
            tokens,
            lines,
            pos: 0,
            line: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Line inspection
    // =========================================================================

    fn current(&self) -> Option<&'t Line<'a>> {
        self.lines.get(self.line)
    }

    fn at_end(&self) -> bool {
        self.line >= self.lines.len()
    }

    fn at_heading(&self) -> bool {
        self.current().is_some_and(Line::is_heading)
    }

    fn at_continuation(&self) -> bool {
        self.current().is_some_and(Line::is_continuation)
    }

    // =========================================================================
    // Emission
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump_until(&mut self, idx: usize) {
        while self.pos < idx {
            self.bump();
        }
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn emit_cell(&mut self, cell: Cell<'a>, kind: SyntaxKind) {
        self.bump_until(cell.start);
        self.start_node(kind);
        self.bump_until(cell.end);
        self.finish_node();
    }

    /// Emit the rest of the current line (comment and line break) and advance.
    fn finish_line(&mut self) {
        let Some(line) = self.current() else {
            return;
        };
        if let Some((start, end)) = line.comment {
            self.bump_until(start);
            self.start_node(SyntaxKind::COMMENT);
            self.bump_until(end);
            self.finish_node();
        }
        self.bump_until(line.end);
        self.line += 1;
    }

    /// Emit cells `from..` of the current line with the given roles, then finish it.
    fn emit_line_cells(&mut self, from: usize, roles: &mut CellRoles) {
        let Some(line) = self.current() else {
            return;
        };
        for cell in line.cells.iter().skip(from) {
            if let Some(kind) = roles.next(cell.text) {
                self.emit_cell(*cell, kind);
            }
        }
        self.finish_line();
    }

    fn error(&mut self, message: impl Into<String>, range: TextRange) {
        self.errors.push(SyntaxError::new(message, range));
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        if !self.at_end() && !self.at_heading() {
            self.start_node(SyntaxKind::PREAMBLE);
            while !self.at_end() && !self.at_heading() {
                self.finish_line();
            }
            self.finish_node();
        }
        while !self.at_end() {
            self.parse_section();
        }
        // trailing tokens never belong to a line, but keep the tree lossless
        self.bump_until(self.tokens.len());
        self.finish_node();
    }

    fn parse_section(&mut self) {
        let Some(heading) = self.current() else {
            return;
        };
        let kind = HeadingKind::from_heading_text(&heading.text(self.tokens));
        if kind == HeadingKind::Unknown {
            self.error("Unrecognized section header", heading.range);
        }

        self.start_node(SyntaxKind::SECTION);
        self.start_node(SyntaxKind::HEADING);
        self.finish_line();
        self.finish_node();

        while let Some(line) = self.current() {
            if line.is_heading() {
                break;
            }
            if line.is_blank() {
                self.finish_line();
                continue;
            }
            match kind {
                HeadingKind::Settings => self.parse_setting_row(),
                HeadingKind::Variables => self.parse_variable_row(),
                HeadingKind::TestCases | HeadingKind::Tasks => {
                    self.parse_definition(SyntaxKind::TEST_CASE_DEF)
                }
                HeadingKind::Keywords => self.parse_definition(SyntaxKind::KEYWORD_DEF),
                HeadingKind::Comments | HeadingKind::Unknown => {
                    self.parse_row(SyntaxKind::STATEMENT, RowShape::Generic);
                }
            }
        }
        self.finish_node();
    }

    /// Parse the current line plus its `...` continuation lines as one node.
    fn parse_row(&mut self, node: SyntaxKind, shape: RowShape) -> CellRoles {
        let mut roles = CellRoles::new(shape);
        self.start_node(node);
        self.emit_line_cells(0, &mut roles);
        self.parse_continuations(&mut roles);
        self.finish_node();
        roles
    }

    fn parse_continuations(&mut self, roles: &mut CellRoles) {
        while self.at_continuation() {
            // the `...` cell itself stays a bare token
            self.emit_line_cells(1, roles);
        }
    }

    fn parse_setting_row(&mut self) {
        let Some(line) = self.current() else {
            return;
        };
        let range = line.range;
        let name = line.cells[0].text;
        if line.is_continuation() {
            self.error("Continuation line without a setting", range);
            self.parse_row(SyntaxKind::STATEMENT, RowShape::Generic);
        } else if keywords::is_import_setting(name) {
            let roles = self.parse_row(SyntaxKind::IMPORT, RowShape::Import);
            if roles.index < 2 {
                self.error(format!("{} import requires a name", name), range);
            }
        } else {
            let fixture = keywords::is_fixture_setting(name);
            self.parse_row(SyntaxKind::SETTING, RowShape::Setting { fixture });
        }
    }

    fn parse_variable_row(&mut self) {
        let Some(line) = self.current() else {
            return;
        };
        let range = line.range;
        if line.is_continuation() {
            self.error("Continuation line without a variable", range);
            self.parse_row(SyntaxKind::STATEMENT, RowShape::Generic);
            return;
        }
        if !is_variable_cell(line.cells[0].text) {
            self.error(
                format!("Invalid variable name '{}'", line.cells[0].text),
                range,
            );
        }
        self.parse_row(SyntaxKind::VARIABLE_DEF, RowShape::VariableDef);
    }

    /// A test case or keyword: the name row plus every indented row after it.
    fn parse_definition(&mut self, kind: SyntaxKind) {
        let Some(line) = self.current() else {
            return;
        };
        self.start_node(kind);

        if line.indented {
            let what = if kind == SyntaxKind::TEST_CASE_DEF {
                "test case"
            } else {
                "keyword"
            };
            self.error(format!("Missing {} name", what), line.range);
        } else {
            let name = line.cells[0];
            self.emit_cell(name, SyntaxKind::DEF_NAME);
            match line.cells.get(1) {
                Some(first) => {
                    let shape = body_row_shape(first.text);
                    self.bump_until(first.start);
                    let mut roles = CellRoles::new(shape.1);
                    self.start_node(shape.0);
                    self.emit_line_cells(1, &mut roles);
                    self.finish_node();
                }
                None => self.finish_line(),
            }
        }

        while let Some(line) = self.current() {
            if line.is_heading() {
                break;
            }
            if line.is_blank() {
                self.finish_line();
                continue;
            }
            if !line.indented && !line.is_continuation() {
                break;
            }
            self.parse_body_row();
        }
        self.finish_node();
    }

    fn parse_body_row(&mut self) {
        let Some(line) = self.current() else {
            return;
        };
        let first = line.cells[0].text;
        if first.starts_with('[') && first.ends_with(']') && !keywords::is_known_bracket_setting(first)
        {
            self.error(format!("Unknown setting '{}'", first), line.range);
        }
        let (node, shape) = body_row_shape(first);
        self.parse_row(node, shape);
    }
}

/// Node kind and cell roles for a row inside a test case or keyword body.
fn body_row_shape(first: &str) -> (SyntaxKind, RowShape) {
    if first == "..." {
        (SyntaxKind::STATEMENT, RowShape::Generic)
    } else if first.starts_with('[') && first.ends_with(']') {
        (
            SyntaxKind::BRACKET_SETTING,
            RowShape::Bracket {
                fixture: keywords::is_fixture_bracket_setting(first),
                arguments: keywords::is_arguments_bracket_setting(first),
            },
        )
    } else if keywords::is_control_marker(first) {
        (SyntaxKind::CONTROL_STMT, RowShape::Control)
    } else {
        (SyntaxKind::KEYWORD_STMT, RowShape::KeywordStmt)
    }
}
