//! Logos-based lexer for Robot Framework plain-text files
//!
//! The lexer only knows about words, blanks, and line breaks. Whether a
//! blank run separates cells or sits inside one is decided here (two or more
//! spaces, or any tab, is a separator); everything else is the parser's job.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR_TOKEN,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"( {2,}|[ ]*\t)[ \t]*")]
    Separator,

    #[token(" ")]
    Space,

    #[regex(r"[^ \t\r\n]+")]
    Word,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Newline => SyntaxKind::NEWLINE,
            LogosToken::Separator => SyntaxKind::SEPARATOR,
            LogosToken::Space => SyntaxKind::SPACE,
            LogosToken::Word => SyntaxKind::WORD,
        }
    }
}
