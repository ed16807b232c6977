//! Tokenization of command lines into classified tokens.
//!
//! Tokens carry host column semantics: `start` is the 1-based column of the
//! first character and `end` is the 1-based column just past the last one.
//! Parse errors are reported next to the tokens and never stop tokenization.

mod lexer;

pub use lexer::LineTokenizer;

use serde::Serialize;

/// The role a token plays in its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// A command name at command position (`Get-Item`).
    Command,
    /// A named parameter of a command (`-Force`).
    CommandParameter,
    /// A bare argument passed to a command.
    CommandArgument,
    /// A language keyword (`foreach`, `if`, `function`).
    Keyword,
    /// An operator (`-eq`, `|`, `=`, `..`).
    Operator,
    /// A variable reference, content without the sigil.
    Variable,
    /// A quoted string, content without the quotes.
    String,
    /// A numeric literal.
    Number,
    /// A property or method name after `.` or `::`, or a bare name in an expression.
    Member,
    /// A type literal (`[int]`), content without the brackets.
    Type,
    /// A line or block comment.
    Comment,
    /// `(`, `{`, `@(`, `$(` or `@{`.
    GroupStart,
    /// `)` or `}`.
    GroupEnd,
    /// `;`.
    StatementSeparator,
}

impl TokenKind {
    /// Returns the display name used in token listings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Command => "Command",
            Self::CommandParameter => "CommandParameter",
            Self::CommandArgument => "CommandArgument",
            Self::Keyword => "Keyword",
            Self::Operator => "Operator",
            Self::Variable => "Variable",
            Self::String => "String",
            Self::Number => "Number",
            Self::Member => "Member",
            Self::Type => "Type",
            Self::Comment => "Comment",
            Self::GroupStart => "GroupStart",
            Self::GroupEnd => "GroupEnd",
            Self::StatementSeparator => "StatementSeparator",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexical unit of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// What the token is.
    pub kind: TokenKind,
    /// The token text, normalized per kind (no quotes, no `$`).
    pub content: String,
    /// 1-based column of the first character.
    pub start: usize,
    /// 1-based column just past the last character.
    pub end: usize,
}

impl Token {
    /// Creates a token.
    pub fn new(kind: TokenKind, content: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            content: content.into(),
            start,
            end,
        }
    }

    /// Returns true if a 0-based cursor offset counts as being on this token.
    ///
    /// The accepted range is `start - 1 ..= end`, so a cursor right after the
    /// last character still belongs to the token.
    pub fn covers(&self, cursor: i64) -> bool {
        let start = self.start as i64 - 1;
        let end = self.end as i64;
        cursor >= start && cursor <= end
    }
}

/// A tokenizer error with the column it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// Error message describing what went wrong.
    pub message: String,
    /// 1-based column of the offending input.
    pub column: usize,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(message: impl Into<String>, column: usize) -> Self {
        Self {
            message: message.into(),
            column,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "column {}: {}", self.column, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Output of a tokenizer: the tokens produced plus any errors met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

/// Splits a line of text into classified tokens.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Tokenized;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, text: &str) -> Tokenized {
        (**self).tokenize(text)
    }
}
