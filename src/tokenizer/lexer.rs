//! Line lexer for PowerShell-style command lines.
//!
//! Handles:
//! - Commands, parameters and arguments in command mode
//! - Keywords at statement position (case-insensitive)
//! - Variables (`$name`, `${name}`, `@splat`) and subexpressions
//! - Single- and double-quoted strings with `''` and backtick escapes
//! - Named (`-eq`) and symbolic (`+=`, `..`, `::`) operators in expressions
//! - Type literals, index brackets, member access
//! - Line and block comments

use tracing::trace;

use super::{ParseError, Token, TokenKind, Tokenized, Tokenizer};

/// Language keywords recognized at statement position.
const KEYWORDS: &[&str] = &[
    "begin",
    "break",
    "catch",
    "class",
    "configuration",
    "continue",
    "data",
    "do",
    "dynamicparam",
    "else",
    "elseif",
    "end",
    "enum",
    "exit",
    "filter",
    "finally",
    "for",
    "foreach",
    "function",
    "if",
    "in",
    "param",
    "process",
    "return",
    "switch",
    "throw",
    "trap",
    "try",
    "until",
    "using",
    "while",
    "workflow",
];

/// Keywords whose next bareword is a name rather than a command.
const NAMING_KEYWORDS: &[&str] = &["class", "configuration", "enum", "filter", "function", "workflow"];

/// Comparison operators; these also take a `c` (case-sensitive) or `i` prefix.
const COMPARISON_OPERATORS: &[&str] = &[
    "eq", "ne", "gt", "ge", "lt", "le", "like", "notlike", "match", "notmatch", "contains",
    "notcontains", "in", "notin", "replace", "split",
];

/// Named operators without case variants.
const NAMED_OPERATORS: &[&str] = &[
    "and", "or", "xor", "not", "band", "bor", "bxor", "bnot", "shl", "shr", "f", "join", "is",
    "isnot", "as",
];

/// Symbolic operators in expression mode, longest first.
const EXPRESSION_OPERATORS: &[&str] = &[
    "::", "..", "+=", "*=", "/=", "%=", "++", ">>", "=", "+", "*", "/", "%", "!", ".", ",", ">",
    "<", "]",
];

/// Symbolic operators in command mode, longest first.
const COMMAND_OPERATORS: &[&str] = &[">>", ">", ","];

/// Symbolic operators at statement start.
const START_OPERATORS: &[&str] = &["!", ","];

/// What the lexer expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Statement start: a bareword is a keyword or a command name.
    CommandStart,
    /// Inside a command: barewords are arguments, `-name` is a parameter.
    Command,
    /// Inside an expression: `-name` is an operator, barewords are members.
    Expression,
}

/// An open group and the mode to return to once it closes.
#[derive(Debug, Clone, Copy)]
struct Group {
    restore: Mode,
    hash: bool,
}

/// Tokenizer for single lines of PowerShell-style input.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTokenizer;

impl LineTokenizer {
    /// Creates a line tokenizer.
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for LineTokenizer {
    fn tokenize(&self, text: &str) -> Tokenized {
        let result = Lexer::new(text).run();
        trace!(
            tokens = result.tokens.len(),
            errors = result.errors.len(),
            "tokenized line"
        );
        result
    }
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    mode: Mode,
    groups: Vec<Group>,
    /// The next bareword names a member (after `.` or `::`).
    member_next: bool,
    /// The next bareword names a function or type (after `function`, `class`, ...).
    name_next: bool,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

impl Lexer {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            mode: Mode::CommandStart,
            groups: Vec::new(),
            member_next: false,
            name_next: false,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn run(mut self) -> Tokenized {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += 1;
                continue;
            }

            let start = self.pos;
            match c {
                '#' => self.line_comment(start),
                '<' if self.peek_at(1) == Some('#') => self.block_comment(start),
                ';' => {
                    self.pos += 1;
                    self.push(TokenKind::StatementSeparator, ";", start);
                    self.mode = self.statement_mode();
                }
                '|' => {
                    let len = if self.peek_at(1) == Some('|') { 2 } else { 1 };
                    self.operator(start, len);
                    self.mode = Mode::CommandStart;
                }
                '&' => {
                    let len = if self.peek_at(1) == Some('&') { 2 } else { 1 };
                    self.operator(start, len);
                    self.mode = Mode::CommandStart;
                }
                '(' | '{' => self.open_group(start, 1, Mode::CommandStart, false),
                ')' | '}' => self.close_group(start, c),
                '@' => self.at_sign(start),
                '$' => self.variable(start),
                '\'' | '"' => self.string(start, c),
                '-' => self.dash(start),
                '[' if self.mode != Mode::Command => self.bracket(start),
                c if c.is_ascii_digit() && self.mode != Mode::Command => self.number(start),
                _ => match self.symbol_operator() {
                    Some(op) => self.symbol(start, op),
                    None => self.bareword(start),
                },
            }
        }

        if !self.groups.is_empty() {
            self.errors.push(ParseError::new(
                "Missing closing token for an open group.",
                self.chars.len() + 1,
            ));
        }

        Tokenized {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Pushes a token spanning `start..self.pos` (0-based char indices).
    fn push(&mut self, kind: TokenKind, content: impl Into<String>, start: usize) {
        self.tokens
            .push(Token::new(kind, content, start + 1, self.pos + 1));
        self.member_next = false;
        self.name_next = false;
    }

    fn error(&mut self, message: impl Into<String>, at: usize) {
        self.errors.push(ParseError::new(message, at + 1));
    }

    /// Mode after a statement separator.
    fn statement_mode(&self) -> Mode {
        match self.groups.last() {
            Some(group) if group.hash => Mode::Expression,
            _ => Mode::CommandStart,
        }
    }

    /// Whether the next word is a key in the innermost hashtable literal.
    fn at_hash_key(&self) -> bool {
        self.mode == Mode::Expression
            && self.groups.last().is_some_and(|group| group.hash)
            && self.tokens.last().is_some_and(|token| {
                matches!(
                    token.kind,
                    TokenKind::GroupStart | TokenKind::StatementSeparator
                )
            })
    }

    /// Leaves statement position once a value starts an expression.
    fn enter_expression(&mut self) {
        if self.mode == Mode::CommandStart {
            self.mode = Mode::Expression;
        }
    }

    fn is_delimiter(&self, c: char) -> bool {
        if c.is_whitespace()
            || matches!(
                c,
                ';' | '|' | '&' | '(' | ')' | '{' | '}' | ',' | '\'' | '"' | '>'
            )
        {
            return true;
        }
        self.mode == Mode::Expression
            && matches!(
                c,
                '=' | '+' | '-' | '*' | '/' | '%' | '!' | '.' | '[' | ']' | '<' | ':' | '$' | '@'
            )
    }

    fn line_comment(&mut self, start: usize) {
        self.pos = self.chars.len();
        let content = self.slice(start, self.pos);
        self.push(TokenKind::Comment, content, start);
    }

    fn block_comment(&mut self, start: usize) {
        self.pos += 2;
        while self.pos < self.chars.len() && !self.starts_with("#>") {
            self.pos += 1;
        }
        if self.pos < self.chars.len() {
            self.pos += 2;
        } else {
            self.error("Missing closing '#>' for the block comment.", start);
        }
        let content = self.slice(start, self.pos);
        self.push(TokenKind::Comment, content, start);
    }

    fn operator(&mut self, start: usize, len: usize) {
        self.pos += len;
        let content = self.slice(start, self.pos);
        self.push(TokenKind::Operator, content, start);
    }

    fn open_group(&mut self, start: usize, len: usize, inner: Mode, hash: bool) {
        let restore = match self.mode {
            Mode::CommandStart => Mode::Expression,
            mode => mode,
        };
        self.groups.push(Group { restore, hash });
        self.pos += len;
        let content = self.slice(start, self.pos);
        self.push(TokenKind::GroupStart, content, start);
        self.mode = inner;
    }

    fn close_group(&mut self, start: usize, c: char) {
        self.pos += 1;
        self.push(TokenKind::GroupEnd, c.to_string(), start);
        match self.groups.pop() {
            Some(group) => self.mode = group.restore,
            None => {
                self.error(
                    format!("Unexpected token '{c}' in expression or statement."),
                    start,
                );
                self.mode = Mode::Expression;
            }
        }
    }

    fn at_sign(&mut self, start: usize) {
        match self.peek_at(1) {
            Some('(') => self.open_group(start, 2, Mode::CommandStart, false),
            Some('{') => self.open_group(start, 2, Mode::Expression, true),
            Some(c) if is_name_char(c) => {
                self.pos += 1;
                let name_start = self.pos;
                while self.peek().is_some_and(is_name_char) {
                    self.pos += 1;
                }
                let name = self.slice(name_start, self.pos);
                self.push(TokenKind::Variable, name, start);
                self.enter_expression();
            }
            _ => {
                self.error("Unrecognized token in source text.", start);
                self.pos += 1;
            }
        }
    }

    fn variable(&mut self, start: usize) {
        match self.peek_at(1) {
            Some('(') => {
                self.open_group(start, 2, Mode::CommandStart, false);
                return;
            }
            Some('{') => {
                self.pos += 2;
                let name_start = self.pos;
                while self.peek().is_some_and(|c| c != '}') {
                    self.pos += 1;
                }
                let name = self.slice(name_start, self.pos);
                if self.peek() == Some('}') {
                    self.pos += 1;
                } else {
                    self.error("Missing '}' at end of variable name.", start);
                }
                self.push(TokenKind::Variable, name, start);
            }
            Some(c) if is_name_char(c) => {
                self.pos += 1;
                let name_start = self.pos;
                while self.peek().is_some_and(|c| is_name_char(c) || c == ':') {
                    self.pos += 1;
                }
                let name = self.slice(name_start, self.pos);
                self.push(TokenKind::Variable, name, start);
            }
            Some(c @ ('?' | '^' | '$')) => {
                self.pos += 2;
                self.push(TokenKind::Variable, c.to_string(), start);
            }
            _ => {
                self.pos += 1;
                self.error(
                    "Variable reference is not valid. '$' was not followed by a valid variable name character.",
                    start,
                );
                self.push(TokenKind::Variable, "", start);
            }
        }
        self.enter_expression();
    }

    fn string(&mut self, start: usize, quote: char) {
        self.pos += 1;
        let mut value = String::new();
        let mut terminated = false;

        while let Some(c) = self.peek() {
            if c == quote {
                if self.peek_at(1) == Some(quote) {
                    value.push(quote);
                    self.pos += 2;
                    continue;
                }
                self.pos += 1;
                terminated = true;
                break;
            }

            if quote == '"' && c == '`' {
                if let Some(next) = self.peek_at(1) {
                    value.push(unescape(next));
                    self.pos += 2;
                    continue;
                }
            }

            value.push(c);
            self.pos += 1;
        }

        if !terminated {
            self.error(
                format!("The string is missing the terminator: {quote}."),
                start,
            );
        }
        self.push(TokenKind::String, value, start);
        self.enter_expression();
    }

    fn dash(&mut self, start: usize) {
        let next = self.peek_at(1);

        if next.is_some_and(|c| c.is_alphabetic() || c == '_') {
            self.pos += 1;
            let name_start = self.pos;
            if self.mode == Mode::Expression {
                while self.peek().is_some_and(is_name_char) {
                    self.pos += 1;
                }
            } else {
                while self.peek().is_some_and(|c| !self.is_delimiter(c) && c != ':') {
                    self.pos += 1;
                }
            }
            let name = self.slice(name_start, self.pos);
            let content = format!("-{name}");

            if self.mode != Mode::Command && is_operator_name(&name) {
                self.push(TokenKind::Operator, content, start);
                self.mode = Mode::Expression;
                return;
            }

            if self.mode == Mode::Command && self.peek() == Some(':') {
                self.pos += 1;
            }
            self.push(TokenKind::CommandParameter, content, start);
            return;
        }

        if self.mode == Mode::Command {
            self.bareword(start);
            return;
        }

        match next {
            Some('=') => {
                self.operator(start, 2);
                self.mode = Mode::CommandStart;
            }
            Some('-') => {
                self.operator(start, 2);
                self.mode = Mode::Expression;
            }
            _ => {
                self.operator(start, 1);
                self.mode = Mode::Expression;
            }
        }
    }

    fn bracket(&mut self, start: usize) {
        if self.mode == Mode::Expression && self.adjacent_to_value(start) {
            self.operator(start, 1);
            return;
        }

        self.pos += 1;
        let name_start = self.pos;
        let mut depth = 1usize;
        while let Some(c) = self.peek() {
            match c {
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
        let name = self.slice(name_start, self.pos);
        if self.peek() == Some(']') {
            self.pos += 1;
        } else {
            self.error("Missing ] at end of type token.", start);
        }
        self.push(TokenKind::Type, name, start);
        self.enter_expression();
    }

    /// True when `[` directly follows a value, making it an index rather than a type.
    fn adjacent_to_value(&self, start: usize) -> bool {
        self.tokens.last().is_some_and(|last| {
            last.end == start + 1
                && matches!(
                    last.kind,
                    TokenKind::Variable
                        | TokenKind::GroupEnd
                        | TokenKind::Member
                        | TokenKind::String
                        | TokenKind::Type
                )
        })
    }

    fn number(&mut self, start: usize) {
        if self.starts_with("0x") || self.starts_with("0X") {
            self.pos += 2;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.pos += 1;
            }
        } else {
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
            if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }
        // Type and multiplier suffixes: 1kb, 10d, 5L
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let content = self.slice(start, self.pos);
        self.push(TokenKind::Number, content, start);
        self.enter_expression();
    }

    fn symbol_operator(&self) -> Option<&'static str> {
        let table = match self.mode {
            Mode::Command => COMMAND_OPERATORS,
            Mode::Expression => EXPRESSION_OPERATORS,
            Mode::CommandStart => {
                // Dot-sourcing: `. ./script.ps1`
                if self.peek() == Some('.') && self.peek_at(1).map_or(true, char::is_whitespace) {
                    return Some(".");
                }
                START_OPERATORS
            }
        };
        table.iter().copied().find(|op| self.starts_with(op))
    }

    fn symbol(&mut self, start: usize, op: &'static str) {
        self.operator(start, op.chars().count());
        match (self.mode, op) {
            (Mode::Command, _) => {}
            (Mode::CommandStart, ".") => {}
            (Mode::CommandStart, _) => self.mode = Mode::Expression,
            (Mode::Expression, "=" | "+=" | "*=" | "/=" | "%=") => self.mode = Mode::CommandStart,
            (Mode::Expression, "." | "::") => self.member_next = true,
            (Mode::Expression, _) => {}
        }
    }

    fn bareword(&mut self, start: usize) {
        // The first character always belongs to the word.
        self.advance_word_char();
        while let Some(c) = self.peek() {
            if self.is_delimiter(c) {
                break;
            }
            self.advance_word_char();
        }
        let word = self.slice(start, self.pos);
        let lower = word.to_ascii_lowercase();

        let kind = if self.member_next || self.at_hash_key() {
            TokenKind::Member
        } else if self.name_next {
            self.mode = Mode::Command;
            TokenKind::CommandArgument
        } else {
            match self.mode {
                Mode::CommandStart | Mode::Expression if KEYWORDS.contains(&lower.as_str()) => {
                    let names_next = NAMING_KEYWORDS.contains(&lower.as_str());
                    self.push(TokenKind::Keyword, word, start);
                    self.mode = Mode::CommandStart;
                    self.name_next = names_next;
                    return;
                }
                Mode::CommandStart => {
                    self.mode = Mode::Command;
                    TokenKind::Command
                }
                Mode::Command if is_numeric(&word) => TokenKind::Number,
                Mode::Command => TokenKind::CommandArgument,
                Mode::Expression => TokenKind::Member,
            }
        };

        self.push(kind, word, start);
    }

    /// Advances over one word character, keeping a backtick-escaped character with it.
    fn advance_word_char(&mut self) {
        if self.peek() == Some('`') && self.peek_at(1).is_some() {
            self.pos += 2;
        } else {
            self.pos += 1;
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_operator_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    if NAMED_OPERATORS.contains(&lower.as_str()) || COMPARISON_OPERATORS.contains(&lower.as_str())
    {
        return true;
    }
    lower
        .strip_prefix('c')
        .or_else(|| lower.strip_prefix('i'))
        .is_some_and(|rest| COMPARISON_OPERATORS.contains(&rest))
}

fn is_numeric(word: &str) -> bool {
    let digits = word.strip_prefix('-').unwrap_or(word);
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    digits
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .parse::<f64>()
        .is_ok()
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        'a' => '\u{7}',
        'b' => '\u{8}',
        'e' => '\u{1b}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        other => other,
    }
}
