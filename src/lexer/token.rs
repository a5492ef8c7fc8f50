//! Tokens produced by the scanner.

use std::fmt::Display;
use std::ops::Range;

/// A single classified piece of Stata source.
///
/// Blank space and comments are tokens too, and unrecognized characters become
/// [TokenKind::Error] tokens, so every character of the input is covered by exactly one
/// [Token].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// The kind of Token.
    pub kind: TokenKind,

    /// The substring representing the Token.
    pub lexeme: &'a str,

    /// Where the Token starts in the input.
    pub position: Position,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, lexeme: &'a str, position: Position) -> Token<'a> {
        Token { kind, lexeme, position }
    }

    /// Length of the lexeme in bytes.
    pub fn len(&self) -> usize {
        self.lexeme.len()
    }

    /// Tokens are never empty; provided for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }

    /// Byte range of the token in the input.
    pub fn range(&self) -> Range<usize> {
        self.position.offset..self.position.offset + self.lexeme.len()
    }
}

/// A location in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,

    /// 1-based line number.
    pub line: usize,

    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Position {
    pub fn start() -> Position {
        Position { offset: 0, line: 1, column: 1 }
    }

    /// Returns the position just past `text`, assuming `text` begins at this position.
    pub fn advance(self, text: &str) -> Position {
        let offset = self.offset + text.len();
        match text.rfind('\n') {
            Some(last_newline) => Position {
                offset,
                line: self.line + text.matches('\n').count(),
                column: text[last_newline + 1..].chars().count() + 1,
            },
            None => Position { offset, line: self.line, column: self.column + text.chars().count() },
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Categories of Stata tokens, named after the highlighting classes a renderer styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A command or control-flow word from the keyword set, `foreach` for example.
    Keyword,

    /// Any other identifier-like run: variable names, numbers, file names, `$globals`.
    Name,

    /// Arithmetic, division, comparison and logical operators.
    Operator,

    /// Interpolation delimiters and structural characters such as `(` or `,`.
    Punctuation,

    /// Double-quoted string content, including the delimiting quotes.
    Str,

    /// A backslash and the character it escapes, inside a string.
    StrEscape,

    /// The macro name inside `` `name' ``.
    StrInterpol,

    /// `//` comments and full-line `*` comments.
    CommentSingle,

    /// A `/* ... */` comment. It may contain line breaks.
    CommentMultiline,

    /// Blank space and line breaks.
    Text,

    /// A character no rule recognized.
    Error,
}

impl TokenKind {
    /// The short CSS class highlighters conventionally use for this kind, or `None` for text
    /// that is written without markup.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            TokenKind::Keyword => Some("k"),
            TokenKind::Name => Some("n"),
            TokenKind::Operator => Some("o"),
            TokenKind::Punctuation => Some("p"),
            TokenKind::Str => Some("s2"),
            TokenKind::StrEscape => Some("se"),
            TokenKind::StrInterpol => Some("si"),
            TokenKind::CommentSingle => Some("c1"),
            TokenKind::CommentMultiline => Some("cm"),
            TokenKind::Text => None,
            TokenKind::Error => Some("err"),
        }
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::CommentSingle | TokenKind::CommentMultiline)
    }

    pub fn is_string(self) -> bool {
        matches!(self, TokenKind::Str | TokenKind::StrEscape | TokenKind::StrInterpol)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            TokenKind::Keyword => "Keyword",
            TokenKind::Name => "Name",
            TokenKind::Operator => "Operator",
            TokenKind::Punctuation => "Punctuation",
            TokenKind::Str => "Literal.String.Double",
            TokenKind::StrEscape => "Literal.String.Escape",
            TokenKind::StrInterpol => "Literal.String.Interpol",
            TokenKind::CommentSingle => "Comment.Single",
            TokenKind::CommentMultiline => "Comment.Multiline",
            TokenKind::Text => "Text",
            TokenKind::Error => "Error",
        };
        f.write_str(s)
    }
}

impl<'a> Display for Token<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {:?}", self.kind, self.lexeme)
    }
}
