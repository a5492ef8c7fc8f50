//! Lexical analysis of the Stata statistical scripting language, for syntax highlighting.
//!
//! [tokenize] turns source text into a flat stream of classified [Token]s that covers every
//! character of the input, whitespace and comments included:
//!
//! ```
//! use stata_lexer::{tokenize, TokenKind};
//!
//! let kinds: Vec<_> = tokenize("di `x'").map(|t| t.kind).collect();
//! assert_eq!(kinds[0], TokenKind::Keyword);
//! ```

pub mod keywords;
pub mod language;
pub mod lexer;
pub mod render;

#[cfg(feature = "web")]
pub mod web;

pub use keywords::KeywordSet;
pub use lexer::{tokenize, Grammar, GrammarError, Lexer, Position, State, Token, TokenKind, Tokens};
