//! Rendering token streams for display.
//!
//! Renderers only read tokens; nothing here influences how text is tokenized.

use crate::lexer::Token;

#[cfg(feature = "render")]
mod html;
#[cfg(feature = "render")]
pub use html::*;

/// Default styles for the CSS classes of [crate::TokenKind::css_class].
pub const STYLESHEET: &str = include_str!("style.css");

/// One line per token: `line:column`, kind and the quoted lexeme, tab-separated.
pub fn debug_listing<'a>(tokens: impl IntoIterator<Item = Token<'a>>) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format!("{}\t{}\t{:?}\n", token.position, token.kind, token.lexeme));
    }
    out
}
