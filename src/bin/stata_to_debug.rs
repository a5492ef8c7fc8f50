//! Render Stata source as a token listing, one token per line:
//! position, kind and the quoted lexeme.
//!
//! ```ignore
//! <analysis.do stata_to_debug
//! ```

use std::io::{ErrorKind, Read, Write};

fn main() -> std::io::Result<()> {
    let mut bytes = Vec::new();
    std::io::stdin().lock().read_to_end(&mut bytes)?;
    let source = String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, format!("input is not UTF-8: {e}")))?;

    let listing = stata_lexer::render::debug_listing(stata_lexer::tokenize(&source));
    std::io::stdout().lock().write_all(listing.as_bytes())
}
