//! HTML rendering, with maud.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::STYLESHEET;
use crate::language;
use crate::lexer::{tokenize, Token};

/// Highlight Stata source as a `pre` block.
pub fn highlight(source: &str) -> Markup {
    highlight_tokens(tokenize(source))
}

/// Render tokens as a `pre` block, one `span` per token classed by kind.
/// Blank space is written bare.
pub fn highlight_tokens<'a>(tokens: impl IntoIterator<Item = Token<'a>>) -> Markup {
    html!(
        pre class="highlight" {
            code data-lang=(language::STATA.tag) {
                @for token in tokens {
                    @if let Some(class) = token.kind.css_class() {
                        span class=(class) { (token.lexeme) }
                    } @else {
                        (token.lexeme)
                    }
                }
            }
        }
    )
}

/// A complete document linking the stylesheet at `/style.css`.
pub fn page(title: &str, body: Markup) -> Markup {
    html!(
        (DOCTYPE)
        html {
            head {
                title { (title) }
                link rel="stylesheet" href="/style.css";
            }
            body {
                main { (body) }
            }
        }
    )
}

/// A complete document with the stylesheet inline, for use without a server.
pub fn standalone_page(title: &str, body: Markup) -> Markup {
    html!(
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(STYLESHEET)) }
            }
            body {
                main { (body) }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_by_kind() {
        let got = highlight("di `x' // <b>").into_string();
        let want = concat!(
            r#"<pre class="highlight"><code data-lang="stata">"#,
            r#"<span class="k">di</span> "#,
            r#"<span class="p">`</span><span class="si">x</span><span class="p">'</span> "#,
            r#"<span class="c1">// &lt;b&gt;</span>"#,
            "</code></pre>",
        );
        assert_eq!(got, want);
    }

    #[test]
    fn error_tokens_are_marked() {
        let got = highlight("?").into_string();
        assert!(got.contains(r#"<span class="err">?</span>"#), "got {got}");
    }

    #[test]
    fn pages() {
        let body = highlight("use a");
        let linked = page("demo", body.clone()).into_string();
        assert!(linked.starts_with("<!DOCTYPE html>"));
        assert!(linked.contains(r#"<link rel="stylesheet" href="/style.css">"#));
        assert!(linked.contains("<title>demo</title>"));

        let inline = standalone_page("demo", body).into_string();
        assert!(inline.contains(".highlight .k"));
        assert!(!inline.contains("/style.css"));
    }
}
