//! Highlight Stata files (or stdin) as HTML.
//!
//! ```ignore
//! stata_to_html --standalone analysis.do >analysis.html
//! ```

use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use maud::{html, Markup};
use stata_lexer::{language, render};

#[derive(Parser, Debug)]
#[command(about = "Highlight Stata source as HTML")]
struct Args {
    /// Files to highlight. Reads stdin when none are given.
    inputs: Vec<PathBuf>,

    /// Emit a complete HTML document with the stylesheet inline.
    #[arg(long)]
    standalone: bool,

    /// Document title, with --standalone.
    #[arg(long, default_value = language::STATA.title)]
    title: String,
}

/// Reads a source file, warning (but carrying on) if it does not look like Stata.
fn read_source(path: &Path) -> std::io::Result<String> {
    if !language::STATA.matches_filename(path) {
        tracing::warn!(
            "{} does not match {}; highlighting anyway",
            path.display(),
            language::STATA.filenames.join(", ")
        );
    }
    std::fs::read_to_string(path)
}

fn read_stdin() -> std::io::Result<String> {
    let mut bytes = Vec::new();
    std::io::stdin().lock().read_to_end(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, format!("input is not UTF-8: {e}")))
}

/// One highlighted block per input, headed by the file name when there are several.
fn render_inputs(inputs: &[(String, String)]) -> Markup {
    html!(
        @for (name, source) in inputs {
            @if inputs.len() > 1 {
                h2 { (name) }
            }
            (render::highlight(source))
        }
    )
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let args = Args::parse();

    let inputs = if args.inputs.is_empty() {
        vec![("<stdin>".to_owned(), read_stdin()?)]
    } else {
        args.inputs
            .iter()
            .map(|path| -> std::io::Result<(String, String)> {
                Ok((path.display().to_string(), read_source(path)?))
            })
            .collect::<std::io::Result<Vec<_>>>()?
    };

    let body = render_inputs(&inputs);
    let output = if args.standalone {
        render::standalone_page(&args.title, body)
    } else {
        body
    };
    std::io::stdout().lock().write_all(output.into_string().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_files() -> std::io::Result<()> {
        let mut file = tempfile::Builder::new().suffix(".do").tempfile()?;
        file.write_all(b"use auto\n")?;
        let source = read_source(file.path())?;
        assert_eq!(source, "use auto\n");
        Ok(())
    }

    #[test]
    fn reads_other_extensions() -> std::io::Result<()> {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile()?;
        file.write_all(b"di 1")?;
        assert_eq!(read_source(file.path())?, "di 1");
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source(&dir.path().join("absent.do")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn headings_only_for_several_inputs() {
        let one = render_inputs(&[("a.do".to_owned(), "di 1".to_owned())]).into_string();
        assert!(!one.contains("<h2>"));

        let two = render_inputs(&[
            ("a.do".to_owned(), "di 1".to_owned()),
            ("b.do".to_owned(), "di 2".to_owned()),
        ])
        .into_string();
        assert!(two.contains("<h2>a.do</h2>"));
        assert!(two.contains("<h2>b.do</h2>"));
    }
}
