//! Descriptive metadata, used by hosts to decide which inputs to tokenize.

use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Language {
    pub title: &'static str,
    pub description: &'static str,
    /// Short name, as used in fenced code blocks.
    pub tag: &'static str,
    /// File name globs of the form `*.ext`.
    pub filenames: &'static [&'static str],
    pub mimetypes: &'static [&'static str],
}

pub const STATA: Language = Language {
    title: "Stata",
    description: "Stata Statistical Programming Language",
    tag: "stata",
    filenames: &["*.do", "*.ado"],
    mimetypes: &["text/x-stata", "application/x-stata"],
};

impl Language {
    /// Whether the file name of `path` matches one of the globs. Case-sensitive, like the
    /// globs themselves.
    pub fn matches_filename(&self, path: impl AsRef<Path>) -> bool {
        let Some(name) = path.as_ref().file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        self.filenames.iter().any(|glob| match glob.strip_prefix('*') {
            Some(suffix) => name.len() > suffix.len() && name.ends_with(suffix),
            None => name == *glob,
        })
    }

    /// Whether `mimetype` names this language. Parameters such as `; charset=utf-8` are
    /// ignored, as is ASCII case.
    pub fn matches_mimetype(&self, mimetype: &str) -> bool {
        let essence = mimetype.split(';').next().unwrap_or_default().trim();
        self.mimetypes.iter().any(|m| m.eq_ignore_ascii_case(essence))
    }

    /// Whether `tag` (e.g. the info string of a fenced code block) names this language.
    pub fn matches_tag(&self, tag: &str) -> bool {
        tag.trim().eq_ignore_ascii_case(self.tag)
    }
}
