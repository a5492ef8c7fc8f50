//! Reserved Stata words.
//!
//! Stata accepts truncated command names, so common abbreviations (`forv`, `forva`, ...) are
//! listed as words of their own. Lookups are exact and case-sensitive.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Stata commands and control-flow words.
#[rustfmt::skip]
pub const STATA_KEYWORDS: &[&str] = &[
    "while",
    "forv", "forva", "forval", "forvalu", "forvalue", "forvalues", "continue",
    "if", "else", "gl", "glo", "glob", "globa", "global",
    "loc", "loca", "local",
    "tempfile", "tempvar", "tempname",
    "foreach", "in", "of",
    "var", "varl", "varli", "varlis", "varlist",
    "new", "newl", "newli", "nelis", "newlist",
    "num", "numl", "numli", "numlis", "numlist",
    "sca", "scal", "scala", "scalar",
    "de", "def", "defi", "defin", "define",
    "drop", "di", "dir", "l", "li", "lis", "list",
    "qui", "quie", "quiet", "quietl", "quietly",
    "noi", "nois", "noisi", "noisil", "noisily",
    "by", "bys", "byso", "bysor", "bysort",
    "help", "search", "do", "ado", "update", "adoupdate",
    "pwd", "cd", "save", "use", "append", "merge", "compress",
    "import", "edit", "describe", "codebook",
    "list", "browse", "count", "inspect", "table", "tabulate", "summarize",
    "generate", "replace", "egen", "rename", "clear",
    "drop", "keep", "sort", "encode", "decode", "order", "reshape",
    "log", "notes", "display",
    "set", "more", "ssc",
];

/// A fixed set of reserved words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeywordSet {
    words: HashSet<String>,
}

impl KeywordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeywordSet { words: words.into_iter().map(Into::into).collect() }
    }

    /// The Stata keywords, built on first use and shared afterwards.
    pub fn stata() -> &'static KeywordSet {
        static STATA: OnceLock<KeywordSet> = OnceLock::new();
        STATA.get_or_init(|| {
            let set = KeywordSet::new(STATA_KEYWORDS.iter().copied());
            tracing::debug!("built Stata keyword set with {} words", set.len());
            set
        })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The words, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let keywords = KeywordSet::stata();
        assert!(keywords.contains("forvalues"));
        assert!(keywords.contains("forv"));
        // Abbreviations are only recognized when listed.
        assert!(!keywords.contains("for"));
        assert!(!keywords.contains("fo"));
        // No case folding.
        assert!(!keywords.contains("Foreach"));
        assert!(!keywords.contains("WHILE"));
        // No prefix or suffix matching.
        assert!(!keywords.contains("whiles"));
        assert!(!keywords.contains("regress"));
    }

    #[test]
    fn duplicates_collapse() {
        let duplicates = STATA_KEYWORDS.iter().filter(|w| **w == "drop").count();
        assert_eq!(duplicates, 2);
        assert_eq!(KeywordSet::stata().len(), STATA_KEYWORDS.iter().collect::<HashSet<_>>().len());
    }

    #[test]
    fn built_once() {
        assert!(std::ptr::eq(KeywordSet::stata(), KeywordSet::stata()));
    }

    #[test]
    fn custom_set() {
        let keywords = KeywordSet::new(["program", "end"]);
        assert_eq!(keywords.len(), 2);
        assert!(keywords.contains("end"));
        assert!(!keywords.contains("while"));
        let mut words: Vec<_> = keywords.iter().collect();
        words.sort();
        assert_eq!(words, ["end", "program"]);
        assert!(KeywordSet::default().is_empty());
    }
}
