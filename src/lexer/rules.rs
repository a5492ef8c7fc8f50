//! Declarative rule tables.
//!
//! A grammar is a list of [StateDefinition]s. Each state lists its rules in priority order;
//! the scanner tries them in that order and takes the first that matches. A state can also mix
//! in the rules of another state at any point in its list.

use std::fmt::Display;

use super::token::TokenKind;

/// A named rule set the scanner can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    Whitespace,
    Operators,
    String,
    /// The entry state. It is always at the bottom of the state stack.
    Root,
}

impl State {
    pub const ALL: [State; 4] = [State::Whitespace, State::Operators, State::String, State::Root];

    pub(crate) fn index(self) -> usize {
        match self {
            State::Whitespace => 0,
            State::Operators => 1,
            State::String => 2,
            State::Root => 3,
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            State::Whitespace => "whitespace",
            State::Operators => "operators",
            State::String => "string",
            State::Root => "root",
        };
        f.write_str(s)
    }
}

/// Context check on the text around a match.
///
/// The regex engine has no lookaround, so conditions on the characters around a match live
/// here instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// The match must begin at the start of the input or right after a `\n`.
    LineStart,

    /// The character before the match must not be an ASCII letter or `.`, and the character
    /// after must exist and be neither a line break, an ASCII letter nor `.`.
    ///
    /// This keeps `3/2` an operator while `dir/file.do` stays a path.
    NotInPath,
}

impl Guard {
    /// The part of the check that only looks before `start`. The scanner skips the pattern
    /// entirely where this fails.
    pub fn accepts_start(self, source: &str, start: usize) -> bool {
        let before = source[..start].chars().next_back();
        match self {
            Guard::LineStart => before.map_or(true, |c| c == '\n'),
            Guard::NotInPath => !before.is_some_and(is_path_char),
        }
    }

    /// Whether a match spanning `start..end` of `source` is acceptable.
    pub fn accepts(self, source: &str, start: usize, end: usize) -> bool {
        if !self.accepts_start(source, start) {
            return false;
        }
        match self {
            Guard::LineStart => true,
            Guard::NotInPath => {
                source[end..].chars().next().is_some_and(|c| c != '\n' && !is_path_char(c))
            }
        }
    }
}

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '.'
}

/// What a matching rule emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emit {
    /// The whole match as one token.
    Kind(TokenKind),

    /// One token per capture group, in order. Empty groups emit nothing.
    Groups(&'static [TokenKind]),

    /// The whole match, as [TokenKind::Keyword] if it is in the keyword set and
    /// [TokenKind::Name] otherwise.
    Keyword,
}

/// How a matching rule changes the state stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Push(State),
    Pop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleDefinition {
    /// Regular expression. Only a match beginning at the scan position counts.
    pub pattern: &'static str,
    pub guard: Option<Guard>,
    pub emit: Emit,
    pub transition: Transition,
}

impl RuleDefinition {
    pub const fn new(pattern: &'static str, emit: Emit) -> Self {
        RuleDefinition { pattern, guard: None, emit, transition: Transition::Stay }
    }

    pub const fn guarded(self, guard: Guard) -> Self {
        RuleDefinition { guard: Some(guard), ..self }
    }

    pub const fn push(self, state: State) -> Self {
        RuleDefinition { transition: Transition::Push(state), ..self }
    }

    pub const fn pop(self) -> Self {
        RuleDefinition { transition: Transition::Pop, ..self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Item {
    Rule(RuleDefinition),
    /// Splice in every rule of another state at this point.
    Mixin(State),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateDefinition {
    pub state: State,
    pub items: &'static [Item],
}

const fn emit(pattern: &'static str, kind: TokenKind) -> RuleDefinition {
    RuleDefinition::new(pattern, Emit::Kind(kind))
}

const INTERPOLATION: &[TokenKind] =
    &[TokenKind::Punctuation, TokenKind::StrInterpol, TokenKind::Punctuation];

/// The Stata grammar.
pub const STATA: &[StateDefinition] = &[
    StateDefinition {
        state: State::Whitespace,
        items: &[
            Item::Rule(
                emit(r"[^\S\r\n]*\*[^\n]*\n?", TokenKind::CommentSingle).guarded(Guard::LineStart),
            ),
            Item::Rule(emit(r"[^\S\r\n]+", TokenKind::Text)),
            Item::Rule(emit(r"//[^\n]*", TokenKind::CommentSingle)),
            Item::Rule(emit(r"(?s)/\*.*?\*/", TokenKind::CommentMultiline)),
            Item::Rule(emit(r"[\r\n]+", TokenKind::Text)),
        ],
    },
    StateDefinition {
        state: State::Operators,
        items: &[
            Item::Rule(emit(r"[-^*+]", TokenKind::Operator)),
            Item::Rule(emit(r"/", TokenKind::Operator).guarded(Guard::NotInPath)),
            // Ahead of the logical operators, so `!=` and `~=` stay whole.
            Item::Rule(emit(r"<=?|>=?|==?|!=|~=", TokenKind::Operator)),
            Item::Rule(emit(r"[&|!~]", TokenKind::Operator)),
        ],
    },
    StateDefinition {
        state: State::String,
        items: &[
            Item::Rule(emit(r#"[^\\"]+"#, TokenKind::Str)),
            Item::Rule(emit(r"(?s)\\.", TokenKind::StrEscape)),
            Item::Rule(emit(r#"""#, TokenKind::Str).pop()),
        ],
    },
    StateDefinition {
        state: State::Root,
        items: &[
            Item::Mixin(State::Whitespace),
            Item::Mixin(State::Operators),
            Item::Rule(emit(r#"""#, TokenKind::Str).push(State::String)),
            Item::Rule(RuleDefinition::new(r"(`)(.*)(')", Emit::Groups(INTERPOLATION))),
            Item::Rule(RuleDefinition::new(r"[\w.$\\]+", Emit::Keyword)),
            Item::Rule(emit(r"[()\[\]{},;:#/]", TokenKind::Punctuation)),
        ],
    },
];
