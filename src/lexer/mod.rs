//! Routines for tokenization.
//!
//! The scanner is a small state machine. At each position it tries the rules of the state on
//! top of its stack, in declaration order, and the first rule that matches wins. A match may
//! emit several tokens and push or pop a state. When nothing matches, one character is emitted
//! as [TokenKind::Error] and scanning continues, so malformed input degrades instead of failing.

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::sync::OnceLock;

use crate::keywords::KeywordSet;

mod grammar;
pub mod rules;
mod token;

pub use grammar::{Grammar, GrammarError};
pub use rules::State;
pub use token::{Position, Token, TokenKind};

use grammar::Rule;
use rules::{Emit, Transition};

/// Tokenize Stata source with the built-in grammar and keywords.
pub fn tokenize(source: &str) -> Tokens<'_> {
    Lexer::stata().tokenize(source)
}

/// A grammar paired with the keyword set its identifiers are classified against.
#[derive(Debug)]
pub struct Lexer<'k> {
    grammar: Grammar,
    keywords: &'k KeywordSet,
}

impl<'k> Lexer<'k> {
    pub fn new(grammar: Grammar, keywords: &'k KeywordSet) -> Self {
        Lexer { grammar, keywords }
    }

    /// The Stata lexer, built on first use.
    pub fn stata() -> &'static Lexer<'static> {
        static LEXER: OnceLock<Lexer<'static>> = OnceLock::new();
        LEXER.get_or_init(|| {
            let grammar = Grammar::stata().expect("could not build the Stata grammar");
            Lexer::new(grammar, KeywordSet::stata())
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn keywords(&self) -> &KeywordSet {
        self.keywords
    }

    /// Returns a lazy iterator over the tokens of `source`.
    ///
    /// The iterator owns its own cursor and state stack; any number may run at once.
    pub fn tokenize<'a>(&'a self, source: &'a str) -> Tokens<'a> {
        Tokens {
            lexer: self,
            source,
            position: Position::start(),
            stack: vec![State::Root],
            pending: VecDeque::new(),
            horizons: vec![0; self.grammar.rule_total()],
        }
    }
}

/// Iterator over the tokens of one input.
///
/// Cloning forks the scan at its current position; [Lexer::tokenize] starts over.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    lexer: &'a Lexer<'a>,
    source: &'a str,
    /// Start of the next unscanned character.
    position: Position,
    stack: Vec<State>,
    /// Tokens from a multi-token match that have not been returned yet.
    pending: VecDeque<Token<'a>>,
    /// Per rule id: no match of that rule starts before this offset. Each search that fails
    /// at the cursor moves the horizon forward, so no stretch of input is searched twice by
    /// the same rule.
    horizons: Vec<usize>,
}

impl<'a> Tokens<'a> {
    /// The active state.
    pub fn state(&self) -> State {
        *self.stack.last().unwrap_or(&State::Root)
    }

    /// The state stack, bottom first. Never empty; the bottom is always [State::Root].
    pub fn stack(&self) -> &[State] {
        &self.stack
    }

    /// Scans one rule match (or one unclassified character) into `pending`.
    fn step(&mut self) {
        let start = self.position.offset;
        let source = self.source;
        let lexer = self.lexer;

        for rule in lexer.grammar.rules(self.state()) {
            if self.horizons[rule.id] > start {
                continue;
            }
            if let Some(guard) = rule.guard {
                if !guard.accepts_start(source, start) {
                    continue;
                }
            }
            let Some(found) = rule.regex.find_at(source, start) else {
                self.horizons[rule.id] = usize::MAX;
                continue;
            };
            if found.start() > start {
                self.horizons[rule.id] = found.start();
                continue;
            }
            // Grammar construction rejects patterns that can match nothing.
            if found.is_empty() {
                continue;
            }
            let end = found.end();
            if let Some(guard) = rule.guard {
                if !guard.accepts(source, start, end) {
                    continue;
                }
            }
            self.emit(rule, end);
            self.transition(rule.transition);
            return;
        }

        let width = source[start..].chars().next().map_or(1, char::len_utf8);
        tracing::trace!("no rule in state {} matches at {}", self.state(), self.position);
        self.push_token(TokenKind::Error, start + width);
    }

    fn emit(&mut self, rule: &Rule, end: usize) {
        let start = self.position.offset;
        let source = self.source;
        match rule.emit {
            Emit::Kind(kind) => self.push_token(kind, end),
            Emit::Keyword => {
                let kind = if self.lexer.keywords.contains(&source[start..end]) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Name
                };
                self.push_token(kind, end);
            }
            Emit::Groups(kinds) => {
                let Some(captures) = rule.regex.captures_at(source, start) else {
                    // Same regex from the same offset as the match that got us here.
                    self.push_token(TokenKind::Error, end);
                    return;
                };
                for (group, kind) in captures.iter().skip(1).zip(kinds) {
                    let Some(group) = group else {
                        continue;
                    };
                    // Text the groups leave uncovered still needs a token.
                    if group.start() > self.position.offset {
                        self.push_token(TokenKind::Text, group.start());
                    }
                    if !group.is_empty() {
                        self.push_token(*kind, group.end());
                    }
                }
                if end > self.position.offset {
                    self.push_token(TokenKind::Text, end);
                }
            }
        }
    }

    fn transition(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => (),
            Transition::Push(state) => {
                tracing::trace!("entering state {} at {}", state, self.position);
                self.stack.push(state);
            }
            Transition::Pop => {
                // Root stays at the bottom.
                if self.stack.len() > 1 {
                    let state = self.stack.pop();
                    tracing::trace!("leaving state {:?} at {}", state, self.position);
                }
            }
        }
    }

    /// Emits the text from the cursor up to `end` as one token and advances past it.
    fn push_token(&mut self, kind: TokenKind, end: usize) {
        let source = self.source;
        let lexeme = &source[self.position.offset..end];
        self.pending.push_back(Token::new(kind, lexeme, self.position));
        self.position = self.position.advance(lexeme);
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.position.offset >= self.source.len() {
                return None;
            }
            self.step();
        }
    }
}

impl<'a> FusedIterator for Tokens<'a> {}
