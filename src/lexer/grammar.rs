//! Compiled rule tables.

use regex::Regex;

use super::rules::{Emit, Guard, Item, RuleDefinition, State, StateDefinition, Transition, STATA};

/// Reasons a set of [StateDefinition]s cannot be used to scan.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("state {state} is defined more than once")]
    DuplicateState { state: State },

    #[error("no definition for the root state")]
    MissingRoot,

    #[error("state {from} refers to undefined state {state}")]
    UndefinedState { from: State, state: State },

    #[error("state {state} mixes itself in")]
    RecursiveMixin { state: State },

    #[error("could not parse pattern {pattern:?} in state {state}: {source}")]
    Syntax {
        state: State,
        pattern: &'static str,
        #[source]
        source: Box<regex_syntax::Error>,
    },

    #[error("could not compile pattern {pattern:?} in state {state}: {source}")]
    Compile {
        state: State,
        pattern: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("pattern {pattern:?} in state {state} can match the empty string")]
    EmptyMatch { state: State, pattern: &'static str },

    #[error("pattern {pattern:?} in state {state} has {groups} capture groups for {kinds} kinds")]
    GroupMismatch { state: State, pattern: &'static str, groups: usize, kinds: usize },
}

/// A rule ready for matching.
#[derive(Debug)]
pub(crate) struct Rule {
    /// Index of this rule across all states of its grammar.
    pub(crate) id: usize,
    /// Unanchored; the scanner searches from its cursor and checks where the match starts.
    pub(crate) regex: Regex,
    pub(crate) guard: Option<Guard>,
    pub(crate) emit: Emit,
    pub(crate) transition: Transition,
}

/// Validated, compiled rule tables for every state, with mixins spliced in.
#[derive(Debug)]
pub struct Grammar {
    states: [Vec<Rule>; 4],
    rule_total: usize,
}

impl Grammar {
    pub fn new(definitions: &[StateDefinition]) -> Result<Grammar, GrammarError> {
        let mut defined: [Option<&StateDefinition>; 4] = [None; 4];
        for definition in definitions {
            let slot = &mut defined[definition.state.index()];
            if slot.is_some() {
                return Err(GrammarError::DuplicateState { state: definition.state });
            }
            *slot = Some(definition);
        }
        if defined[State::Root.index()].is_none() {
            return Err(GrammarError::MissingRoot);
        }

        let mut states: [Vec<Rule>; 4] = Default::default();
        let mut rule_total = 0;
        for definition in definitions {
            let mut flattened = Vec::new();
            let mut visiting = Vec::new();
            flatten(definition.state, &defined, &mut visiting, &mut flattened)?;

            let rules = flattened
                .into_iter()
                .map(|(owner, rule)| {
                    if let Transition::Push(target) = rule.transition {
                        if defined[target.index()].is_none() {
                            return Err(GrammarError::UndefinedState { from: owner, state: target });
                        }
                    }
                    let compiled = compile(rule_total, owner, rule);
                    rule_total += 1;
                    compiled
                })
                .collect::<Result<Vec<_>, _>>()?;
            tracing::debug!("state {} has {} rules", definition.state, rules.len());
            states[definition.state.index()] = rules;
        }
        Ok(Grammar { states, rule_total })
    }

    /// The built-in Stata grammar.
    pub fn stata() -> Result<Grammar, GrammarError> {
        Grammar::new(STATA)
    }

    pub(crate) fn rules(&self, state: State) -> &[Rule] {
        &self.states[state.index()]
    }

    /// Number of compiled rules in every state together. Rule ids are below this.
    pub(crate) fn rule_total(&self) -> usize {
        self.rule_total
    }

    /// Number of rules active in `state`, mixins included.
    pub fn rule_count(&self, state: State) -> usize {
        self.states[state.index()].len()
    }
}

/// Collects the rules of `state` in priority order, expanding mixins depth-first.
/// Each rule is paired with the state that declares it, for error reporting.
fn flatten(
    state: State,
    defined: &[Option<&StateDefinition>; 4],
    visiting: &mut Vec<State>,
    out: &mut Vec<(State, RuleDefinition)>,
) -> Result<(), GrammarError> {
    if visiting.contains(&state) {
        return Err(GrammarError::RecursiveMixin { state });
    }
    let from = visiting.last().copied().unwrap_or(state);
    let definition =
        defined[state.index()].ok_or(GrammarError::UndefinedState { from, state })?;

    visiting.push(state);
    for item in definition.items {
        match item {
            Item::Rule(rule) => out.push((state, *rule)),
            Item::Mixin(mixin) => flatten(*mixin, defined, visiting, out)?,
        }
    }
    visiting.pop();
    Ok(())
}

fn compile(id: usize, state: State, rule: RuleDefinition) -> Result<Rule, GrammarError> {
    let pattern = rule.pattern;
    let hir = regex_syntax::parse(pattern)
        .map_err(|source| GrammarError::Syntax { state, pattern, source: Box::new(source) })?;
    // A rule that can match nothing would never advance the cursor.
    if hir.properties().minimum_len() == Some(0) {
        return Err(GrammarError::EmptyMatch { state, pattern });
    }

    let regex =
        Regex::new(pattern).map_err(|source| GrammarError::Compile { state, pattern, source })?;

    if let Emit::Groups(kinds) = rule.emit {
        let groups = regex.captures_len() - 1;
        if groups != kinds.len() {
            return Err(GrammarError::GroupMismatch { state, pattern, groups, kinds: kinds.len() });
        }
    }

    Ok(Rule { id, regex, guard: rule.guard, emit: rule.emit, transition: rule.transition })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::TokenKind;

    const WORD: Item = Item::Rule(RuleDefinition::new("[a-z]+", Emit::Keyword));

    #[test]
    fn stata_grammar_is_valid() {
        let grammar = Grammar::stata().unwrap();
        assert_eq!(grammar.rule_count(State::Whitespace), 5);
        assert_eq!(grammar.rule_count(State::Operators), 4);
        assert_eq!(grammar.rule_count(State::String), 3);
        // Mixins are spliced in ahead of root's own rules.
        assert_eq!(grammar.rule_count(State::Root), 5 + 4 + 4);
    }

    #[test]
    fn rule_ids_are_distinct() {
        let grammar = Grammar::stata().unwrap();
        let mut ids: Vec<usize> =
            State::ALL.iter().flat_map(|state| grammar.rules(*state)).map(|rule| rule.id).collect();
        ids.sort();
        assert_eq!(ids, (0..grammar.rule_total()).collect::<Vec<_>>());
    }

    #[test]
    fn rejects_empty_match() {
        const EMPTY: &[Item] =
            &[Item::Rule(RuleDefinition::new(" *", Emit::Kind(TokenKind::Text)))];
        let definitions = [StateDefinition { state: State::Root, items: EMPTY }];
        match Grammar::new(&definitions) {
            Err(GrammarError::EmptyMatch { state: State::Root, pattern: " *" }) => (),
            v => panic!("unexpected result: {v:?}"),
        }
    }

    #[test]
    fn rejects_zero_width_assertion() {
        const BOUNDARY: &[Item] =
            &[Item::Rule(RuleDefinition::new(r"\b", Emit::Kind(TokenKind::Text)))];
        let definitions = [StateDefinition { state: State::Root, items: BOUNDARY }];
        match Grammar::new(&definitions) {
            Err(GrammarError::EmptyMatch { .. }) => (),
            v => panic!("unexpected result: {v:?}"),
        }
    }

    #[test]
    fn rejects_empty_match_in_mixin() {
        const OPTIONAL_SPACE: &[Item] =
            &[Item::Rule(RuleDefinition::new(r"\s?", Emit::Kind(TokenKind::Text)))];
        let definitions = [
            StateDefinition { state: State::Whitespace, items: OPTIONAL_SPACE },
            StateDefinition { state: State::Root, items: &[Item::Mixin(State::Whitespace), WORD] },
        ];
        match Grammar::new(&definitions) {
            Err(GrammarError::EmptyMatch { state: State::Whitespace, .. }) => (),
            v => panic!("unexpected result: {v:?}"),
        }
    }

    #[test]
    fn rejects_invalid_pattern() {
        const UNCLOSED: &[Item] =
            &[Item::Rule(RuleDefinition::new("(abc", Emit::Kind(TokenKind::Name)))];
        let definitions = [StateDefinition { state: State::Root, items: UNCLOSED }];
        let err = Grammar::new(&definitions).unwrap_err();
        assert!(matches!(err, GrammarError::Syntax { .. }), "unexpected error: {err:?}");
        assert!(err.to_string().contains("(abc"));
    }

    #[test]
    fn rejects_group_mismatch() {
        const KINDS: &[TokenKind] = &[TokenKind::Punctuation, TokenKind::Name];
        const THREE_GROUPS: &[Item] =
            &[Item::Rule(RuleDefinition::new("(a)(b)(c)", Emit::Groups(KINDS)))];
        let definitions = [StateDefinition { state: State::Root, items: THREE_GROUPS }];
        match Grammar::new(&definitions) {
            Err(GrammarError::GroupMismatch { groups: 3, kinds: 2, .. }) => (),
            v => panic!("unexpected result: {v:?}"),
        }
    }

    #[test]
    fn rejects_missing_root() {
        let definitions = [StateDefinition { state: State::String, items: &[WORD] }];
        assert!(matches!(Grammar::new(&definitions), Err(GrammarError::MissingRoot)));
    }

    #[test]
    fn rejects_duplicate_state() {
        let definitions = [
            StateDefinition { state: State::Root, items: &[WORD] },
            StateDefinition { state: State::Root, items: &[WORD] },
        ];
        assert!(matches!(
            Grammar::new(&definitions),
            Err(GrammarError::DuplicateState { state: State::Root })
        ));
    }

    #[test]
    fn rejects_undefined_mixin() {
        let definitions =
            [StateDefinition { state: State::Root, items: &[Item::Mixin(State::Operators)] }];
        match Grammar::new(&definitions) {
            Err(GrammarError::UndefinedState { from: State::Root, state: State::Operators }) => (),
            v => panic!("unexpected result: {v:?}"),
        }
    }

    #[test]
    fn rejects_undefined_push() {
        const OPEN_QUOTE: &[Item] =
            &[Item::Rule(RuleDefinition::new("\"", Emit::Kind(TokenKind::Str)).push(State::String))];
        let definitions = [StateDefinition { state: State::Root, items: OPEN_QUOTE }];
        match Grammar::new(&definitions) {
            Err(GrammarError::UndefinedState { from: State::Root, state: State::String }) => (),
            v => panic!("unexpected result: {v:?}"),
        }
    }

    #[test]
    fn rejects_recursive_mixin() {
        let definitions = [
            StateDefinition { state: State::Whitespace, items: &[Item::Mixin(State::Operators)] },
            StateDefinition { state: State::Operators, items: &[Item::Mixin(State::Whitespace)] },
            StateDefinition { state: State::Root, items: &[WORD] },
        ];
        assert!(matches!(Grammar::new(&definitions), Err(GrammarError::RecursiveMixin { .. })));
    }
}
