//! Token tables
//!
//! A token table maps a state name to an ordered list of rules. Order matters: rules are
//! tried in declaration order and the first match wins, so tables are built as plain
//! vectors and never sorted.
//!
//! Tables are values. Lexers own their table behind an `Arc`, and transformations such as
//! [`patch`](crate::highlight::patch::patch) produce a new table rather than editing one in
//! place.

use crate::highlight::lexers::Language;
use crate::highlight::token::TokenKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// State every lexer starts in.
pub const ROOT_STATE: &str = "root";

/// What a matching rule emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// The whole match as one token.
    Token(TokenKind),
    /// One kind per capture group; `None` drops the group's text.
    ByGroups(Vec<Option<TokenKind>>),
    /// Hand the whole match to another lexer.
    Using(Language),
    /// Consume the match without emitting anything.
    Skip,
}

impl From<TokenKind> for Action {
    fn from(kind: TokenKind) -> Self {
        Action::Token(kind)
    }
}

/// State stack change applied after a rule matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transition {
    /// Push each state in order; the last one ends up on top.
    Push(Vec<String>),
    /// Pop `n` states. The root state is never popped.
    Pop(usize),
    /// Push the current state again.
    PushCurrent,
}

impl Transition {
    pub fn push(state: &str) -> Self {
        Transition::Push(vec![state.to_string()])
    }

    pub fn push_all(states: &[&str]) -> Self {
        Transition::Push(states.iter().map(|s| s.to_string()).collect())
    }

    /// States this transition may enter.
    pub fn targets(&self) -> &[String] {
        match self {
            Transition::Push(states) => states,
            Transition::Pop(_) | Transition::PushCurrent => &[],
        }
    }

    /// Apply the transition to a state stack.
    pub fn apply<'a>(&'a self, stack: &mut Vec<&'a str>) {
        match self {
            Transition::Push(states) => stack.extend(states.iter().map(String::as_str)),
            Transition::Pop(n) => {
                let keep = stack.len().saturating_sub(*n).max(1);
                stack.truncate(keep);
            }
            Transition::PushCurrent => {
                if let Some(top) = stack.last().copied() {
                    stack.push(top);
                }
            }
        }
    }
}

/// A single match rule: a regex pattern plus what to do when it matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub pattern: String,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, action: impl Into<Action>) -> Self {
        Rule {
            pattern: pattern.into(),
            action: action.into(),
            transition: None,
        }
    }

    /// Rule that matches the empty string and only changes state.
    pub fn default_transition(transition: Transition) -> Self {
        Rule::new("", Action::Skip).then(transition)
    }

    pub fn then(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn push(self, state: &str) -> Self {
        self.then(Transition::push(state))
    }

    pub fn pop(self) -> Self {
        self.then(Transition::Pop(1))
    }
}

/// Shorthand for [`Rule::new`], keeps table literals readable.
pub fn rule(pattern: &str, action: impl Into<Action>) -> Rule {
    Rule::new(pattern, action)
}

/// Shorthand for [`Action::ByGroups`] where every group is kept.
pub fn bygroups(kinds: &[TokenKind]) -> Action {
    Action::ByGroups(kinds.iter().copied().map(Some).collect())
}

/// Mapping from state name to its ordered rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenTable {
    states: BTreeMap<String, Vec<Rule>>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a state.
    pub fn with_state(mut self, name: &str, rules: Vec<Rule>) -> Self {
        self.states.insert(name.to_string(), rules);
        self
    }

    pub fn state(&self, name: &str) -> Option<&[Rule]> {
        self.states.get(name).map(Vec::as_slice)
    }

    pub fn contains_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn states(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.states
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    pub(crate) fn state_mut(&mut self, name: &str) -> Option<&mut Vec<Rule>> {
        self.states.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromIterator<(String, Vec<Rule>)> for TokenTable {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Rule>)>>(iter: I) -> Self {
        TokenTable {
            states: iter.into_iter().collect(),
        }
    }
}

/// Regex flags shared by every pattern of a lexer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatternFlags {
    pub case_insensitive: bool,
    /// `.` also matches `\n`.
    pub dot_all: bool,
}

impl PatternFlags {
    /// Source for a pattern anchored at the start of the remaining input.
    ///
    /// Rules are matched against the input from the current offset onwards, so `^` is the
    /// anchor and patterns should not rely on look-behind.
    pub fn anchored(&self, pattern: &str) -> String {
        let mut flags = String::new();
        if self.case_insensitive {
            flags.push('i');
        }
        if self.dot_all {
            flags.push('s');
        }
        if flags.is_empty() {
            format!("^(?:{})", pattern)
        } else {
            format!("(?{})^(?:{})", flags, pattern)
        }
    }
}
