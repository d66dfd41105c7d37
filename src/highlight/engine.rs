//! Regex state-machine engine
//!
//! Runs a [`TokenTable`] over a string. The lexer keeps a stack of state names, starting
//! with `root`. At each offset the rules of the state on top of the stack are tried in
//! order; the first one that matches emits its tokens, consumes the match and applies its
//! transition.
//!
//! When no rule matches, a newline resets the stack to `root` and is emitted as
//! whitespace, and any other character is emitted on its own as an [`TokenKind::Error`]
//! token. Highlighting never fails on unexpected input; it only fails when the table
//! itself is broken.

use crate::highlight::error::HighlightError;
use crate::highlight::options::{preprocess, LexerOptions};
use crate::highlight::rules::{Action, PatternFlags, TokenTable, Transition, ROOT_STATE};
use crate::highlight::token::TokenKind;
use fancy_regex::{Captures, Regex};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

/// Registration data for a highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LexerInfo {
    /// Human readable name.
    pub name: &'static str,
    /// Fence tags resolving to this highlighter.
    pub aliases: &'static [&'static str],
    /// File name globs.
    pub filenames: &'static [&'static str],
    pub mimetypes: &'static [&'static str],
}

/// Anything that turns text into a token stream.
pub trait Highlighter: Send + Sync {
    fn info(&self) -> &LexerInfo;

    /// Tokenize `text` as is, returning byte ranges into it.
    fn tokens_unprocessed(
        &self,
        text: &str,
    ) -> Result<Vec<(TokenKind, Range<usize>)>, HighlightError>;

    /// Preprocess `text` according to `options` and tokenize it.
    fn highlight_with(
        &self,
        text: &str,
        options: &LexerOptions,
    ) -> Result<Vec<(TokenKind, String)>, HighlightError> {
        let text = preprocess(text, options);
        let tokens = self.tokens_unprocessed(&text)?;
        Ok(tokens
            .into_iter()
            .map(|(kind, range)| (kind, text[range].to_string()))
            .collect())
    }

    /// [`highlight_with`](Highlighter::highlight_with) using default options.
    fn highlight(&self, text: &str) -> Result<Vec<(TokenKind, String)>, HighlightError> {
        self.highlight_with(text, &LexerOptions::default())
    }

    /// The token table driving this highlighter, if it has one.
    fn token_table(&self) -> Option<&TokenTable> {
        None
    }
}

#[derive(Debug)]
struct CompiledRule {
    regex: Regex,
    action: Action,
    transition: Option<Transition>,
}

#[derive(Debug)]
struct CompiledTable {
    states: HashMap<String, Vec<CompiledRule>>,
}

type CompiledCell = OnceCell<Result<Arc<CompiledTable>, HighlightError>>;

/// A highlighter driven by a token table.
///
/// The table is compiled on first use. Lexers made with [`RegexLexer::renamed`] share
/// both the table and its compiled form with the lexer they were made from.
#[derive(Debug)]
pub struct RegexLexer {
    info: LexerInfo,
    flags: PatternFlags,
    table: Arc<TokenTable>,
    compiled: Arc<CompiledCell>,
}

impl RegexLexer {
    pub fn new(info: LexerInfo, flags: PatternFlags, table: TokenTable) -> Self {
        RegexLexer {
            info,
            flags,
            table: Arc::new(table),
            compiled: Arc::new(OnceCell::new()),
        }
    }

    /// The same lexer registered under different names.
    pub fn renamed(&self, info: LexerInfo) -> Self {
        RegexLexer {
            info,
            flags: self.flags,
            table: Arc::clone(&self.table),
            compiled: Arc::clone(&self.compiled),
        }
    }

    pub fn table(&self) -> &TokenTable {
        &self.table
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// True if both lexers run the very same table.
    pub fn shares_table_with(&self, other: &RegexLexer) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }

    /// Compile the table now, reporting the first broken rule.
    pub fn validate(&self) -> Result<(), HighlightError> {
        self.compiled().map(|_| ())
    }

    fn compiled(&self) -> Result<Arc<CompiledTable>, HighlightError> {
        self.compiled
            .get_or_init(|| {
                tracing::debug!(lexer = self.info.name, "compiling token table");
                compile(&self.table, self.flags).map(Arc::new)
            })
            .clone()
    }
}

impl Highlighter for RegexLexer {
    fn info(&self) -> &LexerInfo {
        &self.info
    }

    fn token_table(&self) -> Option<&TokenTable> {
        Some(&self.table)
    }

    fn tokens_unprocessed(
        &self,
        text: &str,
    ) -> Result<Vec<(TokenKind, Range<usize>)>, HighlightError> {
        let table = self.compiled()?;
        let mut tokens = Vec::new();
        scan(&table, text, &mut tokens)?;
        Ok(tokens)
    }
}

fn compile(table: &TokenTable, flags: PatternFlags) -> Result<CompiledTable, HighlightError> {
    if !table.contains_state(ROOT_STATE) {
        return Err(HighlightError::UnknownState {
            state: ROOT_STATE.to_string(),
            referenced_from: None,
        });
    }

    let mut states = HashMap::with_capacity(table.len());
    for (name, rules) in table.states() {
        let mut compiled = Vec::with_capacity(rules.len());
        for (index, rule) in rules.iter().enumerate() {
            if let Some(transition) = &rule.transition {
                if let Some(missing) = transition
                    .targets()
                    .iter()
                    .find(|target| !table.contains_state(target))
                {
                    return Err(HighlightError::UnknownState {
                        state: missing.clone(),
                        referenced_from: Some(name.to_string()),
                    });
                }
            }

            let regex = Regex::new(&flags.anchored(&rule.pattern)).map_err(|err| {
                HighlightError::InvalidPattern {
                    state: name.to_string(),
                    index,
                    pattern: rule.pattern.clone(),
                    message: err.to_string(),
                }
            })?;
            compiled.push(CompiledRule {
                regex,
                action: rule.action.clone(),
                transition: rule.transition.clone(),
            });
        }
        states.insert(name.to_string(), compiled);
    }

    Ok(CompiledTable { states })
}

fn scan(
    table: &CompiledTable,
    text: &str,
    tokens: &mut Vec<(TokenKind, Range<usize>)>,
) -> Result<(), HighlightError> {
    let mut stack: Vec<&str> = vec![ROOT_STATE];
    let mut pos = 0;

    'scan: while pos < text.len() {
        let state = stack.last().copied().unwrap_or(ROOT_STATE);
        let rules = table
            .states
            .get(state)
            .ok_or_else(|| HighlightError::UnknownState {
                state: state.to_string(),
                referenced_from: None,
            })?;
        let rest = &text[pos..];

        for (index, rule) in rules.iter().enumerate() {
            let captures = rule
                .regex
                .captures(rest)
                .map_err(|err| HighlightError::Match {
                    state: state.to_string(),
                    index,
                    message: err.to_string(),
                })?;
            let Some(captures) = captures else {
                continue;
            };
            let Some(whole) = captures.get(0) else {
                continue;
            };

            // An empty match only counts if it moves the state machine.
            if whole.end() == 0 {
                let Some(transition) = &rule.transition else {
                    continue;
                };
                let mut next = stack.clone();
                transition.apply(&mut next);
                if next == stack {
                    continue;
                }
            }

            emit(&rule.action, &captures, pos, tokens)?;
            pos += whole.end();
            if let Some(transition) = &rule.transition {
                transition.apply(&mut stack);
                tracing::trace!(from = state, stack = ?stack, "state transition");
            }
            continue 'scan;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        let end = pos + ch.len_utf8();
        if ch == '\n' {
            stack.truncate(1);
            tokens.push((TokenKind::Whitespace, pos..end));
        } else {
            tokens.push((TokenKind::Error, pos..end));
        }
        pos = end;
    }

    Ok(())
}

fn emit(
    action: &Action,
    captures: &Captures<'_>,
    base: usize,
    tokens: &mut Vec<(TokenKind, Range<usize>)>,
) -> Result<(), HighlightError> {
    let Some(whole) = captures.get(0) else {
        return Ok(());
    };

    match action {
        Action::Token(kind) => {
            if whole.start() < whole.end() {
                tokens.push((*kind, base + whole.start()..base + whole.end()));
            }
        }
        Action::ByGroups(kinds) => {
            for (group, kind) in kinds.iter().enumerate() {
                let (Some(kind), Some(m)) = (kind, captures.get(group + 1)) else {
                    continue;
                };
                if m.start() < m.end() {
                    tokens.push((*kind, base + m.start()..base + m.end()));
                }
            }
        }
        Action::Using(language) => {
            let nested = language.lexer().tokens_unprocessed(whole.as_str())?;
            let shift = base + whole.start();
            tokens.extend(
                nested
                    .into_iter()
                    .map(|(kind, range)| (kind, range.start + shift..range.end + shift)),
            );
        }
        Action::Skip => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::lexers::Language;
    use crate::highlight::rules::{bygroups, rule, Rule};

    const INFO: LexerInfo = LexerInfo {
        name: "Test",
        aliases: &["test"],
        filenames: &[],
        mimetypes: &[],
    };

    fn lexer(table: TokenTable) -> RegexLexer {
        RegexLexer::new(INFO, PatternFlags::default(), table)
    }

    fn kinds(lexer: &RegexLexer, text: &str) -> Vec<(TokenKind, String)> {
        let tokens = lexer.tokens_unprocessed(text).unwrap();
        tokens
            .into_iter()
            .map(|(kind, range)| (kind, text[range].to_string()))
            .collect()
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let lexer = lexer(TokenTable::new().with_state(
            ROOT_STATE,
            vec![
                rule("let", TokenKind::Keyword),
                rule("[a-z]+", TokenKind::Name),
                rule(r"\s+", TokenKind::Whitespace),
            ],
        ));
        assert_eq!(
            kinds(&lexer, "let letter"),
            vec![
                (TokenKind::Keyword, "let".to_string()),
                (TokenKind::Whitespace, " ".to_string()),
                (TokenKind::Keyword, "let".to_string()),
                (TokenKind::Name, "ter".to_string()),
            ]
        );
    }

    #[test]
    fn test_unmatched_characters_become_error_tokens() {
        let lexer = lexer(TokenTable::new().with_state(
            ROOT_STATE,
            vec![rule("[a-z]+", TokenKind::Name)],
        ));
        assert_eq!(
            kinds(&lexer, "ab#é"),
            vec![
                (TokenKind::Name, "ab".to_string()),
                (TokenKind::Error, "#".to_string()),
                (TokenKind::Error, "é".to_string()),
            ]
        );
    }

    #[test]
    fn test_newline_resets_to_root() {
        let lexer = lexer(
            TokenTable::new()
                .with_state(ROOT_STATE, vec![rule("<", TokenKind::Punctuation).push("tag")])
                .with_state("tag", vec![rule("[a-z]+", TokenKind::NameTag)]),
        );
        assert_eq!(
            kinds(&lexer, "<a\nb"),
            vec![
                (TokenKind::Punctuation, "<".to_string()),
                (TokenKind::NameTag, "a".to_string()),
                (TokenKind::Whitespace, "\n".to_string()),
                (TokenKind::Error, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_bygroups_skips_empty_and_dropped_groups() {
        let lexer = lexer(TokenTable::new().with_state(
            ROOT_STATE,
            vec![Rule::new(
                r"(\w+)(\s*)(=)",
                Action::ByGroups(vec![Some(TokenKind::NameAttribute), Some(TokenKind::Text), None]),
            )],
        ));
        assert_eq!(
            kinds(&lexer, "a="),
            vec![(TokenKind::NameAttribute, "a".to_string())]
        );
    }

    #[test]
    fn test_default_transition_changes_state_without_consuming() {
        let lexer = lexer(
            TokenTable::new()
                .with_state(
                    ROOT_STATE,
                    vec![
                        rule("x", TokenKind::Name),
                        Rule::default_transition(Transition::push("digits")),
                    ],
                )
                .with_state(
                    "digits",
                    vec![
                        rule("[0-9]+", TokenKind::Number),
                        Rule::default_transition(Transition::Pop(1)),
                    ],
                ),
        );
        assert_eq!(
            kinds(&lexer, "x1x"),
            vec![
                (TokenKind::Name, "x".to_string()),
                (TokenKind::Number, "1".to_string()),
                (TokenKind::Name, "x".to_string()),
            ]
        );
    }

    #[test]
    fn test_using_shifts_nested_offsets() {
        let lexer = lexer(TokenTable::new().with_state(
            ROOT_STATE,
            vec![
                rule("<", TokenKind::Punctuation),
                rule("[^<]+", Action::Using(Language::JavaScript)),
            ],
        ));
        let tokens = lexer.tokens_unprocessed("<var").unwrap();
        assert_eq!(tokens[0], (TokenKind::Punctuation, 0..1));
        assert_eq!(tokens[1], (TokenKind::KeywordDeclaration, 1..4));
    }

    #[test]
    fn test_bygroups_helper() {
        let lexer = lexer(TokenTable::new().with_state(
            ROOT_STATE,
            vec![rule(
                r"(<)(\w+)",
                bygroups(&[TokenKind::Punctuation, TokenKind::NameTag]),
            )],
        ));
        assert_eq!(kinds(&lexer, "<b").len(), 2);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let lexer = lexer(TokenTable::new().with_state(
            ROOT_STATE,
            vec![rule("ok", TokenKind::Name), rule("(unclosed", TokenKind::Name)],
        ));
        match lexer.validate() {
            Err(HighlightError::InvalidPattern { state, index, .. }) => {
                assert_eq!(state, ROOT_STATE);
                assert_eq!(index, 1);
            }
            other => panic!("expected invalid pattern, got {:?}", other),
        }
        assert!(lexer.tokens_unprocessed("ok").is_err());
    }

    #[test]
    fn test_unknown_transition_target_is_reported() {
        let lexer = lexer(TokenTable::new().with_state(
            ROOT_STATE,
            vec![rule("<", TokenKind::Punctuation).push("tag")],
        ));
        assert_eq!(
            lexer.validate(),
            Err(HighlightError::UnknownState {
                state: "tag".to_string(),
                referenced_from: Some(ROOT_STATE.to_string()),
            })
        );
    }

    #[test]
    fn test_missing_root_is_reported() {
        let lexer = lexer(TokenTable::new().with_state("tag", vec![]));
        assert!(matches!(
            lexer.validate(),
            Err(HighlightError::UnknownState { referenced_from: None, .. })
        ));
    }

    #[test]
    fn test_renamed_shares_table() {
        let base = lexer(TokenTable::new().with_state(ROOT_STATE, vec![]));
        let renamed = base.renamed(LexerInfo {
            name: "Other",
            ..INFO
        });
        assert!(renamed.shares_table_with(&base));
        assert_eq!(renamed.token_table(), Some(base.table()));
        assert_eq!(renamed.info().name, "Other");
        assert_eq!(base.info().name, "Test");
    }
}
