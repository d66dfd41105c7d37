//! Token table patching for markup templates
//!
//! Template dialects are HTML with two differences that matter for highlighting:
//!
//! 1. Attribute names may contain `#` and `.` (`#default`, `v-on:click.stop`,
//!    `data-bind#visible`). The HTML table reads attribute names with the `[\w:-]` class,
//!    so a `#` or `.` breaks the name apart and is flagged as an error.
//! 2. `<script>` bodies are TypeScript rather than JavaScript.
//!
//! [`patch`] takes an HTML-shaped table and returns a new one with both fixed. The input
//! is only borrowed; callers holding the original table keep seeing it unchanged.
//!
//! The script rule is found by position: the second rule of the `script-content` state.

use crate::highlight::error::PatchError;
use crate::highlight::lexers::Language;
use crate::highlight::rules::{Action, Rule, TokenTable};

/// Character class the HTML table uses for attribute names.
pub const ATTRIBUTE_NAME_CLASS: &str = r"[\w:-]";
/// The same class accepting `.` and `#` as well.
pub const WIDENED_ATTRIBUTE_NAME_CLASS: &str = r"[\w:.#-]";

/// State holding the rules for `<script>` bodies.
pub const SCRIPT_CONTENT_STATE: &str = "script-content";
/// Position of the body-delegating rule within [`SCRIPT_CONTENT_STATE`].
pub const SCRIPT_DELEGATION_INDEX: usize = 1;

/// Patch an HTML table for template dialects.
///
/// Widens attribute names everywhere and delegates `<script>` bodies to TypeScript.
/// Fails without doing any work when the table has no script delegation rule.
pub fn patch(table: &TokenTable) -> Result<TokenTable, PatchError> {
    check_script_delegation(table)?;
    let mut patched = widen_attribute_names(table);
    delegate_script_content(&mut patched, Language::TypeScript)?;
    tracing::debug!(states = patched.len(), "patched token table for templates");
    Ok(patched)
}

/// Copy `table`, rewriting every pattern that uses [`ATTRIBUTE_NAME_CLASS`].
pub fn widen_attribute_names(table: &TokenTable) -> TokenTable {
    let mut widened = 0;
    let patched: TokenTable = table
        .states()
        .map(|(name, rules)| {
            let rules: Vec<Rule> = rules
                .iter()
                .map(|rule| {
                    if rule.pattern.contains(ATTRIBUTE_NAME_CLASS) {
                        widened += 1;
                        Rule {
                            pattern: rule
                                .pattern
                                .replace(ATTRIBUTE_NAME_CLASS, WIDENED_ATTRIBUTE_NAME_CLASS),
                            ..rule.clone()
                        }
                    } else {
                        rule.clone()
                    }
                })
                .collect();
            (name.to_string(), rules)
        })
        .collect();
    tracing::debug!(rules = widened, "widened attribute name patterns");
    patched
}

/// Point the `<script>` body rule of `table` at `language`, keeping its pattern.
///
/// The rule's transition is dropped along with its old action.
pub fn delegate_script_content(
    table: &mut TokenTable,
    language: Language,
) -> Result<(), PatchError> {
    check_script_delegation(table)?;
    let rules = table
        .state_mut(SCRIPT_CONTENT_STATE)
        .ok_or_else(|| PatchError::MissingState {
            state: SCRIPT_CONTENT_STATE.to_string(),
        })?;
    let target = &mut rules[SCRIPT_DELEGATION_INDEX];

    if !matches!(target.action, Action::Using(_)) {
        tracing::warn!(
            pattern = %target.pattern,
            "script-content rule {} does not delegate; replacing it anyway",
            SCRIPT_DELEGATION_INDEX
        );
    }
    target.action = Action::Using(language);
    target.transition = None;
    Ok(())
}

fn check_script_delegation(table: &TokenTable) -> Result<(), PatchError> {
    let rules = table
        .state(SCRIPT_CONTENT_STATE)
        .ok_or_else(|| PatchError::MissingState {
            state: SCRIPT_CONTENT_STATE.to_string(),
        })?;
    if rules.len() <= SCRIPT_DELEGATION_INDEX {
        return Err(PatchError::MissingRule {
            state: SCRIPT_CONTENT_STATE.to_string(),
            index: SCRIPT_DELEGATION_INDEX,
            len: rules.len(),
        });
    }
    Ok(())
}
