//! Highlighting
//!
//! This module holds the whole highlighting pipeline, from token tables to
//! rendered output.
//!
//! Structure:
//!     Lexers are data. Each base language is a [`TokenTable`](rules::TokenTable): a map
//! from state name to an ordered list of regex rules, tried in declaration order with the
//! first match winning. The [`engine`] compiles a table once and walks the input with a
//! stack of states, delegating spans to other lexers where a rule says so.
//!
//! The pipeline consists of:
//! 1. Token tables for the base languages ./lexers/*.rs
//! 2. Table patching for the template dialect ./patch.rs
//! 3. Tokenization by the regex state machine ./engine.rs
//! 4. Rendering of the token stream ./formatter.rs
//!
//! Lookup of a highlighter by fence tag or file name goes through the [`registry`].

pub mod engine;
pub mod error;
pub mod formatter;
pub mod lexers;
pub mod options;
pub mod patch;
pub mod registry;
pub mod rules;
pub mod token;

pub use engine::{Highlighter, LexerInfo, RegexLexer};
pub use error::{FormatError, HighlightError, PatchError, RegistryError};
pub use formatter::{Formatter, HtmlFormatter, HtmlOptions, JsonFormatter};
pub use lexers::Language;
pub use options::LexerOptions;
pub use patch::patch;
pub use registry::LexerRegistry;
pub use rules::{Action, PatternFlags, Rule, TokenTable, Transition};
pub use token::TokenKind;

/// Highlight `source` with `highlighter` and render it with `formatter`.
pub fn highlight(
    source: &str,
    highlighter: &dyn Highlighter,
    formatter: &dyn Formatter,
    options: &LexerOptions,
) -> Result<String, HighlightError> {
    let tokens = highlighter.highlight_with(source, options)?;
    formatter.format(&tokens).map_err(HighlightError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::lexers::VUE;

    #[test]
    fn test_highlight_renders_html() {
        let html = highlight(
            "<b>hi</b>",
            &*VUE,
            &HtmlFormatter::default(),
            &LexerOptions::default(),
        )
        .unwrap();

        assert!(html.starts_with("<div class=\"highlight\"><pre><span></span>"));
        assert!(html.contains("<span class=\"nt\">b</span>"));
        assert!(html.ends_with("</pre></div>\n"));
    }
}
