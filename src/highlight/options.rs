//! Input preprocessing applied before a lexer sees the text.
//!
//! Only top-level highlighting preprocesses; spans handed to a nested lexer by a
//! delegating rule are tokenized as they are.

use serde::Deserialize;

/// Knobs for [`preprocess`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LexerOptions {
    /// Strip leading and trailing newlines.
    pub strip_nl: bool,
    /// Strip all leading and trailing whitespace.
    pub strip_all: bool,
    /// Make sure the input ends with a newline.
    pub ensure_nl: bool,
    /// Expand tabs to this many columns; 0 leaves them alone.
    pub tab_size: usize,
}

impl Default for LexerOptions {
    fn default() -> Self {
        LexerOptions {
            strip_nl: true,
            strip_all: false,
            ensure_nl: true,
            tab_size: 0,
        }
    }
}

/// Normalize `source` according to `options`.
pub fn preprocess(source: &str, options: &LexerOptions) -> String {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");

    let stripped = if options.strip_all {
        normalized.trim()
    } else if options.strip_nl {
        normalized.trim_matches('\n')
    } else {
        normalized.as_str()
    };

    let mut text = if options.tab_size > 0 {
        expand_tabs(stripped, options.tab_size)
    } else {
        stripped.to_string()
    };

    if options.ensure_nl && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Replace tabs with spaces up to the next multiple of `tab_size`, per line.
fn expand_tabs(text: &str, tab_size: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let width = tab_size - column % tab_size;
                out.extend(std::iter::repeat(' ').take(width));
                column += width;
            }
            '\n' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}
