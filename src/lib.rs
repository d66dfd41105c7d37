//! # doclex
//!
//! Syntax highlighting lexers for documentation sites whose code samples mix
//! HTML-ish templates with TypeScript.
//!
//! The crate exports three highlighters on top of a small regex state-machine
//! engine:
//!
//! - [`VUE_TS`](highlight::lexers::VUE_TS) and
//!   [`KNOCKOUT`](highlight::lexers::KNOCKOUT): TypeScript under another name, so
//!   fenced blocks tagged `vue-ts` or `knockout` resolve to a highlighter.
//! - [`VUE`](highlight::lexers::VUE): the HTML lexer with its token table run
//!   through [`patch`](highlight::patch::patch), so that attribute names may
//!   contain `#` and `.` and `<script>` bodies are highlighted as TypeScript.
//!
//! Configuration lives in [`config`], rendering in
//! [`formatter`](highlight::formatter).

pub mod config;
pub mod highlight;

pub use highlight::{highlight, HighlightError, Highlighter, LexerOptions, TokenKind};
