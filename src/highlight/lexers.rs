//! Lexers
//!
//! Base languages are plain token tables (see [`javascript`], [`typescript`], [`css`],
//! [`html`]); the documentation dialects in [`dialects`] are built from them, either by
//! renaming a base lexer or by patching its table.
//!
//! Every lexer lives in a `static` and is built on first use. Delegating rules refer to
//! other lexers through [`Language`], which keeps tables free of references and lets them
//! be compared and serialized.

pub mod css;
pub mod dialects;
pub mod html;
pub mod javascript;
pub mod typescript;

use crate::highlight::engine::RegexLexer;
use serde::Serialize;

pub use css::CSS;
pub use dialects::{vue_lexer, KNOCKOUT, VUE, VUE_TS};
pub use html::HTML;
pub use javascript::JAVASCRIPT;
pub use typescript::TYPESCRIPT;

/// The built-in lexers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    #[serde(rename = "javascript")]
    JavaScript,
    #[serde(rename = "typescript")]
    TypeScript,
    #[serde(rename = "css")]
    Css,
    #[serde(rename = "html")]
    Html,
    #[serde(rename = "vue-ts")]
    VueTs,
    #[serde(rename = "knockout")]
    Knockout,
    #[serde(rename = "vue")]
    Vue,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::JavaScript,
        Language::TypeScript,
        Language::Css,
        Language::Html,
        Language::VueTs,
        Language::Knockout,
        Language::Vue,
    ];

    pub fn lexer(self) -> &'static RegexLexer {
        match self {
            Language::JavaScript => &*JAVASCRIPT,
            Language::TypeScript => &*TYPESCRIPT,
            Language::Css => &*CSS,
            Language::Html => &*HTML,
            Language::VueTs => &*VUE_TS,
            Language::Knockout => &*KNOCKOUT,
            Language::Vue => &*VUE,
        }
    }
}
