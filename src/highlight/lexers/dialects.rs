//! Documentation dialects
//!
//! Three lexers exist for fence tags used in the docs:
//!
//! - `vue-ts` and `knockout` are TypeScript under another name. They share the TypeScript
//!   table and produce identical token streams.
//! - `vue` is HTML whose table went through [`patch`]: attribute names may contain `#` and
//!   `.`, and `<script>` bodies are TypeScript.

use crate::highlight::engine::{LexerInfo, RegexLexer};
use crate::highlight::error::PatchError;
use crate::highlight::lexers::{html::HTML, typescript::TYPESCRIPT};
use crate::highlight::patch::patch;
use once_cell::sync::Lazy;

pub const VUE_TS_INFO: LexerInfo = LexerInfo {
    name: "Vue TypeScript",
    aliases: &["vue-ts"],
    filenames: &[],
    mimetypes: &[],
};

pub const KNOCKOUT_INFO: LexerInfo = LexerInfo {
    name: "Knockout",
    aliases: &["knockout", "ko"],
    filenames: &[],
    mimetypes: &[],
};

pub const VUE_INFO: LexerInfo = LexerInfo {
    name: "Vue",
    aliases: &["vue"],
    filenames: &["*.vue"],
    mimetypes: &["text/x-vue"],
};

pub static VUE_TS: Lazy<RegexLexer> = Lazy::new(|| TYPESCRIPT.renamed(VUE_TS_INFO));

pub static KNOCKOUT: Lazy<RegexLexer> = Lazy::new(|| TYPESCRIPT.renamed(KNOCKOUT_INFO));

/// The HTML table is expected to carry a script delegation rule; without it this panics on
/// first use.
pub static VUE: Lazy<RegexLexer> = Lazy::new(|| {
    vue_lexer().unwrap_or_else(|err| panic!("cannot build the Vue lexer: {}", err))
});

/// Build the template lexer from the current HTML table.
pub fn vue_lexer() -> Result<RegexLexer, PatchError> {
    let table = patch(HTML.table())?;
    Ok(RegexLexer::new(VUE_INFO, HTML.flags(), table))
}
