//! CSS, used for `<style>` bodies.

use crate::highlight::engine::{LexerInfo, RegexLexer};
use crate::highlight::rules::{bygroups, rule, PatternFlags, Rule, TokenTable, ROOT_STATE};
use crate::highlight::token::TokenKind::*;
use once_cell::sync::Lazy;

pub const INFO: LexerInfo = LexerInfo {
    name: "CSS",
    aliases: &["css"],
    filenames: &["*.css"],
    mimetypes: &["text/css"],
};

pub const FLAGS: PatternFlags = PatternFlags {
    case_insensitive: false,
    dot_all: true,
};

pub static CSS: Lazy<RegexLexer> = Lazy::new(|| RegexLexer::new(INFO, FLAGS, token_table()));

const DECLARATIONS: &str = "content";

pub fn token_table() -> TokenTable {
    let mut root = whitespace_and_comments();
    root.extend(vec![
        rule(r"\{", Punctuation).push(DECLARATIONS),
        rule(r"@[\w-]+", Keyword),
        rule(r"(\.)([\w-]+)", bygroups(&[Punctuation, NameClass])),
        rule(r"(#)([\w-]+)", bygroups(&[Punctuation, NameNamespace])),
        rule(r"(::?)([\w-]+)", bygroups(&[Punctuation, NameDecorator])),
        // media query logic
        rule(r"(and|not|only|or)\b", OperatorWord),
        rule(r"\*|[\w-]+", NameTag),
        rule(r"[~^*!%&$\[\]()<>|+=:;,./?]", Operator),
    ]);
    root.extend(strings());

    let mut content = whitespace_and_comments();
    content.extend(vec![
        rule(r"\}", Punctuation).pop(),
        rule(r"\{", Punctuation).push(DECLARATIONS),
        rule(
            r"(--[\w-]+)(\s*)(:)",
            bygroups(&[NameVariable, Whitespace, Punctuation]),
        ),
        rule(r"([\w-]+)(\s*)(:)", bygroups(&[Keyword, Whitespace, Punctuation])),
        rule(r"!important", CommentPreproc),
        rule(r"#[0-9a-fA-F]{3,8}\b", NumberHex),
        rule(r"-?([0-9]+\.?[0-9]*|\.[0-9]+)(%|[a-zA-Z]+)?", Number),
        rule(
            r"(url)(\()([^)]*)(\))",
            bygroups(&[NameBuiltin, Punctuation, Str, Punctuation]),
        ),
        rule(r"([\w-]+)(\()", bygroups(&[NameFunction, Punctuation])),
        rule(r"[;,()/]", Punctuation),
        rule(r"[\w-]+", NameBuiltin),
        rule(r"[~^*%&$\[\]<>|+=@:.?]", Operator),
    ]);
    content.extend(strings());

    TokenTable::new()
        .with_state(ROOT_STATE, root)
        .with_state(DECLARATIONS, content)
}

fn whitespace_and_comments() -> Vec<Rule> {
    vec![
        rule(r"\s+", Whitespace),
        rule(r"/\*.*?\*/", CommentMultiline),
    ]
}

fn strings() -> Vec<Rule> {
    vec![
        rule(r#""(\\.|[^"\\])*""#, StringDouble),
        rule(r"'(\\.|[^'\\])*'", StringSingle),
    ]
}
