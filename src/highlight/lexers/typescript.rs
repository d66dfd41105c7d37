//! TypeScript
//!
//! The JavaScript rule groups plus type syntax. An identifier followed by `:` and another
//! identifier is read as a type annotation: name, punctuation, type. That heuristic also
//! fires on object literals and ternaries whose branches are bare identifiers.

use crate::highlight::engine::{LexerInfo, RegexLexer};
use crate::highlight::lexers::javascript::{
    builtins, comments_and_whitespace, identifier, literals, operators_and_punctuation,
    script_table, FLAGS, SLASH_STARTS_REGEX,
};
use crate::highlight::rules::{bygroups, rule, TokenTable};
use crate::highlight::token::TokenKind::*;
use once_cell::sync::Lazy;

pub const INFO: LexerInfo = LexerInfo {
    name: "TypeScript",
    aliases: &["typescript", "ts"],
    filenames: &["*.ts", "*.mts", "*.cts"],
    mimetypes: &["application/x-typescript", "text/x-typescript"],
};

pub static TYPESCRIPT: Lazy<RegexLexer> = Lazy::new(|| RegexLexer::new(INFO, FLAGS, token_table()));

pub fn token_table() -> TokenTable {
    let mut root = comments_and_whitespace();
    root.extend(operators_and_punctuation());
    root.extend(vec![
        rule(
            r"(for|in|of|while|do|break|return|continue|switch|case|default|if|else|throw|try|catch|finally|new|delete|typeof|instanceof|yield|await|this|super)\b",
            Keyword,
        )
        .push(SLASH_STARTS_REGEX),
        rule(
            r"(class|interface|enum|namespace|module)(\s+)([$a-zA-Z_][\w$]*)",
            bygroups(&[KeywordDeclaration, Whitespace, NameClass]),
        ),
        rule(
            r"(type)(\s+)([$a-zA-Z_][\w$]*)",
            bygroups(&[KeywordDeclaration, Whitespace, NameClass]),
        ),
        rule(
            r"(var|let|const|function|class|extends|async|declare)\b",
            KeywordDeclaration,
        )
        .push(SLASH_STARTS_REGEX),
        rule(r"(import|export|from|as)\b", KeywordNamespace),
        rule(
            r"(abstract|asserts|constructor|implements|infer|is|keyof|override|private|protected|public|readonly|satisfies|static|unique)\b",
            KeywordReserved,
        ),
        rule(r"(true|false|null|NaN|Infinity|undefined)\b", KeywordConstant),
        rule(
            r"(string|number|boolean|bigint|symbol|object|any|unknown|never|void)\b",
            KeywordType,
        ),
        // name, optional marker, colon, type
        rule(
            r"([$a-zA-Z_][\w$]*)(\?)?(\s*)(:)(\s*)([$a-zA-Z_][\w$.]*)",
            bygroups(&[
                NameOther,
                Operator,
                Whitespace,
                Punctuation,
                Whitespace,
                KeywordType,
            ]),
        ),
        builtins(),
    ]);
    root.extend(literals());
    root.push(identifier());

    script_table(root)
}
