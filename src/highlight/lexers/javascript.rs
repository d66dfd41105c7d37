//! JavaScript
//!
//! Also the home of the rule groups TypeScript reuses: comments and whitespace, operators,
//! literals, regex literals and template strings.
//!
//! A `/` is ambiguous between division and the start of a regex literal. Operators,
//! opening punctuation and most keywords push `slashstartsregex`, where a regex literal is
//! tried once before falling back to the previous state.

use crate::highlight::engine::{LexerInfo, RegexLexer};
use crate::highlight::rules::{rule, PatternFlags, Rule, TokenTable, Transition, ROOT_STATE};
use crate::highlight::token::TokenKind::*;
use once_cell::sync::Lazy;

pub const INFO: LexerInfo = LexerInfo {
    name: "JavaScript",
    aliases: &["javascript", "js"],
    filenames: &["*.js", "*.jsm", "*.mjs", "*.cjs"],
    mimetypes: &["application/javascript", "text/javascript"],
};

pub const FLAGS: PatternFlags = PatternFlags {
    case_insensitive: false,
    dot_all: true,
};

pub static JAVASCRIPT: Lazy<RegexLexer> = Lazy::new(|| RegexLexer::new(INFO, FLAGS, token_table()));

pub(crate) const SLASH_STARTS_REGEX: &str = "slashstartsregex";
pub(crate) const TEMPLATE: &str = "interp";
pub(crate) const TEMPLATE_SUBSTITUTION: &str = "interp-inside";

pub fn token_table() -> TokenTable {
    let mut root = comments_and_whitespace();
    root.extend(operators_and_punctuation());
    root.extend(vec![
        rule(
            r"(for|in|of|while|do|break|return|continue|switch|case|default|if|else|throw|try|catch|finally|new|delete|typeof|instanceof|void|yield|await|this|super)\b",
            Keyword,
        )
        .push(SLASH_STARTS_REGEX),
        rule(r"(var|let|const|function|class|extends|async)\b", KeywordDeclaration)
            .push(SLASH_STARTS_REGEX),
        rule(r"(import|export|from|as)\b", KeywordNamespace),
        rule(
            r"(abstract|boolean|byte|char|debugger|double|enum|final|float|goto|implements|int|interface|long|native|package|private|protected|public|short|static|synchronized|throws|transient|volatile)\b",
            KeywordReserved,
        ),
        rule(r"(true|false|null|NaN|Infinity|undefined)\b", KeywordConstant),
        builtins(),
    ]);
    root.extend(literals());
    root.push(identifier());

    script_table(root)
}

/// Wrap a root rule list with the states every script table needs.
pub(crate) fn script_table(root: Vec<Rule>) -> TokenTable {
    // braces inside `${...}` nest, so `{` re-enters the substitution
    let mut substitution = vec![
        rule(r"\}", StringInterpol).pop(),
        rule(r"\{", Punctuation).then(Transition::PushCurrent),
    ];
    substitution.extend(root.iter().cloned());

    TokenTable::new()
        .with_state(ROOT_STATE, root)
        .with_state(SLASH_STARTS_REGEX, slash_starts_regex())
        .with_state(TEMPLATE, template_literal())
        .with_state(TEMPLATE_SUBSTITUTION, substitution)
}

pub(crate) fn comments_and_whitespace() -> Vec<Rule> {
    vec![
        rule(r"\s+", Whitespace),
        rule(r"<!--", Comment),
        rule(r"//[^\n]*", CommentSingle),
        rule(r"/\*.*?\*/", CommentMultiline),
    ]
}

pub(crate) fn operators_and_punctuation() -> Vec<Rule> {
    vec![
        rule(
            r"\+\+|--|~|\?\?=?|\?\.|\?|:|&&=?|\|\|=?|=>|\.\.\.|(<<|>>>?|===?|!==?|\*\*|[-<>+*%&|^/!=])=?",
            Operator,
        )
        .push(SLASH_STARTS_REGEX),
        rule(r"[{(\[;,]", Punctuation).push(SLASH_STARTS_REGEX),
        rule(r"[})\].]", Punctuation),
    ]
}

pub(crate) fn builtins() -> Rule {
    rule(
        r"(Array|Boolean|Date|Error|Function|JSON|Map|Math|Number|Object|Promise|Reflect|RegExp|Set|String|Symbol|WeakMap|WeakSet|console|document|globalThis|isFinite|isNaN|parseFloat|parseInt|window)\b",
        NameBuiltin,
    )
}

pub(crate) fn literals() -> Vec<Rule> {
    vec![
        rule(r"@[\w$]+", NameDecorator),
        rule(r"0[bB][01_]+n?", NumberBin),
        rule(r"0[oO][0-7_]+n?", NumberOct),
        rule(r"0[xX][0-9a-fA-F_]+n?", NumberHex),
        rule(
            r"([0-9][0-9_]*\.[0-9_]*|\.[0-9][0-9_]*)([eE][-+]?[0-9]+)?",
            NumberFloat,
        ),
        rule(r"[0-9][0-9_]*([eE][-+]?[0-9]+)?n?", NumberInteger),
        rule(r#""(\\.|[^"\\])*""#, StringDouble),
        rule(r"'(\\.|[^'\\])*'", StringSingle),
        rule("`", StringBacktick).push(TEMPLATE),
    ]
}

pub(crate) fn identifier() -> Rule {
    rule(r"[$a-zA-Z_][\w$]*", NameOther)
}

fn slash_starts_regex() -> Vec<Rule> {
    let mut rules = comments_and_whitespace();
    rules.push(
        rule(
            r"/(\\.|[^\[/\\\n]|\[(\\.|[^\]\\\n])*\])+/[dgimsuy]*",
            StringRegex,
        )
        .pop(),
    );
    rules.push(Rule::default_transition(Transition::Pop(1)));
    rules
}

fn template_literal() -> Vec<Rule> {
    vec![
        rule("`", StringBacktick).pop(),
        rule(r"\\.", StringEscape),
        rule(r"\$\{", StringInterpol).push(TEMPLATE_SUBSTITUTION),
        rule(r"\$", StringBacktick),
        rule(r"[^`\\$]+", StringBacktick),
    ]
}
