//! HTML
//!
//! States:
//!     root            text, entities, comments, and tag openings
//!     tag             inside `<name ...>`: attribute names and the closing `>`
//!     attr            a single attribute value
//!     script-content  body of a `<script>` element, handed to JavaScript
//!     style-content   body of a `<style>` element, handed to CSS
//!
//! Opening `<script` and `<style>` push both the content state and `tag`, so the attributes
//! are read first and the closing `>` of the tag drops into the body.
//!
//! The second rule of `script-content` carries the delegation for the element body and
//! attribute names are matched with the `[\w:-]` class; the template dialect in
//! [`dialects`](super::dialects) patches both.

use crate::highlight::engine::{LexerInfo, RegexLexer};
use crate::highlight::lexers::Language;
use crate::highlight::rules::{
    bygroups, rule, Action, PatternFlags, Rule, TokenTable, Transition, ROOT_STATE,
};
use crate::highlight::token::TokenKind::*;
use once_cell::sync::Lazy;

pub const INFO: LexerInfo = LexerInfo {
    name: "HTML",
    aliases: &["html"],
    filenames: &["*.html", "*.htm", "*.xhtml"],
    mimetypes: &["text/html", "application/xhtml+xml"],
};

pub const FLAGS: PatternFlags = PatternFlags {
    case_insensitive: true,
    dot_all: true,
};

pub static HTML: Lazy<RegexLexer> = Lazy::new(|| RegexLexer::new(INFO, FLAGS, token_table()));

pub const TAG: &str = "tag";
pub const ATTRIBUTE_VALUE: &str = "attr";
pub const SCRIPT_CONTENT: &str = "script-content";
pub const STYLE_CONTENT: &str = "style-content";

pub fn token_table() -> TokenTable {
    TokenTable::new()
        .with_state(
            ROOT_STATE,
            vec![
                rule(r"[^<&]+", Text),
                rule(r"&\S*?;", NameEntity),
                rule(r"<!\[CDATA\[.*?\]\]>", CommentPreproc),
                rule(r"<!--.*?-->", CommentMultiline),
                rule(r"<\?.*?\?>", CommentPreproc),
                rule(r"<![^>]*>", CommentPreproc),
                rule(
                    r"(<)(\s*)(script)\b(\s*)",
                    bygroups(&[Punctuation, Text, NameTag, Text]),
                )
                .then(Transition::push_all(&[SCRIPT_CONTENT, TAG])),
                rule(
                    r"(<)(\s*)(style)\b(\s*)",
                    bygroups(&[Punctuation, Text, NameTag, Text]),
                )
                .then(Transition::push_all(&[STYLE_CONTENT, TAG])),
                rule(r"(<)(\s*)([\w:.-]+)", bygroups(&[Punctuation, Text, NameTag])).push(TAG),
                rule(
                    r"(<)(\s*)(/)(\s*)([\w:.-]+)(\s*)(>)",
                    bygroups(&[
                        Punctuation,
                        Text,
                        Punctuation,
                        Text,
                        NameTag,
                        Text,
                        Punctuation,
                    ]),
                ),
            ],
        )
        .with_state(
            TAG,
            vec![
                rule(r"\s+", Text),
                rule(
                    r"([\w:-]+\s*)(=)(\s*)",
                    bygroups(&[NameAttribute, Operator, Text]),
                )
                .push(ATTRIBUTE_VALUE),
                rule(r"[\w:-]+", NameAttribute),
                rule(r"(/?)(\s*)(>)", bygroups(&[Punctuation, Text, Punctuation])).pop(),
            ],
        )
        .with_state(
            SCRIPT_CONTENT,
            vec![
                closing_tag("script"),
                rule(r".+?(?=<\s*/\s*script\s*>)", Action::Using(Language::JavaScript)),
                // no closing tag: highlight the rest of the line
                rule(r".+?\n", Action::Using(Language::JavaScript)).pop(),
                rule(r".+", Action::Using(Language::JavaScript)).pop(),
            ],
        )
        .with_state(
            STYLE_CONTENT,
            vec![
                closing_tag("style"),
                rule(r".+?(?=<\s*/\s*style\s*>)", Action::Using(Language::Css)),
                rule(r".+?\n", Action::Using(Language::Css)).pop(),
                rule(r".+", Action::Using(Language::Css)).pop(),
            ],
        )
        .with_state(
            ATTRIBUTE_VALUE,
            vec![
                rule(r#"".*?""#, Str).pop(),
                rule(r"'.*?'", Str).pop(),
                rule(r"[^\s>]+", Str).pop(),
            ],
        )
}

fn closing_tag(name: &str) -> Rule {
    rule(
        &format!(r"(<)(\s*)(/)(\s*)({})(\s*)(>)", name),
        bygroups(&[
            Punctuation,
            Text,
            Punctuation,
            Text,
            NameTag,
            Text,
            Punctuation,
        ]),
    )
    .pop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::engine::Highlighter;

    #[test]
    fn test_element_with_attributes() {
        let tokens = HTML
            .highlight(r#"<a href="/x" hidden>go</a>"#)
            .unwrap();
        assert_eq!(
            tokens,
            vec![
                (Punctuation, "<".to_string()),
                (NameTag, "a".to_string()),
                (Text, " ".to_string()),
                (NameAttribute, "href".to_string()),
                (Operator, "=".to_string()),
                (Str, "\"/x\"".to_string()),
                (Text, " ".to_string()),
                (NameAttribute, "hidden".to_string()),
                (Punctuation, ">".to_string()),
                (Text, "go".to_string()),
                (Punctuation, "<".to_string()),
                (Punctuation, "/".to_string()),
                (NameTag, "a".to_string()),
                (Punctuation, ">".to_string()),
                (Text, "\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_script_body_is_javascript() {
        let tokens = HTML
            .highlight("<script>var a = 1;</script>")
            .unwrap();
        assert!(tokens.contains(&(KeywordDeclaration, "var".to_string())));
        assert!(tokens.contains(&(NumberInteger, "1".to_string())));
        assert_eq!(tokens.iter().filter(|(kind, _)| *kind == NameTag).count(), 2);
    }

    #[test]
    fn test_style_body_is_css() {
        let tokens = HTML
            .highlight("<style>p { color: red; }</style>")
            .unwrap();
        assert!(tokens.contains(&(Keyword, "color".to_string())));
        assert!(tokens.contains(&(NameBuiltin, "red".to_string())));
    }

    #[test]
    fn test_unclosed_script_runs_to_end_of_line() {
        let tokens = HTML.highlight("<script>let a\n<p>").unwrap();
        assert!(tokens.contains(&(KeywordDeclaration, "let".to_string())));
        assert!(tokens.contains(&(NameTag, "p".to_string())));
    }

    #[test]
    fn test_hash_in_attribute_name_is_an_error() {
        let tokens = HTML.highlight(r#"<div data-bind#visible="x">"#).unwrap();
        assert!(tokens.contains(&(NameAttribute, "data-bind".to_string())));
        assert!(tokens.contains(&(Error, "#".to_string())));
    }

    #[test]
    fn test_comment_and_entity() {
        let tokens = HTML.highlight("<!-- hi -->&amp;").unwrap();
        assert_eq!(tokens[0], (CommentMultiline, "<!-- hi -->".to_string()));
        assert_eq!(tokens[1], (NameEntity, "&amp;".to_string()));
    }
}
