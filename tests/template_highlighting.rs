//! End-to-end highlighting of documentation samples
//!
//! Compares the template lexer with the plain HTML lexer it is built from: attribute names
//! with `#` and `.` stay whole, and `<script>` bodies are read as TypeScript.

use doclex::highlight::lexers::{HTML, KNOCKOUT, TYPESCRIPT, VUE, VUE_TS};
use doclex::highlight::{
    highlight, Highlighter, HtmlFormatter, JsonFormatter, LexerOptions, LexerRegistry,
    TokenKind::{self, *},
};
use rstest::rstest;

fn tokens(lexer: &dyn Highlighter, source: &str) -> Vec<(TokenKind, String)> {
    lexer.highlight(source).expect("source to tokenize")
}

fn tok(kind: TokenKind, text: &str) -> (TokenKind, String) {
    (kind, text.to_string())
}

#[test]
fn test_hash_attribute_is_a_single_token() {
    assert_eq!(
        tokens(&*VUE, r#"<div data-bind#visible="x">"#),
        vec![
            tok(Punctuation, "<"),
            tok(NameTag, "div"),
            tok(Text, " "),
            tok(NameAttribute, "data-bind#visible"),
            tok(Operator, "="),
            tok(Str, "\"x\""),
            tok(Punctuation, ">"),
            tok(Text, "\n"),
        ]
    );
}

#[test]
fn test_base_html_splits_the_same_attribute() {
    let html = tokens(&*HTML, r#"<div data-bind#visible="x">"#);
    assert!(html.contains(&tok(NameAttribute, "data-bind")));
    assert!(html.contains(&tok(Error, "#")));
    assert!(!html.contains(&tok(NameAttribute, "data-bind#visible")));
}

#[rstest]
#[case(r#"<button v-on:click.stop="go">"#, "v-on:click.stop")]
#[case(r#"<template #default="{ item }">"#, "#default")]
#[case(r#"<input v-model.trim="name">"#, "v-model.trim")]
#[case("<slot #header>", "#header")]
#[case(r#"<p :class="c">"#, ":class")]
fn test_template_attribute_names(#[case] source: &str, #[case] attribute: &str) {
    let vue = tokens(&*VUE, source);
    assert!(
        vue.contains(&tok(NameAttribute, attribute)),
        "{:?} not found in {:?}",
        attribute,
        vue
    );
    assert!(!vue.iter().any(|(kind, _)| *kind == Error));
}

#[test]
fn test_script_body_is_typescript() {
    let source = r#"<script lang="ts">let n: number = 1;</script>"#;
    let vue = tokens(&*VUE, source);
    let html = tokens(&*HTML, source);

    assert!(vue.contains(&tok(NameOther, "n")));
    assert!(vue.contains(&tok(KeywordType, "number")));
    assert!(html.contains(&tok(NameOther, "number")));
    assert!(!html.iter().any(|(kind, _)| *kind == KeywordType));

    // the closing tag is still HTML
    assert_eq!(vue[vue.len() - 4..], html[html.len() - 4..]);
}

#[test]
fn test_template_with_typed_script() {
    let source = r#"<template><div data-bind#visible="x"></div></template><script lang="ts">let x: number = 1;</script>"#;
    let vue = tokens(&*VUE, source);

    assert!(vue.contains(&tok(NameAttribute, "data-bind#visible")));
    let annotation = [
        tok(NameOther, "x"),
        tok(Punctuation, ":"),
        tok(Whitespace, " "),
        tok(KeywordType, "number"),
    ];
    assert!(
        vue.windows(annotation.len()).any(|window| window == annotation),
        "annotation not found in {:?}",
        vue
    );
    assert!(!vue.iter().any(|(kind, _)| *kind == Error));
    assert_eq!(
        vue.iter().map(|(_, text)| text.as_str()).collect::<String>(),
        format!("{}\n", source)
    );
}

#[test]
fn test_style_body_is_still_css() {
    let source = "<style>p { color: red; }</style>";
    assert_eq!(tokens(&*VUE, source), tokens(&*HTML, source));
}

#[test]
fn test_plain_markup_is_unchanged() {
    let source = "<!-- note -->\n<ul class=\"list\">\n  <li>a &amp; b</li>\n</ul>\n";
    assert_eq!(tokens(&*VUE, source), tokens(&*HTML, source));
}

#[rstest]
#[case("x: number")]
#[case("interface Props { title?: string }")]
#[case("const total = items.reduce((a, b) => a + b, 0);")]
#[case("export default defineComponent({ name: 'App' })")]
fn test_renamed_variants_match_typescript(#[case] source: &str) {
    let expected = tokens(&*TYPESCRIPT, source);
    assert_eq!(tokens(&*VUE_TS, source), expected);
    assert_eq!(tokens(&*KNOCKOUT, source), expected);
}

#[test]
fn test_knockout_binding_sample() {
    assert_eq!(
        tokens(&*KNOCKOUT, "x: number"),
        vec![
            tok(NameOther, "x"),
            tok(Punctuation, ":"),
            tok(Whitespace, " "),
            tok(KeywordType, "number"),
            tok(Whitespace, "\n"),
        ]
    );
}

#[test]
fn test_registry_to_html() {
    let registry = LexerRegistry::with_defaults();
    let lexer = registry.get("vue").expect("vue to be registered");
    let html = highlight(
        r#"<div data-bind#visible="x"></div>"#,
        lexer,
        &HtmlFormatter::default(),
        &LexerOptions::default(),
    )
    .expect("sample to highlight");

    assert_eq!(
        html,
        "<div class=\"highlight\"><pre><span></span>\
         <span class=\"p\">&lt;</span><span class=\"nt\">div</span> \
         <span class=\"na\">data-bind#visible</span><span class=\"o\">=</span>\
         <span class=\"s\">&quot;x&quot;</span><span class=\"p\">&gt;&lt;/</span>\
         <span class=\"nt\">div</span><span class=\"p\">&gt;</span>\n</pre></div>\n"
    );
}

#[test]
fn test_registry_to_json() {
    let registry = LexerRegistry::with_defaults();
    let json = highlight(
        "x: number",
        registry.get("vue-ts").expect("vue-ts to be registered"),
        &JsonFormatter::default(),
        &LexerOptions::default(),
    )
    .expect("sample to highlight");

    assert!(json.starts_with(r#"[{"kind":"Name.Other","text":"x"}"#));
    assert!(json.contains(r#"{"kind":"Keyword.Type","text":"number"}"#));
}
