//! Formatters
//!
//! Render a highlighted token stream for a documentation page.

use crate::highlight::error::FormatError;
use crate::highlight::token::TokenKind;
use serde::{Deserialize, Serialize};

/// Turns a token stream into text.
pub trait Formatter {
    /// Name used on the command line.
    fn name(&self) -> &str;

    fn format(&self, tokens: &[(TokenKind, String)]) -> Result<String, FormatError>;
}

/// Options for [`HtmlFormatter`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HtmlOptions {
    /// Class of the wrapping `<div>`.
    pub css_class: String,
    /// Prepended to every token class.
    pub class_prefix: String,
    /// Emit only the spans, without the `<div><pre>` wrapper.
    pub nowrap: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        HtmlOptions {
            css_class: "highlight".to_string(),
            class_prefix: String::new(),
            nowrap: false,
        }
    }
}

/// Renders `<span class="..">` runs inside `<div class="highlight"><pre>`.
///
/// Consecutive tokens that resolve to the same class share a span; plain text is not
/// wrapped at all.
#[derive(Debug, Clone, Default)]
pub struct HtmlFormatter {
    options: HtmlOptions,
}

impl HtmlFormatter {
    pub fn new(options: HtmlOptions) -> Self {
        HtmlFormatter { options }
    }

    /// Class for a kind, falling back through its parents.
    fn css_class(&self, kind: TokenKind) -> String {
        let mut current = Some(kind);
        while let Some(kind) = current {
            let class = kind.css_class();
            if !class.is_empty() || kind == TokenKind::Text {
                if class.is_empty() {
                    return String::new();
                }
                return format!("{}{}", self.options.class_prefix, class);
            }
            current = kind.parent();
        }
        String::new()
    }

    fn push_run(out: &mut String, class: &str, text: &str) {
        if text.is_empty() {
            return;
        }
        if class.is_empty() {
            out.push_str(&escape_html(text));
        } else {
            out.push_str(&format!(
                "<span class=\"{}\">{}</span>",
                class,
                escape_html(text)
            ));
        }
    }
}

impl Formatter for HtmlFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn format(&self, tokens: &[(TokenKind, String)]) -> Result<String, FormatError> {
        let mut out = String::new();
        if !self.options.nowrap {
            out.push_str(&format!(
                "<div class=\"{}\"><pre><span></span>",
                self.options.css_class
            ));
        }

        let mut run_class: Option<String> = None;
        let mut run_text = String::new();
        for (kind, text) in tokens {
            let class = self.css_class(*kind);
            if run_class.as_deref() != Some(class.as_str()) {
                if let Some(previous) = run_class.take() {
                    Self::push_run(&mut out, &previous, &run_text);
                }
                run_text.clear();
                run_class = Some(class);
            }
            run_text.push_str(text);
        }
        if let Some(previous) = run_class {
            Self::push_run(&mut out, &previous, &run_text);
        }

        if !self.options.nowrap {
            out.push_str("</pre></div>\n");
        }
        Ok(out)
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[derive(Serialize)]
struct JsonToken<'a> {
    kind: TokenKind,
    text: &'a str,
}

/// Serializes the token stream as a JSON array of `{kind, text}` objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn format(&self, tokens: &[(TokenKind, String)]) -> Result<String, FormatError> {
        let tokens: Vec<JsonToken<'_>> = tokens
            .iter()
            .map(|(kind, text)| JsonToken { kind: *kind, text })
            .collect();
        let result = if self.pretty {
            serde_json::to_string_pretty(&tokens)
        } else {
            serde_json::to_string(&tokens)
        };
        result.map_err(|err| FormatError::Serialization(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tokens() -> Vec<(TokenKind, String)> {
        vec![
            (TokenKind::Punctuation, "<".to_string()),
            (TokenKind::NameTag, "b".to_string()),
            (TokenKind::Punctuation, ">".to_string()),
            (TokenKind::Text, "a & b".to_string()),
        ]
    }

    #[test]
    fn test_html_wraps_and_escapes() {
        let html = HtmlFormatter::default().format(&tokens()).unwrap();
        assert_eq!(
            html,
            "<div class=\"highlight\"><pre><span></span>\
             <span class=\"p\">&lt;</span><span class=\"nt\">b</span>\
             <span class=\"p\">&gt;</span>a &amp; b</pre></div>\n"
        );
    }

    #[test]
    fn test_html_merges_runs_of_the_same_class() {
        let tokens = vec![
            (TokenKind::Punctuation, "(".to_string()),
            (TokenKind::Punctuation, ")".to_string()),
        ];
        let formatter = HtmlFormatter::new(HtmlOptions {
            nowrap: true,
            ..HtmlOptions::default()
        });
        assert_eq!(
            formatter.format(&tokens).unwrap(),
            "<span class=\"p\">()</span>"
        );
    }

    #[test]
    fn test_html_class_prefix() {
        let formatter = HtmlFormatter::new(HtmlOptions {
            css_class: "code".to_string(),
            class_prefix: "tok-".to_string(),
            nowrap: false,
        });
        let html = formatter.format(&tokens()).unwrap();
        assert!(html.starts_with("<div class=\"code\">"));
        assert!(html.contains("<span class=\"tok-nt\">b</span>"));
    }

    #[rstest]
    #[case(TokenKind::KeywordType, "kt")]
    #[case(TokenKind::Whitespace, "w")]
    #[case(TokenKind::Text, "")]
    #[case(TokenKind::StringDouble, "s2")]
    fn test_css_class(#[case] kind: TokenKind, #[case] expected: &str) {
        assert_eq!(HtmlFormatter::default().css_class(kind), expected);
    }

    #[test]
    fn test_json_output() {
        let json = JsonFormatter::default()
            .format(&[(TokenKind::NameAttribute, "data-bind#visible".to_string())])
            .unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"Name.Attribute","text":"data-bind#visible"}]"#
        );
    }
}
