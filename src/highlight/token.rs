//! Token kinds
//!
//!     Kinds form a shallow hierarchy: every specific kind has a parent, up to one of the
//!     top-level families (Text, Keyword, Name, Literal, Operator, Punctuation, Comment).
//!     Renderers walk that hierarchy to pick a style, so a kind without its own CSS class
//!     falls back to its family's class.

use serde::{Serialize, Serializer};
use std::fmt;

/// A token kind emitted by a highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Text,
    Whitespace,
    /// Input no rule of the current state accepted.
    Error,

    Keyword,
    KeywordConstant,
    KeywordDeclaration,
    KeywordNamespace,
    KeywordReserved,
    KeywordType,

    Name,
    NameAttribute,
    NameBuiltin,
    NameClass,
    NameDecorator,
    NameEntity,
    NameFunction,
    NameNamespace,
    NameOther,
    NameTag,
    NameVariable,

    Literal,
    /// `Literal.String`.
    Str,
    StringBacktick,
    StringDouble,
    StringEscape,
    StringInterpol,
    StringRegex,
    StringSingle,
    Number,
    NumberBin,
    NumberFloat,
    NumberHex,
    NumberInteger,
    NumberOct,

    Operator,
    OperatorWord,
    Punctuation,

    Comment,
    CommentMultiline,
    CommentPreproc,
    CommentSingle,
}

impl TokenKind {
    /// The enclosing kind, or `None` for a top-level family.
    pub fn parent(self) -> Option<TokenKind> {
        use TokenKind::*;
        match self {
            Text | Error | Keyword | Name | Literal | Operator | Punctuation | Comment => {
                None
            }
            Whitespace => Some(Text),
            KeywordConstant | KeywordDeclaration | KeywordNamespace | KeywordReserved
            | KeywordType => Some(Keyword),
            NameAttribute | NameBuiltin | NameClass | NameDecorator | NameEntity
            | NameFunction | NameNamespace | NameOther | NameTag | NameVariable => Some(Name),
            Str | Number => Some(Literal),
            StringBacktick | StringDouble | StringEscape | StringInterpol | StringRegex
            | StringSingle => Some(Str),
            NumberBin | NumberFloat | NumberHex | NumberInteger | NumberOct => Some(Number),
            OperatorWord => Some(Operator),
            CommentMultiline | CommentPreproc | CommentSingle => Some(Comment),
        }
    }

    /// True if `self` is `other` or one of its descendants.
    pub fn is_subtype_of(self, other: TokenKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Dotted name, e.g. `Name.Attribute` or `Literal.String.Double`.
    pub fn qualified_name(self) -> &'static str {
        use TokenKind::*;
        match self {
            Text => "Text",
            Whitespace => "Text.Whitespace",
            Error => "Error",
            Keyword => "Keyword",
            KeywordConstant => "Keyword.Constant",
            KeywordDeclaration => "Keyword.Declaration",
            KeywordNamespace => "Keyword.Namespace",
            KeywordReserved => "Keyword.Reserved",
            KeywordType => "Keyword.Type",
            Name => "Name",
            NameAttribute => "Name.Attribute",
            NameBuiltin => "Name.Builtin",
            NameClass => "Name.Class",
            NameDecorator => "Name.Decorator",
            NameEntity => "Name.Entity",
            NameFunction => "Name.Function",
            NameNamespace => "Name.Namespace",
            NameOther => "Name.Other",
            NameTag => "Name.Tag",
            NameVariable => "Name.Variable",
            Literal => "Literal",
            Str => "Literal.String",
            StringBacktick => "Literal.String.Backtick",
            StringDouble => "Literal.String.Double",
            StringEscape => "Literal.String.Escape",
            StringInterpol => "Literal.String.Interpol",
            StringRegex => "Literal.String.Regex",
            StringSingle => "Literal.String.Single",
            Number => "Literal.Number",
            NumberBin => "Literal.Number.Bin",
            NumberFloat => "Literal.Number.Float",
            NumberHex => "Literal.Number.Hex",
            NumberInteger => "Literal.Number.Integer",
            NumberOct => "Literal.Number.Oct",
            Operator => "Operator",
            OperatorWord => "Operator.Word",
            Punctuation => "Punctuation",
            Comment => "Comment",
            CommentMultiline => "Comment.Multiline",
            CommentPreproc => "Comment.Preproc",
            CommentSingle => "Comment.Single",
        }
    }

    /// Short CSS class used by the HTML formatter. Plain text has none.
    pub fn css_class(self) -> &'static str {
        use TokenKind::*;
        match self {
            Text => "",
            Whitespace => "w",
            Error => "err",
            Keyword => "k",
            KeywordConstant => "kc",
            KeywordDeclaration => "kd",
            KeywordNamespace => "kn",
            KeywordReserved => "kr",
            KeywordType => "kt",
            Name => "n",
            NameAttribute => "na",
            NameBuiltin => "nb",
            NameClass => "nc",
            NameDecorator => "nd",
            NameEntity => "ni",
            NameFunction => "nf",
            NameNamespace => "nn",
            NameOther => "nx",
            NameTag => "nt",
            NameVariable => "nv",
            Literal => "l",
            Str => "s",
            StringBacktick => "sb",
            StringDouble => "s2",
            StringEscape => "se",
            StringInterpol => "si",
            StringRegex => "sr",
            StringSingle => "s1",
            Number => "m",
            NumberBin => "mb",
            NumberFloat => "mf",
            NumberHex => "mh",
            NumberInteger => "mi",
            NumberOct => "mo",
            Operator => "o",
            OperatorWord => "ow",
            Punctuation => "p",
            Comment => "c",
            CommentMultiline => "cm",
            CommentPreproc => "cp",
            CommentSingle => "c1",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.qualified_name())
    }
}
