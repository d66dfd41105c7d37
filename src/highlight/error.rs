//! Error types for table patching, highlighting and lookup

use std::fmt;

/// Errors raised when a token table does not have the shape a patch expects.
///
/// These are configuration errors: the patched lexer cannot be built at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// The state to patch does not exist
    MissingState { state: String },
    /// The state exists but has no rule at the targeted position
    MissingRule {
        state: String,
        index: usize,
        len: usize,
    },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::MissingState { state } => {
                write!(f, "Token table has no '{}' state", state)
            }
            PatchError::MissingRule { state, index, len } => write!(
                f,
                "State '{}' has {} rule(s), expected a rule at index {}",
                state, len, index
            ),
        }
    }
}

impl std::error::Error for PatchError {}

/// Errors that can occur while compiling a token table or running a lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// A rule's pattern is not a valid regex
    InvalidPattern {
        state: String,
        index: usize,
        pattern: String,
        message: String,
    },
    /// A transition (or the initial state) names a state the table lacks
    UnknownState {
        state: String,
        referenced_from: Option<String>,
    },
    /// The regex engine gave up while matching (e.g. backtrack limit)
    Match {
        state: String,
        index: usize,
        message: String,
    },
    /// Rendering the token stream failed
    Format(FormatError),
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightError::InvalidPattern {
                state,
                index,
                pattern,
                message,
            } => write!(
                f,
                "Invalid pattern in state '{}' rule {}: {} ({})",
                state, index, pattern, message
            ),
            HighlightError::UnknownState {
                state,
                referenced_from: Some(from),
            } => write!(f, "State '{}' referenced from '{}' does not exist", state, from),
            HighlightError::UnknownState {
                state,
                referenced_from: None,
            } => write!(f, "Token table has no '{}' state", state),
            HighlightError::Match {
                state,
                index,
                message,
            } => write!(
                f,
                "Matching failed in state '{}' rule {}: {}",
                state, index, message
            ),
            HighlightError::Format(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for HighlightError {}

impl From<FormatError> for HighlightError {
    fn from(err: FormatError) -> Self {
        HighlightError::Format(err)
    }
}

/// Errors produced by formatters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Serialization of the token stream failed
    Serialization(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors from the lexer registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No lexer is registered under the name or alias
    LexerNotFound(String),
    /// No lexer claims the file name
    NoLexerForFilename(String),
    /// No lexer claims the MIME type
    NoLexerForMimetype(String),
    /// A filename glob of a registered lexer is malformed
    InvalidGlob { pattern: String, message: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::LexerNotFound(name) => write!(f, "No lexer for alias '{}'", name),
            RegistryError::NoLexerForFilename(name) => {
                write!(f, "No lexer for file name '{}'", name)
            }
            RegistryError::NoLexerForMimetype(mimetype) => {
                write!(f, "No lexer for MIME type '{}'", mimetype)
            }
            RegistryError::InvalidGlob { pattern, message } => {
                write!(f, "Invalid filename glob '{}': {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for RegistryError {}
