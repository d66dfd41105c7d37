//! Lexer registry for fence tag and file name lookup
//!
//! Documentation tooling resolves the tag of a fenced code block (`vue`, `vue-ts`,
//! `knockout`, ...) to a highlighter through this registry. Tags are matched
//! case-insensitively against each lexer's name and aliases, plus any extra aliases added
//! at runtime (for instance from the `registry.aliases` config table).

use crate::highlight::engine::{Highlighter, LexerInfo};
use crate::highlight::error::RegistryError;
use crate::highlight::lexers::Language;
use globset::{GlobBuilder, GlobMatcher};
use std::collections::HashMap;
use std::path::Path;

enum Entry {
    Builtin(&'static dyn Highlighter),
    Owned(Box<dyn Highlighter>),
}

impl Entry {
    fn highlighter(&self) -> &dyn Highlighter {
        match self {
            Entry::Builtin(highlighter) => *highlighter,
            Entry::Owned(highlighter) => highlighter.as_ref(),
        }
    }
}

/// Registry of highlighters.
///
/// ```ignore
/// let registry = LexerRegistry::with_defaults();
/// let lexer = registry.get("vue")?;
/// let tokens = lexer.highlight("<b>hi</b>")?;
/// ```
pub struct LexerRegistry {
    entries: Vec<Entry>,
    aliases: HashMap<String, usize>,
    filenames: Vec<(GlobMatcher, usize)>,
}

impl LexerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        LexerRegistry {
            entries: Vec::new(),
            aliases: HashMap::new(),
            filenames: Vec::new(),
        }
    }

    /// Register a highlighter that lives in a `static`.
    ///
    /// Names and aliases already taken are handed to the new highlighter.
    pub fn register_static(
        &mut self,
        highlighter: &'static dyn Highlighter,
    ) -> Result<(), RegistryError> {
        self.insert(Entry::Builtin(highlighter))
    }

    /// Register an owned highlighter.
    pub fn register<H: Highlighter + 'static>(
        &mut self,
        highlighter: H,
    ) -> Result<(), RegistryError> {
        self.insert(Entry::Owned(Box::new(highlighter)))
    }

    fn insert(&mut self, entry: Entry) -> Result<(), RegistryError> {
        let info = *entry.highlighter().info();
        let mut globs = Vec::with_capacity(info.filenames.len());
        for pattern in info.filenames {
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(true)
                .literal_separator(true)
                .build()
                .map_err(|err| RegistryError::InvalidGlob {
                    pattern: pattern.to_string(),
                    message: err.to_string(),
                })?;
            globs.push(glob.compile_matcher());
        }

        let index = self.entries.len();
        self.entries.push(entry);
        for alias in std::iter::once(info.name).chain(info.aliases.iter().copied()) {
            self.aliases.insert(alias.to_lowercase(), index);
        }
        self.filenames
            .extend(globs.into_iter().map(|glob| (glob, index)));
        tracing::debug!(lexer = info.name, "registered lexer");
        Ok(())
    }

    /// Make `alias` resolve to whatever `target` resolves to.
    pub fn add_alias(&mut self, alias: &str, target: &str) -> Result<(), RegistryError> {
        let index = self.index_of(target)?;
        self.aliases.insert(alias.trim().to_lowercase(), index);
        Ok(())
    }

    fn index_of(&self, tag: &str) -> Result<usize, RegistryError> {
        self.aliases
            .get(&tag.trim().to_lowercase())
            .copied()
            .ok_or_else(|| RegistryError::LexerNotFound(tag.to_string()))
    }

    /// Look up a highlighter by fence tag
    pub fn get(&self, tag: &str) -> Result<&dyn Highlighter, RegistryError> {
        let index = self.index_of(tag)?;
        Ok(self.entries[index].highlighter())
    }

    /// Check if a fence tag resolves
    pub fn has(&self, tag: &str) -> bool {
        self.index_of(tag).is_ok()
    }

    /// Look up a highlighter by the file name of `path`.
    ///
    /// The most recently registered lexer wins when several globs match.
    pub fn for_filename(&self, path: impl AsRef<Path>) -> Result<&dyn Highlighter, RegistryError> {
        let path = path.as_ref();
        let name = path.file_name().map(Path::new).unwrap_or(path);
        self.filenames
            .iter()
            .rev()
            .find(|(glob, _)| glob.is_match(name))
            .map(|(_, index)| self.entries[*index].highlighter())
            .ok_or_else(|| RegistryError::NoLexerForFilename(path.display().to_string()))
    }

    /// Look up a highlighter by MIME type, e.g. `text/x-vue`.
    pub fn for_mimetype(&self, mimetype: &str) -> Result<&dyn Highlighter, RegistryError> {
        let wanted = mimetype.trim();
        self.entries
            .iter()
            .rev()
            .map(Entry::highlighter)
            .find(|highlighter| {
                highlighter
                    .info()
                    .mimetypes
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| RegistryError::NoLexerForMimetype(mimetype.to_string()))
    }

    /// Info of every highlighter some tag still resolves to, sorted by name
    pub fn list(&self) -> Vec<&LexerInfo> {
        let mut reachable = vec![false; self.entries.len()];
        for index in self.aliases.values() {
            reachable[*index] = true;
        }
        let mut infos: Vec<_> = self
            .entries
            .iter()
            .zip(reachable)
            .filter(|(_, reachable)| *reachable)
            .map(|(entry, _)| entry.highlighter().info())
            .collect();
        infos.sort_by_key(|info| info.name);
        infos
    }

    /// Create a registry with every built-in lexer
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for language in Language::ALL {
            if let Err(err) = registry.register_static(language.lexer()) {
                tracing::warn!(?language, "skipping built-in lexer: {}", err);
            }
        }
        registry
    }
}

impl Default for LexerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
