//! Configuration loader for doclex.
//!
//! `defaults/doclex.default.toml` is embedded into the crate so that docs and runtime
//! behavior stay in sync. Callers layer user-specific files on top of those defaults via
//! [`Loader`] before deserializing into [`DoclexConfig`].

use crate::highlight::{HtmlOptions, LexerOptions, LexerRegistry, RegistryError};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/doclex.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DoclexConfig {
    /// Input preprocessing applied before tokenizing.
    pub lexer: LexerOptions,
    pub html: HtmlOptions,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    /// Extra fence tag -> existing lexer name or alias.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl DoclexConfig {
    /// Registry with the built-in lexers and the configured aliases.
    pub fn registry(&self) -> Result<LexerRegistry, RegistryError> {
        let mut registry = LexerRegistry::with_defaults();
        for (alias, target) in &self.registry.aliases {
            registry.add_alias(alias, target)?;
        }
        Ok(registry)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `lexer.tab_size` from the command line.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Render spans without the `<div><pre>` wrapper when `nowrap` is set.
    ///
    /// Leaves the layered value alone otherwise, so a config file can still turn it on.
    pub fn with_nowrap(self, nowrap: bool) -> Result<Self, ConfigError> {
        if nowrap {
            self.set_override("html.nowrap", true)
        } else {
            Ok(self)
        }
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DoclexConfig, ConfigError> {
        let config: DoclexConfig = self.builder.build()?.try_deserialize()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DoclexConfig, ConfigError> {
    Loader::new().build()
}
