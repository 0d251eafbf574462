//! Shared configuration loader for the sanitex toolchain.
//!
//! `defaults/sanitex.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`SanitexConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use sanitex_core::{Delimiters, SanitizeOptions};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/sanitex.default.toml");

/// Top-level configuration consumed by sanitex applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SanitexConfig {
    pub escapes: EscapesConfig,
    pub math: MathConfig,
    pub metadata: MetadataConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EscapesConfig {
    pub max_passes: usize,
    pub preserve_latex_commands: bool,
}

/// Markers written by the display-math normalizer and subscript wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct MathConfig {
    pub block_open: String,
    pub block_close: String,
    pub inline_open: String,
    pub inline_close: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    pub strip_front_matter: bool,
    pub strip_footer: bool,
}

impl SanitexConfig {
    /// Options for the sanitizer core.
    pub fn sanitize_options(&self) -> SanitizeOptions {
        SanitizeOptions {
            max_escape_passes: self.escapes.max_passes,
            preserve_latex_commands: self.escapes.preserve_latex_commands,
            block_math: Delimiters::new(&self.math.block_open, &self.math.block_close),
            inline_math: Delimiters::new(&self.math.inline_open, &self.math.inline_close),
            strip_front_matter: self.metadata.strip_front_matter,
            strip_footer: self.metadata.strip_footer,
        }
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SanitexConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SanitexConfig, ConfigError> {
    Loader::new().build()
}
