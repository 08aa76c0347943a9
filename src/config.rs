//! # Configuration Module
//!
//! This module provides configuration support for reheader: the naming
//! conventions used to check declarations, the preprocessor tokens used as
//! boundary markers, and the file extensions that select header or source
//! handling.
//!
//! Configuration can be specified in a `.reheader.toml` file or via the
//! `REHEADER_CONFIG` environment variable. Command-line flags override both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::rewriter::{DirectiveTokens, RewriteOptions};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".reheader.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "REHEADER_CONFIG";

/// Naming conventions for declaration checks and guard derivation.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct DeclarationConfig {
  /// Keyword that introduces a type declaration (e.g., "class").
  pub keyword: String,

  /// Prefix expected in front of the declared name in the file name
  /// (e.g., "BM_" for `BM_Block.h` declaring `Block`).
  pub filename_prefix: String,

  /// Appended to the file stem to form the guard token.
  pub guard_suffix: String,
}

impl Default for DeclarationConfig {
  fn default() -> Self {
    let options = RewriteOptions::default();
    Self {
      keyword: options.class_keyword,
      filename_prefix: options.filename_prefix,
      guard_suffix: options.guard_suffix,
    }
  }
}

/// Preprocessor tokens used as boundary markers.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct DirectivesConfig {
  pub guard_open: String,
  pub guard_define: String,
  pub guard_close: String,
  pub include: String,
}

impl Default for DirectivesConfig {
  fn default() -> Self {
    let tokens = DirectiveTokens::default();
    Self {
      guard_open: tokens.guard_open,
      guard_define: tokens.guard_define,
      guard_close: tokens.guard_close,
      include: tokens.include,
    }
  }
}

/// Extensions (without the leading dot) that select the rewrite strategy.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtensionConfig {
  /// Files rewritten as headers (license + include guard).
  pub headers: Vec<String>,

  /// Files rewritten as sources (license only).
  pub sources: Vec<String>,
}

impl Default for ExtensionConfig {
  fn default() -> Self {
    Self {
      headers: vec!["h".to_string()],
      sources: vec!["cpp".to_string()],
    }
  }
}

/// Main configuration struct for reheader.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
  #[serde(default)]
  pub declaration: DeclarationConfig,

  #[serde(default)]
  pub directives: DirectivesConfig,

  #[serde(default)]
  pub extensions: ExtensionConfig,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value is missing or malformed.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: String, message: String },
}

/// Overrides collected from the command line.
///
/// `None` (or an empty list) leaves the configured value untouched.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub class_keyword: Option<String>,
  pub filename_prefix: Option<String>,
  pub guard_suffix: Option<String>,
  pub header_extensions: Vec<String>,
  pub source_extensions: Vec<String>,
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Returns
  ///
  /// The loaded and validated configuration, or an error if the file cannot
  /// be read, parsed or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config = config.normalize();
    config.validate()?;

    Ok(config)
  }

  /// Apply command-line overrides. CLI values win over the file.
  pub fn merge_cli_overrides(&mut self, overrides: CliOverrides) {
    if let Some(keyword) = overrides.class_keyword {
      self.declaration.keyword = keyword;
    }
    if let Some(prefix) = overrides.filename_prefix {
      self.declaration.filename_prefix = prefix;
    }
    if let Some(suffix) = overrides.guard_suffix {
      self.declaration.guard_suffix = suffix;
    }
    if !overrides.header_extensions.is_empty() {
      self.extensions.headers = overrides.header_extensions;
    }
    if !overrides.source_extensions.is_empty() {
      self.extensions.sources = overrides.source_extensions;
    }
    *self = std::mem::take(self).normalize();
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - The keyword and every directive token are non-empty
  /// - Extensions are non-empty and don't include the leading dot
  /// - No extension is both a header and a source extension
  pub fn validate(&self) -> Result<(), ConfigError> {
    let required = [
      ("declaration.keyword", &self.declaration.keyword),
      ("directives.guard-open", &self.directives.guard_open),
      ("directives.guard-define", &self.directives.guard_define),
      ("directives.guard-close", &self.directives.guard_close),
      ("directives.include", &self.directives.include),
    ];
    for (key, value) in required {
      if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
          key: key.to_string(),
          message: "value cannot be empty".to_string(),
        });
      }
    }

    for (key, list) in [
      ("extensions.headers", &self.extensions.headers),
      ("extensions.sources", &self.extensions.sources),
    ] {
      for ext in list {
        if ext.is_empty() {
          return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "extension cannot be empty".to_string(),
          });
        }
        if ext.starts_with('.') {
          return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("extension '{ext}' should not include leading dot"),
          });
        }
      }
    }

    if let Some(ext) = self
      .extensions
      .headers
      .iter()
      .find(|ext| self.extensions.sources.contains(*ext))
    {
      return Err(ConfigError::InvalidValue {
        key: "extensions".to_string(),
        message: format!("'{ext}' is listed as both a header and a source extension"),
      });
    }

    Ok(())
  }

  /// The rewrite options this configuration describes.
  pub fn rewrite_options(&self) -> RewriteOptions {
    RewriteOptions {
      class_keyword: self.declaration.keyword.clone(),
      filename_prefix: self.declaration.filename_prefix.clone(),
      guard_suffix: self.declaration.guard_suffix.clone(),
      directives: DirectiveTokens {
        guard_open: self.directives.guard_open.clone(),
        guard_define: self.directives.guard_define.clone(),
        guard_close: self.directives.guard_close.clone(),
        include: self.directives.include.clone(),
      },
    }
  }

  /// Lowercase extensions so matching is case-insensitive.
  fn normalize(mut self) -> Self {
    for list in [&mut self.extensions.headers, &mut self.extensions.sources] {
      for ext in list.iter_mut() {
        *ext = ext.to_lowercase();
      }
      list.dedup();
    }
    self
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `REHEADER_CONFIG` environment variable
/// 3. `.reheader.toml` in `search_dir`
pub fn discover_config_path(explicit_path: Option<&Path>, search_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = search_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path, or fall back to defaults.
///
/// An explicit path that does not exist is an error rather than a silent
/// fallback.
pub fn load_config(explicit_path: Option<&Path>, search_dir: &Path, no_config: bool) -> Result<Config> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(Config::default());
  }

  if let Some(path) = explicit_path
    && !path.exists()
  {
    anyhow::bail!("Config file not found: {}", path.display());
  }

  match discover_config_path(explicit_path, search_dir) {
    Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(Config::default()),
  }
}
