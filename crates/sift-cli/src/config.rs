//! Configuration for the `sift` CLI.
//!
//! Provides the [`SiftConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `SIFT_CONFIG` environment variable
//! 3. XDG default: `~/.config/sift/config.toml`
//! 4. Built-in defaults
//!
//! `SIFT_*` environment variables are overlaid on whichever file is used.

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use sift_content::{LoadOptions, Locale};
use sift_core::traits::ConfigProvider;
use sift_core::util::paths::expand_tilde;
use sift_core::{Error, Result};
use sift_filter::{DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_CHARS, FilterOptions};
use std::path::PathBuf;

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "SIFT_CONFIG";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the `sift` CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Site root; content collections live beneath it.
    pub base_path: Option<String>,

    /// Content collection configuration.
    pub content: ContentConfig,

    /// Search behaviour.
    pub search: SearchConfig,
}

/// Content collection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content root holding the collections; defaults to `base_path`.
    pub path: Option<String>,

    /// Collection loaded when a command names none.
    pub collection: String,

    /// Load entries marked `draft: true`.
    pub include_drafts: bool,

    /// Fail on the first invalid entry.
    pub strict: bool,

    /// Locale for entries outside a locale directory.
    pub default_locale: String,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a query settles, in milliseconds.
    pub debounce_ms: u64,

    /// Minimum trimmed query length before filtering applies.
    pub min_chars: usize,

    /// Fields searched when none are given on the command line.
    pub fields: Vec<String>,

    /// Maximum results to print.
    pub limit: Option<usize>,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            project_name: "sift".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: None,
            collection: "blog".to_string(),
            include_drafts: false,
            strict: false,
            default_locale: Locale::default().to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_chars: DEFAULT_MIN_CHARS,
            fields: vec!["title".into(), "description".into(), "tags".into()],
            limit: None,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl SiftConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path)
            && path.exists()
        {
            builder
                .add_file(&path.to_string_lossy())
                .map_err(|e| Error::config(format!("config file: {e}")))?;
        }

        let mut env_opts = env::Options::with_top_level("SIFT");
        env_opts.add_section("content");
        env_opts.add_section("search");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        log::debug!("loaded config for '{}'", config.project_name);
        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sift").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `SIFT_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "SIFT", &mut vars);
        Ok(vars)
    }

    /// Engine options from the `[search]` section.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::default()
            .with_debounce_ms(self.search.debounce_ms)
            .with_min_chars(self.search.min_chars)
    }

    /// Collection load options from the `[content]` section.
    ///
    /// # Errors
    ///
    /// Fails when `default_locale` is not a supported locale.
    pub fn load_options(&self) -> Result<LoadOptions> {
        let locale: Locale = self
            .content
            .default_locale
            .parse()
            .map_err(|e: Error| Error::config(format!("content.default_locale: {e}")))?;
        Ok(LoadOptions::default()
            .with_drafts(self.content.include_drafts)
            .strict(self.content.strict)
            .with_default_locale(locale))
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for SiftConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(expand_tilde(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_path(&self, collection: &str) -> Result<PathBuf> {
        let root = match &self.content.path {
            Some(p) => expand_tilde(p),
            None => self.base_path()?,
        };
        Ok(root.join(collection))
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
