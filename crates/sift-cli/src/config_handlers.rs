//! Handler functions for `sift config {path,get,set,init,export}`.
//!
//! Handlers write to a caller-supplied sink so the dispatcher can pass
//! stdout and tests can pass a buffer.

use crate::cli::ConfigAction;
use crate::config::SiftConfig;
use sift_core::{Error, Result};
use std::io::Write;
use std::path::PathBuf;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Receives the raw `--config` path (not a loaded config) because some
/// commands (path, init) work before a config file exists.
pub fn handle_config_command(
    config_path: Option<&str>,
    action: ConfigAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path, out),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key, out),
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value, out),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force, out),
        ConfigAction::Export { docker_env } => {
            let config = SiftConfig::load(config_path)?;
            cmd_config_export(&config, docker_env, out)
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

fn cmd_config_path(config_path: Option<&str>, out: &mut impl Write) -> Result<()> {
    let path = SiftConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        log::warn!("{} does not exist; run `sift config init` to create it", path.display());
    }
    Ok(())
}

fn cmd_config_get(config_path: Option<&str>, key: &str, out: &mut impl Write) -> Result<()> {
    let config = SiftConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    let found = get_nested_value(&value, key)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;
    writeln!(out, "{}", format_toml_value(found))?;
    Ok(())
}

/// Set a value in the config file.
///
/// The key must name a [`SiftConfig`] setting and the edited document must
/// still load, locale included, or nothing is written.
fn cmd_config_set(
    config_path: Option<&str>,
    key: &str,
    value: &str,
    out: &mut impl Write,
) -> Result<()> {
    let path = SiftConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `sift config init` first.",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parse_value(value))?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    let parsed: SiftConfig = toml::from_str(&toml_str)
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;

    // Unknown keys are dropped when the parsed config is written back out.
    let known = toml::Value::try_from(&parsed).map_err(|e| Error::config(e.to_string()))?;
    if get_nested_value(&known, key).is_none() {
        return Err(Error::config(format!("Unknown config key '{key}'")));
    }
    parsed.load_options()?;

    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    writeln!(out, "Set {key} = {value} in {}", path.display())?;
    Ok(())
}

fn cmd_config_init(file: Option<&str>, force: bool, out: &mut impl Write) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => SiftConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = SiftConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}

fn cmd_config_export(config: &SiftConfig, docker_env: bool, out: &mut impl Write) -> Result<()> {
    for (key, value) in config.to_env_vars()? {
        if docker_env {
            writeln!(out, "--env {key}={value}")?;
        } else {
            writeln!(out, "{key}={value}")?;
        }
    }
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, last) = key.rsplit_once('.').unwrap_or(("", key));
    if last.is_empty() {
        return Err(Error::config("Empty key path"));
    }

    let mut current = root;
    for part in parents.split('.').filter(|p| !p.is_empty()) {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part)
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Parse a string value into a TOML value, auto-detecting the type.
///
/// Priority: bool, integer, float, inline array, string.
fn parse_value(s: &str) -> toml::Value {
    if s == "true" {
        return toml::Value::Boolean(true);
    }
    if s == "false" {
        return toml::Value::Boolean(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    if s.trim_start().starts_with('[')
        && let Ok(toml::Value::Table(mut t)) = toml::from_str::<toml::Value>(&format!("v = {s}"))
        && let Some(array) = t.remove("v")
    {
        return array;
    }
    toml::Value::String(s.to_string())
}

/// Format a TOML value for display on stdout.
fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
