//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Reminder polling on/off
//! - Display settings (dark mode, per-habit colors)
//! - Default log level
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Reminder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    /// Attach the name-derived color to habit listings
    #[serde(default = "default_true")]
    pub color_habits: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            color_habits: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(format!("cannot parse '{value}' as bool: {e}")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
        }
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match Self::get_json_value_by_path(&json, key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse
    /// as the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |e: serde_json::Error| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        };
        let mut json = serde_json::to_value(&*self).map_err(invalid)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(invalid)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert!(parsed.reminders.enabled);
        assert!(parsed.ui.dark_mode);
        assert_eq!(parsed.logging.level, "warn");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[ui]\ndark_mode = false\n").unwrap();
        assert!(!parsed.ui.dark_mode);
        assert!(parsed.ui.color_habits);
        assert!(parsed.reminders.enabled);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("ui.dark_mode").as_deref(), Some("true"));
        assert_eq!(cfg.get("logging.level").as_deref(), Some("warn"));
        assert!(cfg.get("ui.missing_key").is_none());
        assert!(cfg.get("ui").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_bool_and_string() {
        let mut cfg = Config::default();
        cfg.set("reminders.enabled", "false").unwrap();
        cfg.set("logging.level", "debug").unwrap();
        assert!(!cfg.reminders.enabled);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("ui.nonexistent_key", "value"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("ui", "x"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("ui.dark_mode", "not_a_bool"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.ui.dark_mode);
    }
}
