// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Theme mode and log level
//! - `[toasts]` - Default anchor, grace period and dismissibility
//! - `[durations]` - Auto-dismiss delay per variant, in milliseconds
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a directory to `load_with_override()`/`save_with_override()`
//! 3. Set `ICED_TOASTS_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_toasts::config::{self, Config};
//! use iced_toasts::ui::notifications::Position;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.toasts.position = Some(Position::BottomCenter);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::ui::notifications::{duration_from_millis, Position, ToastConfig};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "IcedToasts";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_TOASTS_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,

    /// Tracing filter directive (e.g. `info`, `iced_toasts=debug`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

/// Toast placement and lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ToastsConfig {
    /// Anchor used when a toast does not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Exit grace period in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace_period_ms: Option<u64>,

    /// Whether toasts show a close button by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissible: Option<bool>,
}

/// Auto-dismiss delays per variant. Zero or negative values keep toasts of
/// that variant until they are dismissed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DurationsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_ms: Option<i64>,
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub toasts: ToastsConfig,
    #[serde(default)]
    pub durations: DurationsConfig,
}

impl Config {
    /// Builds the runtime settings for a [`ToastManager`](crate::ui::notifications::ToastManager),
    /// clamping values to their supported ranges.
    #[must_use]
    pub fn toast_config(&self) -> ToastConfig {
        let defaults = ToastConfig::default();
        let duration = |value: Option<i64>, fallback: Duration| {
            value
                .map(|millis| duration_from_millis(millis.min(MAX_DURATION_MS)))
                .unwrap_or(fallback)
        };

        ToastConfig {
            position: self.toasts.position.unwrap_or(defaults.position),
            grace_period: self
                .toasts
                .grace_period_ms
                .map(|millis| Duration::from_millis(millis.min(MAX_GRACE_PERIOD_MS)))
                .unwrap_or(defaults.grace_period),
            dismissible: self.toasts.dismissible.unwrap_or(defaults.dismissible),
            success_duration: duration(self.durations.success_ms, defaults.success_duration),
            error_duration: duration(self.durations.error_ms, defaults.error_duration),
            warning_duration: duration(self.durations.warning_ms, defaults.warning_duration),
            info_duration: duration(self.durations.info_ms, defaults.info_duration),
            loading_duration: duration(self.durations.loading_ms, defaults.loading_duration),
        }
    }
}

// =============================================================================
// Path Resolution
// =============================================================================

/// Resolves the config file path: explicit directory, then environment
/// variable, then the platform config directory.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    let dir = base_dir
        .or_else(|| std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from))
        .or_else(|| dirs::config_dir().map(|path| path.join(APP_NAME)))?;
    Some(dir.join(CONFIG_FILE))
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns the defaults plus a warning when the file exists but cannot be
/// read or parsed.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("Could not load {}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                theme_mode: ThemeMode::Light,
                log_level: Some("debug".to_string()),
            },
            toasts: ToastsConfig {
                position: Some(Position::BottomLeft),
                grace_period_ms: Some(300),
                dismissible: Some(false),
            },
            durations: DurationsConfig {
                success_ms: Some(1_000),
                error_ms: Some(-1),
                ..DurationsConfig::default()
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_falls_back_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[toasts]\nposition = 42")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("[toasts]\nposition = \"bottom-center\"\n")
            .expect("partial config parses");

        assert_eq!(config.toasts.position, Some(Position::BottomCenter));
        assert_eq!(config.general, GeneralConfig::default());
    }

    #[test]
    fn toast_config_uses_defaults_when_unset() {
        assert_eq!(Config::default().toast_config(), ToastConfig::default());
    }

    #[test]
    fn toast_config_clamps_and_maps_values() {
        let config = Config {
            toasts: ToastsConfig {
                position: Some(Position::TopLeft),
                grace_period_ms: Some(60_000),
                dismissible: Some(false),
            },
            durations: DurationsConfig {
                warning_ms: Some(-5),
                info_ms: Some(i64::MAX),
                ..DurationsConfig::default()
            },
            ..Config::default()
        };

        let toast_config = config.toast_config();

        assert_eq!(toast_config.position, Position::TopLeft);
        assert_eq!(
            toast_config.grace_period,
            Duration::from_millis(MAX_GRACE_PERIOD_MS)
        );
        assert!(!toast_config.dismissible);
        assert_eq!(toast_config.warning_duration, Duration::ZERO);
        assert_eq!(
            toast_config.info_duration,
            Duration::from_millis(MAX_DURATION_MS as u64)
        );
    }
}
