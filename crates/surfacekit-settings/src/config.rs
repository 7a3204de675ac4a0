//! Configuration management for SurfaceKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats, chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Surfacing parameters (stock, tool, depths, feeds)
//! - Machine limits (maximum feed rate and spindle speed)
//! - Output preferences (program file path)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use surfacekit_camtools::SurfacingParameters;
use tracing::{debug, warn};

/// Directory name used under the platform config directory
pub const CONFIG_DIR_NAME: &str = "surfacekit";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Capabilities of the target machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Fastest feed the machine can cut at (mm/min)
    pub max_feed_rate: f64,
    /// Fastest the spindle can turn (RPM)
    pub max_spindle_speed: f64,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            max_feed_rate: 1720.0,
            max_spindle_speed: 9460.0,
        }
    }
}

/// Output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Where the generated program is written
    pub path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("result.nc"),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Surfacing job parameters
    pub surfacing: SurfacingParameters,
    /// Machine limits
    pub machine: MachineSettings,
    /// Output preferences
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(format!(
                "{} (config file must be .json or .toml)",
                other.unwrap_or("no extension")
            ))
            .into()),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-user config file location, e.g. `~/.config/surfacekit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform("no user config directory".to_string())
        })?;
        Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse config text in the format implied by `path`
    pub fn from_str_for_path(content: &str, path: &Path) -> SettingsResult<Self> {
        let config: Self = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;
        let config = Self::from_str_for_path(&content, path)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize config in the format implied by `path`
    pub fn to_string_for_path(&self, path: &Path) -> SettingsResult<String> {
        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };
        Ok(content)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = self.to_string_for_path(path)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.machine.max_feed_rate.is_finite() && self.machine.max_feed_rate > 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "machine.max_feed_rate".to_string(),
                value: self.machine.max_feed_rate.to_string(),
            }
            .into());
        }

        if !(self.machine.max_spindle_speed.is_finite() && self.machine.max_spindle_speed > 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "machine.max_spindle_speed".to_string(),
                value: self.machine.max_spindle_speed.to_string(),
            }
            .into());
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "output.path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        self.surfacing.validate()?;
        Ok(())
    }

    /// Surfacing parameters with feed rate and spindle speed capped to the machine limits
    pub fn effective_parameters(&self) -> SurfacingParameters {
        let mut params = self.surfacing.clone();

        if params.feed_rate > self.machine.max_feed_rate {
            warn!(
                "Feed rate {} mm/min exceeds machine maximum, using {} mm/min",
                params.feed_rate, self.machine.max_feed_rate
            );
            params.feed_rate = self.machine.max_feed_rate;
        }

        if params.spindle_speed > self.machine.max_spindle_speed {
            warn!(
                "Spindle speed {} RPM exceeds machine maximum, using {} RPM",
                params.spindle_speed, self.machine.max_spindle_speed
            );
            params.spindle_speed = self.machine.max_spindle_speed;
        }

        params
    }
}
