//! SurfaceKit Settings Crate
//!
//! Handles job configuration files and machine limits.

pub mod config;
pub mod error;

pub use config::{Config, MachineSettings, OutputSettings, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{ConfigError, SettingsError, SettingsResult};
