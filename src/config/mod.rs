//! Configuration file support for inkstroke.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/inkstroke/config.toml`. Settings include pen defaults,
//! the drawing surface size and the finished-shape limit.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{FrameConfig, PenConfig, SurfaceConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [pen]
/// default_color = "blue"
/// default_width = 8.0
/// velocity_based_width = true
///
/// [surface]
/// width = 2560
/// height = 1440
/// opacity = 0.8
///
/// [frame]
/// max_shapes = 500
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Pen defaults (color, width, width modulation)
    #[serde(default)]
    pub pen: PenConfig,

    /// Drawing surface size and compositing
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Finished-shape storage
    #[serde(default)]
    pub frame: FrameConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `pen.default_width`: 1.0 - 50.0
    /// - `surface.width` / `surface.height`: at least 1
    /// - `surface.opacity`: 0.0 - 1.0
    pub fn validate_and_clamp(&mut self) {
        if !(1.0..=50.0).contains(&self.pen.default_width) {
            log::warn!(
                "Invalid default_width {:.1}, clamping to 1.0-50.0 range",
                self.pen.default_width
            );
            // NaN compares false everywhere; replace it before clamping.
            let width = if self.pen.default_width.is_nan() {
                1.0
            } else {
                self.pen.default_width
            };
            self.pen.default_width = width.clamp(1.0, 50.0);
        }

        if self.surface.width == 0 || self.surface.height == 0 {
            log::warn!(
                "Invalid surface size {}x{}, raising to at least 1x1",
                self.surface.width,
                self.surface.height
            );
            self.surface.width = self.surface.width.max(1);
            self.surface.height = self.surface.height.max(1);
        }

        if !(0.0..=1.0).contains(&self.surface.opacity) {
            log::warn!(
                "Invalid surface opacity {:.2}, clamping to 0.0-1.0 range",
                self.surface.opacity
            );
            let opacity = if self.surface.opacity.is_nan() {
                1.0
            } else {
                self.surface.opacity
            };
            self.surface.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/inkstroke/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("inkstroke");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is absent.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the config to TOML and writes it to `config_path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Saves the current configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLUE;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.pen.default_width, 10.0);
        assert!(!config.pen.velocity_based_width);
        assert!(config.pen.progressive_render);
        assert_eq!((config.surface.width, config.surface.height), (1920, 1080));
        assert_eq!(config.frame.max_shapes, 0);
    }

    #[test]
    fn partial_file_fills_defaults_and_clamps() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[pen]
default_color = "blue"
default_width = 120.0
velocity_based_width = true

[surface]
height = 0
opacity = 3.5
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.pen.default_color.to_color(), BLUE);
        assert_eq!(config.pen.default_width, 50.0);
        assert!(config.pen.velocity_based_width);
        assert_eq!(config.surface.width, 1920);
        assert_eq!(config.surface.height, 1);
        assert_eq!(config.surface.opacity, 1.0);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[pen\ndefault_width = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.pen.default_color = ColorSpec::Rgb([10, 20, 30]);
        config.pen.default_width = 4.5;
        config.frame.max_shapes = 12;

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded.pen.default_color, ColorSpec::Rgb([10, 20, 30]));
        assert_eq!(loaded.pen.default_width, 4.5);
        assert_eq!(loaded.frame.max_shapes, 12);
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("velocity_based_width"));
        assert!(schema.contains("opacity"));
    }
}
