//! Configuration file support for rastermark.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/rastermark/config.toml`.
//! Settings include style defaults and font selection.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod store;
pub mod types;

// Re-export commonly used types at module level
pub use store::SettingsStore;
pub use types::{FontConfig, StyleDefaults};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::draw::Color;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML
/// file. All fields have sensible defaults and will use those if not
/// specified in the config file.
///
/// # Example TOML
/// ```toml
/// [style]
/// line_width = 2.0
/// arrowhead_length = 15.0
/// font_size = 16.0
/// line_color = "#ff0000"
///
/// [font]
/// family = "Sans"
/// weight = "bold"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Style defaults (values, sizes, colors)
    #[serde(default)]
    pub style: StyleDefaults,

    /// Font used for text callouts and number markers
    #[serde(default)]
    pub font: FontConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// This method ensures that user-provided config values won't cause
    /// rendering issues. Invalid values are clamped to the nearest valid
    /// value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `style.line_width`: 1.0 - 20.0
    /// - `style.arrowhead_length`: 5.0 - 50.0
    /// - `style.font_size`: 8.0 - 72.0
    /// - color strings must parse as `#rrggbb`
    fn validate_and_clamp(&mut self) {
        // Line width: 1.0 - 20.0
        if !(1.0..=20.0).contains(&self.style.line_width) {
            log::warn!(
                "Invalid line_width {:.1}, clamping to 1.0-20.0 range",
                self.style.line_width
            );
            self.style.line_width = self.style.line_width.clamp(1.0, 20.0);
        }

        // Arrowhead length: 5.0 - 50.0
        if !(5.0..=50.0).contains(&self.style.arrowhead_length) {
            log::warn!(
                "Invalid arrowhead_length {:.1}, clamping to 5.0-50.0 range",
                self.style.arrowhead_length
            );
            self.style.arrowhead_length = self.style.arrowhead_length.clamp(5.0, 50.0);
        }

        // Font size: 8.0 - 72.0
        if !(8.0..=72.0).contains(&self.style.font_size) {
            log::warn!(
                "Invalid font_size {:.1}, clamping to 8.0-72.0 range",
                self.style.font_size
            );
            self.style.font_size = self.style.font_size.clamp(8.0, 72.0);
        }

        // Color strings must be valid hex
        for (name, value, fallback) in [
            ("line_color", &mut self.style.line_color, "#ff0000"),
            ("fill_color", &mut self.style.fill_color, "#000000"),
            ("text_color", &mut self.style.text_color, "#ffffff"),
        ] {
            if Color::from_hex(value).is_none() {
                log::warn!("Invalid {} '{}', falling back to '{}'", name, value, fallback);
                *value = fallback.to_string();
            }
        }

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.font.weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .font
            .weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font weight '{}', falling back to 'bold'",
                self.font.weight
            );
            self.font.weight = "bold".to_string();
        }

        // Validate font style
        if !matches!(
            self.font.style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font style '{}', falling back to 'normal'",
                self.font.style
            );
            self.font.style = "normal".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/rastermark/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("rastermark");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// Attempts to read and parse the config file at
    /// `~/.config/rastermark/config.toml`. If the file doesn't exist,
    /// returns a Config with default values. All loaded values are validated
    /// and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to file.
    ///
    /// Serializes the config to TOML format and writes it to
    /// `~/.config/rastermark/config.toml`. Creates the parent directory if
    /// it doesn't exist. Kept for future use (runtime config editing).
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation_unchanged() {
        let mut config = Config::default();
        let before = format!("{:?}", config);
        config.validate_and_clamp();
        assert_eq!(before, format!("{:?}", config));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.style.line_width = 0.0;
        config.style.arrowhead_length = 500.0;
        config.style.font_size = -3.0;

        config.validate_and_clamp();

        assert_eq!(config.style.line_width, 1.0);
        assert_eq!(config.style.arrowhead_length, 50.0);
        assert_eq!(config.style.font_size, 8.0);
    }

    #[test]
    fn bad_colors_and_fonts_fall_back() {
        let mut config = Config::default();
        config.style.line_color = "not-a-color".to_string();
        config.font.weight = "extra-chunky".to_string();
        config.font.style = "wavy".to_string();

        config.validate_and_clamp();

        assert_eq!(config.style.line_color, "#ff0000");
        assert_eq!(config.font.weight, "bold");
        assert_eq!(config.font.style, "normal");
    }

    #[test]
    fn partial_toml_fills_missing_sections() {
        let config: Config = toml::from_str("[style]\nline_width = 4.0\n").unwrap();
        assert_eq!(config.style.line_width, 4.0);
        assert_eq!(config.style.font_size, 16.0);
        assert_eq!(config.font.family, "Sans");
    }
}
