//! Configuration file support for doodlekit.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/doodlekit/config.toml`. Settings cover stroke defaults and the
//! styling of the text overlay.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{StrokeConfig, TextConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [stroke]
/// default_color = "black"
/// default_width = 5.0
/// constant_width = false
///
/// [text]
/// font_family = "Sans"
/// font_size = 60.0
/// color = "white"
/// alignment = "center"
/// fit_to_view_width = true
/// insets = [20.0, 20.0, 20.0, 20.0]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Stroke defaults (color, width, rendering mode)
    #[serde(default)]
    pub stroke: StrokeConfig,

    /// Text overlay styling
    #[serde(default)]
    pub text: TextConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `stroke.default_width`: 0.5 - 100.0
    /// - `text.font_size`: 8.0 - 200.0
    /// - `text.insets`: >= 0.0
    fn validate_and_clamp(&mut self) {
        if !(0.5..=100.0).contains(&self.stroke.default_width) {
            warn!(
                "Invalid default_width {:.1}, clamping to 0.5-100.0 range",
                self.stroke.default_width
            );
            self.stroke.default_width = if self.stroke.default_width.is_nan() {
                0.5
            } else {
                self.stroke.default_width.clamp(0.5, 100.0)
            };
        }

        if !(8.0..=200.0).contains(&self.text.font_size) {
            warn!(
                "Invalid font_size {:.1}, clamping to 8.0-200.0 range",
                self.text.font_size
            );
            self.text.font_size = if self.text.font_size.is_nan() {
                8.0
            } else {
                self.text.font_size.clamp(8.0, 200.0)
            };
        }

        for (name, inset) in ["top", "left", "bottom", "right"]
            .iter()
            .zip(self.text.insets.iter_mut())
        {
            // `!(x >= 0)` also catches NaN.
            if !(*inset >= 0.0) {
                warn!("Invalid {} inset {:.1}, using 0.0", name, inset);
                *inset = 0.0;
            }
        }

        let valid_weight = matches!(
            self.text.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .text
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.text.font_weight
            );
            self.text.font_weight = "normal".to_string();
        }

        if !matches!(
            self.text.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.text.font_style
            );
            self.text.font_style = "normal".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("doodlekit");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config path cannot be determined, or if the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Saves the configuration to the default location, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Serializes the configuration as TOML to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextAlignment;
    use tempfile::TempDir;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.text.font_size, 60.0);
        assert!(!config.stroke.constant_width);
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let config = Config::from_toml_str(
            r#"
            [text]
            alignment = "right"
            insets = [1.0, 2.0, 3.0, 4.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.text.alignment, TextAlignment::Right);
        assert_eq!(config.text.font_family, "Sans");
        assert_eq!(config.stroke, StrokeConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::from_toml_str(
            r#"
            [stroke]
            default_width = 500.0

            [text]
            font_size = 2.0
            font_weight = "extra-chunky"
            font_style = "slanted"
            insets = [-5.0, 10.0, 0.0, -1.0]
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.stroke.default_width, 100.0);
        assert_eq!(config.text.font_size, 8.0);
        assert_eq!(config.text.font_weight, "normal");
        assert_eq!(config.text.font_style, "normal");
        assert_eq!(config.text.insets, [0.0, 10.0, 0.0, 0.0]);
    }

    #[test]
    fn numeric_font_weight_is_accepted() {
        let mut config = Config::default();
        config.text.font_weight = "700".to_string();
        config.validate_and_clamp();
        assert_eq!(config.text.font_weight, "700");
    }

    #[test]
    fn save_then_load_preserves_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.text.fit_to_view_width = true;
        config.stroke.default_color = ColorSpec::Rgb([10, 20, 30]);
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[text\nfont_size = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("stroke"));
        assert!(schema.contains("fit_to_view_width"));
    }
}
