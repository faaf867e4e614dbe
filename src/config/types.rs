//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::FontDescriptor;
use crate::text::{DEFAULT_FONT_SIZE, TextAlignment};
use crate::util::Insets;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stroke defaults used when a recorded segment does not carry its own style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StrokeConfig {
    /// Default stroke color - a named color or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_stroke_color")]
    pub default_color: ColorSpec,

    /// Default stroke width in pixels (valid range: 0.5 - 100.0)
    #[serde(default = "default_stroke_width")]
    pub default_width: f64,

    /// Render strokes as a single constant-width path instead of tapered discs
    #[serde(default)]
    pub constant_width: bool,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            default_color: default_stroke_color(),
            default_width: default_stroke_width(),
            constant_width: false,
        }
    }
}

/// Text overlay settings.
///
/// The font size is the unzoomed size; pinching the label multiplies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style ("normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Base font size in pixels (valid range: 8.0 - 200.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Label text color
    #[serde(default = "default_text_color")]
    pub color: ColorSpec,

    /// Horizontal alignment; only matters when wrapping to the view width
    #[serde(default)]
    pub alignment: TextAlignment,

    /// Wrap text to the view width (inset by `insets`) instead of a single line
    #[serde(default)]
    pub fit_to_view_width: bool,

    /// Margins as [top, left, bottom, right] in pixels, used in fit-to-width mode
    #[serde(default)]
    pub insets: [f64; 4],
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            font_size: default_font_size(),
            color: default_text_color(),
            alignment: TextAlignment::default(),
            fit_to_view_width: false,
            insets: [0.0; 4],
        }
    }
}

impl TextConfig {
    pub fn font_descriptor(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.font_family.clone(),
            self.font_weight.clone(),
            self.font_style.clone(),
        )
    }

    pub fn edge_insets(&self) -> Insets {
        let [top, left, bottom, right] = self.insets;
        Insets::new(top, left, bottom, right)
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_stroke_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_stroke_width() -> f64 {
    5.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

fn default_text_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}
