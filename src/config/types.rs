//! Configuration type definitions.

use crate::draw::{Color, FontDescriptor, color};
use serde::{Deserialize, Serialize};

/// Default style values applied when no persisted setting exists.
///
/// These seed the runtime style configuration on startup and are what a
/// reset-to-defaults action restores. Colors are `#rrggbb` hex strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleDefaults {
    /// Initial text callout content
    #[serde(default = "default_text_value")]
    pub text_value: String,

    /// Initial step-marker counter value
    #[serde(default = "default_number_value")]
    pub number_value: u32,

    /// Stroke width in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_line_width")]
    pub line_width: f64,

    /// Arrowhead stroke length in pixels (valid range: 5.0 - 50.0)
    #[serde(default = "default_arrowhead_length")]
    pub arrowhead_length: f64,

    /// Font size for text and number markers in points (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Stroke color as a `#rrggbb` hex string
    #[serde(default = "default_line_color")]
    pub line_color: String,

    /// Fill color for rectangles, badges and callout backgrounds
    #[serde(default = "default_fill_color")]
    pub fill_color: String,

    /// Color of rendered text and digits
    #[serde(default = "default_text_color")]
    pub text_color: String,

    /// Write style changes back to the settings store as they happen
    #[serde(default = "default_persist_settings")]
    pub persist_settings: bool,
}

impl StyleDefaults {
    /// Parsed stroke color, falling back to red if the hex string is bad.
    pub fn line_color(&self) -> Color {
        Color::from_hex(&self.line_color).unwrap_or(color::RED)
    }

    /// Parsed fill color, falling back to black.
    pub fn fill_color(&self) -> Color {
        Color::from_hex(&self.fill_color).unwrap_or(color::BLACK)
    }

    /// Parsed text color, falling back to white.
    pub fn text_color(&self) -> Color {
        Color::from_hex(&self.text_color).unwrap_or(color::WHITE)
    }
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            text_value: default_text_value(),
            number_value: default_number_value(),
            line_width: default_line_width(),
            arrowhead_length: default_arrowhead_length(),
            font_size: default_font_size(),
            line_color: default_line_color(),
            fill_color: default_fill_color(),
            text_color: default_text_color(),
            persist_settings: default_persist_settings(),
        }
    }
}

/// Font settings for text and number rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    /// Falls back to "Sans" if the specified font is not available
    #[serde(default = "default_font_family")]
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    /// Can be a named weight or a numeric value (100-900)
    #[serde(default = "default_font_weight")]
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub style: String,
}

impl FontConfig {
    /// Builds the descriptor handed to the rendering pipeline.
    pub fn to_descriptor(&self) -> FontDescriptor {
        FontDescriptor::new(self.family.clone(), self.weight.clone(), self.style.clone())
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: default_font_family(),
            weight: default_font_weight(),
            style: default_font_style(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_text_value() -> String {
    "Set the text value before placing a callout.".to_string()
}

fn default_number_value() -> u32 {
    1
}

fn default_line_width() -> f64 {
    2.0
}

fn default_arrowhead_length() -> f64 {
    15.0
}

fn default_font_size() -> f64 {
    16.0
}

fn default_line_color() -> String {
    "#ff0000".to_string()
}

fn default_fill_color() -> String {
    "#000000".to_string()
}

fn default_text_color() -> String {
    "#ffffff".to_string()
}

fn default_persist_settings() -> bool {
    true
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "bold".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}
