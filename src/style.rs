//! Runtime style configuration shared by all drawing tools.
//!
//! Holds the current drawing parameters (stroke width, arrowhead length,
//! font size, the three colors, and the text/number tool values). Sizes and
//! colors are written through to the settings store as they change, so they
//! come back on the next session; the text and number values are
//! session-only.

use crate::config::{SettingsStore, StyleDefaults};
use crate::draw::Color;
use log::warn;

/// Store key for the stroke width setting.
const KEY_LINE_WIDTH: &str = "line-width";
/// Store key for the arrowhead length setting.
const KEY_ARROWHEAD_LENGTH: &str = "arrowhead-length";
/// Store key for the font size setting.
const KEY_FONT_SIZE: &str = "font-size";
/// Store key for the stroke color setting.
const KEY_LINE_COLOR: &str = "line-color";
/// Store key for the fill color setting.
const KEY_FILL_COLOR: &str = "fill-color";
/// Store key for the text color setting.
const KEY_TEXT_COLOR: &str = "text-color";

/// Partial style update; `None` fields are left unchanged.
#[derive(Debug, Default, Clone)]
pub struct StyleUpdate {
    pub text_value: Option<String>,
    pub number_value: Option<u32>,
    pub line_width: Option<f64>,
    pub arrowhead_length: Option<f64>,
    pub font_size: Option<f64>,
    pub line_color: Option<Color>,
    pub fill_color: Option<Color>,
    pub text_color: Option<Color>,
}

/// Current drawing parameters, with write-through persistence.
#[derive(Debug)]
pub struct StyleConfig {
    text_value: String,
    number_value: u32,
    line_width: f64,
    arrowhead_length: f64,
    font_size: f64,
    line_color: Color,
    fill_color: Color,
    text_color: Color,
    defaults: StyleDefaults,
    store: SettingsStore,
}

impl StyleConfig {
    /// Loads the style from the settings store, falling back to the
    /// configured default for every missing or unparsable entry.
    ///
    /// When `defaults.persist_settings` is disabled, the stored values are
    /// ignored entirely and nothing is written back, matching a
    /// reset-each-session preference.
    pub fn load(defaults: StyleDefaults, store: SettingsStore) -> Self {
        let use_store = defaults.persist_settings;

        let read_size = |key: &str, fallback: f64| -> f64 {
            if !use_store {
                return fallback;
            }
            store
                .get(key)
                .and_then(|raw| raw.parse::<f64>().ok())
                .filter(|v| *v > 0.0)
                .unwrap_or(fallback)
        };
        let read_color = |key: &str, fallback: Color| -> Color {
            if !use_store {
                return fallback;
            }
            store
                .get(key)
                .and_then(Color::from_hex)
                .unwrap_or(fallback)
        };

        Self {
            text_value: defaults.text_value.clone(),
            number_value: defaults.number_value,
            line_width: read_size(KEY_LINE_WIDTH, defaults.line_width),
            arrowhead_length: read_size(KEY_ARROWHEAD_LENGTH, defaults.arrowhead_length),
            font_size: read_size(KEY_FONT_SIZE, defaults.font_size),
            line_color: read_color(KEY_LINE_COLOR, defaults.line_color()),
            fill_color: read_color(KEY_FILL_COLOR, defaults.fill_color()),
            text_color: read_color(KEY_TEXT_COLOR, defaults.text_color()),
            defaults,
            store,
        }
    }

    /// Current text callout content.
    pub fn text_value(&self) -> &str {
        &self.text_value
    }

    /// Current step-marker counter value.
    pub fn number_value(&self) -> u32 {
        self.number_value
    }

    /// The counter value as the decimal digits a marker displays.
    pub fn number_label(&self) -> String {
        self.number_value.to_string()
    }

    /// Current stroke width in pixels.
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Current arrowhead stroke length in pixels.
    pub fn arrowhead_length(&self) -> f64 {
        self.arrowhead_length
    }

    /// Current font size in points.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Current stroke color.
    pub fn line_color(&self) -> Color {
        self.line_color
    }

    /// Current fill color.
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Current text color.
    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// Applies a partial update, persisting the sizes and colors it touched.
    ///
    /// Size fields must stay positive; non-positive values are clamped to
    /// 1.0 with a warning rather than rejected.
    pub fn apply(&mut self, update: StyleUpdate) {
        if let Some(text_value) = update.text_value {
            self.text_value = text_value;
        }
        if let Some(number_value) = update.number_value {
            self.number_value = number_value;
        }

        if let Some(line_width) = update.line_width {
            self.line_width = positive_or_one("line width", line_width);
            self.persist_size(KEY_LINE_WIDTH, self.line_width);
        }
        if let Some(arrowhead_length) = update.arrowhead_length {
            self.arrowhead_length = positive_or_one("arrowhead length", arrowhead_length);
            self.persist_size(KEY_ARROWHEAD_LENGTH, self.arrowhead_length);
        }
        if let Some(font_size) = update.font_size {
            self.font_size = positive_or_one("font size", font_size);
            self.persist_size(KEY_FONT_SIZE, self.font_size);
        }

        if let Some(line_color) = update.line_color {
            self.line_color = line_color;
            self.persist_color(KEY_LINE_COLOR, line_color);
        }
        if let Some(fill_color) = update.fill_color {
            self.fill_color = fill_color;
            self.persist_color(KEY_FILL_COLOR, fill_color);
        }
        if let Some(text_color) = update.text_color {
            self.text_color = text_color;
            self.persist_color(KEY_TEXT_COLOR, text_color);
        }
    }

    /// Restores every field to its configured default, persisting the
    /// restored sizes and colors.
    pub fn reset(&mut self) {
        self.text_value = self.defaults.text_value.clone();
        self.number_value = self.defaults.number_value;

        self.line_width = self.defaults.line_width;
        self.persist_size(KEY_LINE_WIDTH, self.line_width);
        self.arrowhead_length = self.defaults.arrowhead_length;
        self.persist_size(KEY_ARROWHEAD_LENGTH, self.arrowhead_length);
        self.font_size = self.defaults.font_size;
        self.persist_size(KEY_FONT_SIZE, self.font_size);

        self.line_color = self.defaults.line_color();
        self.persist_color(KEY_LINE_COLOR, self.line_color);
        self.fill_color = self.defaults.fill_color();
        self.persist_color(KEY_FILL_COLOR, self.fill_color);
        self.text_color = self.defaults.text_color();
        self.persist_color(KEY_TEXT_COLOR, self.text_color);
    }

    /// Advances the step-marker counter by one.
    ///
    /// Called by the number tool when a marker commits.
    pub fn increment_number(&mut self) {
        self.number_value = self.number_value.saturating_add(1);
    }

    fn persist_size(&mut self, key: &str, value: f64) {
        if self.defaults.persist_settings {
            self.store.set(key, value.to_string());
        }
    }

    fn persist_color(&mut self, key: &str, value: Color) {
        if self.defaults.persist_settings {
            self.store.set(key, value.to_hex());
        }
    }
}

fn positive_or_one(what: &str, value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        warn!("Ignoring non-positive {} {:.1}, using 1.0", what, value);
        1.0
    }
}
