use serde::{Deserialize, Serialize};

use crate::core::Pixel;
use crate::font::LoadedFont;

/// Requested appearance of the text label
///
/// Only read during initialization; the label keeps its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font specification handed to the font resolver
    pub font_name: String,
    pub color: Pixel,
    /// Character size in pixels
    pub font_size: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_name: "DejaVu Sans".to_string(),
            color: Pixel::WHITE,
            font_size: 16,
        }
    }
}

/// Text drawn over the sprite
#[derive(Debug, Clone, Default)]
pub struct TextLabel {
    text: String,
    character_size: u32,
    fill_color: Pixel,
    font: Option<String>,
}

impl TextLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn character_size(&self) -> u32 {
        self.character_size
    }

    pub fn set_character_size(&mut self, size: u32) {
        self.character_size = size;
    }

    pub fn fill_color(&self) -> Pixel {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Pixel) {
        self.fill_color = color;
    }

    /// Family name of the bound font, if any
    pub fn font(&self) -> Option<&str> {
        self.font.as_deref()
    }

    pub fn set_font(&mut self, font: &LoadedFont) {
        self.font = Some(font.family().to_string());
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Character size and fill color from `style`
    pub fn apply_style(&mut self, style: &TextStyle) {
        self.set_character_size(style.font_size);
        self.set_fill_color(style.color);
    }
}
