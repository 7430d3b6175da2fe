use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One RGBA pixel, laid out exactly as it sits in the pixel buffer
///
/// Serialized as its color string, the same syntax `FromStr` accepts.
#[repr(C)]
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable,
    Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel::rgba(0, 0, 0, 0);
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);
    pub const RED: Pixel = Pixel::rgb(255, 0, 0);
    pub const GREEN: Pixel = Pixel::rgb(0, 255, 0);
    pub const BLUE: Pixel = Pixel::rgb(0, 0, 255);
    pub const YELLOW: Pixel = Pixel::rgb(255, 255, 0);

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Fully opaque pixel
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

impl From<Pixel> for egui::Color32 {
    fn from(p: Pixel) -> Self {
        egui::Color32::from_rgba_unmultiplied(p.red, p.green, p.blue, p.alpha)
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}: expected #rrggbb, #rrggbbaa or a color name")]
pub struct ParsePixelError(String);

impl FromStr for Pixel {
    type Err = ParsePixelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let named = match s.to_ascii_lowercase().as_str() {
            "white" => Some(Pixel::WHITE),
            "black" => Some(Pixel::BLACK),
            "red" => Some(Pixel::RED),
            "green" => Some(Pixel::GREEN),
            "blue" => Some(Pixel::BLUE),
            "yellow" => Some(Pixel::YELLOW),
            "transparent" => Some(Pixel::TRANSPARENT),
            _ => None,
        };
        if let Some(pixel) = named {
            return Ok(pixel);
        }

        let err = || ParsePixelError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(err());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Pixel::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl TryFrom<String> for Pixel {
    type Error = ParsePixelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Pixel> for String {
    fn from(pixel: Pixel) -> Self {
        pixel.to_string()
    }
}
