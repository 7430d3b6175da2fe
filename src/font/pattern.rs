//! Font specification strings in the host's font naming syntax.
//!
//! `families[-size][:name=value...]`, e.g. `DejaVu Sans-12:style=Bold`,
//! `Noto Serif,serif:slant=italic` or `monospace:bold`.

use std::fmt;

/// Default point size filled in by default substitution
pub const DEFAULT_POINT_SIZE: f32 = 12.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyName {
    Named(String),
    SansSerif,
    Serif,
    Monospace,
    Cursive,
    Fantasy,
}

impl FamilyName {
    fn generic(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sans" | "sans-serif" | "sans serif" => Some(Self::SansSerif),
            "serif" => Some(Self::Serif),
            "mono" | "monospace" => Some(Self::Monospace),
            "cursive" => Some(Self::Cursive),
            "fantasy" => Some(Self::Fantasy),
            _ => None,
        }
    }

    pub fn to_fontdb(&self) -> fontdb::Family<'_> {
        match self {
            Self::Named(name) => fontdb::Family::Name(name),
            Self::SansSerif => fontdb::Family::SansSerif,
            Self::Serif => fontdb::Family::Serif,
            Self::Monospace => fontdb::Family::Monospace,
            Self::Cursive => fontdb::Family::Cursive,
            Self::Fantasy => fontdb::Family::Fantasy,
        }
    }

    /// Installed families to try for a generic family, best first
    ///
    /// Follows the stock fontconfig `60-latin.conf` preference lists.
    pub fn preferred(&self) -> &'static [&'static str] {
        match self {
            Self::Named(_) => &[],
            Self::SansSerif => &[
                "DejaVu Sans",
                "Bitstream Vera Sans",
                "Verdana",
                "Arial",
                "Liberation Sans",
                "Albany AMT",
                "Luxi Sans",
                "Nimbus Sans L",
                "Nimbus Sans",
                "Helvetica",
                "Noto Sans",
                "Lucida Sans Unicode",
                "Tahoma",
            ],
            Self::Serif => &[
                "DejaVu Serif",
                "Bitstream Vera Serif",
                "Times New Roman",
                "Liberation Serif",
                "Thorndale AMT",
                "Luxi Serif",
                "Nimbus Roman No9 L",
                "Nimbus Roman",
                "Times",
                "Noto Serif",
            ],
            Self::Monospace => &[
                "DejaVu Sans Mono",
                "Bitstream Vera Sans Mono",
                "Inconsolata",
                "Andale Mono",
                "Courier New",
                "Liberation Mono",
                "Cumberland AMT",
                "Luxi Mono",
                "Nimbus Mono L",
                "Nimbus Mono PS",
                "Courier",
                "Noto Sans Mono",
            ],
            Self::Cursive => &["TSCu_Comic", "Comic Sans MS", "Comic Neue"],
            Self::Fantasy => &["Impact", "Copperplate", "Papyrus"],
        }
    }
}

impl fmt::Display for FamilyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::SansSerif => f.write_str("sans-serif"),
            Self::Serif => f.write_str("serif"),
            Self::Monospace => f.write_str("monospace"),
            Self::Cursive => f.write_str("cursive"),
            Self::Fantasy => f.write_str("fantasy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slant {
    Roman,
    Italic,
    Oblique,
}

/// Parsed font request; `None` fields are filled in by substitution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontPattern {
    pub families: Vec<FamilyName>,
    /// CSS-style weight, 100..=1000
    pub weight: Option<u16>,
    pub slant: Option<Slant>,
    /// Width in percent of normal, 50..=200
    pub width: Option<u16>,
    /// Point size
    pub size: Option<f32>,
    pub pixel_size: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("unterminated escape at end of {0:?}")]
    TrailingEscape(String),
    #[error("invalid value {value:?} for property {property}")]
    InvalidValue { property: String, value: String },
}

impl FontPattern {
    pub fn parse(spec: &str) -> Result<Self, PatternError> {
        let mut sections = split_unescaped(spec, ':')?.into_iter();
        let mut pattern = FontPattern::default();

        let head = sections.next().unwrap_or_default();
        let (families, size) = split_size(&head)?;
        pattern.size = size;
        for family in split_unescaped(&families, ',')? {
            let family = unescape(family.trim());
            if !family.is_empty() {
                pattern.families.push(FamilyName::Named(family));
            }
        }

        for section in sections {
            let section = section.trim();
            if section.is_empty() {
                continue;
            }
            match section.split_once('=') {
                Some((name, value)) => pattern.apply(name.trim(), &unescape(value.trim()))?,
                None => pattern.apply_constant(section),
            }
        }

        Ok(pattern)
    }

    fn apply(&mut self, name: &str, value: &str) -> Result<(), PatternError> {
        let invalid = || PatternError::InvalidValue {
            property: name.to_string(),
            value: value.to_string(),
        };

        match name.to_ascii_lowercase().as_str() {
            "family" => self.families.push(FamilyName::Named(value.to_string())),
            "style" => {
                for word in value.split_whitespace() {
                    self.apply_constant(word);
                }
            }
            "weight" => self.weight = Some(parse_weight(value).ok_or_else(invalid)?),
            "slant" => self.slant = Some(parse_slant(value).ok_or_else(invalid)?),
            "width" => self.width = Some(parse_width(value).ok_or_else(invalid)?),
            "size" => self.size = Some(parse_positive(value).ok_or_else(invalid)?),
            "pixelsize" => self.pixel_size = Some(parse_positive(value).ok_or_else(invalid)?),
            other => log::debug!("Ignoring font property {}={}", other, value),
        }
        Ok(())
    }

    /// Bare words like `bold`, `italic` or `condensed`
    fn apply_constant(&mut self, word: &str) {
        if let Some(weight) = named_weight(word) {
            self.weight = Some(weight);
        } else if let Some(slant) = parse_slant(word) {
            self.slant = Some(slant);
        } else if let Some(width) = named_width(word) {
            self.width = Some(width);
        } else {
            log::debug!("Ignoring font constant {}", word);
        }
    }

    /// Replace generic alias names with generic families
    pub fn substitute_aliases(&mut self) {
        for family in &mut self.families {
            if let FamilyName::Named(name) = family {
                if let Some(generic) = FamilyName::generic(name) {
                    *family = generic;
                }
            }
        }
    }

    /// Fill every unset property with its default
    pub fn substitute_defaults(&mut self) {
        if self.families.is_empty() {
            self.families.push(FamilyName::SansSerif);
        }
        self.weight.get_or_insert(400);
        self.slant.get_or_insert(Slant::Roman);
        self.width.get_or_insert(100);
        self.size.get_or_insert(DEFAULT_POINT_SIZE);
    }

    pub fn fontdb_style(&self) -> fontdb::Style {
        match self.slant {
            Some(Slant::Italic) => fontdb::Style::Italic,
            Some(Slant::Oblique) => fontdb::Style::Oblique,
            Some(Slant::Roman) | None => fontdb::Style::Normal,
        }
    }

    pub fn fontdb_weight(&self) -> fontdb::Weight {
        fontdb::Weight(self.weight.unwrap_or(400))
    }

    pub fn fontdb_stretch(&self) -> fontdb::Stretch {
        use fontdb::Stretch::*;
        match self.width.unwrap_or(100) {
            0..=56 => UltraCondensed,
            57..=68 => ExtraCondensed,
            69..=81 => Condensed,
            82..=93 => SemiCondensed,
            94..=106 => Normal,
            107..=118 => SemiExpanded,
            119..=137 => Expanded,
            138..=175 => ExtraExpanded,
            _ => UltraExpanded,
        }
    }
}

/// Split on `sep`, honoring backslash escapes (escapes are kept)
fn split_unescaped(s: &str, sep: char) -> Result<Vec<String>, PatternError> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            let escaped = chars
                .next()
                .ok_or_else(|| PatternError::TrailingEscape(s.to_string()))?;
            current.push(c);
            current.push(escaped);
        } else if c == sep {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    Ok(parts)
}

/// Separate a trailing unescaped `-size` from the family list
///
/// A hyphen not followed by a number belongs to the family name, so
/// `sans-serif` stays one family.
fn split_size(head: &str) -> Result<(String, Option<f32>), PatternError> {
    let parts = split_unescaped(head, '-')?;
    if let [families @ .., last] = parts.as_slice() {
        if !families.is_empty() {
            if let Some(size) = parse_positive(last.trim()) {
                return Ok((families.join("-"), Some(size)));
            }
        }
    }
    Ok((head.to_string(), None))
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

fn parse_positive(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

fn named_weight(word: &str) -> Option<u16> {
    let weight = match word.to_ascii_lowercase().as_str() {
        "thin" => 100,
        "extralight" | "ultralight" => 200,
        "light" => 300,
        "regular" | "normal" | "book" => 400,
        "medium" => 500,
        "semibold" | "demibold" => 600,
        "bold" => 700,
        "extrabold" | "ultrabold" => 800,
        "black" | "heavy" => 900,
        _ => return None,
    };
    Some(weight)
}

fn parse_weight(value: &str) -> Option<u16> {
    named_weight(value).or_else(|| value.parse::<u16>().ok().filter(|w| (1..=1000).contains(w)))
}

fn parse_slant(value: &str) -> Option<Slant> {
    match value.to_ascii_lowercase().as_str() {
        "roman" | "0" => Some(Slant::Roman),
        "italic" | "100" => Some(Slant::Italic),
        "oblique" | "110" => Some(Slant::Oblique),
        _ => None,
    }
}

fn named_width(word: &str) -> Option<u16> {
    let width = match word.to_ascii_lowercase().as_str() {
        "ultracondensed" => 50,
        "extracondensed" => 63,
        "condensed" => 75,
        "semicondensed" => 87,
        "normal" => 100,
        "semiexpanded" => 113,
        "expanded" => 125,
        "extraexpanded" => 150,
        "ultraexpanded" => 200,
        _ => return None,
    };
    Some(width)
}

fn parse_width(value: &str) -> Option<u16> {
    named_width(value).or_else(|| value.parse::<u16>().ok().filter(|w| (50..=200).contains(w)))
}
