use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Surface-local pixel coordinates.
pub type Point = [f32; 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pencil,
    Rectangle,
    Ellipse,
    Text,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Pencil,
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Text,
        Tool::Eraser,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Pencil => "Pencil",
            Tool::Rectangle => "Square",
            Tool::Ellipse => "Circle",
            Tool::Text => "Text",
            Tool::Eraser => "Eraser",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorError {
    #[error("expected 6 hex digits, got {0:?}")]
    BadLength(String),

    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

/// An sRGB stroke color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xFF, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);
    pub const YELLOW: Color = Color::rgb(0xFF, 0xFF, 0x00);

    pub const PALETTE: [Color; 5] = [
        Color::BLACK,
        Color::RED,
        Color::GREEN,
        Color::BLUE,
        Color::YELLOW,
    ];

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ParseColorError::BadLength(s.to_string()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::BadDigit(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ParseColorError::BadDigit(s.to_string()))
        };
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// One continuous pointer-down to pointer-up interaction. Style is captured
/// when the stroke starts and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub color: Color,
    pub width: f32,
    pub cap: LineCap,
}

impl Stroke {
    pub fn new(start: Point, color: Color, width: f32, cap: LineCap) -> Self {
        Self {
            points: vec![start],
            color,
            width,
            cap,
        }
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Number of rendered segments.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_hex() {
        assert_eq!("#000000".parse::<Color>(), Ok(Color::BLACK));
        assert_eq!("#FF0000".parse::<Color>(), Ok(Color::RED));
        assert_eq!("00ff00".parse::<Color>(), Ok(Color::GREEN));
        assert_eq!(" #0000Ff ".parse::<Color>(), Ok(Color::BLUE));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!("#FFF".parse::<Color>(), Err(ParseColorError::BadLength(_))));
        assert!(matches!("#GG0000".parse::<Color>(), Err(ParseColorError::BadDigit(_))));
        assert!(matches!("#ÿÿÿ".parse::<Color>(), Err(ParseColorError::BadLength(_))));
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn hex_formatting_is_uppercase() {
        assert_eq!(Color::YELLOW.to_hex(), "#FFFF00");
        assert_eq!(Color::rgb(10, 171, 255).to_string(), "#0AABFF");
    }

    #[test]
    fn color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::RED).unwrap();
        assert_eq!(json, "\"#FF0000\"");
        let back: Color = serde_json::from_str("\"#0000FF\"").unwrap();
        assert_eq!(back, Color::BLUE);
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn stroke_segment_count() {
        let mut stroke = Stroke::new([0.0, 0.0], Color::BLACK, 2.0, LineCap::Round);
        assert_eq!(stroke.segment_count(), 0);
        stroke.points.push([1.0, 1.0]);
        stroke.points.push([2.0, 1.0]);
        assert_eq!(stroke.segment_count(), 2);
        assert_eq!(stroke.last_point(), Some([2.0, 1.0]));
    }
}
