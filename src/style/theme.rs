//! Colour palettes for highlighted text.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::highlight::TokenKind;

/// A 24-bit colour, written `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xff);
    pub const GREEN: Color = Color::rgb(0x00, 0x80, 0x00);
    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| format!("colour '{}' must start with '#'", s))?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("colour '{}' is not of the form #rrggbb", s));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Colours for the editor background, default text and each token class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub foreground: Color,
    pub background: Color,
    pub keyword: Color,
    pub string: Color,
    pub comment: Color,
    pub operator: Color,
}

impl Theme {
    /// Black text on white.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            foreground: Color::BLACK,
            background: Color::WHITE,
            keyword: Color::BLUE,
            string: Color::GREEN,
            comment: Color::GRAY,
            operator: Color::rgb(0x80, 0x00, 0x80),
        }
    }

    /// White text on black.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            foreground: Color::WHITE,
            background: Color::BLACK,
            keyword: Color::rgb(0x56, 0x9c, 0xd6),
            string: Color::rgb(0x6a, 0xc0, 0x6a),
            comment: Color::GRAY,
            operator: Color::rgb(0xd4, 0xd4, 0xd4),
        }
    }

    /// Look up a built-in theme by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    /// Colour for a token class. Plain text has none and keeps the foreground.
    pub fn color_for(&self, kind: TokenKind) -> Option<Color> {
        match kind {
            TokenKind::Keyword => Some(self.keyword),
            TokenKind::String => Some(self.string),
            TokenKind::Comment => Some(self.comment),
            TokenKind::Operator => Some(self.operator),
            TokenKind::Plain => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
