//! Color types for tag markup.
//!
//! Supports the 16 legacy named colors plus hex formats.

use phf::phf_map;
use thiserror::Error;

/// Errors that can occur when parsing a color.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorParseError {
    /// Unknown color name.
    #[error("unknown color name: {0}")]
    UnknownName(String),

    /// Invalid hex color format.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// The named color table, mapping each name to its RGB value.
static NAMED_COLORS: phf::Map<&'static str, (u8, u8, u8)> = phf_map! {
    "black" => (0x00, 0x00, 0x00),
    "dark_blue" => (0x00, 0x00, 0xaa),
    "dark_green" => (0x00, 0xaa, 0x00),
    "dark_aqua" => (0x00, 0xaa, 0xaa),
    "dark_red" => (0xaa, 0x00, 0x00),
    "dark_purple" => (0xaa, 0x00, 0xaa),
    "gold" => (0xff, 0xaa, 0x00),
    "gray" => (0xaa, 0xaa, 0xaa),
    "dark_gray" => (0x55, 0x55, 0x55),
    "blue" => (0x55, 0x55, 0xff),
    "green" => (0x55, 0xff, 0x55),
    "aqua" => (0x55, 0xff, 0xff),
    "red" => (0xff, 0x55, 0x55),
    "light_purple" => (0xff, 0x55, 0xff),
    "yellow" => (0xff, 0xff, 0x55),
    "white" => (0xff, 0xff, 0xff),
};

// Spelling variants accepted on input, normalized to the table key.
static NAME_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "grey" => "gray",
    "dark_grey" => "dark_gray",
};

/// A color specification in tag markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Color {
    /// Named color (e.g., "red", "gold", "dark_aqua").
    Named(&'static str),
    /// RGB color components.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color from a string.
    ///
    /// Supports:
    /// - Named colors: `red`, `gold`, `dark_aqua`, etc.
    /// - Hex colors: `#RGB`, `#RRGGBB`
    ///
    /// # Examples
    ///
    /// ```
    /// use filigree::Color;
    ///
    /// let red = Color::parse("red").unwrap();
    /// let hex = Color::parse("#ff5733").unwrap();
    /// ```
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ColorParseError::UnknownName(input.to_string()));
        }

        if let Some(hex) = input.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        Self::parse_named(input)
    }

    /// Parse a hex color (without the # prefix).
    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        match hex.len() {
            // #RGB
            3 => {
                let mut chars = hex.chars();
                let r = Self::parse_hex_digit(chars.next().unwrap())?;
                let g = Self::parse_hex_digit(chars.next().unwrap())?;
                let b = Self::parse_hex_digit(chars.next().unwrap())?;
                Ok(Color::Rgb(r * 17, g * 17, b * 17))
            }
            // #RRGGBB
            6 => {
                let digits: Vec<u8> = hex
                    .chars()
                    .map(Self::parse_hex_digit)
                    .collect::<Result<_, _>>()?;
                Ok(Color::Rgb(
                    digits[0] * 16 + digits[1],
                    digits[2] * 16 + digits[3],
                    digits[4] * 16 + digits[5],
                ))
            }
            _ => Err(ColorParseError::InvalidHex(format!("#{hex}"))),
        }
    }

    fn parse_hex_digit(c: char) -> Result<u8, ColorParseError> {
        match c {
            '0'..='9' => Ok(c as u8 - b'0'),
            'a'..='f' => Ok(c as u8 - b'a' + 10),
            'A'..='F' => Ok(c as u8 - b'A' + 10),
            _ => Err(ColorParseError::InvalidHex(format!(
                "invalid hex digit: {c}"
            ))),
        }
    }

    /// Parse a named color.
    fn parse_named(name: &str) -> Result<Self, ColorParseError> {
        let lower = name.to_lowercase();
        let key = NAME_ALIASES.get(lower.as_str()).copied().unwrap_or(&lower);

        match NAMED_COLORS.get_key(key).copied() {
            Some(canonical) => Ok(Color::Named(canonical)),
            None => Err(ColorParseError::UnknownName(name.to_string())),
        }
    }

    /// Check if a name is a known color.
    pub fn is_known_name(name: &str) -> bool {
        let lower = name.to_lowercase();
        let key = NAME_ALIASES.get(lower.as_str()).copied().unwrap_or(&lower);
        NAMED_COLORS.contains_key(key)
    }

    /// The RGB components of this color.
    ///
    /// Names not present in the table resolve to white.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Named(name) => NAMED_COLORS
                .get(name)
                .copied()
                .unwrap_or((0xff, 0xff, 0xff)),
            Color::Rgb(r, g, b) => (*r, *g, *b),
        }
    }

    /// The canonical name, if this is a named color.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Color::Named(name) => Some(name),
            Color::Rgb(..) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_color() {
        assert_eq!(Color::parse("red").unwrap(), Color::Named("red"));
        assert_eq!(Color::parse("dark_aqua").unwrap(), Color::Named("dark_aqua"));
    }

    #[test]
    fn parse_named_case_insensitive() {
        assert_eq!(Color::parse("RED").unwrap(), Color::Named("red"));
        assert_eq!(Color::parse("Gold").unwrap(), Color::Named("gold"));
    }

    #[test]
    fn parse_alias() {
        assert_eq!(Color::parse("grey").unwrap(), Color::Named("gray"));
        assert_eq!(Color::parse("dark_grey").unwrap(), Color::Named("dark_gray"));
    }

    #[test]
    fn parse_hex_long() {
        assert_eq!(Color::parse("#ff5733").unwrap(), Color::Rgb(0xff, 0x57, 0x33));
    }

    #[test]
    fn parse_hex_short() {
        assert_eq!(Color::parse("#f00").unwrap(), Color::Rgb(0xff, 0, 0));
    }

    #[test]
    fn parse_unknown_name() {
        assert!(matches!(
            Color::parse("vermillion"),
            Err(ColorParseError::UnknownName(_))
        ));
    }

    #[test]
    fn parse_bad_hex() {
        assert!(matches!(
            Color::parse("#12345"),
            Err(ColorParseError::InvalidHex(_))
        ));
        assert!(matches!(
            Color::parse("#gghhii"),
            Err(ColorParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn rgb_of_named() {
        assert_eq!(Color::Named("gold").rgb(), (0xff, 0xaa, 0x00));
        assert_eq!(Color::Rgb(1, 2, 3).rgb(), (1, 2, 3));
    }

    #[test]
    fn name_accessor() {
        assert_eq!(Color::parse("red").unwrap().name(), Some("red"));
        assert_eq!(Color::Rgb(0, 0, 0).name(), None);
    }
}
