//! Style types for parsed markup.
//!
//! A Style combines a text color and decoration flags into a single
//! specification that tags attach to the content they enclose.

use crate::color::Color;

/// Text decoration attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decorations {
    /// Bold/increased intensity.
    pub bold: bool,
    /// Italic text.
    pub italic: bool,
    /// Underlined text.
    pub underlined: bool,
    /// Strikethrough text.
    pub strikethrough: bool,
    /// Obfuscated (scrambled) text.
    pub obfuscated: bool,
}

impl Decorations {
    /// Returns true if no decorations are set.
    pub fn is_empty(&self) -> bool {
        !self.bold && !self.italic && !self.underlined && !self.strikethrough && !self.obfuscated
    }

    /// Merge another decoration set on top of this one (OR'd together).
    pub fn apply(&self, other: &Decorations) -> Decorations {
        Decorations {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underlined: self.underlined || other.underlined,
            strikethrough: self.strikethrough || other.strikethrough,
            obfuscated: self.obfuscated || other.obfuscated,
        }
    }
}

/// Complete style specification including color and decorations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    /// Text color.
    pub color: Option<Color>,
    /// Decoration flags.
    pub decorations: Decorations,
}

impl Style {
    /// Create a new empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// A style with just a color set.
    pub fn colored(color: Color) -> Self {
        Self {
            color: Some(color),
            decorations: Decorations::default(),
        }
    }

    /// Returns true if no style properties are set.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.decorations.is_empty()
    }

    /// Apply another style on top of this one.
    ///
    /// A color in `other` overrides the color in `self`; decoration
    /// flags are OR'd together.
    pub fn apply(&self, other: &Style) -> Style {
        Style {
            color: other.color.clone().or_else(|| self.color.clone()),
            decorations: self.decorations.apply(&other.decorations),
        }
    }
}
