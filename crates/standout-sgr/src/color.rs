//! Color values: the eight basic terminal colors, their bright variants, and
//! arbitrary RGB triples.
//!
//! Supported names:
//!
//! - Basic colors: `black`, `red`, `green`, `yellow`, `blue`, `magenta`,
//!   `cyan`, `white` (`gray` and `grey` are aliases for `white`)
//! - `none`: the bare extended-color selector, `ESC[38m`
//! - Bright variants: `bright_red`, `bright_green`, etc.
//! - RGB: `rgb_ff6b35` (exactly six hex digits)
//!
//! # Example
//!
//! ```rust
//! use standout_sgr::ColorValue;
//!
//! let red = ColorValue::from_name("red").unwrap();
//! assert_eq!(red.to_ansi_code(false), "\x1b[31m");
//! assert_eq!(red.to_ansi_code(true), "\x1b[41m");
//! assert_eq!(red.brighten().to_ansi_code(false), "\x1b[91m");
//!
//! let orange = ColorValue::from_rgb(255, 128, 0).unwrap();
//! assert_eq!(orange.to_ansi_code(false), "\x1b[38;5;214m");
//! ```

use std::fmt;

use crate::colorspace::{Hsv, Rgb};
use crate::error::{Result, StyleError};
use crate::text::CSI;

/// Offset added to a foreground code to address the background.
pub const BACKGROUND_OFFSET: u8 = 10;

/// Offset added to a basic color code to address its bright variant.
pub const BRIGHT_OFFSET: u8 = 60;

/// One of the eight colors every ANSI terminal knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// No palette color; renders as the bare `38` selector.
    None,
}

impl BasicColor {
    /// The eight terminal colors in SGR code order. [`BasicColor::None`] is
    /// not part of the palette and is left out.
    pub const ALL: [BasicColor; 8] = [
        BasicColor::Black,
        BasicColor::Red,
        BasicColor::Green,
        BasicColor::Yellow,
        BasicColor::Blue,
        BasicColor::Magenta,
        BasicColor::Cyan,
        BasicColor::White,
    ];

    /// Looks up a basic color by (lowercase) name, accepting `gray`/`grey`.
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name {
            "black" => BasicColor::Black,
            "red" => BasicColor::Red,
            "green" => BasicColor::Green,
            "yellow" => BasicColor::Yellow,
            "blue" => BasicColor::Blue,
            "magenta" => BasicColor::Magenta,
            "cyan" => BasicColor::Cyan,
            "white" | "gray" | "grey" => BasicColor::White,
            "none" => BasicColor::None,
            _ => return None,
        };
        Some(color)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BasicColor::Black => "black",
            BasicColor::Red => "red",
            BasicColor::Green => "green",
            BasicColor::Yellow => "yellow",
            BasicColor::Blue => "blue",
            BasicColor::Magenta => "magenta",
            BasicColor::Cyan => "cyan",
            BasicColor::White => "white",
            BasicColor::None => "none",
        }
    }

    /// Foreground SGR parameter, 30–38.
    pub fn base_code(&self) -> u8 {
        30 + *self as u8
    }

    /// Fixed RGB approximation of the normal-intensity color.
    pub fn rgb(&self) -> Rgb {
        match self {
            BasicColor::Black => Rgb(0, 0, 0),
            BasicColor::Red => Rgb(128, 0, 0),
            BasicColor::Green => Rgb(0, 128, 0),
            BasicColor::Yellow => Rgb(128, 128, 0),
            BasicColor::Blue => Rgb(0, 0, 128),
            BasicColor::Magenta => Rgb(128, 0, 128),
            BasicColor::Cyan => Rgb(0, 128, 128),
            BasicColor::White => Rgb(192, 192, 192),
            BasicColor::None => Rgb(0, 0, 0),
        }
    }
}

/// A single color: predefined (basic, optionally bright) or RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorValue {
    /// One of the basic colors, at normal or bright intensity.
    Predefined { color: BasicColor, bright: bool },
    /// An arbitrary RGB color, rendered through the 256-color cube.
    Rgb(Rgb),
}

impl ColorValue {
    /// Normal-intensity basic color.
    pub fn basic(color: BasicColor) -> Self {
        ColorValue::Predefined {
            color,
            bright: false,
        }
    }

    /// Resolves a basic color name or a `bright_`-prefixed one.
    ///
    /// Matching is case-insensitive. `rgb_xxxxxx` names are accepted too so
    /// that every [`Display`](fmt::Display) form parses back.
    pub fn from_name(name: &str) -> Result<Self> {
        let lower = name.trim().to_ascii_lowercase();
        if let Some(hex) = lower.strip_prefix("rgb_") {
            return Self::from_hex(hex);
        }
        let (base, bright) = match lower.strip_prefix("bright_") {
            Some(base) => (base, true),
            None => (lower.as_str(), false),
        };
        BasicColor::from_name(base)
            .map(|color| ColorValue::Predefined { color, bright })
            .ok_or_else(|| StyleError::UnknownColor(name.to_string()))
    }

    /// Builds an RGB color from numeric channels.
    ///
    /// Each channel is rounded to an integer; values outside `0..=255` fail
    /// with [`StyleError::InvalidColor`].
    pub fn from_rgb<T: Into<f64>>(r: T, g: T, b: T) -> Result<Self> {
        Rgb::from_channels(r.into(), g.into(), b.into()).map(ColorValue::Rgb)
    }

    /// Builds an RGB color from exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Rgb::from_hex(hex).map(ColorValue::Rgb)
    }

    /// Builds an RGB color from HSV coordinates.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        ColorValue::Rgb(Hsv::new(h, s, v).to_rgb())
    }

    pub fn is_predefined(&self) -> bool {
        matches!(self, ColorValue::Predefined { .. })
    }

    pub fn is_rgb(&self) -> bool {
        matches!(self, ColorValue::Rgb(_))
    }

    pub fn is_bright(&self) -> bool {
        matches!(self, ColorValue::Predefined { bright: true, .. })
    }

    /// The basic color behind a predefined value.
    pub fn base_color(&self) -> Option<BasicColor> {
        match self {
            ColorValue::Predefined { color, .. } => Some(*color),
            ColorValue::Rgb(_) => None,
        }
    }

    /// The SGR sequence that selects this color as foreground or background.
    pub fn to_ansi_code(&self, background: bool) -> String {
        match self {
            ColorValue::Predefined { color, bright } => {
                let mut code = color.base_code();
                if *bright {
                    code += BRIGHT_OFFSET;
                }
                if background {
                    code += BACKGROUND_OFFSET;
                }
                format!("{}{}m", CSI, code)
            }
            ColorValue::Rgb(rgb) => {
                let prefix = if background { 48 } else { 38 };
                format!("{}{};5;{}m", CSI, prefix, rgb.palette_index())
            }
        }
    }

    /// RGB coordinates; predefined colors use their fixed approximation.
    pub fn to_rgb(&self) -> Rgb {
        match self {
            ColorValue::Predefined { color, bright } => {
                if *bright {
                    color.rgb().brighten()
                } else {
                    color.rgb()
                }
            }
            ColorValue::Rgb(rgb) => *rgb,
        }
    }

    pub fn to_hsv(&self) -> Hsv {
        self.to_rgb().to_hsv()
    }

    /// Brighter variant of this color.
    ///
    /// Predefined colors switch to their bright intensity. RGB colors follow
    /// [`Rgb::brighten`]: black becomes mid-gray, nonzero channels gain 128.
    pub fn brighten(&self) -> Self {
        match self {
            ColorValue::Predefined { color, .. } => ColorValue::Predefined {
                color: *color,
                bright: true,
            },
            ColorValue::Rgb(rgb) => ColorValue::Rgb(rgb.brighten()),
        }
    }
}

impl From<BasicColor> for ColorValue {
    fn from(color: BasicColor) -> Self {
        ColorValue::basic(color)
    }
}

impl From<Rgb> for ColorValue {
    fn from(rgb: Rgb) -> Self {
        ColorValue::Rgb(rgb)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::Predefined { color, bright } => {
                if *bright {
                    write!(f, "bright_{}", color.name())
                } else {
                    f.write_str(color.name())
                }
            }
            ColorValue::Rgb(rgb) => write!(f, "{}", rgb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Name parsing
    // =========================================================================

    #[test]
    fn test_from_name_basic_colors() {
        for color in BasicColor::ALL {
            assert_eq!(
                ColorValue::from_name(color.name()).unwrap(),
                ColorValue::basic(color)
            );
        }
    }

    #[test]
    fn test_from_name_case_insensitive_and_aliases() {
        assert_eq!(
            ColorValue::from_name("RED").unwrap(),
            ColorValue::basic(BasicColor::Red)
        );
        assert_eq!(
            ColorValue::from_name("gray").unwrap(),
            ColorValue::basic(BasicColor::White)
        );
        assert_eq!(
            ColorValue::from_name("grey").unwrap(),
            ColorValue::basic(BasicColor::White)
        );
    }

    #[test]
    fn test_from_name_bright() {
        let c = ColorValue::from_name("bright_blue").unwrap();
        assert!(c.is_bright());
        assert_eq!(c.base_color(), Some(BasicColor::Blue));
    }

    #[test]
    fn test_from_name_unknown() {
        assert_eq!(
            ColorValue::from_name("purple"),
            Err(StyleError::UnknownColor("purple".into()))
        );
        assert!(matches!(
            ColorValue::from_name("bright_purple"),
            Err(StyleError::UnknownColor(_))
        ));
    }

    #[test]
    fn test_from_rgb_validates_range() {
        assert_eq!(
            ColorValue::from_rgb(255, 0, 10).unwrap(),
            ColorValue::Rgb(Rgb(255, 0, 10))
        );
        assert!(matches!(
            ColorValue::from_rgb(300, 0, 0),
            Err(StyleError::InvalidColor { .. })
        ));
        assert!(ColorValue::from_rgb(-1.0, 0.0, 0.0).is_err());
    }

    // =========================================================================
    // SGR codes
    // =========================================================================

    #[test]
    fn test_basic_codes() {
        let blue = ColorValue::basic(BasicColor::Blue);
        assert_eq!(blue.to_ansi_code(false), "\x1b[34m");
        assert_eq!(blue.to_ansi_code(true), "\x1b[44m");
        assert_eq!(blue.brighten().to_ansi_code(false), "\x1b[94m");
        assert_eq!(blue.brighten().to_ansi_code(true), "\x1b[104m");
    }

    #[test]
    fn test_none_color_codes() {
        let none = ColorValue::from_name("none").unwrap();
        assert_eq!(none.base_color(), Some(BasicColor::None));
        assert_eq!(none.to_ansi_code(false), "\x1b[38m");
        assert_eq!(none.to_ansi_code(true), "\x1b[48m");
        assert_eq!(none.to_string(), "none");
        assert!(!BasicColor::ALL.contains(&BasicColor::None));
    }

    #[test]
    fn test_rgb_codes() {
        let red = ColorValue::from_hex("ff0000").unwrap();
        assert_eq!(red.to_ansi_code(false), "\x1b[38;5;196m");
        assert_eq!(red.to_ansi_code(true), "\x1b[48;5;196m");
    }

    // =========================================================================
    // RGB approximations and brightening
    // =========================================================================

    #[test]
    fn test_predefined_rgb_table() {
        assert_eq!(ColorValue::basic(BasicColor::Red).to_rgb(), Rgb(128, 0, 0));
        assert_eq!(
            ColorValue::from_name("bright_red").unwrap().to_rgb(),
            Rgb(255, 0, 0)
        );
        assert_eq!(
            ColorValue::from_name("bright_black").unwrap().to_rgb(),
            Rgb(128, 128, 128)
        );
        assert_eq!(
            ColorValue::from_name("bright_white").unwrap().to_rgb(),
            Rgb(255, 255, 255)
        );
    }

    #[test]
    fn test_brighten_rgb() {
        let dark = ColorValue::from_rgb(0, 0, 0).unwrap();
        assert_eq!(dark.brighten(), ColorValue::Rgb(Rgb(128, 128, 128)));
        let teal = ColorValue::from_rgb(0, 100, 200).unwrap();
        assert_eq!(teal.brighten(), ColorValue::Rgb(Rgb(0, 228, 255)));
    }

    #[test]
    fn test_brighten_does_not_mutate() {
        let red = ColorValue::basic(BasicColor::Red);
        let bright = red.brighten();
        assert!(!red.is_bright());
        assert!(bright.is_bright());
    }

    #[test]
    fn test_from_hsv() {
        assert_eq!(
            ColorValue::from_hsv(120.0, 100.0, 100.0),
            ColorValue::Rgb(Rgb(0, 255, 0))
        );
    }

    #[test]
    fn test_display_parses_back() {
        for text in ["red", "bright_cyan", "rgb_12abef"] {
            let color = ColorValue::from_name(text).unwrap();
            assert_eq!(color.to_string(), text);
        }
    }
}
