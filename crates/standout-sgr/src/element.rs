//! Style elements: the atomic directives a style is built from.
//!
//! An element is one of:
//!
//! | Token              | Element                              |
//! |--------------------|--------------------------------------|
//! | `bold`, `blink`, … | [`StyleElement::Attribute`]          |
//! | `red`, `bright_red`, `rgb_ff0000`, `ff0000` | [`StyleElement::Foreground`] |
//! | `on_red`, `on_bright_red`, `on_rgb_ff0000`  | [`StyleElement::Background`] |
//! | any other identifier | [`StyleElement::SchemeRef`]        |
//!
//! Scheme references are resolved when the code is generated, not when the
//! element is parsed, so a color scheme can be installed or swapped later.

use std::fmt;
use std::str::FromStr;

use crate::color::ColorValue;
use crate::error::{Result, StyleError};
use crate::scheme::SchemeResolver;
use crate::text::{CLEAR_CODE, CSI};

/// How many scheme references may be followed before giving up.
pub const MAX_SCHEME_DEPTH: usize = 16;

/// A display attribute with a fixed SGR parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Reset everything (`reset` is an alias).
    Clear,
    /// Bold, or the terminal's "bold color" when no color is set.
    Bold,
    Dark,
    /// Underline (`underscore` is an alias).
    Underline,
    Blink,
    Reverse,
    Concealed,
}

impl Attribute {
    pub const ALL: [Attribute; 7] = [
        Attribute::Clear,
        Attribute::Bold,
        Attribute::Dark,
        Attribute::Underline,
        Attribute::Blink,
        Attribute::Reverse,
        Attribute::Concealed,
    ];

    /// Every accepted name, aliases included, paired with its attribute.
    pub const NAMES: [(&'static str, Attribute); 9] = [
        ("clear", Attribute::Clear),
        ("reset", Attribute::Clear),
        ("bold", Attribute::Bold),
        ("dark", Attribute::Dark),
        ("underline", Attribute::Underline),
        ("underscore", Attribute::Underline),
        ("blink", Attribute::Blink),
        ("reverse", Attribute::Reverse),
        ("concealed", Attribute::Concealed),
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, attr)| *attr)
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Clear => "clear",
            Attribute::Bold => "bold",
            Attribute::Dark => "dark",
            Attribute::Underline => "underline",
            Attribute::Blink => "blink",
            Attribute::Reverse => "reverse",
            Attribute::Concealed => "concealed",
        }
    }

    /// SGR parameter number.
    pub fn param(&self) -> u8 {
        match self {
            Attribute::Clear => 0,
            Attribute::Bold => 1,
            Attribute::Dark => 2,
            Attribute::Underline => 4,
            Attribute::Blink => 5,
            Attribute::Reverse => 7,
            Attribute::Concealed => 8,
        }
    }

    pub fn code(&self) -> String {
        format!("{}{}m", CSI, self.param())
    }
}

/// One atomic style directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleElement {
    Attribute(Attribute),
    Foreground(ColorValue),
    Background(ColorValue),
    /// A key into the color scheme, resolved at render time.
    SchemeRef(String),
}

impl StyleElement {
    /// Parses a style token.
    ///
    /// Tokens are trimmed and matched case-insensitively. Malformed RGB hex
    /// fails with [`StyleError::InvalidColor`], `on_`/`bright_` followed by an
    /// unknown color with [`StyleError::UnknownColor`], and anything that is
    /// not an identifier with [`StyleError::InvalidStyleElement`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use standout_sgr::{BasicColor, ColorValue, StyleElement};
    ///
    /// let bg = StyleElement::parse("on_blue").unwrap();
    /// assert_eq!(bg, StyleElement::Background(ColorValue::basic(BasicColor::Blue)));
    ///
    /// let key = StyleElement::parse("warning").unwrap();
    /// assert_eq!(key.scheme(), Some("warning"));
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let token = input.trim().to_ascii_lowercase();

        if is_hex6(&token) {
            return ColorValue::from_hex(&token).map(StyleElement::Foreground);
        }
        if let Some(hex) = token.strip_prefix("on_rgb_") {
            return ColorValue::from_hex(hex).map(StyleElement::Background);
        }
        if let Some(hex) = token.strip_prefix("rgb_") {
            return ColorValue::from_hex(hex).map(StyleElement::Foreground);
        }
        if let Some(color) = token.strip_prefix("on_") {
            return ColorValue::from_name(color)
                .map(StyleElement::Background)
                .map_err(|_| StyleError::UnknownColor(input.trim().to_string()));
        }
        if let Some(attr) = Attribute::from_name(&token) {
            return Ok(StyleElement::Attribute(attr));
        }
        if token.starts_with("bright_") {
            return ColorValue::from_name(&token)
                .map(StyleElement::Foreground)
                .map_err(|_| StyleError::UnknownColor(input.trim().to_string()));
        }
        if let Ok(color) = ColorValue::from_name(&token) {
            return Ok(StyleElement::Foreground(color));
        }
        if is_identifier(&token) {
            return Ok(StyleElement::SchemeRef(token));
        }
        Err(StyleError::InvalidStyleElement(input.to_string()))
    }

    /// Foreground RGB element.
    pub fn rgb<T: Into<f64>>(r: T, g: T, b: T) -> Result<Self> {
        ColorValue::from_rgb(r, g, b).map(StyleElement::Foreground)
    }

    /// Background RGB element.
    pub fn on_rgb<T: Into<f64>>(r: T, g: T, b: T) -> Result<Self> {
        ColorValue::from_rgb(r, g, b).map(StyleElement::Background)
    }

    /// Reference to a color scheme entry. Keys are stored lowercase.
    pub fn scheme_ref(name: impl Into<String>) -> Self {
        StyleElement::SchemeRef(name.into().to_ascii_lowercase())
    }

    /// The SGR sequence for this element.
    ///
    /// Scheme references are looked up in `resolver` and expanded into that
    /// style's code; an unresolved key fails with [`StyleError::UnknownScheme`].
    pub fn code(&self, resolver: &dyn SchemeResolver) -> Result<String> {
        self.code_at_depth(resolver, 0)
    }

    pub(crate) fn code_at_depth(&self, resolver: &dyn SchemeResolver, depth: usize) -> Result<String> {
        match self {
            StyleElement::Attribute(attr) => Ok(attr.code()),
            StyleElement::Foreground(color) => Ok(color.to_ansi_code(false)),
            StyleElement::Background(color) => Ok(color.to_ansi_code(true)),
            StyleElement::SchemeRef(name) => {
                if depth >= MAX_SCHEME_DEPTH {
                    return Err(StyleError::SchemeDepthExceeded(name.clone()));
                }
                let style = resolver
                    .resolve_scheme(name)
                    .ok_or_else(|| StyleError::UnknownScheme(name.clone()))?;
                style.code_at_depth(resolver, depth + 1)
            }
        }
    }

    /// Wraps `text` in this element's code and the clear code.
    pub fn encode(&self, text: &str, resolver: &dyn SchemeResolver) -> Result<String> {
        Ok(format!("{}{}{}", self.code(resolver)?, text, CLEAR_CODE))
    }

    /// Colors and attributes are valid by construction; a scheme reference
    /// needs a non-empty identifier key.
    pub fn is_valid(&self) -> bool {
        match self {
            StyleElement::Attribute(_)
            | StyleElement::Foreground(_)
            | StyleElement::Background(_) => true,
            StyleElement::SchemeRef(name) => is_identifier(name),
        }
    }

    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            StyleElement::Attribute(attr) => Some(*attr),
            _ => None,
        }
    }

    pub fn foreground(&self) -> Option<&ColorValue> {
        match self {
            StyleElement::Foreground(color) => Some(color),
            _ => None,
        }
    }

    pub fn background(&self) -> Option<&ColorValue> {
        match self {
            StyleElement::Background(color) => Some(color),
            _ => None,
        }
    }

    /// The wrapped color of a foreground or background element.
    pub fn color(&self) -> Option<&ColorValue> {
        self.foreground().or_else(|| self.background())
    }

    pub fn scheme(&self) -> Option<&str> {
        match self {
            StyleElement::SchemeRef(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_color(&self) -> bool {
        self.color().is_some()
    }
}

impl FromStr for StyleElement {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Attribute> for StyleElement {
    fn from(attr: Attribute) -> Self {
        StyleElement::Attribute(attr)
    }
}

impl fmt::Display for StyleElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleElement::Attribute(attr) => f.write_str(attr.name()),
            StyleElement::Foreground(color) => write!(f, "{}", color),
            StyleElement::Background(color) => write!(f, "on_{}", color),
            StyleElement::SchemeRef(name) => f.write_str(name),
        }
    }
}

fn is_hex6(token: &str) -> bool {
    token.len() == 6 && token.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
