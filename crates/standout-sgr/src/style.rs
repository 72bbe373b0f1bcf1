//! Styles: single SGR codes and ordered lists of style elements.
//!
//! A style comes in two shapes:
//!
//! - **Single**: one stored code, optionally carrying the RGB value it was
//!   built from (`red`, `on_bright_blue`, `rgb_ff8000`). Only single styles
//!   can be varied with [`Style::variant`].
//! - **List**: an ordered sequence of [`StyleElement`]s whose code is the
//!   concatenation of the members' codes, recomputed on every call so that
//!   scheme references always reflect the current color scheme.
//!
//! Styles are immutable. Variants, compositions and appends return new
//! values; the [`StyleRegistry`](crate::StyleRegistry) shares them as
//! `Arc<Style>`.
//!
//! # Example
//!
//! ```rust
//! use standout_sgr::{NoScheme, Style, StyleElement};
//!
//! let style = Style::parse_list(["bold", "on_red", "rgb_00ff00"]).unwrap();
//! assert_eq!(
//!     style.render("go", &NoScheme).unwrap(),
//!     "\x1b[1m\x1b[41m\x1b[38;5;46mgo\x1b[0m"
//! );
//! assert_eq!(style.foreground().unwrap().to_string(), "rgb_00ff00");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::color::ColorValue;
use crate::colorspace::{Hsv, Rgb};
use crate::element::{StyleElement, MAX_SCHEME_DEPTH};
use crate::error::{Result, StyleError};
use crate::scheme::SchemeResolver;
use crate::text::CLEAR_CODE;

/// The first decimal field of a code, with everything around it.
static NUMERIC_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(.*?)([0-9]+)(.*)$").expect("numeric field pattern is valid"));

/// A 256-color code, capturing everything but the palette index.
static PALETTE_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\x1b\[(?:38|48);5;)[0-9]+(m)$").expect("palette code pattern is valid")
});

/// What a style is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleBody {
    /// A directly coded style.
    Single { code: String, rgb: Option<Rgb> },
    /// An ordered list of elements.
    List(Vec<StyleElement>),
}

/// A named or anonymous terminal style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    name: Option<String>,
    body: StyleBody,
    builtin: bool,
}

/// Options for [`Style::variant`].
///
/// Code options and color options combine: the code is chosen first (`code`,
/// then `code_increment`), then the RGB value (`rgb` or `hsv`, then
/// `rgb_increment` or `hsv_increment`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantOptions {
    /// Replace the code outright.
    pub code: Option<String>,
    /// Add this delta to the first numeric field of the code.
    pub code_increment: Option<i32>,
    /// Replace the RGB value.
    pub rgb: Option<Rgb>,
    /// Replace the RGB value with one given in HSV.
    pub hsv: Option<Hsv>,
    /// Add per-channel deltas to the RGB value, clamping to `0..=255`.
    pub rgb_increment: Option<[i32; 3]>,
    /// Add deltas in HSV space (hue wraps, saturation and value clamp).
    pub hsv_increment: Option<[f64; 3]>,
}

impl VariantOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn code_increment(mut self, delta: i32) -> Self {
        self.code_increment = Some(delta);
        self
    }

    pub fn rgb(mut self, rgb: Rgb) -> Self {
        self.rgb = Some(rgb);
        self
    }

    pub fn hsv(mut self, hsv: Hsv) -> Self {
        self.hsv = Some(hsv);
        self
    }

    pub fn rgb_increment(mut self, delta: [i32; 3]) -> Self {
        self.rgb_increment = Some(delta);
        self
    }

    pub fn hsv_increment(mut self, delta: [f64; 3]) -> Self {
        self.hsv_increment = Some(delta);
        self
    }
}

impl Style {
    /// An unnamed style with a single raw code.
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            name: None,
            body: StyleBody::Single {
                code: code.into(),
                rgb: None,
            },
            builtin: false,
        }
    }

    /// A single style selecting `color`, named after its token
    /// (`red`, `on_bright_red`, `rgb_ff0000`, ...).
    pub fn from_color(color: ColorValue, background: bool) -> Self {
        let name = if background {
            format!("on_{}", color)
        } else {
            color.to_string()
        };
        Self {
            name: Some(name),
            body: StyleBody::Single {
                code: color.to_ansi_code(background),
                rgb: Some(color.to_rgb()),
            },
            builtin: false,
        }
    }

    /// A list style over `elements`.
    pub fn list(elements: Vec<StyleElement>) -> Self {
        Self {
            name: None,
            body: StyleBody::List(elements),
            builtin: false,
        }
    }

    /// Parses each token into an element and builds a list style.
    pub fn parse_list<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let elements = tokens
            .into_iter()
            .map(|t| StyleElement::parse(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::list(elements))
    }

    /// The empty style; renders as no code at all.
    pub fn empty() -> Self {
        Self::list(Vec::new())
    }

    /// Sets the name, returning `self` for chaining.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the RGB value of a single style. List styles are returned as is.
    pub fn with_rgb(mut self, value: Rgb) -> Self {
        if let StyleBody::Single { rgb, .. } = &mut self.body {
            *rgb = Some(value);
        }
        self
    }

    /// Marks the style as one of the registry's builtins.
    pub fn into_builtin(mut self) -> Self {
        self.builtin = true;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn body(&self) -> &StyleBody {
        &self.body
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    pub fn is_list(&self) -> bool {
        matches!(self.body, StyleBody::List(_))
    }

    /// The stored code of a single style.
    pub fn single_code(&self) -> Option<&str> {
        match &self.body {
            StyleBody::Single { code, .. } => Some(code),
            StyleBody::List(_) => None,
        }
    }

    /// The name if there is one, otherwise something printable for errors.
    pub fn label(&self) -> String {
        match (&self.name, &self.body) {
            (Some(name), _) => name.clone(),
            (None, StyleBody::Single { code, .. }) => format!("{:?}", code),
            (None, StyleBody::List(_)) => self.tokens().join(","),
        }
    }

    // ─── Rendering ──────────────────────────────────────────────────────────

    /// The SGR code for this style.
    ///
    /// List styles concatenate their members' codes in order; scheme
    /// references are resolved through `resolver` on every call.
    pub fn code(&self, resolver: &dyn SchemeResolver) -> Result<String> {
        self.code_at_depth(resolver, 0)
    }

    pub(crate) fn code_at_depth(&self, resolver: &dyn SchemeResolver, depth: usize) -> Result<String> {
        match &self.body {
            StyleBody::Single { code, .. } => Ok(code.clone()),
            StyleBody::List(elements) => {
                if depth > MAX_SCHEME_DEPTH {
                    return Err(StyleError::SchemeDepthExceeded(self.label()));
                }
                elements
                    .iter()
                    .map(|e| e.code_at_depth(resolver, depth))
                    .collect()
            }
        }
    }

    /// Wraps `text` as `code + text + CLEAR_CODE`.
    pub fn render(&self, text: &str, resolver: &dyn SchemeResolver) -> Result<String> {
        Ok(format!("{}{}{}", self.code(resolver)?, text, CLEAR_CODE))
    }

    // ─── Colors ─────────────────────────────────────────────────────────────

    /// The RGB value of a single style, when it has one.
    pub fn rgb(&self) -> Option<Rgb> {
        match &self.body {
            StyleBody::Single { rgb, .. } => *rgb,
            StyleBody::List(_) => None,
        }
    }

    /// The RGB value in HSV coordinates.
    pub fn hsv(&self) -> Option<Hsv> {
        self.rgb().map(|rgb| rgb.to_hsv())
    }

    pub fn red(&self) -> Option<u8> {
        self.rgb().map(|rgb| rgb.0)
    }

    pub fn green(&self) -> Option<u8> {
        self.rgb().map(|rgb| rgb.1)
    }

    pub fn blue(&self) -> Option<u8> {
        self.rgb().map(|rgb| rgb.2)
    }

    /// The effective foreground color: the last foreground element wins.
    ///
    /// Scheme references are not followed, so a named code-only style such as
    /// `alarm` (`ESC[5;31m`) has no foreground here.
    pub fn foreground(&self) -> Option<ColorValue> {
        self.elements()
            .ok()?
            .iter()
            .rev()
            .find_map(|e| e.foreground().copied())
    }

    /// The effective background color: the last background element wins.
    pub fn background(&self) -> Option<ColorValue> {
        self.elements()
            .ok()?
            .iter()
            .rev()
            .find_map(|e| e.background().copied())
    }

    // ─── Elements and composition ───────────────────────────────────────────

    /// The elements of this style.
    ///
    /// A single style whose code is the 256-color code of its RGB value
    /// contributes that RGB color. Other named single styles contribute their
    /// name parsed as one element; a name that is not a color or attribute
    /// token becomes a scheme reference to itself. Anonymous code-only styles
    /// have no element form and fail with [`StyleError::InvalidStyleElement`].
    pub fn elements(&self) -> Result<Vec<StyleElement>> {
        if let Some(element) = self.rgb_element() {
            return Ok(vec![element]);
        }
        match (&self.body, &self.name) {
            (StyleBody::List(elements), _) => Ok(elements.clone()),
            (StyleBody::Single { .. }, Some(name)) => Ok(vec![StyleElement::parse(name)?]),
            (StyleBody::Single { .. }, None) => Err(StyleError::InvalidStyleElement(self.label())),
        }
    }

    /// The RGB foreground or background element producing exactly this
    /// style's code.
    fn rgb_element(&self) -> Option<StyleElement> {
        let (code, color) = match &self.body {
            StyleBody::Single {
                code,
                rgb: Some(rgb),
            } => (code, ColorValue::Rgb(*rgb)),
            _ => return None,
        };
        if color.to_ansi_code(false) == *code {
            Some(StyleElement::Foreground(color))
        } else if color.to_ansi_code(true) == *code {
            Some(StyleElement::Background(color))
        } else {
            None
        }
    }

    /// Number of elements; single styles count as one.
    pub fn len(&self) -> usize {
        match &self.body {
            StyleBody::List(elements) => elements.len(),
            StyleBody::Single { .. } => 1,
        }
    }

    /// `true` only for the empty list style.
    pub fn is_empty(&self) -> bool {
        matches!(&self.body, StyleBody::List(elements) if elements.is_empty())
    }

    /// The element at `index` of a list style.
    pub fn get(&self, index: usize) -> Option<&StyleElement> {
        match &self.body {
            StyleBody::List(elements) => elements.get(index),
            StyleBody::Single { .. } => None,
        }
    }

    /// Element tokens: `["bold", "on_red"]` for lists, the name for single
    /// styles, nothing for anonymous code-only styles.
    pub fn tokens(&self) -> Vec<String> {
        match &self.body {
            StyleBody::List(elements) => elements.iter().map(|e| e.to_string()).collect(),
            StyleBody::Single { .. } => self.name.iter().cloned().collect(),
        }
    }

    /// A new list style with `other`'s elements after this style's.
    ///
    /// Named code-only styles (see [`elements`](Self::elements)) enter the
    /// list as scheme references, so the result renders only through a
    /// resolver that knows their names, such as the registry.
    pub fn compose(&self, other: &Style) -> Result<Style> {
        let mut elements = self.elements()?;
        elements.extend(other.elements()?);
        Ok(Style::list(elements))
    }

    /// A new list style with `element` appended.
    pub fn append(&self, element: StyleElement) -> Result<Style> {
        let mut elements = self.elements()?;
        elements.push(element);
        Ok(Style::list(elements))
    }

    // ─── Variants ───────────────────────────────────────────────────────────

    /// Derives a related single style named `new_name`.
    ///
    /// The result is not registered; use
    /// [`StyleRegistry::variant`](crate::StyleRegistry::variant) for that.
    ///
    /// When the RGB value changes, no explicit code is given, and the code is
    /// a 256-color code, the palette index is recomputed from the new RGB.
    ///
    /// # Errors
    ///
    /// - [`StyleError::NotSingleStyle`] for list styles
    /// - [`StyleError::MalformedCode`] when incrementing a code without a
    ///   numeric field
    /// - [`StyleError::NoRgb`] for RGB/HSV increments on a style without RGB
    ///
    /// # Example
    ///
    /// ```rust
    /// use standout_sgr::{NoScheme, Style, VariantOptions};
    /// use standout_sgr::colorspace::Rgb;
    ///
    /// let red = Style::from_code("\x1b[31m").with_name("red").with_rgb(Rgb(128, 0, 0));
    /// let on_red = red.variant("on_red", &VariantOptions::new().code_increment(10)).unwrap();
    /// assert_eq!(on_red.code(&NoScheme).unwrap(), "\x1b[41m");
    /// ```
    pub fn variant(&self, new_name: impl Into<String>, options: &VariantOptions) -> Result<Style> {
        self.derive(Some(new_name.into()), options)
    }

    pub(crate) fn derive(&self, name: Option<String>, options: &VariantOptions) -> Result<Style> {
        let (code, rgb) = match &self.body {
            StyleBody::Single { code, rgb } => (code, *rgb),
            StyleBody::List(_) => return Err(StyleError::NotSingleStyle(self.label())),
        };

        let mut new_code = options.code.clone().unwrap_or_else(|| code.clone());
        if let Some(delta) = options.code_increment {
            new_code = increment_code(&new_code, delta)?;
        }

        let mut new_rgb = options
            .rgb
            .or_else(|| options.hsv.map(|hsv| hsv.to_rgb()))
            .or(rgb);
        if let Some(delta) = options.rgb_increment {
            let base = new_rgb.ok_or_else(|| StyleError::NoRgb(self.label()))?;
            new_rgb = Some(base.offset(delta));
        } else if let Some(delta) = options.hsv_increment {
            let base = new_rgb.ok_or_else(|| StyleError::NoRgb(self.label()))?;
            new_rgb = Some(base.to_hsv().offset(delta).to_rgb());
        }

        if options.code.is_none() && new_rgb != rgb {
            if let Some(value) = new_rgb {
                new_code = repaint_palette_code(&new_code, value);
            }
        }

        Ok(Style {
            name,
            body: StyleBody::Single {
                code: new_code,
                rgb: new_rgb,
            },
            builtin: false,
        })
    }

    /// `true` if the code addresses the 256-color palette (`38;5;n`/`48;5;n`).
    pub fn is_palette_code(&self) -> bool {
        self.single_code()
            .is_some_and(|code| PALETTE_CODE.is_match(code))
    }
}

/// Adds `delta` to the first decimal field of `code`.
fn increment_code(code: &str, delta: i32) -> Result<String> {
    let caps = NUMERIC_FIELD
        .captures(code)
        .ok_or_else(|| StyleError::MalformedCode(code.to_string()))?;
    let value: i64 = caps[2]
        .parse()
        .map_err(|_| StyleError::MalformedCode(code.to_string()))?;
    let adjusted = value + i64::from(delta);
    if adjusted < 0 {
        return Err(StyleError::MalformedCode(code.to_string()));
    }
    Ok(format!("{}{}{}", &caps[1], adjusted, &caps[3]))
}

/// Points a 256-color code at the palette index of `rgb`; other codes are
/// returned unchanged.
fn repaint_palette_code(code: &str, rgb: Rgb) -> String {
    match PALETTE_CODE.captures(code) {
        Some(caps) => format!("{}{}{}", &caps[1], rgb.palette_index(), &caps[2]),
        None => code.to_string(),
    }
}
