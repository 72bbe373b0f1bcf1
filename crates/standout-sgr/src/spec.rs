//! Style specifications: every shape a caller can ask the registry for.
//!
//! [`StyleSpec`] is parsed once, at the boundary, and each variant has its
//! own resolution rule in [`StyleRegistry::resolve`](crate::StyleRegistry::resolve).
//!
//! | Variant        | Resolution |
//! |----------------|------------|
//! | `Style`        | the registered instance with that name, else registered as given |
//! | `Code`         | first style producing that code, else a new anonymous style |
//! | `Name`         | registered name, then color scheme key, then `rgb_`/`on_rgb_` token |
//! | `Definition`   | explicit name/code/rgb/list mapping |
//! | `Element`      | the style for one element |
//! | `List`         | compound style over the members' elements |
//!
//! Strings convert with [`From`]: anything starting with `ESC [` becomes a
//! `Code`, everything else a `Name`.
//!
//! # Configuration
//!
//! [`StyleDefinition`] is the serializable form of a style, so styles can be
//! declared in configuration files:
//!
//! ```rust
//! use standout_sgr::StyleDefinition;
//!
//! let defs = StyleDefinition::list_from_yaml(r#"
//! - name: accent
//!   rgb: "ff8000"
//! - name: title
//!   list: [bold, underline]
//! - name: alarm
//!   code: "\e[5;31m"
//! "#).unwrap();
//! assert_eq!(defs.len(), 3);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::colorspace::Rgb;
use crate::element::StyleElement;
use crate::error::{Result, StyleError};
use crate::style::{Style, StyleBody};
use crate::text::CSI;

/// A request for a style.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleSpec {
    /// An existing style instance.
    Style(Arc<Style>),
    /// A raw SGR code such as `"\x1b[31m"`.
    Code(String),
    /// A registered name, scheme key, or `rgb_`/`on_rgb_` token.
    Name(String),
    /// An explicit definition.
    Definition(StyleDefinition),
    /// A single parsed element.
    Element(StyleElement),
    /// Several specs combined; nested lists are flattened.
    List(Vec<StyleSpec>),
}

impl StyleSpec {
    /// A list spec from anything convertible into specs.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StyleSpec>,
    {
        StyleSpec::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for StyleSpec {
    fn from(s: &str) -> Self {
        if s.starts_with(CSI) {
            StyleSpec::Code(s.to_string())
        } else {
            StyleSpec::Name(s.to_string())
        }
    }
}

impl From<String> for StyleSpec {
    fn from(s: String) -> Self {
        if s.starts_with(CSI) {
            StyleSpec::Code(s)
        } else {
            StyleSpec::Name(s)
        }
    }
}

impl From<Arc<Style>> for StyleSpec {
    fn from(style: Arc<Style>) -> Self {
        StyleSpec::Style(style)
    }
}

impl From<&Arc<Style>> for StyleSpec {
    fn from(style: &Arc<Style>) -> Self {
        StyleSpec::Style(Arc::clone(style))
    }
}

impl From<Style> for StyleSpec {
    fn from(style: Style) -> Self {
        StyleSpec::Style(Arc::new(style))
    }
}

impl From<StyleElement> for StyleSpec {
    fn from(element: StyleElement) -> Self {
        StyleSpec::Element(element)
    }
}

impl From<StyleDefinition> for StyleSpec {
    fn from(def: StyleDefinition) -> Self {
        StyleSpec::Definition(def)
    }
}

impl<S: Into<StyleSpec>> From<Vec<S>> for StyleSpec {
    fn from(items: Vec<S>) -> Self {
        StyleSpec::list(items)
    }
}

/// An RGB value in configuration: `"ff8000"` (optionally `#`-prefixed) or
/// `[255, 128, 0]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RgbDefinition {
    Hex(String),
    Channels([u8; 3]),
}

impl RgbDefinition {
    pub fn to_rgb(&self) -> Result<Rgb> {
        match self {
            RgbDefinition::Hex(hex) => Rgb::from_hex(hex.trim().trim_start_matches('#')),
            RgbDefinition::Channels([r, g, b]) => Ok(Rgb(*r, *g, *b)),
        }
    }
}

impl From<Rgb> for RgbDefinition {
    fn from(rgb: Rgb) -> Self {
        RgbDefinition::Channels(rgb.channels())
    }
}

/// A style declared as data.
///
/// Exactly one of `list`, `rgb` or `code` selects the kind of style (checked
/// in that order). With `rgb`, `code` overrides the computed 256-color code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleDefinition {
    pub name: Option<String>,
    pub code: Option<String>,
    pub rgb: Option<RgbDefinition>,
    pub list: Option<Vec<String>>,
    pub builtin: bool,
}

impl StyleDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn rgb(mut self, rgb: Rgb) -> Self {
        self.rgb = Some(rgb.into());
        self
    }

    pub fn list<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list = Some(tokens.into_iter().map(Into::into).collect());
        self
    }

    pub fn builtin(mut self, builtin: bool) -> Self {
        self.builtin = builtin;
        self
    }

    /// Parses one definition from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a YAML sequence of definitions.
    pub fn list_from_yaml(yaml: &str) -> Result<Vec<Self>> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Builds the (unregistered) style this definition describes.
    ///
    /// List definitions without a name are left unnamed; the registry names
    /// them canonically.
    ///
    /// # Errors
    ///
    /// [`StyleError::UndefinedStyle`] when none of `list`, `rgb`, `code` is
    /// set, plus any element or color error from the fields.
    pub fn to_style(&self) -> Result<Style> {
        let style = if let Some(tokens) = &self.list {
            Style::parse_list(tokens)?
        } else if let Some(rgb) = &self.rgb {
            let rgb = rgb.to_rgb()?;
            let mut style = Style::from_color(rgb.into(), false);
            if let Some(code) = &self.code {
                style = Style::from_code(code.clone())
                    .with_name(rgb.to_string())
                    .with_rgb(rgb);
            }
            style
        } else if let Some(code) = &self.code {
            Style::from_code(code.clone())
        } else {
            return Err(StyleError::UndefinedStyle(format!("{:?}", self)));
        };

        let style = match &self.name {
            Some(name) => style.with_name(name.clone()),
            None => style,
        };
        Ok(if self.builtin {
            style.into_builtin()
        } else {
            style
        })
    }
}

/// The definition a style was built from, suitable for writing back to
/// configuration. Building it again with [`StyleDefinition::to_style`] gives
/// an equal style.
impl From<&Style> for StyleDefinition {
    fn from(style: &Style) -> Self {
        let def = StyleDefinition {
            name: style.name().map(str::to_string),
            builtin: style.is_builtin(),
            ..Self::default()
        };
        match style.body() {
            StyleBody::Single { code, rgb } => StyleDefinition {
                code: Some(code.clone()),
                rgb: rgb.map(RgbDefinition::from),
                ..def
            },
            StyleBody::List(_) => StyleDefinition {
                list: Some(style.tokens()),
                ..def
            },
        }
    }
}

impl Style {
    /// This style as a [`StyleDefinition`].
    pub fn to_definition(&self) -> StyleDefinition {
        StyleDefinition::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::NoScheme;

    #[test]
    fn test_strings_become_codes_or_names() {
        assert_eq!(
            StyleSpec::from("\x1b[31m"),
            StyleSpec::Code("\x1b[31m".into())
        );
        assert_eq!(StyleSpec::from("red"), StyleSpec::Name("red".into()));
        assert_eq!(
            StyleSpec::from(String::from("on_red")),
            StyleSpec::Name("on_red".into())
        );
    }

    #[test]
    fn test_vec_becomes_list() {
        let spec: StyleSpec = vec!["bold", "red"].into();
        assert_eq!(
            spec,
            StyleSpec::List(vec![
                StyleSpec::Name("bold".into()),
                StyleSpec::Name("red".into())
            ])
        );
    }

    #[test]
    fn test_definition_from_yaml() {
        let def = StyleDefinition::from_yaml("name: accent\nrgb: [255, 128, 0]\n").unwrap();
        assert_eq!(def.name.as_deref(), Some("accent"));
        assert_eq!(def.rgb, Some(RgbDefinition::Channels([255, 128, 0])));

        let hex = StyleDefinition::from_yaml("rgb: \"#FF8000\"\n").unwrap();
        assert_eq!(hex.rgb.unwrap().to_rgb().unwrap(), Rgb(255, 128, 0));
    }

    #[test]
    fn test_definition_rejects_unknown_fields() {
        assert!(matches!(
            StyleDefinition::from_yaml("colour: red\n"),
            Err(StyleError::Parse(_))
        ));
    }

    #[test]
    fn test_definition_to_style_kinds() {
        let rgb = StyleDefinition::new().rgb(Rgb(255, 0, 0)).to_style().unwrap();
        assert_eq!(rgb.name(), Some("rgb_ff0000"));
        assert_eq!(rgb.single_code(), Some("\x1b[38;5;196m"));

        let named = StyleDefinition::new()
            .name("accent")
            .rgb(Rgb(255, 0, 0))
            .code("\x1b[91m")
            .to_style()
            .unwrap();
        assert_eq!(named.name(), Some("accent"));
        assert_eq!(named.single_code(), Some("\x1b[91m"));
        assert_eq!(named.rgb(), Some(Rgb(255, 0, 0)));

        let list = StyleDefinition::new()
            .list(["bold", "on_blue"])
            .to_style()
            .unwrap();
        assert_eq!(list.code(&NoScheme).unwrap(), "\x1b[1m\x1b[44m");

        let code = StyleDefinition::new()
            .name("alarm")
            .code("\x1b[5;31m")
            .builtin(true)
            .to_style()
            .unwrap();
        assert!(code.is_builtin());
        assert_eq!(code.rgb(), None);
    }

    #[test]
    fn test_empty_definition_is_undefined() {
        assert!(matches!(
            StyleDefinition::new().name("nothing").to_style(),
            Err(StyleError::UndefinedStyle(_))
        ));
    }

    #[test]
    fn test_style_to_definition_rebuilds_style() {
        let styles = [
            Style::from_code("\x1b[5;31m").with_name("alarm").into_builtin(),
            Style::from_color(Rgb(255, 128, 0).into(), true),
            Style::from_code("\x1b[91m")
                .with_name("hot")
                .with_rgb(Rgb(255, 0, 0)),
            Style::parse_list(["bold", "on_red", "accent"])
                .unwrap()
                .with_name("title"),
        ];
        for style in styles {
            let def = style.to_definition();
            assert_eq!(def.to_style().unwrap(), style, "{:?}", def);
        }
    }

    #[test]
    fn test_style_definition_writes_yaml() {
        let style = Style::from_code("\x1b[1m").with_name("strong");
        let yaml = serde_yaml::to_string(&style.to_definition()).unwrap();
        let back = StyleDefinition::from_yaml(&yaml).unwrap();
        assert_eq!(back.to_style().unwrap(), style);
    }

    #[test]
    fn test_definition_serializes() {
        let def = StyleDefinition::new().name("title").list(["bold"]);
        let json = serde_json::to_string(&def).unwrap();
        let back: StyleDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }
}
