//! Color schemes: named styles supplied by the application.
//!
//! A scheme maps semantic keys (`critical`, `warning`, `prompt`) to styles.
//! Style elements refer to scheme keys with [`StyleElement::SchemeRef`]; the
//! lookup happens every time a code is generated, through the
//! [`SchemeResolver`] trait, so swapping the scheme restyles everything that
//! refers to it.
//!
//! # Construction Methods
//!
//! ## Programmatic (Builder API)
//!
//! ```rust
//! use standout_sgr::{ColorScheme, Style, StyleElement};
//!
//! let scheme = ColorScheme::new()
//!     .try_add("critical", ["yellow", "on_red"]).unwrap()
//!     .add("quiet", Style::list(vec![StyleElement::parse("dark").unwrap()]));
//! assert!(scheme.contains("Critical"));
//! ```
//!
//! ## From YAML
//!
//! Each key takes either a list of tokens or a whitespace-separated string:
//!
//! ```rust
//! use standout_sgr::{ColorScheme, NoScheme};
//!
//! let scheme = ColorScheme::from_yaml(r#"
//! critical: [yellow, on_red]
//! warning: bold yellow
//! "#).unwrap();
//!
//! let warning = scheme.get("warning").unwrap();
//! assert_eq!(warning.code(&NoScheme).unwrap(), "\x1b[1m\x1b[33m");
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::element::StyleElement;
use crate::error::Result;
use crate::style::Style;

/// Looks up scheme keys while codes are generated.
pub trait SchemeResolver {
    /// Returns the style registered for `name`, if any.
    fn resolve_scheme(&self, name: &str) -> Option<Arc<Style>>;
}

/// A resolver that knows no keys. Rendering a scheme reference with it fails
/// with [`StyleError::UnknownScheme`](crate::StyleError::UnknownScheme).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScheme;

impl SchemeResolver for NoScheme {
    fn resolve_scheme(&self, _name: &str) -> Option<Arc<Style>> {
        None
    }
}

/// A YAML scheme entry: a token list or a whitespace-separated shorthand.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemeEntry {
    Tokens(Vec<String>),
    Shorthand(String),
}

impl SchemeEntry {
    fn into_tokens(self) -> Vec<String> {
        match self {
            SchemeEntry::Tokens(tokens) => tokens,
            SchemeEntry::Shorthand(s) => s.split_whitespace().map(str::to_string).collect(),
        }
    }
}

/// A named collection of styles keyed by lowercase names.
#[derive(Debug, Clone, Default)]
pub struct ColorScheme {
    styles: HashMap<String, Arc<Style>>,
}

impl ColorScheme {
    /// Creates an empty scheme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a style under `key`, returning `self` for chaining.
    ///
    /// The style is named after the (lowercase) key.
    pub fn add(mut self, key: impl AsRef<str>, style: Style) -> Self {
        let key = normalize_key(key.as_ref());
        let style = style.with_name(key.clone());
        self.styles.insert(key, Arc::new(style));
        self
    }

    /// Parses `tokens` into a list style and adds it under `key`.
    ///
    /// # Errors
    ///
    /// Fails if any token is not a valid style element.
    pub fn try_add<I, S>(self, key: impl AsRef<str>, tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let elements = tokens
            .into_iter()
            .map(|t| StyleElement::parse(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.add(key, Style::list(elements)))
    }

    /// Creates a scheme from YAML content.
    ///
    /// The document is a mapping from key to either a list of tokens or a
    /// single string of whitespace-separated tokens.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Parse`](crate::StyleError::Parse) for malformed
    /// YAML and element errors for unknown tokens.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let entries: HashMap<String, SchemeEntry> = serde_yaml::from_str(yaml)?;
        entries
            .into_iter()
            .try_fold(Self::new(), |scheme, (key, entry)| {
                scheme.try_add(key, entry.into_tokens())
            })
    }

    /// Looks up a key, ignoring case.
    pub fn get(&self, key: &str) -> Option<Arc<Style>> {
        self.styles.get(&normalize_key(key)).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.styles.contains_key(&normalize_key(key))
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.styles.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// The tokens a key was defined with, e.g. `["yellow", "on_red"]`.
    pub fn definition(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|style| style.tokens())
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl SchemeResolver for ColorScheme {
    fn resolve_scheme(&self, name: &str) -> Option<Arc<Style>> {
        self.get(name)
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StyleError;

    #[test]
    fn test_keys_are_case_insensitive() {
        let scheme = ColorScheme::new().try_add("Header", ["bold"]).unwrap();
        assert!(scheme.contains("header"));
        assert!(scheme.contains("HEADER"));
        assert_eq!(scheme.keys(), vec!["header"]);
        assert_eq!(scheme.get("header").unwrap().name(), Some("header"));
    }

    #[test]
    fn test_try_add_rejects_bad_tokens() {
        let err = ColorScheme::new().try_add("x", ["on_purple"]).unwrap_err();
        assert!(matches!(err, StyleError::UnknownColor(_)));
    }

    #[test]
    fn test_from_yaml_lists_and_shorthand() {
        let scheme = ColorScheme::from_yaml(
            r#"
critical: [yellow, on_red]
warning: bold yellow
"#,
        )
        .unwrap();
        assert_eq!(scheme.len(), 2);
        assert_eq!(
            scheme.definition("critical").unwrap(),
            vec!["yellow".to_string(), "on_red".to_string()]
        );
        assert_eq!(
            scheme.definition("warning").unwrap(),
            vec!["bold".to_string(), "yellow".to_string()]
        );
    }

    #[test]
    fn test_from_yaml_malformed() {
        assert!(matches!(
            ColorScheme::from_yaml("critical: [yellow"),
            Err(StyleError::Parse(_))
        ));
    }

    #[test]
    fn test_scheme_entries_may_reference_each_other() {
        let scheme = ColorScheme::new()
            .try_add("base", ["blue"])
            .unwrap()
            .try_add("title", ["bold", "base"])
            .unwrap();
        let title = scheme.get("title").unwrap();
        assert_eq!(title.code(&scheme).unwrap(), "\x1b[1m\x1b[34m");
    }

    #[test]
    fn test_no_scheme_resolves_nothing() {
        assert!(NoScheme.resolve_scheme("anything").is_none());
        assert!(ColorScheme::new().is_empty());
    }
}
