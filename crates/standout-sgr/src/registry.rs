//! The style registry: interns styles by name and by code.
//!
//! A [`StyleRegistry`] is created once, at startup, and shared by reference
//! (or in an `Arc`) with whatever renders styled text. It holds:
//!
//! - **by name**: name → style. Registering a name again replaces the entry.
//! - **by code**: SGR code → every style producing it, in registration order.
//!   Registering a style whose name is already listed under its code replaces
//!   that entry instead of adding a duplicate.
//! - **the active color scheme**, consulted when scheme references are
//!   rendered. It can be swapped at any time.
//!
//! Derived styles (`on_X`, `bright_X`, `rgb_xxxxxx`, compound lists) are
//! created on first request and cached, so asking twice returns the same
//! `Arc`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use standout_sgr::StyleRegistry;
//!
//! let registry = StyleRegistry::new();
//!
//! let red = registry.of("red").unwrap();
//! let on_red = registry.on(&red).unwrap();
//! assert_eq!(registry.code(&on_red).unwrap(), "\x1b[41m");
//! assert!(Arc::ptr_eq(&on_red, &registry.on(&red).unwrap()));
//!
//! let warning = registry.of(vec!["bold", "on_red", "rgb_00ff00"]).unwrap();
//! assert_eq!(
//!     registry.render(&warning, "!").unwrap(),
//!     "\x1b[1m\x1b[41m\x1b[38;5;46m!\x1b[0m"
//! );
//! ```
//!
//! # Concurrency
//!
//! One mutex guards the two indexes; every check-then-insert runs under it.
//! No lock is held while codes are generated, so scheme references may call
//! back into the registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::color::{ColorValue, BACKGROUND_OFFSET, BRIGHT_OFFSET};
use crate::colorspace::Rgb;
use crate::element::{Attribute, StyleElement};
use crate::error::{Result, StyleError};
use crate::scheme::{ColorScheme, SchemeResolver};
use crate::spec::{StyleDefinition, StyleSpec};
use crate::style::{Style, VariantOptions};

/// Color names installed as builtins, aliases and `none` included.
const BUILTIN_COLOR_NAMES: [&str; 11] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white", "gray", "grey",
    "none",
];

#[derive(Debug, Default)]
struct Index {
    by_name: HashMap<String, Arc<Style>>,
    by_code: HashMap<String, Vec<Arc<Style>>>,
}

impl Index {
    fn insert(&mut self, style: Arc<Style>) -> Arc<Style> {
        let key = style.name().map(name_key);
        if let Some(key) = &key {
            self.by_name.insert(key.clone(), Arc::clone(&style));
        }
        if let Some(code) = style.single_code() {
            let entries = self.by_code.entry(code.to_string()).or_default();
            entries.retain(|existing| existing.name().map(name_key) != key);
            entries.push(Arc::clone(&style));
        }
        debug!(style = %style.label(), "registered style");
        style
    }

    fn named(&self, name: &str) -> Option<Arc<Style>> {
        self.by_name.get(&name_key(name)).cloned()
    }

    fn first_for_code(&self, code: &str) -> Option<Arc<Style>> {
        self.by_code.get(code).and_then(|v| v.first()).cloned()
    }
}

/// Process-wide cache of styles, created explicitly and shared by reference.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    index: Mutex<Index>,
    scheme: RwLock<Option<Arc<ColorScheme>>>,
}

impl StyleRegistry {
    /// Creates a registry holding the builtin styles: every attribute, every
    /// basic color, and each color's `on_`, `bright_` and `on_bright_` forms.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.install_builtins();
        registry
    }

    /// Creates a registry with no styles at all.
    pub fn empty() -> Self {
        Self::default()
    }

    fn install_builtins(&self) {
        for (name, attr) in Attribute::NAMES {
            self.register(Style::from_code(attr.code()).with_name(name).into_builtin());
        }
        for name in BUILTIN_COLOR_NAMES {
            let Ok(color) = ColorValue::from_name(name) else {
                continue;
            };
            let base = self.register(
                Style::from_color(color, false)
                    .with_name(name)
                    .into_builtin(),
            );
            // Builtins are single styles with numeric codes, so derivation
            // cannot fail here.
            let derived = self
                .derive_memo(&base, "on_", &on_options(), true)
                .and_then(|_| self.derive_memo(&base, "bright_", &bright_options(&base), true))
                .and_then(|bright| self.derive_memo(&bright, "on_", &on_options(), true));
            if let Err(err) = derived {
                debug!(%err, color = name, "skipped builtin variants");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Index> {
        self.index.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ─── Registration and lookup ────────────────────────────────────────────

    /// Registers `style` and returns the shared instance.
    ///
    /// Named styles go into the name index; single styles go into the code
    /// index, replacing an earlier entry with the same name under that code.
    pub fn register(&self, style: Style) -> Arc<Style> {
        self.lock().insert(Arc::new(style))
    }

    /// The style registered under `name`, ignoring case.
    pub fn get(&self, name: &str) -> Option<Arc<Style>> {
        self.lock().named(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Every style producing `code`, in registration order.
    pub fn styles_for_code(&self, code: &str) -> Vec<Arc<Style>> {
        self.lock().by_code.get(code).cloned().unwrap_or_default()
    }

    /// Registered names in their lowercase key form, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().by_name.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of named styles.
    pub fn len(&self) -> usize {
        self.lock().by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().by_name.is_empty()
    }

    // ─── Color scheme ───────────────────────────────────────────────────────

    /// Installs `scheme` as the active color scheme, replacing any other.
    pub fn set_scheme(&self, scheme: ColorScheme) {
        let mut guard = self.scheme.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(scheme));
    }

    /// Removes the active color scheme.
    pub fn clear_scheme(&self) {
        let mut guard = self.scheme.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// The active color scheme.
    pub fn scheme(&self) -> Option<Arc<ColorScheme>> {
        self.scheme
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ─── Resolution ─────────────────────────────────────────────────────────

    /// Resolves anything convertible into a [`StyleSpec`].
    ///
    /// ```rust
    /// use standout_sgr::StyleRegistry;
    ///
    /// let registry = StyleRegistry::new();
    /// let by_name = registry.of("blue").unwrap();
    /// let by_code = registry.of("\x1b[34m").unwrap();
    /// assert_eq!(by_name.name(), by_code.name());
    /// ```
    pub fn of(&self, spec: impl Into<StyleSpec>) -> Result<Arc<Style>> {
        self.resolve(&spec.into())
    }

    /// Resolves a style specification, registering whatever it creates.
    ///
    /// # Errors
    ///
    /// [`StyleError::UndefinedStyle`] when a name matches nothing, plus any
    /// parse error from definitions, elements or list members.
    pub fn resolve(&self, spec: &StyleSpec) -> Result<Arc<Style>> {
        match spec {
            StyleSpec::Style(style) => {
                let mut index = self.lock();
                if let Some(existing) = style.name().and_then(|name| index.named(name)) {
                    return Ok(existing);
                }
                Ok(index.insert(Arc::clone(style)))
            }
            StyleSpec::Code(code) => {
                let mut index = self.lock();
                if let Some(existing) = index.first_for_code(code) {
                    return Ok(existing);
                }
                Ok(index.insert(Arc::new(Style::from_code(code.clone()))))
            }
            StyleSpec::Name(name) => self.resolve_name(name),
            StyleSpec::Definition(def) => self.define(def),
            StyleSpec::Element(element) => self.element_style(element),
            StyleSpec::List(specs) => match specs.as_slice() {
                [single] => self.resolve(single),
                _ => {
                    let mut elements = Vec::new();
                    for spec in specs {
                        elements.extend(self.elements_of(spec)?);
                    }
                    Ok(self.compound(elements))
                }
            },
        }
    }

    fn resolve_name(&self, name: &str) -> Result<Arc<Style>> {
        let lower = name_key(name);
        if let Some(style) = self.get(&lower) {
            trace!(name, "style cache hit");
            return Ok(style);
        }
        if let Some(style) = self.scheme().and_then(|scheme| scheme.get(&lower)) {
            return Ok(style);
        }
        if let Some(rgb) = lower.strip_prefix("on_rgb_").and_then(parse_hex) {
            return self.on_rgb(rgb);
        }
        if let Some(rgb) = lower.strip_prefix("rgb_").and_then(parse_hex) {
            return Ok(self.rgb(rgb));
        }
        Err(StyleError::UndefinedStyle(name.to_string()))
    }

    /// The style for a single element: the registered style under its token,
    /// or a newly registered one. Scheme references become a one-element
    /// list so they stay lazy.
    fn element_style(&self, element: &StyleElement) -> Result<Arc<Style>> {
        let style = match element {
            StyleElement::SchemeRef(_) => return Ok(self.compound(vec![element.clone()])),
            StyleElement::Attribute(attr) => Style::from_code(attr.code()).with_name(attr.name()),
            StyleElement::Foreground(color) => Style::from_color(*color, false),
            StyleElement::Background(color) => Style::from_color(*color, true),
        };
        let mut index = self.lock();
        if let Some(existing) = style.name().and_then(|name| index.named(name)) {
            return Ok(existing);
        }
        Ok(index.insert(Arc::new(style)))
    }

    /// The elements a list member contributes.
    fn elements_of(&self, spec: &StyleSpec) -> Result<Vec<StyleElement>> {
        match spec {
            StyleSpec::Name(name) => match StyleElement::parse(name) {
                Ok(element) => Ok(vec![element]),
                // Registered names that are not tokens, such as compound names.
                Err(parse_err) => match self.resolve_name(name) {
                    Ok(style) => style.elements(),
                    Err(StyleError::UndefinedStyle(_)) => Err(parse_err),
                    Err(err) => Err(err),
                },
            },
            StyleSpec::Element(element) => Ok(vec![element.clone()]),
            // Registered names that are not element tokens (`bright_rgb_...`)
            // are referenced through the registry instead.
            StyleSpec::Style(style) => style.elements().or_else(|err| match style.name() {
                Some(name) if self.contains(name) => Ok(vec![StyleElement::scheme_ref(name)]),
                _ => Err(err),
            }),
            StyleSpec::Code(code) => self
                .lock()
                .first_for_code(code)
                .ok_or_else(|| StyleError::InvalidStyleElement(format!("{:?}", code)))?
                .elements(),
            StyleSpec::Definition(def) => self.define(def)?.elements(),
            StyleSpec::List(specs) => {
                let mut elements = Vec::new();
                for spec in specs {
                    elements.extend(self.elements_of(spec)?);
                }
                Ok(elements)
            }
        }
    }

    /// The cached list style over `elements`, named `[token,token,...]`.
    fn compound(&self, elements: Vec<StyleElement>) -> Arc<Style> {
        let name = compound_name(&elements);
        let mut index = self.lock();
        if let Some(existing) = index.named(&name) {
            trace!(name = %name, "compound cache hit");
            return existing;
        }
        index.insert(Arc::new(Style::list(elements).with_name(name)))
    }

    /// Builds and registers the style a definition describes.
    ///
    /// Unnamed list definitions get their canonical compound name and are
    /// cached like any other compound.
    pub fn define(&self, def: &StyleDefinition) -> Result<Arc<Style>> {
        let style = def.to_style()?;
        if style.name().is_none() {
            if let Some(elements) = def.list.as_ref().map(|_| style.elements()).transpose()? {
                return Ok(self.compound(elements));
            }
        }
        Ok(self.register(style))
    }

    /// Defines every style in `defs`, in order.
    pub fn define_all<'a, I>(&self, defs: I) -> Result<Vec<Arc<Style>>>
    where
        I: IntoIterator<Item = &'a StyleDefinition>,
    {
        defs.into_iter().map(|def| self.define(def)).collect()
    }

    // ─── RGB styles ─────────────────────────────────────────────────────────

    /// The foreground style `rgb_xxxxxx` for `rgb`, created on first use.
    pub fn rgb(&self, rgb: Rgb) -> Arc<Style> {
        let mut index = self.lock();
        if let Some(existing) = index.named(&rgb.to_string()) {
            return existing;
        }
        index.insert(Arc::new(Style::from_color(ColorValue::Rgb(rgb), false)))
    }

    /// The background style `on_rgb_xxxxxx` for `rgb`.
    pub fn on_rgb(&self, rgb: Rgb) -> Result<Arc<Style>> {
        let fg = self.rgb(rgb);
        self.on(&fg)
    }

    // ─── Variants ───────────────────────────────────────────────────────────

    /// Derives and registers a variant of `style` named `new_name`.
    ///
    /// Unlike [`on`](Self::on) and [`bright`](Self::bright) this always
    /// builds a fresh style, replacing any earlier registration of the name.
    pub fn variant(
        &self,
        style: &Style,
        new_name: impl Into<String>,
        options: &VariantOptions,
    ) -> Result<Arc<Style>> {
        let derived = style.variant(new_name, options)?;
        Ok(self.register(derived))
    }

    /// The background form of `style`, named `on_<name>`.
    ///
    /// # Errors
    ///
    /// [`StyleError::NotSingleStyle`] for list styles.
    pub fn on(&self, style: &Arc<Style>) -> Result<Arc<Style>> {
        self.derive_memo(style, "on_", &on_options(), false)
    }

    /// The bright form of `style`, named `bright_<name>`.
    ///
    /// Basic color codes move up by 60; 256-color codes are recomputed from
    /// the brightened RGB value.
    ///
    /// # Errors
    ///
    /// [`StyleError::NotSingleStyle`] for list styles.
    pub fn bright(&self, style: &Arc<Style>) -> Result<Arc<Style>> {
        if style.is_list() {
            return Err(StyleError::NotSingleStyle(style.label()));
        }
        self.derive_memo(style, "bright_", &bright_options(style), false)
    }

    /// Looks up or builds `prefix + name`. Anonymous styles derive anonymous
    /// variants, deduplicated through the code index.
    fn derive_memo(
        &self,
        style: &Arc<Style>,
        prefix: &str,
        options: &VariantOptions,
        builtin: bool,
    ) -> Result<Arc<Style>> {
        let name = style.name().map(|n| format!("{}{}", prefix, n));
        let mut index = self.lock();
        if let Some(existing) = name.as_deref().and_then(|n| index.named(n)) {
            trace!(name = ?name, "variant cache hit");
            return Ok(existing);
        }

        let mut derived = style.derive(name.clone(), options)?;
        if name.is_none() {
            if let Some(existing) = derived.single_code().and_then(|c| index.first_for_code(c)) {
                return Ok(existing);
            }
        }
        if builtin {
            derived = derived.into_builtin();
        }
        debug!(from = %style.label(), prefix, "derived variant");
        Ok(index.insert(Arc::new(derived)))
    }

    // ─── Rendering ──────────────────────────────────────────────────────────

    /// The code of `style`, resolving scheme references through this registry.
    pub fn code(&self, style: &Style) -> Result<String> {
        style.code(self)
    }

    /// `code + text + CLEAR_CODE`, resolving scheme references through this
    /// registry.
    pub fn render(&self, style: &Style, text: &str) -> Result<String> {
        style.render(text, self)
    }
}

/// Scheme keys resolve through the active color scheme first, then through
/// registered names.
impl SchemeResolver for StyleRegistry {
    fn resolve_scheme(&self, name: &str) -> Option<Arc<Style>> {
        self.scheme()
            .and_then(|scheme| scheme.get(name))
            .or_else(|| self.get(name))
    }
}

fn on_options() -> VariantOptions {
    VariantOptions::new().code_increment(i32::from(BACKGROUND_OFFSET))
}

fn bright_options(style: &Style) -> VariantOptions {
    let rgb = style.rgb().map(|rgb| rgb.brighten());
    let options = match rgb {
        Some(rgb) => VariantOptions::new().rgb(rgb),
        None => VariantOptions::new(),
    };
    if style.is_palette_code() && rgb.is_some() {
        options
    } else {
        options.code_increment(i32::from(BRIGHT_OFFSET))
    }
}

/// Names are matched case-insensitively, like element tokens and scheme keys.
fn name_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

fn compound_name(elements: &[StyleElement]) -> String {
    let tokens: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
    format!("[{}]", tokens.join(","))
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    Rgb::from_hex(hex).ok()
}
