//! Standout SGR - Composable, cacheable terminal styles.
//!
//! This crate turns style descriptions (`"bold"`, `"on_red"`, `"rgb_ff8000"`,
//! lists of those, or names from an application color scheme) into ANSI SGR
//! escape sequences. It supports:
//!
//! - The 8 basic colors at normal and bright intensity, foreground and background
//! - Arbitrary RGB colors rendered through the 256-color palette
//! - Text attributes: bold, dark, underline, blink, reverse, concealed
//! - Compound styles whose code is the concatenation of their members
//! - Color schemes: semantic keys resolved lazily at render time
//! - Variants derived by code arithmetic or RGB/HSV adjustment
//!
//! # Quick Start
//!
//! ```rust
//! use standout_sgr::{uncolor, ColorScheme, StyleRegistry};
//!
//! let registry = StyleRegistry::new();
//!
//! // Basic colors and their derived forms.
//! let red = registry.of("red").unwrap();
//! assert_eq!(registry.code(&red).unwrap(), "\x1b[31m");
//! let bright = registry.bright(&red).unwrap();
//! assert_eq!(registry.code(&bright).unwrap(), "\x1b[91m");
//!
//! // RGB colors go through the 256-color cube.
//! let orange = registry.of("rgb_ff8000").unwrap();
//! assert_eq!(registry.code(&orange).unwrap(), "\x1b[38;5;214m");
//!
//! // Scheme keys are looked up every time a code is generated.
//! let alert = registry.of(vec!["bold", "critical"]).unwrap();
//! registry.set_scheme(ColorScheme::new().try_add("critical", ["yellow", "on_red"]).unwrap());
//! let text = registry.render(&alert, "disk full").unwrap();
//! assert_eq!(text, "\x1b[1m\x1b[33m\x1b[41mdisk full\x1b[0m");
//! assert_eq!(uncolor(&text), "disk full");
//! ```
//!
//! # Style Tokens
//!
//! | Token | Meaning | Code |
//! |-------|---------|------|
//! | `bold`, `dark`, `underline`/`underscore`, `blink`, `reverse`, `concealed` | attribute | `1`, `2`, `4`, `5`, `7`, `8` |
//! | `clear`/`reset` | reset all | `0` |
//! | `red` | basic foreground | `30`–`37` |
//! | `none` | bare extended-color selector | `38` |
//! | `bright_red` | bright foreground | `90`–`97` |
//! | `on_red`, `on_bright_red` | background | `40`–`47`, `100`–`107` |
//! | `rgb_ff8000`, `ff8000` | RGB foreground | `38;5;n` |
//! | `on_rgb_ff8000` | RGB background | `48;5;n` |
//! | any other identifier | color scheme key | the key's style |
//!
//! `gray` and `grey` are accepted as aliases of `white`, and `none` selects the
//! bare `38` code. Style names are matched case-insensitively.
//!
//! # Architecture
//!
//! - [`colorspace`]: RGB/HSV math and the 256-color palette index
//! - [`ColorValue`]: basic or RGB colors and their codes
//! - [`StyleElement`]: one parsed token
//! - [`Style`]: a single code or an ordered element list, plus variants
//! - [`ColorScheme`] and [`SchemeResolver`]: lazily resolved scheme keys
//! - [`StyleSpec`] and [`StyleDefinition`]: what callers ask for, in code or
//!   configuration
//! - [`StyleRegistry`]: the shared cache tying it together

mod color;
pub mod colorspace;
mod element;
mod error;
mod registry;
mod scheme;
mod spec;
mod style;
mod text;

pub use color::{BasicColor, ColorValue, BACKGROUND_OFFSET, BRIGHT_OFFSET};
pub use element::{Attribute, StyleElement, MAX_SCHEME_DEPTH};
pub use error::{Result, StyleError};
pub use registry::StyleRegistry;
pub use scheme::{ColorScheme, NoScheme, SchemeResolver};
pub use spec::{RgbDefinition, StyleDefinition, StyleSpec};
pub use style::{Style, StyleBody, VariantOptions};
pub use text::{display_width, has_sgr, uncolor, CLEAR_CODE, CSI, ESC};
