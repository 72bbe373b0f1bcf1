//! RGB and HSV coordinates, the 6×6×6 palette cube, and the brighten rule.
//!
//! Terminals that understand 256 colors address RGB approximations through a
//! 6×6×6 cube occupying palette indices 16–231. Each channel is bucketed into
//! one of six levels with `floor(channel / 256 * 6)`, and the index is
//! `16 + 36*r + 6*g + b`.
//!
//! HSV is used to derive variants of a color (lighter, more saturated, shifted
//! hue). Hue is expressed in degrees `[0, 360)`, saturation and value as
//! percentages `0–100`.
//!
//! # Example
//!
//! ```rust
//! use standout_sgr::colorspace::{Hsv, Rgb};
//!
//! let orange = Rgb(255, 128, 0);
//! assert_eq!(orange.palette_index(), 214);
//!
//! let hsv = orange.to_hsv();
//! assert_eq!(hsv.to_rgb(), orange);
//!
//! // Rotate the hue by 180° to get the complementary color.
//! let complement = hsv.offset([180.0, 0.0, 0.0]).to_rgb();
//! assert_eq!(complement, Rgb(0, 127, 255));
//! ```

use crate::error::{Result, StyleError};

/// Number of levels per axis of the terminal color cube.
pub const CUBE_LEVELS: u16 = 6;

/// First palette index of the color cube (after the 16 base ANSI colors).
pub const CUBE_OFFSET: u16 = 16;

// ─── RGB type ───────────────────────────────────────────────────────────────

/// A simple RGB color triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure black, the one color the brighten rule treats specially.
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Parses exactly six hex digits (no `#`, case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StyleError::invalid_color(
                hex,
                "RGB colors must be exactly 6 hex digits",
            ));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| StyleError::invalid_color(hex, "not a hex number"))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Builds a color from three numeric channels.
    ///
    /// Channels are rounded to the nearest integer and must land in `0..=255`.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Result<Self> {
        let mut out = [0u8; 3];
        for (slot, value) in out.iter_mut().zip([r, g, b]) {
            let rounded = value.round();
            if !rounded.is_finite() || !(0.0..=255.0).contains(&rounded) {
                return Err(StyleError::invalid_color(
                    format!("({}, {}, {})", r, g, b),
                    "color values must be in the range 0..=255",
                ));
            }
            *slot = rounded as u8;
        }
        Ok(Rgb(out[0], out[1], out[2]))
    }

    /// Lowercase six-digit hex encoding, e.g. `ff8000`.
    pub fn hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Channels as an array, in r, g, b order.
    pub fn channels(&self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }

    /// Returns `true` for pure black.
    pub fn is_black(&self) -> bool {
        *self == Self::BLACK
    }

    /// Adds a signed delta to each channel, clamping to `0..=255`.
    pub fn offset(&self, delta: [i32; 3]) -> Rgb {
        let shift = |c: u8, d: i32| (i32::from(c) + d).clamp(0, 255) as u8;
        Rgb(
            shift(self.0, delta[0]),
            shift(self.1, delta[1]),
            shift(self.2, delta[2]),
        )
    }

    /// Index of this color in the 256-color palette cube (16–231).
    pub fn palette_index(&self) -> u8 {
        let level = |c: u8| u16::from(c) * CUBE_LEVELS / 256;
        let index = CUBE_OFFSET
            + CUBE_LEVELS * CUBE_LEVELS * level(self.0)
            + CUBE_LEVELS * level(self.1)
            + level(self.2);
        index as u8
    }

    /// Brighter rendition of this color.
    ///
    /// Pure black becomes mid-gray `(128, 128, 128)`. Otherwise every nonzero
    /// channel gains 128 (saturating at 255) and zero channels stay zero, so
    /// a dark red stays red rather than washing out to pink.
    pub fn brighten(&self) -> Rgb {
        if self.is_black() {
            return Rgb(128, 128, 128);
        }
        let lift = |c: u8| if c == 0 { 0 } else { c.saturating_add(128) };
        Rgb(lift(self.0), lift(self.1), lift(self.2))
    }

    /// Converts to HSV (hue in degrees, saturation and value in percent).
    pub fn to_hsv(&self) -> Hsv {
        let r = f64::from(self.0) / 255.0;
        let g = f64::from(self.1) / 255.0;
        let b = f64::from(self.2) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            (60.0 * ((g - b) / delta)).rem_euclid(360.0)
        } else if max == g {
            60.0 * ((b - r) / delta) + 120.0
        } else {
            60.0 * ((r - g) / delta) + 240.0
        };
        let s = if max == 0.0 { 0.0 } else { delta / max };

        Hsv {
            h: normalize_hue(h),
            s: s * 100.0,
            v: max * 100.0,
        }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb_{}", self.hex())
    }
}

// ─── HSV type ───────────────────────────────────────────────────────────────

/// A color in HSV coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation in percent, `0–100`.
    pub s: f64,
    /// Value in percent, `0–100`.
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Adds deltas to h, s and v. Hue wraps around the circle; saturation
    /// and value clamp to `0–100`.
    pub fn offset(&self, delta: [f64; 3]) -> Hsv {
        Hsv {
            h: normalize_hue(self.h + delta[0]),
            s: (self.s + delta[1]).clamp(0.0, 100.0),
            v: (self.v + delta[2]).clamp(0.0, 100.0),
        }
    }

    /// Converts back to RGB, rounding each channel to the nearest integer.
    ///
    /// The sextant is picked with `floor(h / 60)`, so a hue sitting exactly on
    /// a multiple of 60° belongs to the sextant that starts there.
    pub fn to_rgb(&self) -> Rgb {
        let h = normalize_hue(self.h);
        let s = self.s.clamp(0.0, 100.0) / 100.0;
        let v = self.v.clamp(0.0, 100.0) / 100.0;

        let c = s * v;
        let h_prime = h / 60.0;
        let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h_prime.floor() as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb(to_channel(r + m), to_channel(g + m), to_channel(b + m))
    }
}

fn normalize_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Tests ──────────────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn hsv_roundtrip_within_one(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let rgb = Rgb(r, g, b);
            let back = rgb.to_hsv().to_rgb();
            for (a, z) in rgb.channels().iter().zip(back.channels().iter()) {
                prop_assert!((i16::from(*a) - i16::from(*z)).abs() <= 1,
                    "{:?} -> {:?} -> {:?}", rgb, rgb.to_hsv(), back);
            }
        }

        #[test]
        fn palette_index_stays_in_cube(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let idx = Rgb(r, g, b).palette_index();
            prop_assert!((16..=231).contains(&idx));
        }

        #[test]
        fn brighten_never_darkens(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let rgb = Rgb(r, g, b);
            let bright = rgb.brighten();
            for (before, after) in rgb.channels().iter().zip(bright.channels().iter()) {
                prop_assert!(after >= before);
            }
        }
    }
}
