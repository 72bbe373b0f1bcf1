//! Property-based tests for styles and colors using proptest.

use proptest::prelude::*;
use standout_sgr::colorspace::{Hsv, Rgb};
use standout_sgr::{uncolor, ColorValue, NoScheme, Style, StyleElement, StyleRegistry};

// ============================================================================
// Strategies
// ============================================================================

fn rgb_strategy() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb(r, g, b))
}

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("bold".to_string()),
        Just("underline".to_string()),
        Just("reverse".to_string()),
        Just("red".to_string()),
        Just("on_blue".to_string()),
        Just("bright_green".to_string()),
        Just("on_bright_white".to_string()),
        rgb_strategy().prop_map(|rgb| rgb.to_string()),
        rgb_strategy().prop_map(|rgb| format!("on_{}", rgb)),
    ]
}

// Text without ESC, so the only escape sequences are the ones we add.
fn plain_text() -> impl Strategy<Value = String> {
    "[^\x1b]{0,40}"
}

// ============================================================================
// Rendering
// ============================================================================

proptest! {
    /// Stripping codes from rendered text gives back the text.
    #[test]
    fn uncolor_inverts_render(
        tokens in prop::collection::vec(token_strategy(), 0..6),
        text in plain_text(),
    ) {
        let style = Style::parse_list(&tokens).unwrap();
        let rendered = style.render(&text, &NoScheme).unwrap();
        prop_assert_eq!(uncolor(&rendered), text);
    }

    /// A list style's code is its elements' codes in order.
    #[test]
    fn list_code_is_concatenation(tokens in prop::collection::vec(token_strategy(), 0..6)) {
        let style = Style::parse_list(&tokens).unwrap();
        let expected: String = tokens
            .iter()
            .map(|t| StyleElement::parse(t).unwrap().code(&NoScheme).unwrap())
            .collect();
        prop_assert_eq!(style.code(&NoScheme).unwrap(), expected);
    }

    /// Element tokens parse back to the same element.
    #[test]
    fn element_display_round_trips(token in token_strategy()) {
        let element = StyleElement::parse(&token).unwrap();
        prop_assert_eq!(element.to_string(), token);
    }
}

// ============================================================================
// Color space
// ============================================================================

proptest! {
    /// RGB -> HSV -> RGB stays within one unit per channel.
    #[test]
    fn hsv_round_trip_is_close(rgb in rgb_strategy()) {
        let back = rgb.to_hsv().to_rgb();
        for (a, b) in rgb.channels().iter().zip(back.channels().iter()) {
            prop_assert!((i16::from(*a) - i16::from(*b)).abs() <= 1, "{} vs {}", rgb, back);
        }
    }

    /// Hue offsets wrap into [0, 360); saturation and value clamp.
    #[test]
    fn hsv_offset_stays_in_range(
        h in -1000.0f64..1000.0,
        s in -200.0f64..200.0,
        v in -200.0f64..200.0,
    ) {
        let hsv = Hsv::new(180.0, 50.0, 50.0).offset([h, s, v]);
        prop_assert!(hsv.h >= 0.0 && hsv.h < 360.0);
        prop_assert!((0.0..=100.0).contains(&hsv.s));
        prop_assert!((0.0..=100.0).contains(&hsv.v));
    }

    /// RGB codes always land in the 6x6x6 cube.
    #[test]
    fn rgb_codes_use_color_cube(rgb in rgb_strategy()) {
        let index = rgb.palette_index();
        prop_assert!((16..=231).contains(&index));
        prop_assert_eq!(
            ColorValue::Rgb(rgb).to_ansi_code(true),
            format!("\x1b[48;5;{}m", index)
        );
    }

    /// Brightening: black becomes mid-gray, zero channels stay zero, and
    /// nonzero channels gain 128 capped at 255.
    #[test]
    fn bright_rule(rgb in rgb_strategy()) {
        let bright = rgb.brighten();
        if rgb == Rgb::BLACK {
            prop_assert_eq!(bright, Rgb(128, 128, 128));
        } else {
            for (c, b) in rgb.channels().iter().zip(bright.channels().iter()) {
                let expected = if *c == 0 { 0 } else { (u16::from(*c) + 128).min(255) as u8 };
                prop_assert_eq!(*b, expected);
            }
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Asking twice for the same RGB style yields the same instance.
    #[test]
    fn rgb_styles_are_interned(rgb in rgb_strategy()) {
        let registry = StyleRegistry::new();
        let a = registry.of(rgb.to_string()).unwrap();
        let b = registry.rgb(rgb);
        prop_assert!(std::sync::Arc::ptr_eq(&a, &b));

        let on = registry.on(&a).unwrap();
        prop_assert_eq!(on.single_code().unwrap(), format!("\x1b[48;5;{}m", rgb.palette_index()));
    }
}
