//! Tests for the color parser's public contract.

use shade::{ColorComponents, ColorParseError};

// ============================================================================
// Hex
// ============================================================================

#[test]
fn parse_hex_forms() {
    assert_eq!(ColorComponents::parse("#ff0000"), ColorComponents::rgb(255, 0, 0));
    assert_eq!(ColorComponents::parse("#f00"), ColorComponents::rgb(255, 0, 0));
    assert_eq!(
        ColorComponents::parse("#ff000080"),
        ColorComponents::rgba(255, 0, 0, 128)
    );
    assert_eq!(
        ColorComponents::parse("#F00C"),
        ColorComponents::rgba(255, 0, 0, 204)
    );
}

#[test]
fn parse_hex_case_insensitive() {
    let lower = ColorComponents::parse("#aabbcc");
    assert_eq!(lower, ColorComponents::parse("#AABBCC"));
    assert_eq!(lower, ColorComponents::parse("#AaBbCc"));
}

#[test]
fn six_digit_hex_has_no_alpha() {
    assert_eq!(ColorComponents::parse("#123456").a, None);
    assert_eq!(ColorComponents::parse("#123").a, None);
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn malformed_strings_give_zero_color() {
    let inputs = [
        "not-a-color",
        "#12",
        "",
        "   ",
        "#",
        "#ff00000",
        "rgb()",
        "rgb(1, 2)",
        "rgb(a, b, c)",
        "hsl(red, 1, 1)",
        "hsl(1e999, 50%, 50%)",
    ];

    for input in inputs {
        assert_eq!(
            ColorComponents::parse(input),
            ColorComponents::ZERO,
            "{input:?} should fall back"
        );
    }
}

#[test]
fn try_parse_explains_failures() {
    assert_eq!(ColorComponents::try_parse(""), Err(ColorParseError::Empty));
    assert_eq!(
        ColorComponents::try_parse("zz"),
        Err(ColorParseError::InvalidHexDigit('z'))
    );
    assert!(matches!(
        ColorComponents::try_parse("rgb(1, 2)"),
        Err(ColorParseError::InvalidRgb(_))
    ));
    assert!(matches!(
        ColorComponents::try_parse("hsl(nope)"),
        Err(ColorParseError::InvalidHsl(_))
    ));
}

// ============================================================================
// Functional notations
// ============================================================================

#[test]
fn format_detection_is_case_insensitive() {
    assert_eq!(
        ColorComponents::parse("RGB(1, 2, 3)"),
        ColorComponents::rgb(1, 2, 3)
    );
    assert_eq!(
        ColorComponents::parse("HSL(0, 0%, 100%)"),
        ColorComponents::rgb(255, 255, 255)
    );
}

#[test]
fn rgb_without_alpha_leaves_alpha_absent() {
    assert_eq!(ColorComponents::parse("rgb(1,2,3)").a, None);
    assert_eq!(ColorComponents::parse("rgba(1,2,3,4)").a, Some(4));
}

#[test]
fn hsl_reference_colors() {
    let cases = [
        ("hsl(0, 100%, 50%)", ColorComponents::rgb(255, 0, 0)),
        ("hsl(120, 100%, 50%)", ColorComponents::rgb(0, 255, 0)),
        ("hsl(240, 100%, 50%)", ColorComponents::rgb(0, 0, 255)),
        ("hsl(60, 1, 0.5)", ColorComponents::rgb(255, 255, 0)),
        ("hsl(0, 0%, 0%)", ColorComponents::rgb(0, 0, 0)),
        ("hsl(412.5, 50%, 40%", ColorComponents::rgb(153, 140, 51)),
    ];

    for (input, expected) in cases {
        assert_eq!(ColorComponents::parse(input), expected, "{input}");
    }
}

// ============================================================================
// Formatting
// ============================================================================

#[test]
fn to_hex_round_trips_through_parse() {
    for input in ["#0a0b0c", "#0a0b0c0d"] {
        assert_eq!(ColorComponents::parse(input).to_hex(), input);
    }
    assert_eq!(ColorComponents::ZERO.to_string(), "#00000000");
}
