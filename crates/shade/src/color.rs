//! Color components and the color string parser.
//!
//! This module provides [`ColorComponents`], the normalized byte form that the
//! gradient generator shades from. Colors arrive from the host as strings in
//! one of three textual forms:
//!
//! - **Hex**: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (the `#` is optional)
//! - **RGB**: `rgb(r, g, b)`, `rgba(r, g, b, a)` with integer components
//! - **HSL**: `hsl(h, s, l)` with ratio (`0.5`) or percentage (`50%`)
//!   saturation and lightness, and an optional fourth alpha component
//!
//! Parsing is total. Anything that does not match yields the zero color
//! `(0, 0, 0, 0)`; callers decide which default replaces it.
//!
//! ```
//! use shade::ColorComponents;
//!
//! assert_eq!(ColorComponents::parse("#f00"), ColorComponents::rgb(255, 0, 0));
//! assert_eq!(ColorComponents::parse("not-a-color"), ColorComponents::ZERO);
//! ```

use std::fmt;

use nom::{
    IResult,
    bytes::complete::tag_no_case,
    character::complete::{char, digit1, multispace0},
    combinator::{map, opt},
    number::complete::double,
    sequence::{delimited, pair, preceded},
};

use crate::error::ColorParseError;

/// An RGBA color with byte components.
///
/// The alpha channel is optional: `None` means the source string carried no
/// alpha at all (`#rrggbb`, `rgb(r, g, b)`, `hsl(...)`). Consumers treat a
/// missing alpha as fully opaque, but the gradient generator needs to know
/// the difference, because a ramp shaded from a color with alpha gets an
/// alpha channel of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorComponents {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0 = transparent, 255 = opaque), if one was given.
    pub a: Option<u8>,
}

impl ColorComponents {
    /// The value returned for malformed input: black with zero alpha.
    pub const ZERO: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: Some(0),
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a: Some(a) }
    }

    /// Returns the channels in order: red, green, blue and, when present, alpha.
    pub fn channels(self) -> impl Iterator<Item = u8> {
        [self.r, self.g, self.b].into_iter().chain(self.a)
    }

    /// True when every channel, alpha included, is zero.
    pub fn is_black(self) -> bool {
        self.channels().all(|channel| channel == 0)
    }

    /// True when an alpha component was given and it is not zero.
    pub fn has_visible_alpha(self) -> bool {
        matches!(self.a, Some(alpha) if alpha > 0)
    }

    /// Formats the color as `#rrggbb` or `#rrggbbaa` (lowercase).
    pub fn to_hex(self) -> String {
        self.channels().fold(String::from("#"), |mut hex, channel| {
            hex.push_str(&format!("{channel:02x}"));
            hex
        })
    }

    /// Parses a color string, falling back to [`ColorComponents::ZERO`].
    ///
    /// The reason for a fallback is logged at `debug` level.
    pub fn parse(input: &str) -> Self {
        match Self::try_parse(input) {
            Ok(color) => color,
            Err(err) => {
                log::debug!("color {input:?} unreadable ({err}), using zero color");
                Self::ZERO
            }
        }
    }

    /// Parses a color string, reporting why it could not be read.
    ///
    /// The format is picked from the first three characters
    /// (case-insensitive): `rgb`, `hsl`, or hexadecimal for anything else.
    pub fn try_parse(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ColorParseError::Empty);
        }

        let format: String = input.chars().take(3).collect::<String>().to_lowercase();
        match format.as_str() {
            "rgb" => Self::parse_rgb_func(input),
            "hsl" => Self::parse_hsl_func(input),
            _ => Self::parse_hex(input.strip_prefix('#').unwrap_or(input)),
        }
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|digit| digit as u8)
                    .ok_or(ColorParseError::InvalidHexDigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match *digits.as_slice() {
            // Shorthand digits are doubled: "f" -> "ff" == 15 * 17
            [r, g, b] => Ok(Self::rgb(r * 17, g * 17, b * 17)),
            [r, g, b, a] => Ok(Self::rgba(r * 17, g * 17, b * 17, a * 17)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Self::rgba(
                r1 * 16 + r2,
                g1 * 16 + g2,
                b1 * 16 + b2,
                a1 * 16 + a2,
            )),
            _ => Err(ColorParseError::InvalidHexLength(digits.len())),
        }
    }

    fn parse_rgb_func(input: &str) -> Result<Self, ColorParseError> {
        let (_, (r, g, b, a)) =
            rgb_function(input).map_err(|_| ColorParseError::InvalidRgb(input.to_string()))?;
        Ok(Self { r, g, b, a })
    }

    fn parse_hsl_func(input: &str) -> Result<Self, ColorParseError> {
        let (_, hsl) =
            hsl_function(input).map_err(|_| ColorParseError::InvalidHsl(input.to_string()))?;

        if !hsl.hue.is_finite() {
            return Err(ColorParseError::InvalidHsl(input.to_string()));
        }

        let hue = hsl.hue.rem_euclid(360.0);
        let saturation = clamp_unit(hsl.saturation);
        let lightness = clamp_unit(hsl.lightness);
        let [r, g, b] = hsl_to_rgb(hue, saturation, lightness);
        let a = hsl.alpha.map(|alpha| (clamp_unit(alpha) * 255.0).round() as u8);

        Ok(Self { r, g, b, a })
    }
}

impl fmt::Display for ColorComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Raw values captured from an `hsl(...)` string, before wrapping and clamping.
struct HslValues {
    hue: f64,
    saturation: f64,
    lightness: f64,
    alpha: Option<f64>,
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Comma with optional whitespace on either side.
fn separator(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

/// Unsigned decimal integer, saturated to 255.
fn byte_channel(input: &str) -> IResult<&str, u8> {
    map(digit1, |digits: &str| {
        digits
            .parse::<u32>()
            .map_or(u8::MAX, |value| value.min(u8::MAX as u32) as u8)
    })(input)
}

/// A number with an optional `%` suffix; percentages are divided by 100.
fn ratio(input: &str) -> IResult<&str, f64> {
    map(pair(double, opt(char('%'))), |(value, percent)| {
        if percent.is_some() { value / 100.0 } else { value }
    })(input)
}

fn rgb_function(input: &str) -> IResult<&str, (u8, u8, u8, Option<u8>)> {
    let (input, _) = tag_no_case("rgb")(input)?;
    let (input, _) = opt(tag_no_case("a"))(input)?;
    let (input, _) = preceded(multispace0, char('('))(input)?;
    let (input, r) = preceded(multispace0, byte_channel)(input)?;
    let (input, g) = preceded(separator, byte_channel)(input)?;
    let (input, b) = preceded(separator, byte_channel)(input)?;
    let (input, a) = opt(preceded(separator, byte_channel))(input)?;
    let (input, _) = preceded(multispace0, char(')'))(input)?;
    Ok((input, (r, g, b, a)))
}

fn hsl_function(input: &str) -> IResult<&str, HslValues> {
    let (input, _) = tag_no_case("hsl")(input)?;
    let (input, _) = opt(tag_no_case("a"))(input)?;
    let (input, _) = preceded(multispace0, char('('))(input)?;
    let (input, hue) = preceded(multispace0, double)(input)?;
    let (input, saturation) = preceded(separator, ratio)(input)?;
    let (input, lightness) = preceded(separator, ratio)(input)?;
    let (input, alpha) = opt(preceded(separator, ratio))(input)?;
    // The closing parenthesis is tolerated but not required.
    let (input, _) = opt(preceded(multispace0, char(')')))(input)?;
    Ok((
        input,
        HslValues {
            hue,
            saturation,
            lightness,
            alpha,
        },
    ))
}

/// Converts HSL (hue in degrees, saturation and lightness in 0..=1) to RGB bytes.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [u8; 3] {
    let a = saturation * lightness.min(1.0 - lightness);
    let f = |n: f64| {
        let k = (n + hue / 30.0) % 12.0;
        lightness - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
    };
    [f(0.0), f(8.0), f(4.0)].map(|channel| (channel * 255.0).round() as u8)
}
