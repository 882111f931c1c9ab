//! CSS length validation for band font sizes.
//!
//! Hosts pass the font size straight through to their renderer, so the only
//! job here is to decide whether a string such as `4vmin` or `1.5em` is a
//! length the renderer will accept, and to fall back otherwise.

use nom::{
    IResult,
    bytes::complete::take_while1,
    character::complete::alpha1,
    combinator::all_consuming,
    sequence::pair,
};
use phf::phf_set;

use crate::error::LengthParseError;

/// Absolute, font-relative and viewport units accepted for a band's font size.
static UNITS: phf::Set<&'static str> = phf_set! {
    "cm", "mm", "in", "pc", "pt", "px",
    "em", "ex", "ch", "rem",
    "vw", "vh", "vmin", "vmax",
};

/// A validated CSS length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CssLength {
    pub value: f64,
    /// Lowercase unit, one of the supported set.
    pub unit: &'static str,
}

fn number_and_unit(input: &str) -> IResult<&str, (&str, &str)> {
    all_consuming(pair(
        take_while1(|c: char| c.is_ascii_digit() || c == '.'),
        alpha1,
    ))(input)
}

/// Parses an unsigned number immediately followed by a supported unit.
pub fn parse_length(input: &str) -> Result<CssLength, LengthParseError> {
    let (_, (number, unit)) = number_and_unit(input)
        .map_err(|_| LengthParseError::MissingNumber(input.to_string()))?;

    if number.matches('.').count() > 1 {
        return Err(LengthParseError::MultipleDecimalPoints(input.to_string()));
    }
    let value = number
        .parse::<f64>()
        .map_err(|_| LengthParseError::MissingNumber(input.to_string()))?;

    let unit = UNITS
        .get_key(unit.to_lowercase().as_str())
        .copied()
        .ok_or_else(|| LengthParseError::UnknownUnit(unit.to_string()))?;

    Ok(CssLength { value, unit })
}

pub fn is_valid_css_length(input: &str) -> bool {
    parse_length(input).is_ok()
}
