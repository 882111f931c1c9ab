//! Error types for color and length parsing.
//!
//! The public entry points of this crate are total: they fall back to
//! documented defaults instead of failing. These errors exist so the
//! fallback can say *why* it happened, through `log`, and so callers that
//! care can use the `try_*` variants.

use thiserror::Error;

/// Errors that can occur when parsing a color string.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorParseError {
    /// Empty or whitespace-only input.
    #[error("empty color string")]
    Empty,

    /// Hex color with a length other than 3, 4, 6 or 8 digits.
    #[error("invalid hex color length: {0}")]
    InvalidHexLength(usize),

    /// Hex color containing a non-hex digit.
    #[error("invalid hex digit: {0}")]
    InvalidHexDigit(char),

    /// `rgb(...)` / `rgba(...)` that does not match the expected shape.
    #[error("invalid RGB color: {0}")]
    InvalidRgb(String),

    /// `hsl(...)` / `hsla(...)` that does not match the expected shape.
    #[error("invalid HSL color: {0}")]
    InvalidHsl(String),
}

/// Errors that can occur when validating a CSS length such as `4vmin`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LengthParseError {
    #[error("missing number in length: {0}")]
    MissingNumber(String),

    #[error("more than one decimal point in length: {0}")]
    MultipleDecimalPoints(String),

    #[error("unknown length unit: {0}")]
    UnknownUnit(String),
}
