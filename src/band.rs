//! What each band of a picker shows.
//!
//! Weekday names are locale-dependent and come from the host; hours and
//! minutes are generated here.

use std::fmt;
use std::str::FromStr;

use crate::error::PickerError;

/// Shown on a minutes band when minutes are switched off.
pub const NO_MINUTES: &str = "nothing to see";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandRole {
    Weekdays,
    Hours,
    Minutes,
}

impl BandRole {
    /// Display order used when the host does not choose one.
    pub const ALL: [BandRole; 3] = [BandRole::Weekdays, BandRole::Hours, BandRole::Minutes];

    pub fn id(self) -> &'static str {
        match self {
            BandRole::Weekdays => "weekdays",
            BandRole::Hours => "hours",
            BandRole::Minutes => "minutes",
        }
    }

    /// Alignment used when none (or an unusable one) is configured.
    pub fn default_alignment(self) -> Alignment {
        match self {
            BandRole::Weekdays => Alignment::Center,
            BandRole::Hours => Alignment::Right,
            BandRole::Minutes => Alignment::Left,
        }
    }

    /// Sign applied to the ambient rotation. Hours turn the other way.
    pub fn direction_sign(self) -> f64 {
        match self {
            BandRole::Hours => -1.0,
            BandRole::Weekdays | BandRole::Minutes => 1.0,
        }
    }
}

impl FromStr for BandRole {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BandRole::ALL
            .into_iter()
            .find(|role| role.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PickerError::UnknownRole(s.to_string()))
    }
}

impl fmt::Display for BandRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Horizontal alignment of a band's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl FromStr for Alignment {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            _ => Err(PickerError::InvalidAlignment(s.to_string())),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        })
    }
}

/// `"00"` to `"23"`.
pub fn hour_labels() -> Vec<String> {
    (0..24).map(|hour| format!("{hour:02}")).collect()
}

/// Labels for one lap of the minutes band, `interval` minutes apart.
///
/// `None` switches minutes off and yields the single [`NO_MINUTES`] label.
/// Intervals that do not divide 60 are replaced with
/// [`nearest_divisor_of_60`].
pub fn minute_labels(interval: Option<u32>) -> Vec<String> {
    let Some(interval) = interval else {
        return vec![NO_MINUTES.to_string()];
    };
    let interval = nearest_divisor_of_60(interval as f64);

    (0..60 / interval)
        .map(|index| format!("{:02}", index * interval))
        .collect()
}

/// Largest divisor of 60 not above `minutes` (truncated, clamped to 1..=60).
///
/// Zero, negative and non-finite input gives 1.
pub fn nearest_divisor_of_60(minutes: f64) -> u32 {
    if !minutes.is_finite() || minutes < 1.0 {
        return 1;
    }
    let mut divisor = (minutes.trunc() as u32).clamp(1, 60);
    while 60 % divisor != 0 {
        divisor -= 1;
    }
    divisor
}
