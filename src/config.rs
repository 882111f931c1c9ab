//! Picker and band configuration.
//!
//! Hosts fill in whatever they know with the `with_*` builders; `sanitize`
//! turns that into settings the bands can use directly, substituting a
//! default for anything missing or unusable and clamping numbers into range.
//! A rejected value is reported through `log::info!`; a missing one is not.

use carousel::window::{MIN_SPACING, PLACEHOLDER_ITEMS, PLACEHOLDER_SPACING};
use shade::ShadeInputs;
use shade::length::parse_length;

use crate::band::{Alignment, BandRole, nearest_divisor_of_60};

/// Cylinder radius in font-size units.
pub const DEFAULT_RADIUS: f64 = 1.5;
pub const MIN_RADIUS: f64 = 1.0;
pub const DEFAULT_FONT_SIZE: &str = "1em";

/// Item slots per half revolution.
///
/// Just over 8 shows a sliver, the previous value squeezed, the current value,
/// the next value squeezed and another sliver.
pub const DEFAULT_SPACING: f64 = 8.5;

/// Smallest spacing for a band with more than one item.
pub const MIN_MULTI_SPACING: f64 = 3.0;

pub const DEFAULT_MINUTES_INTERVAL: u32 = 1;

/// Raw configuration of one band.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BandConfig {
    pub items: Vec<String>,
    pub spacing: Option<f64>,
    pub radius: Option<f64>,
    pub font_size: Option<String>,
    pub padding: Option<String>,
}

/// A band configuration with every value usable.
#[derive(Clone, Debug, PartialEq)]
pub struct BandSettings {
    /// Never empty.
    pub items: Vec<String>,
    pub spacing: f64,
    pub radius: f64,
    pub font_size: String,
    /// Passed through untouched; renderers ignore what they cannot use.
    pub padding: Option<String>,
}

impl BandConfig {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_font_size(mut self, font_size: impl Into<String>) -> Self {
        self.font_size = Some(font_size.into());
        self
    }

    pub fn with_padding(mut self, padding: impl Into<String>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    pub fn sanitize(&self) -> BandSettings {
        let (items, spacing) = sanitize_items(&self.items, self.spacing);

        BandSettings {
            items,
            spacing,
            radius: sanitize_radius(self.radius),
            font_size: sanitize_font_size(self.font_size.as_deref()),
            padding: self.padding.clone(),
        }
    }
}

fn sanitize_items(items: &[String], spacing: Option<f64>) -> (Vec<String>, f64) {
    if items.is_empty() {
        log::info!("band items missing, using placeholder");
        let placeholder = PLACEHOLDER_ITEMS.iter().map(|item| item.to_string()).collect();
        return (placeholder, PLACEHOLDER_SPACING);
    }

    let cap = 2.0 * items.len() as f64;
    let spacing = match spacing {
        None => MIN_SPACING.max(DEFAULT_SPACING.min(cap)),
        Some(spacing) if spacing.is_nan() => {
            let fallback = MIN_SPACING.max(DEFAULT_SPACING.min(cap));
            log::info!("band spacing set by default to {fallback}");
            fallback
        }
        // A single item never rotates.
        Some(_) if items.len() == 1 => MIN_SPACING,
        Some(spacing) => MIN_MULTI_SPACING.max(spacing.min(cap)),
    };

    (items.to_vec(), spacing)
}

fn sanitize_radius(radius: Option<f64>) -> f64 {
    match radius {
        None => DEFAULT_RADIUS,
        Some(radius) if radius.is_nan() || radius < MIN_RADIUS => {
            log::info!("band radius {radius} set by default to {DEFAULT_RADIUS}");
            DEFAULT_RADIUS
        }
        Some(radius) => radius,
    }
}

fn sanitize_font_size(font_size: Option<&str>) -> String {
    let Some(font_size) = font_size else {
        return DEFAULT_FONT_SIZE.to_string();
    };
    match parse_length(font_size) {
        Ok(_) => font_size.to_string(),
        Err(err) => {
            log::info!("band font size set by default to {DEFAULT_FONT_SIZE}: {err}");
            DEFAULT_FONT_SIZE.to_string()
        }
    }
}

/// One requested band, as the host wrote it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayEntry {
    pub role: String,
    pub text_align: Option<String>,
    pub minutes_interval: Option<f64>,
    pub padding: Option<String>,
    pub spacing: Option<f64>,
}

impl DisplayEntry {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            ..Self::default()
        }
    }

    pub fn with_text_align(mut self, align: impl Into<String>) -> Self {
        self.text_align = Some(align.into());
        self
    }

    pub fn with_minutes_interval(mut self, minutes: f64) -> Self {
        self.minutes_interval = Some(minutes);
        self
    }

    pub fn with_padding(mut self, padding: impl Into<String>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }
}

impl From<&str> for DisplayEntry {
    fn from(role: &str) -> Self {
        DisplayEntry::new(role)
    }
}

/// A validated band request.
#[derive(Clone, Debug, PartialEq)]
pub struct BandSpec {
    pub role: BandRole,
    pub align: Alignment,
    pub padding: Option<String>,
    pub spacing: Option<f64>,
}

/// Raw configuration of a whole picker.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PickerConfig {
    /// Bands in display order. `None` shows weekdays, hours and minutes.
    pub display: Option<Vec<DisplayEntry>>,
    /// Weekday names, Sunday first, supplied by the host.
    pub weekdays: Vec<String>,
    pub week_align: Option<String>,
    pub minutes_interval: Option<f64>,
    pub colors: ShadeInputs,
    pub spacing: Option<f64>,
    pub radius: Option<f64>,
    pub font_size: Option<String>,
}

/// A picker configuration with every value usable.
#[derive(Clone, Debug, PartialEq)]
pub struct PickerSettings {
    /// Never empty; each role at most once.
    pub bands: Vec<BandSpec>,
    pub weekdays: Vec<String>,
    /// Minutes between labels on the minutes band; `None` switches minutes off.
    pub minutes_interval: Option<u32>,
    pub colors: ShadeInputs,
    pub spacing: Option<f64>,
    pub radius: Option<f64>,
    pub font_size: Option<String>,
}

impl PickerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display<I, E>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<DisplayEntry>,
    {
        self.display = Some(entries.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_weekdays<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weekdays = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_week_align(mut self, align: impl Into<String>) -> Self {
        self.week_align = Some(align.into());
        self
    }

    /// Minutes between labels. Zero switches minutes off.
    pub fn with_minutes_interval(mut self, minutes: f64) -> Self {
        self.minutes_interval = Some(minutes);
        self
    }

    pub fn with_colors(mut self, colors: ShadeInputs) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_font_size(mut self, font_size: impl Into<String>) -> Self {
        self.font_size = Some(font_size.into());
        self
    }

    pub fn sanitize(&self) -> PickerSettings {
        let mut minutes_interval =
            sanitize_interval(self.minutes_interval, Some(DEFAULT_MINUTES_INTERVAL));

        let week_align = self.week_align.as_deref().and_then(|align| {
            align
                .parse::<Alignment>()
                .map_err(|err| log::info!("week alignment ignored: {err}"))
                .ok()
        });

        let mut bands: Vec<BandSpec> = Vec::new();
        for entry in self.display.iter().flatten() {
            let role = match entry.role.parse::<BandRole>() {
                Ok(role) => role,
                Err(err) => {
                    log::info!("band dropped: {err}");
                    continue;
                }
            };
            if bands.iter().any(|band| band.role == role) {
                log::info!("duplicate {role} band dropped");
                continue;
            }

            if role == BandRole::Minutes {
                minutes_interval = sanitize_interval(entry.minutes_interval, minutes_interval);
            }

            bands.push(BandSpec {
                role,
                align: band_alignment(role, entry.text_align.as_deref(), week_align),
                padding: entry.padding.clone(),
                spacing: entry.spacing,
            });
        }

        if bands.is_empty() {
            bands = BandRole::ALL
                .into_iter()
                .map(|role| BandSpec {
                    role,
                    align: band_alignment(role, None, week_align),
                    padding: None,
                    spacing: None,
                })
                .collect();
        }

        PickerSettings {
            bands,
            weekdays: self.weekdays.clone(),
            minutes_interval,
            colors: self.colors.clone(),
            spacing: self.spacing,
            radius: self.radius,
            font_size: self.font_size.clone(),
        }
    }
}

fn sanitize_interval(minutes: Option<f64>, fallback: Option<u32>) -> Option<u32> {
    match minutes {
        None => fallback,
        Some(minutes) if minutes.is_nan() => {
            log::info!("minutes interval is not a number, keeping {fallback:?}");
            fallback
        }
        Some(minutes) if minutes == 0.0 => None,
        Some(minutes) => {
            let divisor = nearest_divisor_of_60(minutes);
            if divisor as f64 != minutes {
                log::info!("{minutes} is not an integer divisor of 60 minutes, {divisor} will be used instead");
            }
            Some(divisor)
        }
    }
}

/// Weekdays prefer their own alignment, then the picker-wide week alignment.
/// Other roles use their own alignment or the role default.
fn band_alignment(role: BandRole, requested: Option<&str>, week_align: Option<Alignment>) -> Alignment {
    let requested = requested.and_then(|align| {
        align
            .parse::<Alignment>()
            .map_err(|err| log::info!("{role} alignment ignored: {err}"))
            .ok()
    });

    match (role, requested) {
        (_, Some(align)) => align,
        (BandRole::Weekdays, None) => week_align.unwrap_or_else(|| role.default_alignment()),
        (_, None) => role.default_alignment(),
    }
}
