//! Faceted gradient synthesis.
//!
//! A flat band looks like a lit cylinder when its background is a ramp that
//! is dark at both edges and brightest in the middle. The cylinder is
//! approximated by a number of flat facets; each facet contributes one
//! gradient stop whose color follows `sin` of the facet angle and whose
//! position follows `cos`, so stops bunch up where the curvature is sharpest.
//!
//! A second ramp, the shadow, is laid over the rotating text. Its alpha is
//! inverted (transparent at the center, opaque at the rims) so that items
//! rolling away from the viewer fade into darkness.
//!
//! ```
//! use shade::{ShadeInputs, synthesize};
//!
//! let gradients = synthesize(&ShadeInputs::new().with_base("#808080").with_faces(2.0));
//! assert_eq!(
//!     gradients.barrel.to_string(),
//!     "linear-gradient(0deg, #000000 0.0%, #808080 50.0%, #000000 100.0%)"
//! );
//! ```

use std::f64::consts::PI;
use std::fmt;

use crate::color::ColorComponents;

/// Barrel color used when none is given, or when the given one is black.
pub const DEFAULT_BASE: ColorComponents = ColorComponents::rgb(128, 128, 128);
/// Shadow color used when none is given, or when it has no visible alpha.
pub const DEFAULT_SHADOW: ColorComponents = ColorComponents::rgba(0, 0, 0, 255);
/// Hover highlight used when none is given, or when it has no visible alpha.
pub const DEFAULT_HOVER: ColorComponents = ColorComponents::rgba(255, 255, 255, 255);
/// Press highlight used when none is given, or when it has no visible alpha.
pub const DEFAULT_PRESS: ColorComponents = ColorComponents::rgba(255, 255, 255, 170);

/// Fewest facets: the roundest look.
pub const MIN_FACES: u32 = 2;
/// Most facets: the flattest look.
pub const MAX_FACES: u32 = 20;

const END_OPAQUE: ColorComponents = ColorComponents::rgb(0, 0, 0);
const END_SOLID: ColorComponents = ColorComponents::rgba(0, 0, 0, 255);

/// Color strings and facet count that a [`GradientSpec`] is derived from.
///
/// Every field is optional; [`synthesize`] substitutes the documented
/// defaults for anything missing or unusable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShadeInputs {
    pub base: Option<String>,
    pub shadow: Option<String>,
    pub hover: Option<String>,
    pub press: Option<String>,
    pub faces: Option<f64>,
}

impl ShadeInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(mut self, color: impl Into<String>) -> Self {
        self.base = Some(color.into());
        self
    }

    pub fn with_shadow(mut self, color: impl Into<String>) -> Self {
        self.shadow = Some(color.into());
        self
    }

    pub fn with_hover(mut self, color: impl Into<String>) -> Self {
        self.hover = Some(color.into());
        self
    }

    pub fn with_press(mut self, color: impl Into<String>) -> Self {
        self.press = Some(color.into());
        self
    }

    /// Number of flat facets approximating half the cylinder.
    pub fn with_faces(mut self, faces: f64) -> Self {
        self.faces = Some(faces);
        self
    }
}

/// Which way a ramp runs, in CSS `linear-gradient` terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RampDirection {
    /// `0deg`: from the bottom edge upwards.
    Up,
    /// `180deg`: from the top edge downwards.
    Down,
}

impl RampDirection {
    pub fn degrees(self) -> u16 {
        match self {
            RampDirection::Up => 0,
            RampDirection::Down => 180,
        }
    }
}

/// One color stop of a ramp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub color: ColorComponents,
    /// Position along the ramp, 0.0 to 100.0.
    pub position: f64,
}

/// An ordered shading ramp, always ending with a black stop at 100%.
#[derive(Clone, Debug, PartialEq)]
pub struct Ramp {
    pub direction: RampDirection,
    pub stops: Vec<GradientStop>,
}

impl fmt::Display for Ramp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "linear-gradient({}deg", self.direction.degrees())?;
        for stop in &self.stops {
            write!(f, ", {} {:.1}%", stop.color, stop.position)?;
        }
        f.write_str(")")
    }
}

/// The edge of a band that a highlight ramp decorates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rim {
    Top,
    Bottom,
}

/// Which highlight to show on a rim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    Hover,
    Press,
}

/// The complete set of ramps for one band.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientSpec {
    pub barrel: Ramp,
    pub shadow: Ramp,
    pub top_hover: Ramp,
    pub top_press: Ramp,
    pub bottom_hover: Ramp,
    pub bottom_press: Ramp,
}

impl GradientSpec {
    /// Looks up the highlight ramp for a rim.
    pub fn rim(&self, rim: Rim, highlight: Highlight) -> &Ramp {
        match (rim, highlight) {
            (Rim::Top, Highlight::Hover) => &self.top_hover,
            (Rim::Top, Highlight::Press) => &self.top_press,
            (Rim::Bottom, Highlight::Hover) => &self.bottom_hover,
            (Rim::Bottom, Highlight::Press) => &self.bottom_press,
        }
    }

    /// All ramps with their names, in a stable order.
    pub fn named_ramps(&self) -> [(&'static str, &Ramp); 6] {
        [
            ("barrel", &self.barrel),
            ("shadow", &self.shadow),
            ("topHover", &self.top_hover),
            ("topPress", &self.top_press),
            ("bottomHover", &self.bottom_hover),
            ("bottomPress", &self.bottom_press),
        ]
    }
}

/// Clamps a facet count into `[MIN_FACES, MAX_FACES]`.
///
/// Absent, zero and NaN counts give [`MIN_FACES`]; fractional counts round.
pub fn effective_faces(faces: Option<f64>) -> u32 {
    match faces {
        Some(faces) if !faces.is_nan() && faces != 0.0 => {
            faces.round().clamp(MIN_FACES as f64, MAX_FACES as f64) as u32
        }
        _ => MIN_FACES,
    }
}

/// Derives every ramp of a band from its color inputs.
///
/// Pure: equal inputs always give equal output, so hosts may memoize on
/// [`ShadeInputs`].
pub fn synthesize(inputs: &ShadeInputs) -> GradientSpec {
    let base = resolve_base(inputs.base.as_deref());
    let shadow = resolve_translucent("shadow", inputs.shadow.as_deref(), DEFAULT_SHADOW);
    let hover = resolve_translucent("hover", inputs.hover.as_deref(), DEFAULT_HOVER);
    let press = resolve_translucent("press", inputs.press.as_deref(), DEFAULT_PRESS);

    let faces = effective_faces(inputs.faces);
    let angle = PI / faces as f64;
    let barrel_facets = facets(faces, |i| angle * i as f64);

    // The rims get a quarter of the facets over a quarter of the arc.
    let rim_faces = MIN_FACES.max((faces as f64 / 4.0).round() as u32);
    let rim_facets = facets(rim_faces, |i| angle * i as f64 / 4.0);

    GradientSpec {
        barrel: ramp(RampDirection::Up, &barrel_facets, base, END_OPAQUE),
        shadow: ramp(RampDirection::Up, &barrel_facets, shadow, END_SOLID),
        top_hover: ramp(RampDirection::Up, &rim_facets, hover, END_OPAQUE),
        top_press: ramp(RampDirection::Up, &rim_facets, press, END_OPAQUE),
        bottom_hover: ramp(RampDirection::Down, &rim_facets, hover, END_SOLID),
        bottom_press: ramp(RampDirection::Down, &rim_facets, press, END_SOLID),
    }
}

/// Intensity (`sin`) and stop position of one facet.
#[derive(Clone, Copy, Debug)]
struct Facet {
    intensity: f64,
    position: f64,
}

fn facets(count: u32, turn: impl Fn(u32) -> f64) -> Vec<Facet> {
    let midpoint = count as f64 / 2.0;
    (0..count)
        .map(|i| {
            let turn = turn(i);
            let cos = turn.cos().abs();
            let position = if i as f64 > midpoint {
                50.0 + 50.0 * cos
            } else {
                50.0 - 50.0 * cos
            };
            Facet {
                intensity: turn.sin(),
                position,
            }
        })
        .collect()
}

fn ramp(
    direction: RampDirection,
    facets: &[Facet],
    maximum: ColorComponents,
    end: ColorComponents,
) -> Ramp {
    let stops = facets
        .iter()
        .map(|facet| GradientStop {
            color: facet_color(facet.intensity, maximum),
            position: facet.position,
        })
        .chain(std::iter::once(GradientStop {
            color: end,
            position: 100.0,
        }))
        .collect();
    Ramp { direction, stops }
}

fn facet_channel(intensity: f64, maximum: u8) -> u8 {
    (intensity * maximum as f64).floor().clamp(0.0, 255.0) as u8
}

/// Scales every channel by the facet intensity; alpha is inverted so the
/// shade is lightest where the facet is brightest.
fn facet_color(intensity: f64, maximum: ColorComponents) -> ColorComponents {
    ColorComponents {
        r: facet_channel(intensity, maximum.r),
        g: facet_channel(intensity, maximum.g),
        b: facet_channel(intensity, maximum.b),
        a: maximum.a.map(|alpha| 255 - facet_channel(intensity, alpha)),
    }
}

fn resolve_base(input: Option<&str>) -> ColorComponents {
    let Some(input) = input else {
        return DEFAULT_BASE;
    };
    let color = ColorComponents::parse(input);
    if color.is_black() {
        log::info!("barrel color {input:?} is black or unreadable, using {DEFAULT_BASE}");
        DEFAULT_BASE
    } else {
        color
    }
}

fn resolve_translucent(
    role: &str,
    input: Option<&str>,
    default: ColorComponents,
) -> ColorComponents {
    let Some(input) = input else {
        return default;
    };
    let color = ColorComponents::parse(input);
    if color.has_visible_alpha() {
        color
    } else {
        log::info!("{role} color {input:?} has no visible alpha, using {default}");
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_faces_clamps() {
        assert_eq!(effective_faces(None), 2);
        assert_eq!(effective_faces(Some(0.0)), 2);
        assert_eq!(effective_faces(Some(f64::NAN)), 2);
        assert_eq!(effective_faces(Some(-4.0)), 2);
        assert_eq!(effective_faces(Some(7.4)), 7);
        assert_eq!(effective_faces(Some(999.0)), 20);
        assert_eq!(effective_faces(Some(f64::INFINITY)), 20);
    }

    #[test]
    fn test_facet_positions_are_symmetric() {
        let stops = facets(4, |i| PI / 4.0 * i as f64);
        let positions: Vec<String> = stops.iter().map(|f| format!("{:.1}", f.position)).collect();
        assert_eq!(positions, vec!["0.0", "14.6", "50.0", "85.4"]);
    }

    #[test]
    fn test_alpha_is_inverted() {
        let color = facet_color(1.0, ColorComponents::rgba(0, 0, 0, 255));
        assert_eq!(color.a, Some(0));
        let color = facet_color(0.0, ColorComponents::rgba(0, 0, 0, 255));
        assert_eq!(color.a, Some(255));
    }

    #[test]
    fn test_black_base_falls_back_to_gray() {
        assert_eq!(resolve_base(Some("#000")), DEFAULT_BASE);
        assert_eq!(resolve_base(Some("nonsense")), DEFAULT_BASE);
        assert_eq!(resolve_base(Some("#102030")), ColorComponents::rgb(16, 32, 48));
    }

    #[test]
    fn test_opaque_shadow_falls_back() {
        assert_eq!(
            resolve_translucent("shadow", Some("#333333"), DEFAULT_SHADOW),
            DEFAULT_SHADOW
        );
        assert_eq!(
            resolve_translucent("shadow", Some("#33333380"), DEFAULT_SHADOW),
            ColorComponents::rgba(0x33, 0x33, 0x33, 0x80)
        );
    }
}
