//! # Shade - cylinder shading for barrel pickers
//!
//! Converts host-supplied color strings into the gradient ramps that make a
//! flat band look like a lit, rotating cylinder.
//!
//! - **Parsing**: [`ColorComponents::parse`] reads hex, `rgb()` and `hsl()`
//!   strings and never fails; unreadable input becomes the zero color.
//! - **Synthesis**: [`synthesize`] turns a base, shadow, hover and press color
//!   plus a facet count into a [`GradientSpec`].
//! - **Lengths**: [`length::is_valid_css_length`] checks font sizes such as
//!   `4vmin` before they are handed to a renderer.
//!
//! ## Quick Start
//!
//! ```rust
//! use shade::{ShadeInputs, synthesize};
//!
//! let gradients = synthesize(
//!     &ShadeInputs::new()
//!         .with_base("hsl(210, 40%, 60%)")
//!         .with_shadow("#000000ff")
//!         .with_faces(6.0),
//! );
//!
//! // One stop per facet plus the closing black stop.
//! assert_eq!(gradients.barrel.stops.len(), 7);
//! assert!(gradients.shadow.to_string().starts_with("linear-gradient(0deg"));
//! ```
//!
//! ## Modules
//!
//! - [`color`]: color components and the string parser
//! - [`gradient`]: facet ramps and the [`GradientSpec`] they form
//! - [`length`]: CSS length validation
//! - [`error`]: diagnostics behind the fallbacks

pub mod color;
pub mod error;
pub mod gradient;
pub mod length;

pub use color::ColorComponents;
pub use error::{ColorParseError, LengthParseError};
pub use gradient::{
    GradientSpec, GradientStop, Highlight, Ramp, RampDirection, Rim, ShadeInputs, synthesize,
};
