//! A rotating barrel time picker.
//!
//! Weekday, hour and minute bands spin like cylinders; pressing the top or
//! bottom edge of a band turns it one step, holding turns it faster and
//! faster. This crate wires the [`shade`] gradients and the [`carousel`]
//! bands into a [`TimePicker`] a host can render.
//!
//! ```no_run
//! use barrel_picker::{PickerConfig, TimePicker, channel};
//! use shade::ShadeInputs;
//!
//! let (sender, _receiver) = channel();
//! let config = PickerConfig::new()
//!     .with_weekdays(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"])
//!     .with_minutes_interval(5.0)
//!     .with_colors(ShadeInputs::new().with_base("#406080"));
//! let picker = TimePicker::new(&config, sender);
//!
//! for band in picker.bands() {
//!     let slice = band.layout();
//!     println!("{}: {:?}", band.role(), slice.anchor().map(|entry| entry.item));
//! }
//! ```

pub mod band;
pub mod config;
pub mod error;
pub mod measure;
pub mod picker;

pub use band::{Alignment, BandRole};
pub use config::{BandConfig, BandSettings, DisplayEntry, PickerConfig, PickerSettings};
pub use error::{PickerError, Result};
pub use picker::{
    BandChange, PickerBand, PickerMessage, PointerInput, Selection, TimePicker, channel,
};

pub use carousel;
pub use shade;
