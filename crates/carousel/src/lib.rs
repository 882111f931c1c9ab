//! Rotating barrel bands: which items are visible at a given rotation, and
//! how presses on a band's edges turn into rotation over time.
//!
//! - [`window`] lays out the visible arc of a cyclic item list.
//! - [`controller`] runs the press, animate and auto-repeat cycle.
//! - [`context`] supplies timers through the [`Scheduler`] trait.

pub mod context;
pub mod controller;
pub mod gesture;
mod log_init;
pub mod message;
pub mod testing;
pub mod window;

pub use context::{Scheduler, TimerContext, TimerHandle};
pub use controller::{InteractionController, Tick, TickKind};
pub use gesture::{Edge, GestureFlags, PointerEvent, PointerKind, RampState};
pub use log_init::{init_logger, init_logger_with_level};
pub use message::{MessageEnvelope, Source};
pub use window::{CarouselState, SliceEntry, VisibleSlice, layout, normalize_offset};

// Re-export the log crate so hosts can use carousel::log::info!, etc.
pub use log;
