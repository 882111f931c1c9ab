//! Press-and-hold interaction for one band.
//!
//! A press on an edge moves the band one whole item. The move is animated as
//! [`SUB_STEPS`] equal increments spread over [`ANIMATION`], after which the
//! offset snaps to the whole-number target. Holding the press past
//! [`START_AUTO`] starts an auto-repeat of whole steps whose delay starts at
//! [`START_RATE`] and shrinks by [`REDUCE_BY`] each step down to
//! [`MIN_DELAY`].
//!
//! ```text
//! Idle --press--> Pressed + Scrolling --20th sub-step--> Pressed
//!   ^                  |                                    |
//!   |               release                           repeat ticks
//!   |                  v                                    |
//!   +------------- Scrolling only <------------------- release
//! ```
//!
//! The controller only owns the offset while a gesture is running; in between,
//! the host may set it freely (ambient rotation, restoring a value).

use std::time::Duration;

use crate::context::Scheduler;
use crate::gesture::{Edge, GestureFlags, PointerEvent, PointerKind, RampState};

/// Duration of the single-step animation.
pub const ANIMATION: Duration = Duration::from_millis(800);
/// Hold time before auto-repeat starts.
pub const START_AUTO: Duration = Duration::from_millis(1000);
/// Repeat delay before the first reduction.
pub const START_RATE: Duration = Duration::from_millis(500);
/// Floor for the repeat delay.
pub const MIN_DELAY: Duration = Duration::from_millis(100);
/// Factor applied to the repeat delay after every repeat.
pub const REDUCE_BY: f64 = 0.8;
/// Increments per animated step.
pub const SUB_STEPS: u32 = 20;

/// Delay between two animation increments.
pub const SUB_STEP_DELAY: Duration = Duration::from_millis(800 / SUB_STEPS as u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    SubStep,
    Repeat,
}

/// A deferred controller event.
///
/// Carries the generation of the gesture that scheduled it so that ticks
/// outliving their gesture are recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
    pub kind: TickKind,
}

/// Next repeat delay, kept on whole microseconds.
fn reduce(rate: Duration) -> Duration {
    let micros = (rate.as_micros() as f64 * REDUCE_BY).round() as u64;
    Duration::from_micros(micros).max(MIN_DELAY)
}

struct Gesture<H> {
    edge: Edge,
    kind: PointerKind,
    direction: f64,
    target: f64,
    sub_step: u32,
    rate: Duration,
    step_timer: Option<H>,
    repeat_timer: Option<H>,
}

/// Turns pointer events and ticks into offset changes for one band.
pub struct InteractionController<S: Scheduler> {
    scheduler: S,
    offset: f64,
    sign: f64,
    flags: GestureFlags,
    gesture: Option<Gesture<S::Handle>>,
    generation: u64,
}

impl<S: Scheduler> InteractionController<S> {
    pub fn new(scheduler: S, offset: f64) -> Self {
        Self {
            scheduler,
            offset,
            sign: 1.0,
            flags: GestureFlags::empty(),
            gesture: None,
            generation: 0,
        }
    }

    /// Multiply every step by `sign`, e.g. `-1.0` for a band that counts
    /// downward when its bottom edge is pressed.
    pub fn with_sign(mut self, sign: f64) -> Self {
        self.sign = if sign < 0.0 { -1.0 } else { 1.0 };
        self
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn sign(&self) -> f64 {
        self.sign
    }

    pub fn flags(&self) -> GestureFlags {
        self.flags
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// True from a press until both the press and its animation are over.
    pub fn is_busy(&self) -> bool {
        self.gesture.is_some()
    }

    /// Replace the offset from outside. Ignored while a gesture owns it.
    pub fn set_offset(&mut self, offset: f64) -> bool {
        if self.is_busy() {
            log::trace!("offset {offset} ignored during gesture");
            return false;
        }
        self.offset = offset;
        true
    }

    /// Highlight to show on `edge`.
    pub fn ramp_state(&self, edge: Edge) -> RampState {
        if !self.is_hovering(edge) {
            return RampState::None;
        }
        match &self.gesture {
            Some(gesture) if gesture.edge == edge && self.flags.contains(GestureFlags::PRESSED) => {
                RampState::Press
            }
            _ => RampState::Hover,
        }
    }

    /// Apply a pointer event. Returns the new offset if it changed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<f64> {
        match event {
            PointerEvent::Enter(edge) => {
                self.flags.insert(GestureFlags::hover(edge));
                None
            }
            PointerEvent::Leave(edge) => {
                self.flags.remove(GestureFlags::hover(edge));
                None
            }
            PointerEvent::Press { edge, kind } => self.press(edge, kind),
            PointerEvent::Release => {
                self.release();
                None
            }
        }
    }

    /// Apply a fired timer. Returns the new offset if it changed.
    pub fn handle_tick(&mut self, tick: Tick) -> Option<f64> {
        if tick.generation != self.generation || self.gesture.is_none() {
            log::trace!("stale {:?} tick dropped", tick.kind);
            return None;
        }
        match tick.kind {
            TickKind::SubStep => self.sub_step(),
            TickKind::Repeat => self.repeat(),
        }
    }

    fn is_hovering(&self, edge: Edge) -> bool {
        let touching = self
            .gesture
            .as_ref()
            .is_some_and(|gesture| gesture.edge == edge && gesture.kind == PointerKind::Touch);
        touching || self.flags.contains(GestureFlags::hover(edge))
    }

    fn press(&mut self, edge: Edge, kind: PointerKind) -> Option<f64> {
        if self.is_busy() {
            log::trace!("press on {edge:?} ignored, band busy");
            return None;
        }

        self.generation += 1;
        let generation = self.generation;
        let direction = edge.step() * self.sign;

        let step_timer = self.scheduler.set_timer(
            SUB_STEP_DELAY,
            Tick {
                generation,
                kind: TickKind::SubStep,
            },
        );
        let repeat_timer = self.scheduler.set_timer(
            START_AUTO,
            Tick {
                generation,
                kind: TickKind::Repeat,
            },
        );

        self.gesture = Some(Gesture {
            edge,
            kind,
            direction,
            target: (self.offset + direction).round(),
            sub_step: 1,
            rate: START_RATE,
            step_timer: Some(step_timer),
            repeat_timer: Some(repeat_timer),
        });
        self.flags.insert(GestureFlags::PRESSED | GestureFlags::SCROLLING);
        log::trace!("press on {edge:?} ({kind:?}), generation {generation}");

        self.offset += direction / SUB_STEPS as f64;
        Some(self.offset)
    }

    fn release(&mut self) {
        self.flags.remove(GestureFlags::PRESSED);
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.repeat_timer = None;
            log::trace!("release, generation {}", self.generation);
        }
        self.finish_if_idle();
    }

    fn sub_step(&mut self) -> Option<f64> {
        let generation = self.generation;
        let gesture = self.gesture.as_mut()?;
        if !self.flags.contains(GestureFlags::SCROLLING) {
            return None;
        }

        gesture.sub_step += 1;
        if gesture.sub_step >= SUB_STEPS {
            gesture.step_timer = None;
            self.offset = gesture.target;
            self.flags.remove(GestureFlags::SCROLLING);
            let offset = self.offset;
            self.finish_if_idle();
            return Some(offset);
        }

        self.offset += gesture.direction / SUB_STEPS as f64;
        gesture.step_timer = Some(self.scheduler.set_timer(
            SUB_STEP_DELAY,
            Tick {
                generation,
                kind: TickKind::SubStep,
            },
        ));
        Some(self.offset)
    }

    fn repeat(&mut self) -> Option<f64> {
        let generation = self.generation;
        let pressed = self.flags.contains(GestureFlags::PRESSED);
        let edge = self.gesture.as_ref()?.edge;
        let hovering = self.is_hovering(edge);
        let gesture = self.gesture.as_mut()?;

        if !(pressed && hovering) {
            log::trace!("auto-repeat stopped, pointer left {edge:?}");
            gesture.repeat_timer = None;
            return None;
        }

        // A whole step supersedes any animation still in flight.
        gesture.step_timer = None;
        self.flags.remove(GestureFlags::SCROLLING);

        gesture.target = (gesture.target + gesture.direction).round();
        self.offset = gesture.target;
        gesture.rate = reduce(gesture.rate);
        gesture.repeat_timer = Some(self.scheduler.set_timer(
            gesture.rate,
            Tick {
                generation,
                kind: TickKind::Repeat,
            },
        ));
        log::trace!("auto-repeat to {}, next in {:?}", self.offset, gesture.rate);
        Some(self.offset)
    }

    fn finish_if_idle(&mut self) {
        if self.gesture.is_some() && !self.flags.is_busy() {
            log::trace!("gesture {} finished at {}", self.generation, self.offset);
            self.gesture = None;
        }
    }
}
