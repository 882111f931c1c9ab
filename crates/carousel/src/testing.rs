//! Deterministic drivers for interaction tests.
//!
//! [`ManualScheduler`] is a [`Scheduler`] on a virtual clock. Nothing fires
//! until the test advances the clock, and timers due at the same instant
//! fire in the order they were set.
//!
//! ```
//! use std::time::Duration;
//! use carousel::testing::ManualScheduler;
//! use carousel::{Edge, InteractionController, PointerEvent};
//!
//! let scheduler = ManualScheduler::new();
//! let mut controller = InteractionController::new(scheduler.clone(), 0.0);
//!
//! controller.handle_pointer(PointerEvent::mouse_down(Edge::Bottom));
//! controller.handle_pointer(PointerEvent::Release);
//! scheduler.advance(&mut controller, Duration::from_millis(800));
//!
//! assert_eq!(controller.offset(), 1.0);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::context::Scheduler;
use crate::controller::{InteractionController, Tick};

/// Counts events inside one test.
#[derive(Debug, Default)]
pub struct DiagnosticCounter {
    count: Cell<u64>,
}

impl DiagnosticCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&self) {
        self.count.set(self.count.get() + 1);
    }

    pub fn get(&self) -> u64 {
        self.count.get()
    }

    pub fn reset(&self) {
        self.count.set(0);
    }
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), Tick>,
    scheduled: DiagnosticCounter,
    fired: DiagnosticCounter,
}

/// A [`Scheduler`] driven by the test instead of wall time.
///
/// Clones share one clock, so a test keeps a clone while the controller owns
/// the other.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

/// Pending timer on a [`ManualScheduler`]; dropping it unschedules the tick.
pub struct ManualHandle {
    key: (Duration, u64),
    clock: Weak<RefCell<Clock>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(clock) = self.clock.upgrade() {
            clock.borrow_mut().pending.remove(&self.key);
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn set_timer(&self, delay: Duration, tick: Tick) -> ManualHandle {
        let mut clock = self.clock.borrow_mut();
        let key = (clock.now + delay, clock.next_seq);
        clock.next_seq += 1;
        clock.pending.insert(key, tick);
        clock.scheduled.bump();

        ManualHandle {
            key,
            clock: Rc::downgrade(&self.clock),
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Timers set and not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.clock.borrow().pending.keys().next().map(|(due, _)| *due)
    }

    /// Timers set so far, including cancelled ones.
    pub fn scheduled_count(&self) -> u64 {
        self.clock.borrow().scheduled.get()
    }

    pub fn fired_count(&self) -> u64 {
        self.clock.borrow().fired.get()
    }

    /// Remove the earliest tick due at or before `deadline` and move the
    /// clock to its due time.
    pub fn pop_due(&self, deadline: Duration) -> Option<Tick> {
        let mut clock = self.clock.borrow_mut();
        let (&key, _) = clock.pending.iter().next()?;
        if key.0 > deadline {
            return None;
        }
        let tick = clock.pending.remove(&key)?;
        clock.now = key.0;
        clock.fired.bump();
        Some(tick)
    }

    /// Fire every tick due up to `deadline` into `controller`, then set the
    /// clock to `deadline`.
    ///
    /// Returns each offset change with the virtual time it happened at.
    pub fn run_until(
        &self,
        controller: &mut InteractionController<ManualScheduler>,
        deadline: Duration,
    ) -> Vec<(Duration, f64)> {
        let mut changes = Vec::new();
        while let Some(tick) = self.pop_due(deadline) {
            if let Some(offset) = controller.handle_tick(tick) {
                changes.push((self.now(), offset));
            }
        }
        let mut clock = self.clock.borrow_mut();
        clock.now = clock.now.max(deadline);
        changes
    }

    /// [`run_until`](Self::run_until) `by` past the current time.
    pub fn advance(
        &self,
        controller: &mut InteractionController<ManualScheduler>,
        by: Duration,
    ) -> Vec<(Duration, f64)> {
        let deadline = self.now() + by;
        self.run_until(controller, deadline)
    }
}
