//! Timer scheduling for interaction controllers.
//!
//! Controllers never sleep. They ask a [`Scheduler`] to deliver a [`Tick`]
//! later and keep the returned handle; dropping the handle cancels the timer.
//!
//! [`TimerContext`] runs timers as tokio tasks that post into the same
//! unbounded channel the host reads pointer events from. Tests use
//! [`ManualScheduler`](crate::testing::ManualScheduler) instead.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::controller::Tick;
use crate::message::{MessageEnvelope, Source};

/// Deferred delivery of controller ticks.
pub trait Scheduler {
    /// Keeps the timer alive; dropping it cancels the timer.
    type Handle;

    fn set_timer(&self, delay: Duration, tick: Tick) -> Self::Handle;
}

/// Posts messages for one band into a shared channel.
///
/// Clone this context to share it with async tasks.
#[derive(Clone)]
pub struct TimerContext<M> {
    sender: mpsc::UnboundedSender<MessageEnvelope<M>>,
    band_id: Option<String>,
}

impl<M> TimerContext<M> {
    pub fn new(sender: mpsc::UnboundedSender<MessageEnvelope<M>>) -> Self {
        Self {
            sender,
            band_id: None,
        }
    }

    /// Create a context whose messages are addressed to `id`.
    pub fn with_band_id(mut self, id: impl Into<String>) -> Self {
        self.band_id = Some(id.into());
        self
    }

    pub fn band_id(&self) -> Option<&str> {
        self.band_id.as_deref()
    }

    /// Get a clone of the sender for use in async tasks.
    pub fn sender(&self) -> mpsc::UnboundedSender<MessageEnvelope<M>> {
        self.sender.clone()
    }

    fn envelope(&self, message: M, source: Source) -> MessageEnvelope<M> {
        MessageEnvelope::new(message, self.band_id.as_deref(), source)
    }
}

impl<M: Send + 'static> TimerContext<M> {
    /// Post a message to be processed in the next loop iteration.
    pub fn post(&self, message: M) {
        let _ = self.sender.send(self.envelope(message, Source::Host));
    }

    /// Deliver `message` once after `delay`.
    pub fn schedule(&self, delay: Duration, message: M) -> TimerHandle {
        let sender = self.sender.clone();
        let envelope = self.envelope(message, Source::Timer);

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(envelope);
        });

        TimerHandle { task: Some(task) }
    }

    /// Deliver a message produced by `message_fn` every `period`.
    ///
    /// The first message arrives after one full period.
    pub fn set_interval<F>(&self, period: Duration, message_fn: F) -> TimerHandle
    where
        F: Fn() -> M + Send + 'static,
    {
        let sender = self.sender.clone();
        let band_id = self.band_id.clone();

        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                ticker.tick().await;
                let envelope = MessageEnvelope::new(message_fn(), band_id.as_deref(), Source::Interval);
                if sender.send(envelope).is_err() {
                    break; // Receiver dropped
                }
            }
        });

        TimerHandle { task: Some(task) }
    }
}

impl<M> Scheduler for TimerContext<M>
where
    M: From<Tick> + Send + 'static,
{
    type Handle = TimerHandle;

    fn set_timer(&self, delay: Duration, tick: Tick) -> TimerHandle {
        self.schedule(delay, M::from(tick))
    }
}

/// Handle to a pending timer or running interval.
///
/// The timer is cancelled when this handle is dropped. A message already
/// sitting in the channel is not recalled; receivers discard it by
/// generation.
#[derive(Debug)]
pub struct TimerHandle {
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
