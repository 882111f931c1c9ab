//! Envelope for messages travelling from timers and the host to a band.
//!
//! The envelope records which band a message belongs to and what produced
//! it, so one channel can serve every band of a picker.

/// What produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Posted directly by the host.
    Host,
    /// A one-shot timer fired.
    Timer,
    /// A repeating interval ticked.
    Interval,
}

/// A message payload plus routing metadata.
#[derive(Debug, Clone)]
pub struct MessageEnvelope<M> {
    /// The actual message payload.
    pub message: M,

    /// Band the message is addressed to, if any.
    pub band_id: Option<String>,

    pub source: Source,
}

impl<M> MessageEnvelope<M> {
    pub fn new(message: M, band_id: Option<&str>, source: Source) -> Self {
        Self {
            message,
            band_id: band_id.map(String::from),
            source,
        }
    }

    /// Check whether this message is addressed to `band_id`.
    pub fn is_for(&self, band_id: &str) -> bool {
        self.band_id.as_deref() == Some(band_id)
    }

    /// Transform the message payload while preserving envelope metadata.
    pub fn map<N, F>(self, f: F) -> MessageEnvelope<N>
    where
        F: FnOnce(M) -> N,
    {
        MessageEnvelope {
            message: f(self.message),
            band_id: self.band_id,
            source: self.source,
        }
    }
}
