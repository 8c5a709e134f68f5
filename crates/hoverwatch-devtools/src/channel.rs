//! Outbound message queue
//!
//! The page context appends; the panel drains the whole queue in one swap
//! on every poll. There is no backpressure: volume is bounded by what the
//! user does with the mouse.

use crate::error::Result;
use crate::message::Message;

#[derive(Debug)]
pub struct OutboundQueue {
    messages: Vec<Message>,
    warn_threshold: usize,
    warned: bool,
}

impl Default for OutboundQueue {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl OutboundQueue {
    /// Queue that logs once when its length passes `warn_threshold`
    pub fn new(warn_threshold: usize) -> Self {
        Self {
            messages: Vec::new(),
            warn_threshold,
            warned: false,
        }
    }

    /// Append a message; never blocks, never drops
    pub fn enqueue(&mut self, message: Message) {
        tracing::trace!("Enqueue {}", message.kind());
        self.messages.push(message);

        if !self.warned && self.messages.len() > self.warn_threshold {
            self.warned = true;
            tracing::warn!(
                "Outbound queue holds {} undrained messages; is the panel paused?",
                self.messages.len()
            );
        }
    }

    /// Take every queued message and leave the queue empty
    pub fn drain(&mut self) -> Vec<Message> {
        self.warned = false;
        std::mem::take(&mut self.messages)
    }

    /// Number of undrained messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether nothing is waiting for the panel
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Serialize a drained batch for the trip across the bridge
pub fn encode_batch(batch: &[Message]) -> Result<String> {
    Ok(serde_json::to_string(batch)?)
}

/// Parse a batch produced by [`encode_batch`]
pub fn decode_batch(wire: &str) -> Result<Vec<Message>> {
    Ok(serde_json::from_str(wire)?)
}
