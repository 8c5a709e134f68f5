//! Monitor Configuration

use std::time::Duration;

/// Timing and sizing knobs shared by the page and panel contexts
#[derive(Debug, Clone)]
pub struct Config {
    /// Delay between a hover event and the snapshot capture
    pub debounce: Duration,

    /// Cadence of the panel's message drain
    pub message_poll_interval: Duration,

    /// Cadence of the panel's "what is inspected" query
    pub selection_poll_interval: Duration,

    /// Number of latest records the panel shows per category
    pub display_window: usize,

    /// Queue length above which the page warns about an undrained backlog
    pub queue_warn_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(50),
            message_poll_interval: Duration::from_millis(100),
            selection_poll_interval: Duration::from_millis(500),
            display_window: 50,
            queue_warn_threshold: 1000,
        }
    }
}

impl Config {
    /// Set the hover capture delay
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the message and selection poll cadences
    pub fn with_poll_intervals(mut self, messages: Duration, selection: Duration) -> Self {
        self.message_poll_interval = messages;
        self.selection_poll_interval = selection;
        self
    }

    /// Set how many recent records the views return
    pub fn with_display_window(mut self, window: usize) -> Self {
        self.display_window = window;
        self
    }

    /// Set the queue length that triggers the backlog warning
    pub fn with_queue_warn_threshold(mut self, threshold: usize) -> Self {
        self.queue_warn_threshold = threshold;
        self
    }

    /// How many message ticks make up one selection tick (at least 1)
    pub fn selection_every(&self) -> u64 {
        let messages = self.message_poll_interval.as_millis().max(1);
        (self.selection_poll_interval.as_millis() / messages).max(1) as u64
    }
}
