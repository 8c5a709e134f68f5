//! Debounce timers
//!
//! One-shot timers that delay a hover capture until the page's own hover
//! side effects have settled. Each timer is keyed by the identity of the
//! element it was scheduled for so a re-selection can cancel it.

use crate::identity::ElementIdentity;
use crate::message::HoverKind;
use hoverwatch_dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

/// A scheduled capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCapture {
    pub id: TimerId,
    pub identity: ElementIdentity,
    pub node: NodeId,
    pub kind: HoverKind,
    pub due_ms: u64,
}

#[derive(Debug, Default)]
pub struct DebounceTimers {
    next_id: u32,
    pending: Vec<PendingCapture>,
}

impl DebounceTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a capture of `node` at `due_ms`
    pub fn schedule(&mut self, identity: ElementIdentity, node: NodeId, kind: HoverKind, due_ms: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingCapture { id, identity, node, kind, due_ms });
        id
    }

    /// Cancel every timer scheduled for `identity`, returns how many
    pub fn cancel_for(&mut self, identity: &ElementIdentity) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| &t.identity != identity);
        before - self.pending.len()
    }

    /// Remove and return the timers due at `now_ms`, in firing order
    pub fn take_due(&mut self, now_ms: u64) -> Vec<PendingCapture> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due_ms <= now_ms);
        self.pending = rest;
        due.sort_by_key(|t| (t.due_ms, t.id));
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Milliseconds until the next timer fires
    pub fn time_until_next(&self, now_ms: u64) -> Option<u64> {
        self.pending
            .iter()
            .map(|t| t.due_ms.saturating_sub(now_ms))
            .min()
    }
}
