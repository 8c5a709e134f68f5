//! Element Monitor
//!
//! Tracks the single selected element. Selecting a new element re-binds
//! the hover listeners and resets the class snapshot; hover events schedule
//! a debounced capture that diffs class and style snapshots against the
//! stored ones and queues the results.

use crate::channel::OutboundQueue;
use crate::class_diff::{ClassSnapshot, diff_classes, snapshot_classes};
use crate::identity::{ElementIdentity, IdentityTable, selector_for};
use crate::listeners::capture_inline_listeners;
use crate::message::{
    ClassChangeData, ElementSelectedData, EventListenersData, HoverKind, Message, StyleChangeData,
};
use crate::style_diff::{StyleSnapshot, diff_style, snapshot_style};
use crate::timers::{DebounceTimers, PendingCapture};
use hoverwatch_dom::{Document, ListenerId, NodeId};
use std::collections::HashMap;
use std::time::Duration;

const HOVER_EVENTS: [HoverKind; 2] = [HoverKind::MouseEnter, HoverKind::MouseLeave];

/// The element under observation with its last-known snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredElement {
    pub node: NodeId,
    pub identity: ElementIdentity,
    pub classes: ClassSnapshot,
    pub style: StyleSnapshot,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MonitorState {
    #[default]
    Unarmed,
    Armed(MonitoredElement),
}

#[derive(Debug)]
pub struct ElementMonitor {
    state: MonitorState,
    listener: ListenerId,
    debounce_ms: u64,
    timers: DebounceTimers,
    /// Last style snapshot per identity, restored when an element is re-selected
    styles: HashMap<ElementIdentity, StyleSnapshot>,
}

impl ElementMonitor {
    /// Monitor whose hover listeners are registered under `listener`
    pub fn new(listener: ListenerId, debounce: Duration) -> Self {
        Self {
            state: MonitorState::Unarmed,
            listener,
            debounce_ms: debounce.as_millis() as u64,
            timers: DebounceTimers::new(),
            styles: HashMap::new(),
        }
    }

    /// Current arming state
    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// The monitored element, if armed
    pub fn armed(&self) -> Option<&MonitoredElement> {
        match &self.state {
            MonitorState::Armed(element) => Some(element),
            MonitorState::Unarmed => None,
        }
    }

    /// Identity of the monitored element, if armed
    pub fn armed_identity(&self) -> Option<&ElementIdentity> {
        self.armed().map(|e| &e.identity)
    }

    /// Handle the hover listeners are registered under
    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    /// Number of scheduled captures
    pub fn pending_captures(&self) -> usize {
        self.timers.len()
    }

    /// Milliseconds until the next capture is due
    pub fn time_until_next(&self, now_ms: u64) -> Option<u64> {
        self.timers.time_until_next(now_ms)
    }

    /// Arm on `node` unless it is already the monitored element
    ///
    /// Returns whether the monitor was (re)armed.
    pub fn select(
        &mut self,
        doc: &mut Document,
        ids: &mut IdentityTable,
        node: NodeId,
        queue: &mut OutboundQueue,
    ) -> bool {
        let identity = ids.identity_for(node);
        if self.armed_identity() == Some(&identity) {
            return false;
        }

        if let MonitorState::Armed(old) = std::mem::take(&mut self.state) {
            for kind in HOVER_EVENTS {
                doc.remove_event_listener(old.node, kind.event_type(), self.listener);
            }
            let cancelled = self.timers.cancel_for(&old.identity);
            if cancelled > 0 {
                tracing::debug!("Cancelled {} pending captures for {}", cancelled, old.identity);
            }
            self.styles.insert(old.identity, old.style);
        }

        let classes = snapshot_classes(doc, node);
        let style = self.styles.get(&identity).cloned().unwrap_or_default();
        for kind in HOVER_EVENTS {
            doc.add_event_listener(node, kind.event_type(), self.listener);
        }

        let selector = selector_for(doc, Some(node));
        tracing::info!("Monitoring element: {}", selector);
        self.state = MonitorState::Armed(MonitoredElement { node, identity, classes, style });

        queue.enqueue(Message::ElementSelected(ElementSelectedData { selector }));

        let events = capture_inline_listeners(doc, node);
        if !events.is_empty() {
            queue.enqueue(Message::EventListeners(EventListenersData { events }));
        }
        true
    }

    /// A hover listener fired on `node`; schedule the delayed capture
    pub fn on_hover(&mut self, doc: &Document, node: NodeId, kind: HoverKind, now_ms: u64) -> bool {
        let Some(armed) = self.armed() else {
            return false;
        };
        if armed.node != node {
            return false;
        }
        tracing::debug!("{} on {}", kind.as_str(), selector_for(doc, Some(node)));

        let identity = armed.identity.clone();
        self.timers.schedule(identity, node, kind, now_ms + self.debounce_ms);
        true
    }

    /// Run every capture whose debounce has elapsed, returns how many ran
    pub fn fire_due(&mut self, doc: &Document, queue: &mut OutboundQueue, now_ms: u64) -> usize {
        let mut fired = 0;
        for capture in self.timers.take_due(now_ms) {
            if self.armed_identity() != Some(&capture.identity) {
                tracing::debug!("Discarding stale capture for {}", capture.identity);
                continue;
            }
            self.capture(doc, &capture, queue);
            fired += 1;
        }
        fired
    }

    fn capture(&mut self, doc: &Document, capture: &PendingCapture, queue: &mut OutboundQueue) {
        let MonitorState::Armed(armed) = &mut self.state else {
            return;
        };

        let classes = snapshot_classes(doc, capture.node);
        let style = snapshot_style(doc, capture.node);
        let element = selector_for(doc, Some(capture.node));

        let class_diff = diff_classes(&armed.classes, &classes);
        tracing::debug!(
            "{} {}: added {:?}, removed {:?}",
            element,
            capture.kind.as_str(),
            class_diff.added,
            class_diff.removed
        );

        // Sent even when nothing changed
        queue.enqueue(Message::ClassChange(ClassChangeData {
            element: element.clone(),
            event_type: capture.kind,
            added: class_diff.added,
            removed: class_diff.removed,
            current: class_diff.current,
        }));

        let changes = diff_style(&armed.style, &style);
        if !changes.is_empty() {
            queue.enqueue(Message::StyleChange(StyleChangeData {
                element,
                event_type: capture.kind,
                changes,
            }));
        }

        armed.classes = classes;
        armed.style = style;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_diff::TRACKED_PROPERTIES;

    const LISTENER: ListenerId = ListenerId(7);

    struct Fixture {
        doc: Document,
        ids: IdentityTable,
        queue: OutboundQueue,
        monitor: ElementMonitor,
    }

    fn fixture() -> (Fixture, NodeId, NodeId) {
        let mut doc = Document::new();
        let a = doc.create_element("button");
        let b = doc.create_element("span");
        doc.append_child(doc.root(), a).unwrap();
        doc.append_child(doc.root(), b).unwrap();
        for node in [a, b] {
            for prop in TRACKED_PROPERTIES {
                doc.set_computed_style(node, prop, "x").unwrap();
            }
        }
        let fx = Fixture {
            doc,
            ids: IdentityTable::new(),
            queue: OutboundQueue::default(),
            monitor: ElementMonitor::new(LISTENER, Duration::from_millis(50)),
        };
        (fx, a, b)
    }

    #[test]
    fn test_select_is_idempotent() {
        let (mut fx, a, _) = fixture();
        assert!(fx.monitor.select(&mut fx.doc, &mut fx.ids, a, &mut fx.queue));
        assert!(!fx.monitor.select(&mut fx.doc, &mut fx.ids, a, &mut fx.queue));

        let selected = fx
            .queue
            .drain()
            .into_iter()
            .filter(|m| matches!(m, Message::ElementSelected(_)))
            .count();
        assert_eq!(selected, 1);
    }

    #[test]
    fn test_reselect_moves_listeners() {
        let (mut fx, a, b) = fixture();
        fx.monitor.select(&mut fx.doc, &mut fx.ids, a, &mut fx.queue);
        fx.monitor.select(&mut fx.doc, &mut fx.ids, b, &mut fx.queue);

        assert!(fx.doc.listeners(a, hoverwatch_dom::EventType::MouseEnter).is_empty());
        assert_eq!(fx.doc.listeners(b, hoverwatch_dom::EventType::MouseLeave), vec![LISTENER]);
        assert_eq!(fx.monitor.armed().unwrap().node, b);
    }

    #[test]
    fn test_capture_waits_for_debounce() {
        let (mut fx, a, _) = fixture();
        fx.doc.set_class_name(a, "a b").unwrap();
        fx.monitor.select(&mut fx.doc, &mut fx.ids, a, &mut fx.queue);
        fx.queue.drain();

        assert!(fx.monitor.on_hover(&fx.doc, a, HoverKind::MouseEnter, 1_000));
        fx.doc.set_class_name(a, "a c").unwrap();

        assert_eq!(fx.monitor.fire_due(&fx.doc, &mut fx.queue, 1_049), 0);
        assert_eq!(fx.monitor.fire_due(&fx.doc, &mut fx.queue, 1_050), 1);

        let batch = fx.queue.drain();
        let Message::ClassChange(change) = &batch[0] else {
            panic!("expected class change, got {:?}", batch[0]);
        };
        assert_eq!(change.added, vec!["c".to_string()]);
        assert_eq!(change.removed, vec!["b".to_string()]);
        assert_eq!(fx.monitor.armed().unwrap().classes, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_stale_capture_is_discarded() {
        let (mut fx, a, b) = fixture();
        fx.monitor.select(&mut fx.doc, &mut fx.ids, a, &mut fx.queue);
        fx.monitor.on_hover(&fx.doc, a, HoverKind::MouseEnter, 0);
        fx.monitor.select(&mut fx.doc, &mut fx.ids, b, &mut fx.queue);
        fx.queue.drain();

        assert_eq!(fx.monitor.pending_captures(), 0);
        assert_eq!(fx.monitor.fire_due(&fx.doc, &mut fx.queue, 100), 0);
        assert!(fx.queue.is_empty());
    }

    #[test]
    fn test_hover_ignored_when_unarmed_or_elsewhere() {
        let (mut fx, a, b) = fixture();
        assert!(!fx.monitor.on_hover(&fx.doc, a, HoverKind::MouseEnter, 0));

        fx.monitor.select(&mut fx.doc, &mut fx.ids, a, &mut fx.queue);
        assert!(!fx.monitor.on_hover(&fx.doc, b, HoverKind::MouseEnter, 0));
    }

    #[test]
    fn test_style_snapshot_survives_reselection() {
        let (mut fx, a, b) = fixture();
        fx.monitor.select(&mut fx.doc, &mut fx.ids, a, &mut fx.queue);
        fx.monitor.on_hover(&fx.doc, a, HoverKind::MouseEnter, 0);
        fx.monitor.fire_due(&fx.doc, &mut fx.queue, 50);

        fx.monitor.select(&mut fx.doc, &mut fx.ids, b, &mut fx.queue);
        fx.monitor.select(&mut fx.doc, &mut fx.ids, a, &mut fx.queue);
        fx.queue.drain();

        fx.monitor.on_hover(&fx.doc, a, HoverKind::MouseLeave, 100);
        fx.monitor.fire_due(&fx.doc, &mut fx.queue, 150);

        let batch = fx.queue.drain();
        assert_eq!(batch.len(), 1, "unchanged style must not be reported: {batch:?}");
        assert!(matches!(batch[0], Message::ClassChange(_)));
    }
}
