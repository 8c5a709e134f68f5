//! Inspected-page context
//!
//! Everything that runs inside the inspected page: the document, the
//! identity side table, the element monitor, the attribute observer and the
//! outbound queue. The panel only reaches it through a bridge.

use crate::attributes::AttributeObserver;
use crate::channel::OutboundQueue;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::identity::{ElementIdentity, IdentityTable, selector_for};
use crate::message::{HoverKind, Message};
use crate::monitor::ElementMonitor;
use hoverwatch_dom::{Document, ListenerId, NodeId};
use serde::{Deserialize, Serialize};

/// Listener handle the monitor registers its hover listeners under
const MONITOR_LISTENER: ListenerId = ListenerId(0x4857);

/// What the host reports as the inspected element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionInfo {
    pub id: ElementIdentity,
    pub selector: String,
    pub tag_name: String,
}

/// State of one inspected page
pub struct PageContext {
    document: Document,
    ids: IdentityTable,
    monitor: ElementMonitor,
    queue: OutboundQueue,
    attributes: Option<AttributeObserver>,
    inspected: Option<NodeId>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for PageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageContext")
            .field("injected", &self.is_injected())
            .field("inspected", &self.inspected)
            .field("monitor", &self.monitor.state())
            .field("queued", &self.queue.len())
            .finish()
    }
}

impl PageContext {
    /// Page context on the wall clock
    pub fn new(document: Document, config: &Config) -> Self {
        Self::with_clock(document, config, SystemClock)
    }

    /// Page context reading time from `clock`
    pub fn with_clock(document: Document, config: &Config, clock: impl Clock + 'static) -> Self {
        Self {
            document,
            ids: IdentityTable::new(),
            monitor: ElementMonitor::new(MONITOR_LISTENER, config.debounce),
            queue: OutboundQueue::new(config.queue_warn_threshold),
            attributes: None,
            inspected: None,
            clock: Box::new(clock),
        }
    }

    /// Read access to the page document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for page scripts
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The hover monitor
    pub fn monitor(&self) -> &ElementMonitor {
        &self.monitor
    }

    /// Whether the content script is installed
    pub fn is_injected(&self) -> bool {
        self.attributes.is_some()
    }

    /// Install the monitoring hooks; later calls are no-ops returning false
    pub fn inject(&mut self) -> bool {
        if self.is_injected() {
            return false;
        }
        self.attributes = Some(AttributeObserver::subscribe(&mut self.document));
        self.queue.enqueue(Message::debug(
            "Content script initialized, waiting for element selection...",
        ));
        tracing::info!("Content script injected");
        true
    }

    /// The host inspector changed its inspected element
    pub fn set_inspected(&mut self, node: Option<NodeId>) {
        self.inspected = node;
    }

    /// Node the host currently inspects
    pub fn inspected(&self) -> Option<NodeId> {
        self.inspected
    }

    /// Identity, selector and tag of the inspected element
    ///
    /// Assigns an identity to the element if it has none yet.
    pub fn inspected_selection(&mut self) -> Option<SelectionInfo> {
        let node = self.inspected?;
        let element = self.document.get(node)?;
        let tag_name = element.tag_name();
        Some(SelectionInfo {
            id: self.ids.identity_for(node),
            selector: selector_for(&self.document, Some(node)),
            tag_name,
        })
    }

    /// Arm the monitor on the inspected element
    pub fn select_inspected(&mut self) -> bool {
        match self.inspected {
            Some(node) => self.select(node),
            None => false,
        }
    }

    /// Arm the monitor on `node`; false when not injected or already armed there
    pub fn select(&mut self, node: NodeId) -> bool {
        if !self.is_injected() {
            return false;
        }
        // Records queued so far belong to the element armed when they happened
        self.deliver_mutations();
        self.monitor
            .select(&mut self.document, &mut self.ids, node, &mut self.queue)
    }

    /// Dispatch a hover event at `node`, as the browser would
    ///
    /// Returns whether a monitor listener was bound there.
    pub fn dispatch_hover(&mut self, node: NodeId, kind: HoverKind) -> bool {
        let bound = self
            .document
            .listeners(node, kind.event_type())
            .contains(&self.monitor.listener());
        if !bound {
            return false;
        }
        let now = self.clock.now_ms();
        self.monitor.on_hover(&self.document, node, kind, now)
    }

    /// Deliver pending mutation records and fire due debounce timers
    pub fn pump(&mut self) {
        self.deliver_mutations();
        let now = self.clock.now_ms();
        self.monitor.fire_due(&self.document, &mut self.queue, now);
    }

    /// Report pending attribute mutations against the currently armed element
    fn deliver_mutations(&mut self) -> usize {
        match &self.attributes {
            Some(observer) => observer.process(
                &mut self.document,
                &self.ids,
                self.monitor.armed_identity(),
                &mut self.queue,
            ),
            None => 0,
        }
    }

    /// Milliseconds until the next debounce timer fires
    pub fn time_until_next(&self) -> Option<u64> {
        self.monitor.time_until_next(self.clock.now_ms())
    }

    /// Take-all-and-clear drain of the outbound queue
    pub fn drain_messages(&mut self) -> Vec<Message> {
        self.queue.drain()
    }

    /// Number of messages waiting for the panel
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Queue a message from page code (the content script's `sendMessage`)
    pub fn enqueue(&mut self, message: Message) {
        self.queue.enqueue(message);
    }
}

impl Drop for PageContext {
    fn drop(&mut self) {
        if let Some(observer) = self.attributes.take() {
            observer.disconnect(&mut self.document);
        }
        tracing::debug!("Page context torn down with {} undrained messages", self.queue.len());
    }
}
