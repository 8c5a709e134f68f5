//! Inline event handler capture

use crate::identity::selector_for;
use crate::message::ListenerEntry;
use hoverwatch_dom::{Document, EventType, NodeId};

/// Inline `on<event>` handlers exposed by the node, in scan order
///
/// Listeners added through `addEventListener` are invisible here; only
/// the handler properties are inspected.
pub fn capture_inline_listeners(doc: &Document, node: NodeId) -> Vec<ListenerEntry> {
    if !doc.contains(node) {
        return Vec::new();
    }
    let element = selector_for(doc, Some(node));
    EventType::ALL
        .iter()
        .filter(|event| doc.has_inline_handler(node, **event))
        .map(|event| ListenerEntry {
            element: element.clone(),
            event_type: event.as_str().to_string(),
        })
        .collect()
}
