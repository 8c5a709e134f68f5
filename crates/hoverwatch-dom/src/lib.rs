//! Hoverwatch DOM
//!
//! The inspected page as seen by the hover monitor: an arena of elements
//! with attributes, class lists, computed style values, inline event
//! handlers, hover listeners and a mutation observer.

mod classlist;
mod document;
mod element;
mod events;
mod observer;

pub use classlist::TokenList;
pub use document::Document;
pub use element::Element;
pub use events::{EventType, ListenerId};
pub use observer::{MutationObserverInit, MutationRecord, MutationType, ObserverId};

use std::fmt;

/// Node identifier (index into the document arena)
///
/// Slots are never reused, so a stale id keeps pointing at nothing once
/// its element has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the `<body>` element)
    pub const ROOT: NodeId = NodeId(0);

    /// Arena slot of the node
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Cannot insert {child} into {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("The root element cannot be removed")]
    RootRemoval,
}
