//! Class list snapshots and their diff

use hoverwatch_dom::{Document, NodeId};
use serde::{Deserialize, Serialize};

/// Class names of one element at one instant, in DOM order
pub type ClassSnapshot = Vec<String>;

/// Capture the node's classes; empty for a removed node
pub fn snapshot_classes(doc: &Document, node: NodeId) -> ClassSnapshot {
    doc.class_list(node).to_vec()
}

/// Result of [`diff_classes`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDiff {
    /// In the new snapshot but not the old, in new-snapshot order
    pub added: Vec<String>,
    /// In the old snapshot but not the new, in old-snapshot order
    pub removed: Vec<String>,
    /// The new snapshot verbatim
    pub current: Vec<String>,
}

impl ClassDiff {
    /// True when no class was added or removed
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compare two class snapshots
pub fn diff_classes(old: &[String], new: &[String]) -> ClassDiff {
    ClassDiff {
        added: only_in(new, old),
        removed: only_in(old, new),
        current: new.to_vec(),
    }
}

/// Members of `a` missing from `b`, first occurrence only
fn only_in(a: &[String], b: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for class in a {
        if !b.contains(class) && !out.contains(class) {
            out.push(class.clone());
        }
    }
    out
}
