//! Element identity and display selectors

use hoverwatch_dom::{Document, NodeId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TAG_LEN: usize = 9;
const MAX_SELECTOR_CLASSES: usize = 3;

/// Opaque per-element tag, compared for equality only
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementIdentity(String);

impl ElementIdentity {
    /// Raw tag, e.g. `elem_k3j9x0a2b`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Side table associating nodes with their identity tags
///
/// Holds node ids only, never the elements themselves.
#[derive(Debug, Default)]
pub struct IdentityTable {
    by_node: HashMap<NodeId, ElementIdentity>,
    issued: HashSet<ElementIdentity>,
}

impl IdentityTable {
    /// Create empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity of the node, assigning a fresh one on first sight
    pub fn identity_for(&mut self, node: NodeId) -> ElementIdentity {
        if let Some(identity) = self.by_node.get(&node) {
            return identity.clone();
        }

        let mut rng = rand::thread_rng();
        let identity = loop {
            let candidate = random_tag(&mut rng);
            if !self.issued.contains(&candidate) {
                break candidate;
            }
        };
        self.issued.insert(identity.clone());
        self.by_node.insert(node, identity.clone());
        identity
    }

    /// Identity of the node if one was ever assigned
    pub fn peek(&self, node: NodeId) -> Option<&ElementIdentity> {
        self.by_node.get(&node)
    }

    /// Number of tagged nodes
    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    /// Whether no node has been tagged yet
    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}

fn random_tag(rng: &mut impl Rng) -> ElementIdentity {
    let tag: String = (0..TAG_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    ElementIdentity(format!("elem_{tag}"))
}

/// Best-effort display selector, recomputed on every call
///
/// `#id`, else `tag.c1.c2.c3`, else `tag`; `"unknown"` for a missing node.
pub fn selector_for(doc: &Document, node: Option<NodeId>) -> String {
    let Some(element) = node.and_then(|n| doc.get(n)) else {
        return "unknown".to_string();
    };

    if let Some(id) = element.id() {
        return format!("#{id}");
    }

    let mut selector = element.local_name().to_string();
    let classes = element.class_list();
    for class in classes.iter().take(MAX_SELECTOR_CLASSES) {
        selector.push('.');
        selector.push_str(class);
    }
    selector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_stable_per_node() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let mut table = IdentityTable::new();

        let first = table.identity_for(a);
        assert_eq!(table.identity_for(a), first);
        assert_ne!(table.identity_for(b), first);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_identity_format() {
        let mut table = IdentityTable::new();
        let identity = table.identity_for(NodeId::ROOT);
        let tag = identity.as_str().strip_prefix("elem_").unwrap();
        assert_eq!(tag.len(), 9);
        assert!(tag.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_peek_does_not_assign() {
        let table = IdentityTable::new();
        assert!(table.peek(NodeId::ROOT).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_selector_forms() {
        let mut doc = Document::new();
        let button = doc.create_element("BUTTON");
        assert_eq!(selector_for(&doc, Some(button)), "button");

        doc.set_class_name(button, "btn  primary large extra").unwrap();
        assert_eq!(selector_for(&doc, Some(button)), "button.btn.primary.large");

        doc.set_attribute(button, "id", "submit").unwrap();
        assert_eq!(selector_for(&doc, Some(button)), "#submit");
    }

    #[test]
    fn test_selector_for_missing_node() {
        let mut doc = Document::new();
        let gone = doc.create_element("div");
        doc.remove(gone).unwrap();

        assert_eq!(selector_for(&doc, Some(gone)), "unknown");
        assert_eq!(selector_for(&doc, None), "unknown");
    }
}
