//! Document (arena-based element storage)

use crate::observer::MutationObserver;
use crate::{
    DomError, Element, EventType, ListenerId, MutationObserverInit, MutationRecord, MutationType,
    NodeId, ObserverId, TokenList,
};

/// The inspected page
///
/// Reads against a removed or unknown node never fail: they return `None`
/// or an empty value. Writes return [`DomError::UnknownNode`].
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    observers: Vec<MutationObserver>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only the `<body>` root
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Element::new("body"))],
            observers: Vec::new(),
        }
    }

    /// The `body` element every page starts with
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(Element::new(tag_name)));
        id
    }

    /// Element at `node`, `None` once removed
    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.index()).and_then(|n| n.as_ref())
    }

    fn get_mut(&mut self, node: NodeId) -> Result<&mut Element, DomError> {
        self.nodes
            .get_mut(node.index())
            .and_then(|n| n.as_mut())
            .ok_or(DomError::UnknownNode(node))
    }

    /// Whether the node still exists in the arena
    pub fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    /// Number of live elements (including detached ones)
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Always false while the root exists
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ---- tree mutation -------------------------------------------------

    /// Attach `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if !self.contains(parent) {
            return Err(DomError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(DomError::UnknownNode(child));
        }
        if is_inclusive_descendant(&self.nodes, parent, child) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        if let Some(old_parent) = self.get(child).and_then(|el| el.parent) {
            self.get_mut(old_parent)?.children.retain(|&c| c != child);
            self.notify(MutationRecord::child_list(old_parent, Vec::new(), vec![child]));
        }

        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        self.notify(MutationRecord::child_list(parent, vec![child], Vec::new()));
        Ok(())
    }

    /// Remove an element and its subtree from the document
    ///
    /// Stale ids of removed nodes stay invalid forever.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        if node == NodeId::ROOT {
            return Err(DomError::RootRemoval);
        }
        let parent = self.get_mut(node)?.parent;
        if let Some(parent) = parent {
            self.get_mut(parent)?.children.retain(|&c| c != node);
            self.notify(MutationRecord::child_list(parent, Vec::new(), vec![node]));
        }

        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(el) = self.nodes.get_mut(current.index()).and_then(|n| n.take()) {
                stack.extend(el.children);
            }
        }
        tracing::trace!("Removed element {}", node);
        Ok(())
    }

    // ---- attributes ----------------------------------------------------

    /// Attribute value, `None` when unset or the node is gone
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|el| el.get_attribute(name))
    }

    /// Set an attribute and notify observers
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let old = self.get_mut(node)?.store_attribute(name, value);
        self.notify(MutationRecord::attribute(node, name, old, Some(value.to_string())));
        Ok(())
    }

    /// Remove an attribute, returning its previous value
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<Option<String>, DomError> {
        let old = self.get_mut(node)?.take_attribute(name);
        if old.is_some() {
            self.notify(MutationRecord::attribute(node, name, old.clone(), None));
        }
        Ok(old)
    }

    // ---- classes -------------------------------------------------------

    /// Class list of the node, empty for a removed node
    pub fn class_list(&self, node: NodeId) -> TokenList {
        self.get(node).map(|el| el.class_list()).unwrap_or_default()
    }

    /// Replace the whole `class` attribute
    pub fn set_class_name(&mut self, node: NodeId, value: &str) -> Result<(), DomError> {
        self.set_attribute(node, "class", value)
    }

    /// Add a class, returns whether it was missing
    pub fn add_class(&mut self, node: NodeId, token: &str) -> Result<bool, DomError> {
        self.update_classes(node, |list| list.insert(token))
    }

    /// Remove a class, returns whether it was present
    pub fn remove_class(&mut self, node: NodeId, token: &str) -> Result<bool, DomError> {
        self.update_classes(node, |list| list.remove(token))
    }

    fn update_classes(
        &mut self,
        node: NodeId,
        update: impl FnOnce(&mut TokenList) -> bool,
    ) -> Result<bool, DomError> {
        let mut list = self.get(node).ok_or(DomError::UnknownNode(node))?.class_list();
        let changed = update(&mut list);
        if changed {
            self.set_class_name(node, &list.value())?;
        }
        Ok(changed)
    }

    // ---- style ---------------------------------------------------------

    /// Computed value of a property, empty for unset properties or removed nodes
    pub fn computed_style(&self, node: NodeId, property: &str) -> &str {
        self.get(node)
            .map(|el| el.computed_style(property))
            .unwrap_or("")
    }

    /// Set the value the style engine would compute for a property
    pub fn set_computed_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        self.get_mut(node)?.store_computed_style(property, value);
        Ok(())
    }

    // ---- events --------------------------------------------------------

    /// Set or clear an inline `on<event>` handler property
    pub fn set_inline_handler(&mut self, node: NodeId, event: EventType, present: bool) -> Result<(), DomError> {
        self.get_mut(node)?.set_inline_handler(event, present);
        Ok(())
    }

    /// Whether an `on<event>` handler is set on the node
    pub fn has_inline_handler(&self, node: NodeId, event: EventType) -> bool {
        self.get(node).is_some_and(|el| el.has_inline_handler(event))
    }

    /// Register a listener, returns false if it was already registered
    pub fn add_event_listener(&mut self, node: NodeId, event: EventType, listener: ListenerId) -> bool {
        match self.get_mut(node) {
            Ok(el) if !el.listeners.contains(&(event, listener)) => {
                el.listeners.push((event, listener));
                true
            }
            _ => false,
        }
    }

    /// Unregister a listener, returns whether it was registered
    pub fn remove_event_listener(&mut self, node: NodeId, event: EventType, listener: ListenerId) -> bool {
        match self.get_mut(node) {
            Ok(el) => {
                let before = el.listeners.len();
                el.listeners.retain(|&entry| entry != (event, listener));
                before != el.listeners.len()
            }
            Err(_) => false,
        }
    }

    /// Listeners that fire for an event dispatched at the node
    pub fn listeners(&self, node: NodeId, event: EventType) -> Vec<ListenerId> {
        self.get(node)
            .map(|el| {
                el.listeners
                    .iter()
                    .filter(|(ty, _)| *ty == event)
                    .map(|(_, id)| *id)
                    .collect()
            })
            .unwrap_or_default()
    }

    // ---- mutation observers --------------------------------------------

    /// Register a mutation observer on `target`
    pub fn observe(&mut self, target: NodeId, options: MutationObserverInit) -> ObserverId {
        let id = ObserverId(self.observers.len() as u32);
        let mut observer = MutationObserver::new(id);
        observer.observe(target, options);
        self.observers.push(observer);
        id
    }

    /// Unregister an observer and drop its pending records
    pub fn disconnect(&mut self, observer: ObserverId) {
        if let Some(o) = self.observers.iter_mut().find(|o| o.id == observer) {
            o.disconnect();
        }
    }

    /// Deliver and clear the observer's pending records
    pub fn take_records(&mut self, observer: ObserverId) -> Vec<MutationRecord> {
        self.observers
            .iter_mut()
            .find(|o| o.id == observer)
            .map(|o| o.take_records())
            .unwrap_or_default()
    }

    fn notify(&mut self, record: MutationRecord) {
        let nodes = &self.nodes;
        for observer in &mut self.observers {
            let wanted = match record.mutation_type {
                MutationType::Attributes => observer.options.attributes,
                MutationType::ChildList => observer.options.child_list,
            };
            if !wanted {
                continue;
            }
            let in_scope = observer.observed.iter().any(|&target| {
                record.target == target
                    || (observer.options.subtree && is_inclusive_descendant(nodes, record.target, target))
            });
            if in_scope {
                observer.push_record(record.clone());
            }
        }
    }
}

fn is_inclusive_descendant(nodes: &[Option<Element>], node: NodeId, ancestor: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = nodes
            .get(id.index())
            .and_then(|n| n.as_ref())
            .and_then(|el| el.parent);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (Document, NodeId) {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_child(doc.root(), div).unwrap();
        (doc, div)
    }

    #[test]
    fn test_tree_structure() {
        let (mut doc, div) = page();
        let span = doc.create_element("span");
        doc.append_child(div, span).unwrap();

        assert_eq!(doc.get(span).unwrap().parent(), Some(div));
        assert_eq!(doc.get(div).unwrap().parent(), Some(NodeId::ROOT));
        assert_eq!(
            doc.append_child(span, div),
            Err(DomError::HierarchyRequest { parent: span, child: div })
        );
    }

    #[test]
    fn test_remove_subtree() {
        let (mut doc, div) = page();
        let span = doc.create_element("span");
        doc.append_child(div, span).unwrap();

        doc.remove(div).unwrap();
        assert!(!doc.contains(div));
        assert!(!doc.contains(span));
        assert!(doc.class_list(span).is_empty());
        assert_eq!(doc.remove(NodeId::ROOT), Err(DomError::RootRemoval));
    }

    #[test]
    fn test_class_helpers_write_class_attribute() {
        let (mut doc, div) = page();
        doc.add_class(div, "a").unwrap();
        doc.add_class(div, "b").unwrap();
        assert!(!doc.add_class(div, "a").unwrap());
        assert_eq!(doc.get_attribute(div, "class"), Some("a b"));

        assert!(doc.remove_class(div, "a").unwrap());
        assert!(!doc.remove_class(div, "a").unwrap());
        assert_eq!(doc.class_list(div).to_vec(), vec!["b".to_string()]);
    }

    #[test]
    fn test_listener_registry() {
        let (mut doc, div) = page();
        assert!(doc.add_event_listener(div, EventType::MouseEnter, ListenerId(1)));
        assert!(!doc.add_event_listener(div, EventType::MouseEnter, ListenerId(1)));
        assert_eq!(doc.listeners(div, EventType::MouseEnter), vec![ListenerId(1)]);
        assert!(doc.listeners(div, EventType::MouseLeave).is_empty());
        assert!(doc.remove_event_listener(div, EventType::MouseEnter, ListenerId(1)));
        assert!(doc.listeners(div, EventType::MouseEnter).is_empty());
    }

    #[test]
    fn test_observer_scope() {
        let (mut doc, div) = page();
        let detached = doc.create_element("p");
        let observer = doc.observe(doc.root(), MutationObserverInit {
            attributes: true,
            subtree: true,
            attribute_old_value: true,
            ..Default::default()
        });

        doc.set_attribute(div, "title", "x").unwrap();
        doc.set_attribute(detached, "title", "y").unwrap();

        let records = doc.take_records(observer);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target, div);
        assert!(doc.take_records(observer).is_empty());
    }
}
