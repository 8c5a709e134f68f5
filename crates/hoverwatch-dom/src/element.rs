//! Element storage

use crate::{EventType, ListenerId, NodeId, TokenList};
use std::collections::{HashMap, HashSet};

/// An element in the inspected page
#[derive(Debug, Clone)]
pub struct Element {
    tag_name: String,
    attributes: Vec<(String, String)>,
    computed_style: HashMap<String, String>,
    inline_handlers: HashSet<EventType>,
    pub(crate) listeners: Vec<(EventType, ListenerId)>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Element {
    pub(crate) fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: Vec::new(),
            computed_style: HashMap::new(),
            inline_handlers: HashSet::new(),
            listeners: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Upper-case tag name, as `Element.tagName` reports it for HTML
    pub fn tag_name(&self) -> String {
        self.tag_name.to_ascii_uppercase()
    }

    /// Lower-case local name
    pub fn local_name(&self) -> &str {
        &self.tag_name
    }

    /// Get attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `id` attribute, if present and non-empty
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id").filter(|id| !id.is_empty())
    }

    /// Raw `class` attribute (`className`), empty when absent
    pub fn class_name(&self) -> &str {
        self.get_attribute("class").unwrap_or("")
    }

    /// Parsed `classList`
    pub fn class_list(&self) -> TokenList {
        TokenList::from_string(self.class_name())
    }

    /// Computed value of a CSS property, empty when the property is unset
    pub fn computed_style(&self, property: &str) -> &str {
        self.computed_style
            .get(property)
            .map(|v| v.as_str())
            .unwrap_or("")
    }

    /// Whether an `on<event>` handler property is set
    pub fn has_inline_handler(&self, event: EventType) -> bool {
        self.inline_handlers.contains(&event)
    }

    /// Parent element, `None` for the root and detached elements
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Store an attribute, returning the previous value
    pub(crate) fn store_attribute(&mut self, name: &str, value: &str) -> Option<String> {
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => Some(std::mem::replace(v, value.to_string())),
            None => {
                self.attributes.push((name.to_string(), value.to_string()));
                None
            }
        }
    }

    pub(crate) fn take_attribute(&mut self, name: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|(k, _)| k == name)?;
        Some(self.attributes.remove(pos).1)
    }

    pub(crate) fn store_computed_style(&mut self, property: &str, value: &str) {
        self.computed_style
            .insert(property.to_string(), value.to_string());
    }

    pub(crate) fn set_inline_handler(&mut self, event: EventType, present: bool) {
        if present {
            self.inline_handlers.insert(event);
        } else {
            self.inline_handlers.remove(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_storage() {
        let mut el = Element::new("DIV");
        assert_eq!(el.tag_name(), "DIV");
        assert_eq!(el.local_name(), "div");

        assert_eq!(el.store_attribute("title", "a"), None);
        assert_eq!(el.store_attribute("title", "b"), Some("a".into()));
        assert_eq!(el.get_attribute("title"), Some("b"));
        assert_eq!(el.take_attribute("title"), Some("b".into()));
        assert_eq!(el.get_attribute("title"), None);
    }

    #[test]
    fn test_empty_id_is_no_id() {
        let mut el = Element::new("span");
        el.store_attribute("id", "");
        assert_eq!(el.id(), None);
        assert_eq!(el.class_name(), "");
        assert_eq!(el.computed_style("opacity"), "");
    }
}
