//! Page-to-panel messages
//!
//! Every message crosses the bridge as a `{"type": ..., "data": ...}`
//! envelope.

use crate::style_diff::StyleChanges;
use hoverwatch_dom::EventType;
use serde::{Deserialize, Serialize};

/// Hover transition that triggered a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverKind {
    MouseEnter,
    MouseLeave,
}

impl HoverKind {
    /// DOM event this hover transition listens for
    pub fn event_type(self) -> EventType {
        match self {
            HoverKind::MouseEnter => EventType::MouseEnter,
            HoverKind::MouseLeave => EventType::MouseLeave,
        }
    }

    /// Event name as sent on the wire
    pub fn as_str(self) -> &'static str {
        self.event_type().as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassChangeData {
    pub element: String,
    pub event_type: HoverKind,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub current: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleChangeData {
    pub element: String,
    pub event_type: HoverKind,
    pub changes: StyleChanges,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeChangeData {
    pub element: String,
    pub attribute_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// How an attribute change reads to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeChangeKind {
    Added,
    Removed,
    Modified,
}

impl AttributeChangeData {
    /// Classify by which side of the change is empty
    pub fn kind(&self) -> AttributeChangeKind {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|v| !v.is_empty());
        if !present(&self.old_value) {
            AttributeChangeKind::Added
        } else if !present(&self.new_value) {
            AttributeChangeKind::Removed
        } else {
            AttributeChangeKind::Modified
        }
    }
}

/// One inline handler found on the selected element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerEntry {
    pub element: String,
    #[serde(rename = "type")]
    pub event_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListenersData {
    pub events: Vec<ListenerEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSelectedData {
    pub selector: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugData {
    pub message: String,
}

/// Envelope queued by the page context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    ClassChange(ClassChangeData),
    StyleChange(StyleChangeData),
    AttributeChange(AttributeChangeData),
    EventListeners(EventListenersData),
    ElementSelected(ElementSelectedData),
    Debug(DebugData),
}

impl Message {
    /// Wire name of the envelope type
    pub fn kind(&self) -> &'static str {
        match self {
            Message::ClassChange(_) => "CLASS_CHANGE",
            Message::StyleChange(_) => "STYLE_CHANGE",
            Message::AttributeChange(_) => "ATTRIBUTE_CHANGE",
            Message::EventListeners(_) => "EVENT_LISTENERS",
            Message::ElementSelected(_) => "ELEMENT_SELECTED",
            Message::Debug(_) => "DEBUG",
        }
    }

    /// Shorthand for a `DEBUG` envelope
    pub fn debug(message: impl Into<String>) -> Self {
        Message::Debug(DebugData { message: message.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let message = Message::ClassChange(ClassChangeData {
            element: "button.btn".into(),
            event_type: HoverKind::MouseEnter,
            added: vec!["hover".into()],
            removed: vec![],
            current: vec!["btn".into(), "hover".into()],
        });

        assert_eq!(serde_json::to_value(&message).unwrap(), json!({
            "type": "CLASS_CHANGE",
            "data": {
                "element": "button.btn",
                "eventType": "mouseenter",
                "added": ["hover"],
                "removed": [],
                "current": ["btn", "hover"],
            }
        }));
    }

    #[test]
    fn test_listener_entry_uses_type_key() {
        let message = Message::EventListeners(EventListenersData {
            events: vec![ListenerEntry { element: "#go".into(), event_type: "click".into() }],
        });
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["data"]["events"][0]["type"], "click");
        assert_eq!(message.kind(), "EVENT_LISTENERS");
    }

    #[test]
    fn test_attribute_change_kind() {
        let change = |old: Option<&str>, new: Option<&str>| AttributeChangeData {
            element: "#x".into(),
            attribute_name: "title".into(),
            old_value: old.map(Into::into),
            new_value: new.map(Into::into),
        };
        assert_eq!(change(None, Some("a")).kind(), AttributeChangeKind::Added);
        assert_eq!(change(Some("a"), None).kind(), AttributeChangeKind::Removed);
        assert_eq!(change(Some("a"), Some("b")).kind(), AttributeChangeKind::Modified);
    }
}
