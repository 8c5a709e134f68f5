//! Computed style snapshots and their diff

use hoverwatch_dom::{Document, NodeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Properties captured on every hover
pub const TRACKED_PROPERTIES: [&str; 13] = [
    "display",
    "visibility",
    "opacity",
    "color",
    "background-color",
    "border",
    "padding",
    "margin",
    "width",
    "height",
    "transform",
    "transition",
    "animation",
];

/// Reported as the old value of a property the previous snapshot lacked
pub const MISSING_VALUE: &str = "none";

/// Property name to computed value, in tracked-property order
pub type StyleSnapshot = IndexMap<String, String>;

/// One changed property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleValueChange {
    pub old_value: String,
    pub new_value: String,
}

/// Changed properties only, in tracked-property order
pub type StyleChanges = IndexMap<String, StyleValueChange>;

/// Read the tracked properties; a removed node yields empty values
pub fn snapshot_style(doc: &Document, node: NodeId) -> StyleSnapshot {
    TRACKED_PROPERTIES
        .iter()
        .map(|prop| (prop.to_string(), doc.computed_style(node, prop).to_string()))
        .collect()
}

/// Properties of `new` whose value differs from `old`
///
/// A property absent from `old` always counts as changed.
pub fn diff_style(old: &StyleSnapshot, new: &StyleSnapshot) -> StyleChanges {
    new.iter()
        .filter(|(prop, value)| old.get(*prop) != Some(*value))
        .map(|(prop, value)| {
            let old_value = old
                .get(prop)
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or_else(|| MISSING_VALUE.to_string());
            (prop.clone(), StyleValueChange { old_value, new_value: value.clone() })
        })
        .collect()
}
