//! DOM Observers
//!
//! MutationObserver registrations and the records they collect.

use crate::NodeId;

/// Handle of a registered mutation observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u32);

/// Mutation observer options
#[derive(Debug, Clone, Default)]
pub struct MutationObserverInit {
    pub child_list: bool,
    pub attributes: bool,
    pub subtree: bool,
    pub attribute_old_value: bool,
}

/// Mutation record
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    pub mutation_type: MutationType,
    pub target: NodeId,
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
    pub attribute_name: Option<String>,
    /// Previous attribute value, when `attribute_old_value` was requested
    pub old_value: Option<String>,
    /// Attribute value right after the mutation (`None` when removed)
    pub new_value: Option<String>,
}

impl MutationRecord {
    pub(crate) fn attribute(
        target: NodeId,
        name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            mutation_type: MutationType::Attributes,
            target,
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
            attribute_name: Some(name.to_string()),
            old_value,
            new_value,
        }
    }

    pub(crate) fn child_list(target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) -> Self {
        Self {
            mutation_type: MutationType::ChildList,
            target,
            added_nodes: added,
            removed_nodes: removed,
            attribute_name: None,
            old_value: None,
            new_value: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationType {
    Attributes,
    ChildList,
}

/// A single observer registration with its pending records
#[derive(Debug)]
pub(crate) struct MutationObserver {
    pub(crate) id: ObserverId,
    pub(crate) options: MutationObserverInit,
    pub(crate) observed: Vec<NodeId>,
    records: Vec<MutationRecord>,
}

impl MutationObserver {
    pub(crate) fn new(id: ObserverId) -> Self {
        Self {
            id,
            options: MutationObserverInit::default(),
            observed: Vec::new(),
            records: Vec::new(),
        }
    }

    pub(crate) fn observe(&mut self, target: NodeId, options: MutationObserverInit) {
        self.options = options;
        if !self.observed.contains(&target) {
            self.observed.push(target);
        }
    }

    pub(crate) fn disconnect(&mut self) {
        self.observed.clear();
        self.records.clear();
    }

    pub(crate) fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    pub(crate) fn push_record(&mut self, mut record: MutationRecord) {
        if record.mutation_type == MutationType::Attributes && !self.options.attribute_old_value {
            record.old_value = None;
        }
        self.records.push(record);
    }

    pub(crate) fn pending(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_old_value_stripped_without_option() {
        let mut observer = MutationObserver::new(ObserverId(0));
        observer.observe(NodeId(0), MutationObserverInit {
            attributes: true,
            ..Default::default()
        });
        observer.push_record(MutationRecord::attribute(
            NodeId(1),
            "title",
            Some("old".into()),
            Some("new".into()),
        ));

        let records = observer.take_records();
        assert_eq!(records[0].old_value, None);
        assert_eq!(records[0].new_value.as_deref(), Some("new"));
        assert_eq!(observer.pending(), 0);
    }
}
