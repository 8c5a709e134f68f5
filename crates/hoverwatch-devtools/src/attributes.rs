//! Attribute change observer
//!
//! One document-wide mutation subscription; only attribute mutations on
//! the monitored element are reported. `class` is left to the hover
//! captures so it is never reported twice.

use crate::channel::OutboundQueue;
use crate::identity::{ElementIdentity, IdentityTable, selector_for};
use crate::message::{AttributeChangeData, Message};
use hoverwatch_dom::{Document, MutationObserverInit, MutationType, ObserverId};

#[derive(Debug)]
pub struct AttributeObserver {
    observer: ObserverId,
}

impl AttributeObserver {
    /// Subscribe to every mutation under the document root
    pub fn subscribe(doc: &mut Document) -> Self {
        let observer = doc.observe(doc.root(), MutationObserverInit {
            attributes: true,
            attribute_old_value: true,
            subtree: true,
            child_list: true,
        });
        Self { observer }
    }

    /// Deliver pending mutations, returns how many were reported
    pub fn process(
        &self,
        doc: &mut Document,
        ids: &IdentityTable,
        armed: Option<&ElementIdentity>,
        queue: &mut OutboundQueue,
    ) -> usize {
        let records = doc.take_records(self.observer);
        let Some(armed) = armed else {
            return 0;
        };

        let mut reported = 0;
        for record in records {
            if record.mutation_type != MutationType::Attributes {
                continue;
            }
            if ids.peek(record.target) != Some(armed) {
                continue;
            }
            let Some(attribute_name) = record.attribute_name else {
                continue;
            };
            if attribute_name == "class" {
                continue;
            }

            queue.enqueue(Message::AttributeChange(AttributeChangeData {
                element: selector_for(doc, Some(record.target)),
                attribute_name,
                old_value: record.old_value,
                new_value: record.new_value,
            }));
            reported += 1;
        }
        reported
    }

    /// Stop observing and drop undelivered records
    pub fn disconnect(self, doc: &mut Document) {
        doc.disconnect(self.observer);
    }
}
