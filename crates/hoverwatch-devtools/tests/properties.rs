//! Property tests for the differs and the outbound queue

use hoverwatch_devtools::*;
use proptest::prelude::*;

fn class_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]", 0..8)
}

proptest! {
    #[test]
    fn added_and_removed_are_disjoint(old in class_names(), new in class_names()) {
        let diff = diff_classes(&old, &new);
        prop_assert!(diff.added.iter().all(|c| !diff.removed.contains(c)));
        prop_assert!(diff.added.iter().all(|c| new.contains(c) && !old.contains(c)));
        prop_assert!(diff.removed.iter().all(|c| old.contains(c) && !new.contains(c)));
        prop_assert_eq!(&diff.current, &new);
    }

    #[test]
    fn self_diff_is_empty(classes in class_names()) {
        prop_assert!(diff_classes(&classes, &classes).is_empty());
    }

    #[test]
    fn style_self_diff_is_empty(values in prop::collection::vec("[0-9a-z]{0,4}", TRACKED_PROPERTIES.len())) {
        let snapshot: StyleSnapshot = TRACKED_PROPERTIES
            .iter()
            .map(|p| p.to_string())
            .zip(values)
            .collect();
        prop_assert!(diff_style(&snapshot, &snapshot).is_empty());
    }

    /// Interleaved enqueues and drains deliver every message exactly once, in order
    #[test]
    fn drain_delivers_exactly_once(batches in prop::collection::vec(0usize..6, 1..10)) {
        let mut queue = OutboundQueue::new(4);
        let mut sent = Vec::new();
        let mut received = Vec::new();

        for (round, count) in batches.into_iter().enumerate() {
            for i in 0..count {
                let message = Message::debug(format!("{round}:{i}"));
                sent.push(message.clone());
                queue.enqueue(message);
            }
            received.extend(queue.drain());
            prop_assert!(queue.is_empty());
        }
        prop_assert_eq!(received, sent);
    }
}
