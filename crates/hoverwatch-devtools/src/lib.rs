//! Hoverwatch DevTools
//!
//! A developer-tools panel that watches one inspected element and reports
//! what changes when the user hovers it.
//!
//! Two contexts cooperate without sharing memory:
//! - the inspected page ([`PageContext`]): element monitor, class and style
//!   differs, attribute observer, outbound queue
//! - the panel ([`Panel`]): polls the page through an [`InspectedWindow`]
//!   bridge, stamps and stores the records, exports them
//!
//! # Example
//! ```rust,ignore
//! let page = Rc::new(RefCell::new(PageContext::new(document, &config)));
//! let mut bridge = LocalBridge::new(&page);
//! let mut panel = Panel::new(config);
//! smol::block_on(run_panel(&mut panel, &mut bridge, None, |record| println!("{record:?}")));
//! ```

pub mod attributes;
pub mod bridge;
pub mod channel;
pub mod class_diff;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod identity;
pub mod listeners;
pub mod message;
pub mod monitor;
pub mod page;
pub mod panel;
pub mod runtime;
pub mod style_diff;
pub mod timers;

pub use attributes::AttributeObserver;
pub use bridge::{InspectedWindow, LocalBridge};
pub use channel::OutboundQueue;
pub use class_diff::{ClassDiff, ClassSnapshot, diff_classes, snapshot_classes};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{DevToolsError, Result};
pub use export::ExportDocument;
pub use identity::{ElementIdentity, IdentityTable, selector_for};
pub use message::{
    AttributeChangeData, AttributeChangeKind, ClassChangeData, HoverKind, ListenerEntry, Message,
    StyleChangeData,
};
pub use monitor::{ElementMonitor, MonitorState, MonitoredElement};
pub use page::{PageContext, SelectionInfo};
pub use panel::{ChangeRecord, Panel, Received, RecordCategory, Records, Summary};
pub use runtime::{run_local, run_page, run_panel};
pub use style_diff::{
    StyleChanges, StyleSnapshot, StyleValueChange, TRACKED_PROPERTIES, diff_style, snapshot_style,
};
