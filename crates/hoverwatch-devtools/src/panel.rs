//! Debug Helper Panel
//!
//! Panel-side state: drains the page queue, stamps receipt time, keeps
//! the categorized record lists, and follows the host's selection.

use crate::bridge::InspectedWindow;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::identity::ElementIdentity;
use crate::message::{
    AttributeChangeData, ClassChangeData, ListenerEntry, Message, StyleChangeData,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A message payload stamped with its panel receipt time (epoch ms)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Received<T> {
    #[serde(flatten)]
    pub data: T,
    pub timestamp: u64,
}

/// A record as handed to the presentation layer, in receipt order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeRecord {
    Class(Received<ClassChangeData>),
    Style(Received<StyleChangeData>),
    Attribute(Received<AttributeChangeData>),
    EventListeners(Vec<ListenerEntry>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordCategory {
    Class,
    Style,
    Attribute,
    Event,
}

/// Accumulated records, one list per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    pub class: Vec<Received<ClassChangeData>>,
    pub style: Vec<Received<StyleChangeData>>,
    pub attribute: Vec<Received<AttributeChangeData>>,
    /// Latest listener snapshot; replaced, never appended
    pub event: Vec<ListenerEntry>,
}

impl Records {
    /// Number of records in `category`
    pub fn len(&self, category: RecordCategory) -> usize {
        match category {
            RecordCategory::Class => self.class.len(),
            RecordCategory::Style => self.style.len(),
            RecordCategory::Attribute => self.attribute.len(),
            RecordCategory::Event => self.event.len(),
        }
    }

    /// Records across all categories
    pub fn total(&self) -> usize {
        self.class.len() + self.style.len() + self.attribute.len() + self.event.len()
    }

    /// Whether every category is empty
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Per-category counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_records: usize,
    pub class_changes: usize,
    pub style_changes: usize,
    pub attribute_changes: usize,
    pub event_listeners: usize,
}

/// Latest-first view of the last `window` items
fn recent<T>(items: &[T], window: usize) -> impl Iterator<Item = &T> {
    items.iter().rev().take(window)
}

/// The devtools panel side of a session
pub struct Panel {
    config: Config,
    clock: Box<dyn Clock>,
    paused: bool,
    injected: bool,
    records: Records,
    last_selected: Option<ElementIdentity>,
    selected_selector: Option<String>,
    last_timestamp: u64,
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("paused", &self.paused)
            .field("injected", &self.injected)
            .field("selected", &self.selected_selector)
            .field("summary", &self.summary())
            .finish()
    }
}

impl Panel {
    /// Panel stamping records with wall-clock time
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Panel stamping records with `clock`
    pub fn with_clock(config: Config, clock: impl Clock + 'static) -> Self {
        Self {
            config,
            clock: Box::new(clock),
            paused: false,
            injected: false,
            records: Records::default(),
            last_selected: None,
            selected_selector: None,
            last_timestamp: 0,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Inject the content script; selection polling only starts on success
    pub fn start(&mut self, bridge: &mut impl InspectedWindow) -> bool {
        match bridge.inject() {
            Ok(fresh) => {
                if fresh {
                    tracing::info!("Content script injected successfully");
                } else {
                    tracing::debug!("Content script already present");
                }
                self.injected = true;
            }
            Err(e) => {
                tracing::error!("Failed to inject content script: {}", e);
                self.injected = false;
            }
        }
        self.injected
    }

    /// Whether injection succeeded
    pub fn is_started(&self) -> bool {
        self.injected
    }

    // ---- polling -------------------------------------------------------

    /// One message tick: drain the page queue and dispatch the batch
    ///
    /// Skipped entirely while paused so queued messages wait in the page.
    /// Bridge errors are logged and the tick is dropped.
    pub fn poll_messages(&mut self, bridge: &mut impl InspectedWindow) -> Vec<ChangeRecord> {
        if self.paused {
            return Vec::new();
        }
        let batch = match bridge.drain_messages() {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!("Error reading messages: {}", e);
                return Vec::new();
            }
        };
        if !batch.is_empty() {
            tracing::debug!("Received messages: {}", batch.len());
        }
        batch
            .into_iter()
            .filter_map(|message| self.dispatch(message))
            .collect()
    }

    /// One selection tick: re-arm the page monitor when the inspected element changed
    ///
    /// Returns whether a new selection was forwarded.
    pub fn poll_selection(&mut self, bridge: &mut impl InspectedWindow) -> bool {
        if !self.injected {
            return false;
        }
        let selection = match bridge.inspected_selection() {
            Ok(Some(selection)) => selection,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!("Error getting selected element: {}", e);
                return false;
            }
        };
        if self.last_selected.as_ref() == Some(&selection.id) {
            return false;
        }

        // Remembered only once the page has armed
        if let Err(e) = bridge.select_inspected() {
            tracing::warn!("Error selecting element: {}", e);
            return false;
        }

        tracing::info!("New element selected: {}", selection.selector);
        self.last_selected = Some(selection.id);
        self.selected_selector = Some(selection.selector);
        true
    }

    // ---- dispatch ------------------------------------------------------

    /// Route one envelope to its handler
    ///
    /// Returns the stored record, `None` for envelopes that only update
    /// panel state (selection, debug).
    pub fn dispatch(&mut self, message: Message) -> Option<ChangeRecord> {
        match message {
            Message::ClassChange(data) => {
                let record = self.stamp(data);
                self.records.class.push(record.clone());
                Some(ChangeRecord::Class(record))
            }
            Message::StyleChange(data) => {
                let record = self.stamp(data);
                self.records.style.push(record.clone());
                Some(ChangeRecord::Style(record))
            }
            Message::AttributeChange(data) => {
                let record = self.stamp(data);
                self.records.attribute.push(record.clone());
                Some(ChangeRecord::Attribute(record))
            }
            Message::EventListeners(data) => {
                self.records.event = data.events.clone();
                Some(ChangeRecord::EventListeners(data.events))
            }
            Message::ElementSelected(data) => {
                self.selected_selector = Some(data.selector);
                None
            }
            Message::Debug(data) => {
                tracing::debug!("Content script debug: {}", data.message);
                None
            }
        }
    }

    /// Receipt timestamps never go backwards
    fn stamp<T>(&mut self, data: T) -> Received<T> {
        let timestamp = self.clock.now_ms().max(self.last_timestamp);
        self.last_timestamp = timestamp;
        Received { data, timestamp }
    }

    // ---- controls ------------------------------------------------------

    /// Flip the pause state, returns the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    /// Pause or resume message draining
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            tracing::info!("Monitoring {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    /// Whether draining is suspended
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Drop every accumulated record
    pub fn clear(&mut self) {
        self.records = Records::default();
    }

    // ---- views ---------------------------------------------------------

    /// Every accumulated record
    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Display selector of the monitored element
    pub fn selected_selector(&self) -> Option<&str> {
        self.selected_selector.as_deref()
    }

    /// Counts per category and in total
    pub fn summary(&self) -> Summary {
        Summary {
            total_records: self.records.total(),
            class_changes: self.records.class.len(),
            style_changes: self.records.style.len(),
            attribute_changes: self.records.attribute.len(),
            event_listeners: self.records.event.len(),
        }
    }

    /// Latest class changes first, capped at the display window
    pub fn recent_class_changes(&self) -> impl Iterator<Item = &Received<ClassChangeData>> {
        recent(&self.records.class, self.config.display_window)
    }

    /// Latest style changes first, capped at the display window
    pub fn recent_style_changes(&self) -> impl Iterator<Item = &Received<StyleChangeData>> {
        recent(&self.records.style, self.config.display_window)
    }

    /// Latest attribute changes first, capped at the display window
    pub fn recent_attribute_changes(&self) -> impl Iterator<Item = &Received<AttributeChangeData>> {
        recent(&self.records.attribute, self.config.display_window)
    }

    /// Listener counts grouped by element, then event type
    pub fn event_groups(&self) -> BTreeMap<String, BTreeMap<String, usize>> {
        let mut groups: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        for entry in &self.records.event {
            *groups
                .entry(entry.element.clone())
                .or_default()
                .entry(entry.event_type.clone())
                .or_default() += 1;
        }
        groups
    }
}
