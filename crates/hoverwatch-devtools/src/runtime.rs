//! Poll driver
//!
//! The scheduled tasks that keep the panel fed: a message drain on every
//! tick and a selection query every `selection_every` ticks.

use crate::bridge::InspectedWindow;
use crate::page::PageContext;
use crate::panel::{ChangeRecord, Panel};
use smol::Timer;
use smol::stream::StreamExt;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Run the panel's polling until `ticks` message ticks have passed
///
/// `None` polls for as long as the future is alive. Every dispatched
/// record is handed to `on_record` in receipt order. Returns the number of
/// ticks run.
pub async fn run_panel<B, F>(
    panel: &mut Panel,
    bridge: &mut B,
    ticks: Option<u64>,
    mut on_record: F,
) -> u64
where
    B: InspectedWindow,
    F: FnMut(&ChangeRecord),
{
    if !panel.is_started() && !panel.start(bridge) {
        return 0;
    }

    let selection_every = panel.config().selection_every();
    let mut interval = Timer::interval(panel.config().message_poll_interval);
    let mut tick = 0u64;

    while ticks.is_none_or(|limit| tick < limit) {
        interval.next().await;

        for record in panel.poll_messages(bridge) {
            on_record(&record);
        }
        if tick % selection_every == 0 {
            panel.poll_selection(bridge);
        }
        tick += 1;
    }
    tick
}

/// Keep the page's timers and mutation delivery running
///
/// Stands in for the page's own event loop when page and panel share a
/// thread. Stops early once the page has been dropped.
pub async fn run_page(page: std::rc::Weak<RefCell<PageContext>>, every: Duration, ticks: Option<u64>) -> u64 {
    let mut interval = Timer::interval(every);
    let mut tick = 0u64;

    while ticks.is_none_or(|limit| tick < limit) {
        interval.next().await;
        let Some(strong) = page.upgrade() else {
            break;
        };
        if let Ok(mut context) = strong.try_borrow_mut() {
            context.pump();
        }
        tick += 1;
    }
    tick
}

/// Spawn both loops on a local executor and run them to completion
pub fn run_local(
    page: &Rc<RefCell<PageContext>>,
    panel: &mut Panel,
    bridge: &mut impl InspectedWindow,
    ticks: u64,
) -> Vec<ChangeRecord> {
    let executor = smol::LocalExecutor::new();
    let pump_every = (panel.config().message_poll_interval / 4).max(Duration::from_millis(1));
    let page_task = executor.spawn(run_page(Rc::downgrade(page), pump_every, None));

    let mut records = Vec::new();
    smol::block_on(executor.run(async {
        run_panel(panel, bridge, Some(ticks), |record| records.push(record.clone())).await;
    }));
    drop(page_task);
    records
}
