//! Hoverwatch demo
//!
//! Drives a scripted page through the panel: inspect a button, hover it,
//! toggle an attribute, then export everything that was recorded.
//!
//! Set `HOVERWATCH_LOG=debug` for per-tick output.

use anyhow::Context;
use hoverwatch_devtools::{
    ChangeRecord, Config, HoverKind, InspectedWindow, LocalBridge, PageContext, Panel, run_local,
};
use hoverwatch_dom::{Document, EventType, NodeId};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn build_page() -> anyhow::Result<(Document, NodeId)> {
    let mut doc = Document::new();
    let button = doc.create_element("button");
    doc.append_child(doc.root(), button)?;
    doc.set_attribute(button, "id", "buy")?;
    doc.set_class_name(button, "btn primary")?;
    doc.set_computed_style(button, "opacity", "1")?;
    doc.set_computed_style(button, "color", "rgb(0, 0, 0)")?;
    doc.set_inline_handler(button, EventType::Click, true)?;
    Ok((doc, button))
}

fn report(record: &ChangeRecord) {
    match record {
        ChangeRecord::Class(r) => println!(
            "[{}] class {} on {}: +{:?} -{:?}",
            r.timestamp, r.data.event_type.as_str(), r.data.element, r.data.added, r.data.removed
        ),
        ChangeRecord::Style(r) => {
            for (property, change) in &r.data.changes {
                println!(
                    "[{}] style {} on {}: {} -> {}",
                    r.timestamp, property, r.data.element, change.old_value, change.new_value
                );
            }
        }
        ChangeRecord::Attribute(r) => println!(
            "[{}] attribute {} on {}: {:?} -> {:?}",
            r.timestamp, r.data.attribute_name, r.data.element, r.data.old_value, r.data.new_value
        ),
        ChangeRecord::EventListeners(entries) => {
            for entry in entries {
                println!("listener {} on {}", entry.event_type, entry.element);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("HOVERWATCH_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::default()
        .with_debounce(Duration::from_millis(10))
        .with_poll_intervals(Duration::from_millis(20), Duration::from_millis(40));

    let (doc, button) = build_page()?;
    let page = Rc::new(RefCell::new(PageContext::new(doc, &config)));
    page.borrow_mut().set_inspected(Some(button));

    let mut bridge = LocalBridge::new(&page);
    let mut panel = Panel::new(config);
    if !panel.start(&mut bridge) {
        anyhow::bail!("content script could not be injected");
    }

    let mut records = run_local(&page, &mut panel, &mut bridge, 3);
    tracing::info!(
        "Monitoring {}",
        panel.selected_selector().unwrap_or("nothing")
    );

    {
        let mut page = page.borrow_mut();
        page.dispatch_hover(button, HoverKind::MouseEnter);
        let doc = page.document_mut();
        doc.add_class(button, "hover")?;
        doc.set_computed_style(button, "opacity", "0.5")?;
        doc.set_attribute(button, "data-state", "active")?;
    }
    records.extend(run_local(&page, &mut panel, &mut bridge, 5));

    {
        let mut page = page.borrow_mut();
        page.dispatch_hover(button, HoverKind::MouseLeave);
        let doc = page.document_mut();
        doc.remove_class(button, "hover")?;
        doc.set_computed_style(button, "opacity", "1")?;
    }
    records.extend(run_local(&page, &mut panel, &mut bridge, 5));

    records.iter().for_each(report);

    let summary = panel.summary();
    println!(
        "{} records: {} class, {} style, {} attribute, {} listeners",
        summary.total_records,
        summary.class_changes,
        summary.style_changes,
        summary.attribute_changes,
        summary.event_listeners
    );

    let path = panel
        .export()
        .write_to_dir(&std::env::temp_dir())
        .context("writing export")?;
    println!("Exported to {}", path.display());

    // The bridge outlives the page from here on
    drop(page);
    if let Err(e) = bridge.drain_messages() {
        tracing::info!("Bridge closed: {}", e);
    }
    Ok(())
}
