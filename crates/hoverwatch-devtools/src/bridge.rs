//! Cross-context bridge
//!
//! The panel cannot touch page memory. Every request is a one-shot
//! evaluation in the page whose result comes back serialized, the way the
//! host's `inspectedWindow.eval` works. No retries, no timeout.

use crate::channel::{decode_batch, encode_batch};
use crate::error::{DevToolsError, Result};
use crate::message::Message;
use crate::page::{PageContext, SelectionInfo};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Requests the panel can make of the inspected page
pub trait InspectedWindow {
    /// Install the content script; `Ok(false)` if it was already there
    fn inject(&mut self) -> Result<bool>;

    /// Take-all-and-clear of the page's outbound queue
    fn drain_messages(&mut self) -> Result<Vec<Message>>;

    /// The host's currently inspected element, if any
    fn inspected_selection(&mut self) -> Result<Option<SelectionInfo>>;

    /// Arm the page's monitor on the inspected element
    fn select_inspected(&mut self) -> Result<bool>;
}

/// Bridge to a page context living on the same thread
///
/// Holds the page weakly: once the page is torn down every call fails with
/// [`DevToolsError::ContextDestroyed`].
#[derive(Debug, Clone)]
pub struct LocalBridge {
    page: Weak<RefCell<PageContext>>,
}

impl LocalBridge {
    /// Bridge to `page`, held weakly
    pub fn new(page: &Rc<RefCell<PageContext>>) -> Self {
        Self { page: Rc::downgrade(page) }
    }

    fn eval<T>(&self, f: impl FnOnce(&mut PageContext) -> T) -> Result<T> {
        let page = self.page.upgrade().ok_or(DevToolsError::ContextDestroyed)?;
        let mut page = page
            .try_borrow_mut()
            .map_err(|e| DevToolsError::Bridge(format!("page context busy: {e}")))?;
        Ok(f(&mut page))
    }
}

/// Send a value across the isolation boundary
fn through_wire<T: Serialize + DeserializeOwned>(value: &T) -> Result<T> {
    let wire = serde_json::to_string(value)?;
    Ok(serde_json::from_str(&wire)?)
}

impl InspectedWindow for LocalBridge {
    fn inject(&mut self) -> Result<bool> {
        self.eval(|page| page.inject())
    }

    fn drain_messages(&mut self) -> Result<Vec<Message>> {
        let wire = self.eval(|page| encode_batch(&page.drain_messages()))??;
        decode_batch(&wire)
    }

    fn inspected_selection(&mut self) -> Result<Option<SelectionInfo>> {
        let selection = self.eval(|page| page.inspected_selection())?;
        through_wire(&selection)
    }

    fn select_inspected(&mut self) -> Result<bool> {
        self.eval(|page| page.select_inspected())
    }
}
