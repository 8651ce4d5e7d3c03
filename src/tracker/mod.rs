//! Relative window and tab order tracking.
//!
//! The browser reports windows and tabs in whatever order is convenient at the
//! moment; this module keeps the authoritative relative order, together with
//! the active tab and an optional display name per window and the single
//! focused window.

mod naming;
mod serialization;

pub use serialization::SerializedTracker;

use crate::error::TrackerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use taborder_sequence::{IdSequence, SequenceError};

/// Browser window identifier
pub type WindowId = i64;

/// Browser tab identifier
pub type TabId = i64;

/// Id written in place of "no window" / "no tab" in serialized form
pub const NO_ID: i64 = -1;

/// Treat the `-1` sentinel the same as an absent id
fn without_sentinel(id: Option<i64>) -> Option<i64> {
    id.filter(|&id| id != NO_ID)
}

/// Browser indexes are signed; anything below zero means the front
fn deserialize_index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let index = i64::deserialize(deserializer)?;
    Ok(usize::try_from(index.max(0)).unwrap_or(usize::MAX))
}

/// Tab as reported by the browser when it is created or discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    /// Tab id
    pub id: TabId,
    /// Position the browser reports for the tab within its window
    #[serde(deserialize_with = "deserialize_index")]
    pub index: usize,
    /// Whether the browser reports the tab as selected
    #[serde(default)]
    pub active: bool,
}

impl TabInfo {
    /// Convenience constructor
    pub fn new(id: TabId, index: usize, active: bool) -> Self {
        Self { id, index, active }
    }
}

/// Everything tracked for a single registered window
///
/// Kept in one record so registration and unregistration create and drop
/// all per-window state together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct WindowRecord {
    pub(crate) tabs: IdSequence<TabId>,
    pub(crate) active_tab: Option<TabId>,
    pub(crate) name: Option<String>,
}

/// Authoritative relative order of windows and of tabs within each window
///
/// Every id in `window_order` has exactly one entry in `windows` and vice
/// versa. `focused_window` is not tied to registration.
///
/// Serde goes through [`SerializedTracker`], so deserializing validates the
/// same way [`RelativeOrderTracker::from_serializable`] does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SerializedTracker", try_from = "SerializedTracker")]
pub struct RelativeOrderTracker {
    window_order: IdSequence<WindowId>,
    windows: HashMap<WindowId, WindowRecord>,
    focused_window: Option<WindowId>,
}

impl RelativeOrderTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// Record `window_id` as the OS-focused window, or `None` when no window
    /// has focus. `Some(NO_ID)` counts as `None`.
    pub fn set_focused_window(&mut self, window_id: Option<WindowId>) {
        let window_id = without_sentinel(window_id);
        log::debug!("Focused window: {:?} -> {:?}", self.focused_window, window_id);
        self.focused_window = window_id;
    }

    /// Window last recorded as focused
    pub fn focused_window(&self) -> Option<WindowId> {
        self.focused_window
    }

    // ------------------------------------------------------------------
    // Window registration
    // ------------------------------------------------------------------

    /// Whether `window_id` is registered
    pub fn has_window(&self, window_id: WindowId) -> bool {
        self.windows.contains_key(&window_id)
    }

    /// Register `window_id` at the end of the window order
    ///
    /// Re-registering an existing window is a reset: its tab order, active
    /// tab and name are discarded and it moves to the end.
    pub fn register_window(&mut self, window_id: WindowId) {
        if self.windows.contains_key(&window_id) {
            log::debug!("Re-registering window {}, discarding its state", window_id);
            self.window_order.remove(window_id);
        }
        self.windows.insert(window_id, WindowRecord::default());
        let pushed = self.window_order.push_back(window_id);
        debug_assert!(pushed.is_ok(), "window {window_id} still in window order");
        log::debug!(
            "Registered window {} (total: {})",
            window_id,
            self.window_order.len()
        );
    }

    /// Forget `window_id` and everything tracked for it
    ///
    /// Returns whether the window was registered. Unknown ids are ignored.
    pub fn unregister_window(&mut self, window_id: WindowId) -> bool {
        let had_record = self.windows.remove(&window_id).is_some();
        let had_order = self.window_order.remove(window_id);
        if had_record || had_order {
            log::debug!(
                "Unregistered window {} (total: {})",
                window_id,
                self.window_order.len()
            );
        }
        had_record || had_order
    }

    /// Move `window_id` to `position` in the window order
    pub fn move_window(
        &mut self,
        window_id: WindowId,
        position: usize,
    ) -> Result<usize, TrackerError> {
        self.record(window_id)?;
        Ok(self.window_order.move_to(window_id, position)?)
    }

    /// Registered windows in relative order
    pub fn window_ids(&self) -> Vec<WindowId> {
        self.window_order.to_vec()
    }

    /// Number of registered windows
    pub fn window_count(&self) -> usize {
        self.window_order.len()
    }

    // ------------------------------------------------------------------
    // Active tab
    // ------------------------------------------------------------------

    /// Set the active tab of `window_id`
    ///
    /// The tab is not required to belong to the window. `Some(NO_ID)` counts
    /// as `None`.
    pub fn set_active_tab(
        &mut self,
        window_id: WindowId,
        tab_id: Option<TabId>,
    ) -> Result<(), TrackerError> {
        let tab_id = without_sentinel(tab_id);
        self.record_mut(window_id)?.active_tab = tab_id;
        log::debug!("Window {} active tab: {:?}", window_id, tab_id);
        Ok(())
    }

    /// Active tab of `window_id`; `None` for unregistered windows
    pub fn active_tab(&self, window_id: WindowId) -> Option<TabId> {
        self.windows.get(&window_id).and_then(|record| record.active_tab)
    }

    // ------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------

    /// Insert a browser-reported tab at its reported index
    ///
    /// With `infer_active`, a tab reported as active also becomes the
    /// window's active tab.
    pub fn append_tab_to_window(
        &mut self,
        window_id: WindowId,
        tab: &TabInfo,
        infer_active: bool,
    ) -> Result<usize, TrackerError> {
        let record = self.record_mut(window_id)?;
        let landed = record.tabs.insert(tab.id, tab.index)?;
        if infer_active && tab.active {
            record.active_tab = Some(tab.id);
        }
        log::debug!(
            "Window {}: added tab {} at {} (requested {}, active: {})",
            window_id,
            tab.id,
            landed,
            tab.index,
            tab.active
        );
        Ok(landed)
    }

    /// Remove `tab_id` from `window_id`, returning whether it was present
    ///
    /// The active tab is left as is; the browser reports the next active tab
    /// separately.
    pub fn remove_tab_from_window(
        &mut self,
        window_id: WindowId,
        tab_id: TabId,
    ) -> Result<bool, TrackerError> {
        let removed = self.record_mut(window_id)?.tabs.remove(tab_id);
        if removed {
            log::debug!("Window {}: removed tab {}", window_id, tab_id);
        } else {
            log::warn!("Window {}: tab {} not tracked, nothing removed", window_id, tab_id);
        }
        Ok(removed)
    }

    /// Insert `tab_id` into `window_id` at `position`
    pub fn insert_tab_into_window(
        &mut self,
        window_id: WindowId,
        tab_id: TabId,
        position: usize,
    ) -> Result<usize, TrackerError> {
        let landed = self.record_mut(window_id)?.tabs.insert(tab_id, position)?;
        log::debug!("Window {}: inserted tab {} at {}", window_id, tab_id, landed);
        Ok(landed)
    }

    /// Move `tab_id` to `position` within `window_id`
    pub fn move_tab_within_window(
        &mut self,
        window_id: WindowId,
        tab_id: TabId,
        position: usize,
    ) -> Result<usize, TrackerError> {
        let landed = self.record_mut(window_id)?.tabs.move_to(tab_id, position)?;
        log::debug!("Window {}: moved tab {} to {}", window_id, tab_id, landed);
        Ok(landed)
    }

    /// Move `tab_id` from `from` into `to` at `position`
    ///
    /// Both windows are checked before anything changes, so a failure leaves
    /// the tab where it was. If `tab_id` was active in `from`, `from` is left
    /// without an active tab.
    pub fn move_tab_to_window(
        &mut self,
        tab_id: TabId,
        from: WindowId,
        to: WindowId,
        position: usize,
    ) -> Result<usize, TrackerError> {
        if from == to {
            return self.move_tab_within_window(from, tab_id, position);
        }

        if !self.record(from)?.tabs.contains(tab_id) {
            return Err(SequenceError::NotFound(tab_id).into());
        }
        if self.record(to)?.tabs.contains(tab_id) {
            return Err(SequenceError::DuplicateId(tab_id).into());
        }

        let source = self.record_mut(from)?;
        source.tabs.remove(tab_id);
        if source.active_tab == Some(tab_id) {
            source.active_tab = None;
        }
        let landed = self.record_mut(to)?.tabs.insert(tab_id, position)?;
        log::debug!(
            "Moved tab {} from window {} to window {} at {}",
            tab_id,
            from,
            to,
            landed
        );
        Ok(landed)
    }

    /// Tabs of `window_id` in relative order
    pub fn tab_ids(&self, window_id: WindowId) -> Result<Vec<TabId>, TrackerError> {
        Ok(self.record(window_id)?.tabs.to_vec())
    }

    /// Number of tabs tracked for `window_id`
    pub fn tab_count(&self, window_id: WindowId) -> Result<usize, TrackerError> {
        Ok(self.record(window_id)?.tabs.len())
    }

    /// Registered window currently holding `tab_id`
    pub fn window_of_tab(&self, tab_id: TabId) -> Option<WindowId> {
        self.window_order
            .iter()
            .find(|window_id| {
                self.windows
                    .get(window_id)
                    .is_some_and(|record| record.tabs.contains(tab_id))
            })
    }

    /// Tab order of every window, outer order following the window order
    pub fn all_as_2d_array(&self) -> Vec<Vec<TabId>> {
        self.window_order
            .iter()
            .map(|window_id| {
                self.windows
                    .get(&window_id)
                    .map(|record| record.tabs.to_vec())
                    .unwrap_or_default()
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    fn record(&self, window_id: WindowId) -> Result<&WindowRecord, TrackerError> {
        self.windows
            .get(&window_id)
            .ok_or(TrackerError::UnknownWindow(window_id))
    }

    fn record_mut(&mut self, window_id: WindowId) -> Result<&mut WindowRecord, TrackerError> {
        self.windows
            .get_mut(&window_id)
            .ok_or(TrackerError::UnknownWindow(window_id))
    }
}
