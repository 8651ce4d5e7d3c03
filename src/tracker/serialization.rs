//! Plain nested form of the tracker, for storage.
//!
//! The layout mirrors what the browser side keeps in storage: window order as
//! an array, per-window tab arrays keyed by window id, the active tab per
//! window, the focused window and the names of named windows. Absent ids are
//! written as `-1`; on input `-1` and `null` both read as absent.

use super::{NO_ID, RelativeOrderTracker, TabId, WindowId, WindowRecord, without_sentinel};
use crate::error::TrackerError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use taborder_sequence::IdSequence;

/// JSON-compatible snapshot of a [`RelativeOrderTracker`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedTracker {
    /// Registered windows in relative order
    pub window_order: Vec<WindowId>,
    /// Tab order of every registered window
    pub tab_order: BTreeMap<WindowId, Vec<TabId>>,
    /// Active tab per registered window
    #[serde(with = "sentinel_map")]
    pub active_tab: BTreeMap<WindowId, Option<TabId>>,
    /// Focused window
    #[serde(with = "sentinel")]
    pub focused_window: Option<WindowId>,
    /// Names of named windows
    pub window_name: BTreeMap<WindowId, String>,
}

mod sentinel {
    use super::NO_ID;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        id: &Option<i64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(id.unwrap_or(NO_ID))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        Ok(Option::<i64>::deserialize(deserializer)?.filter(|&id| id != NO_ID))
    }
}

mod sentinel_map {
    use super::NO_ID;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<i64, Option<i64>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(map.iter().map(|(key, id)| (key, id.unwrap_or(NO_ID))))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<i64, Option<i64>>, D::Error> {
        let raw = BTreeMap::<i64, Option<i64>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(key, id)| (key, id.filter(|&id| id != NO_ID)))
            .collect())
    }
}

fn malformed(message: impl Into<String>) -> TrackerError {
    TrackerError::MalformedSerializedInput(message.into())
}

impl RelativeOrderTracker {
    /// Snapshot the tracker into its plain nested form
    pub fn to_serializable(&self) -> SerializedTracker {
        let mut serialized = SerializedTracker {
            window_order: self.window_order.to_vec(),
            focused_window: self.focused_window,
            ..SerializedTracker::default()
        };

        for window_id in self.window_order.iter() {
            let Some(record) = self.windows.get(&window_id) else {
                continue;
            };
            serialized.tab_order.insert(window_id, record.tabs.to_vec());
            serialized.active_tab.insert(window_id, record.active_tab);
            if let Some(name) = &record.name {
                serialized.window_name.insert(window_id, name.clone());
            }
        }
        serialized
    }

    /// Rebuild a tracker from its plain nested form
    ///
    /// Fails with `MalformedSerializedInput` when the window order repeats an
    /// id, when window order and tab order disagree on the set of windows,
    /// when a tab array repeats an id, or when active tabs or names refer to
    /// windows that are not in the window order.
    pub fn from_serializable(root: SerializedTracker) -> Result<Self, TrackerError> {
        let SerializedTracker {
            window_order,
            mut tab_order,
            mut active_tab,
            focused_window,
            mut window_name,
        } = root;

        let window_order = IdSequence::from_slice(&window_order)
            .map_err(|e| malformed(format!("windowOrder: {e}")))?;

        let mut windows = HashMap::with_capacity(window_order.len());
        for window_id in window_order.iter() {
            let tab_ids = tab_order.remove(&window_id).ok_or_else(|| {
                malformed(format!("window {window_id} is in windowOrder but has no tabOrder entry"))
            })?;
            let tabs = IdSequence::from_slice(&tab_ids)
                .map_err(|e| malformed(format!("tabOrder of window {window_id}: {e}")))?;
            windows.insert(
                window_id,
                WindowRecord {
                    tabs,
                    active_tab: without_sentinel(active_tab.remove(&window_id).flatten()),
                    name: window_name.remove(&window_id),
                },
            );
        }

        if let Some(window_id) = tab_order.keys().next() {
            return Err(malformed(format!(
                "tabOrder has an entry for window {window_id} which is not in windowOrder"
            )));
        }
        if let Some(window_id) = active_tab.keys().next() {
            return Err(malformed(format!(
                "activeTab has an entry for window {window_id} which is not in windowOrder"
            )));
        }
        if let Some(window_id) = window_name.keys().next() {
            return Err(malformed(format!(
                "windowName has an entry for window {window_id} which is not in windowOrder"
            )));
        }

        log::debug!("Restored tracker with {} windows", window_order.len());
        Ok(Self {
            window_order,
            windows,
            focused_window: without_sentinel(focused_window),
        })
    }

    /// Rebuild a tracker from an untyped JSON document
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, TrackerError> {
        let root: SerializedTracker =
            serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
        Self::from_serializable(root)
    }
}

impl From<RelativeOrderTracker> for SerializedTracker {
    fn from(tracker: RelativeOrderTracker) -> Self {
        tracker.to_serializable()
    }
}

impl TryFrom<SerializedTracker> for RelativeOrderTracker {
    type Error = TrackerError;

    fn try_from(root: SerializedTracker) -> Result<Self, Self::Error> {
        Self::from_serializable(root)
    }
}
