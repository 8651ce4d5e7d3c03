//! Per-window display names.
//!
//! A name lives in three places: the tracker, the temporary store (so it
//! survives extension reloads within a browser session) and the window title
//! preface.

use super::{RelativeOrderTracker, WindowId};
use crate::error::TrackerError;
use crate::services::{TemporaryStore, TitleDecorator, title_preface_for, window_name_key};
use futures::future::join_all;

impl RelativeOrderTracker {
    /// Display name of `window_id`
    pub fn name(&self, window_id: WindowId) -> Option<&str> {
        self.windows
            .get(&window_id)
            .and_then(|record| record.name.as_deref())
    }

    /// Registered windows that carry a name, in window order
    pub fn named_windows(&self) -> Vec<(WindowId, String)> {
        self.window_order
            .iter()
            .filter_map(|window_id| {
                self.windows
                    .get(&window_id)
                    .and_then(|record| record.name.clone())
                    .map(|name| (window_id, name))
            })
            .collect()
    }

    /// Name `window_id`, or clear its name when `name` is blank
    ///
    /// A non-blank name is stored as given (not trimmed), written to the
    /// temporary store and shown as a `"[<name>] "` title preface. A blank
    /// name clears all three.
    pub fn set_name(
        &mut self,
        window_id: WindowId,
        name: &str,
        store: &dyn TemporaryStore,
        titles: &dyn TitleDecorator,
    ) -> Result<(), TrackerError> {
        let record = self.record_mut(window_id)?;
        let key = window_name_key(window_id);

        if name.trim().is_empty() {
            record.name = None;
            store.unset(&key);
            titles.title_preface(window_id, "");
            log::debug!("Cleared name of window {}", window_id);
        } else {
            record.name = Some(name.to_string());
            store.set(&key, name);
            titles.title_preface(window_id, &title_preface_for(name));
            log::debug!("Named window {} {:?}", window_id, name);
        }
        Ok(())
    }

    /// Overwrite names with whatever the temporary store holds
    ///
    /// Lookups for all registered windows run concurrently. A window that is
    /// no longer registered when its answer arrives is skipped. Failed
    /// lookups are logged and do not stop the others; the first failure is
    /// returned once every lookup has finished.
    pub async fn reload_names_from_temporary_store(
        &mut self,
        store: &dyn TemporaryStore,
    ) -> Result<usize, TrackerError> {
        let window_ids = self.window_ids();
        let keys: Vec<String> = window_ids.iter().map(|&id| window_name_key(id)).collect();
        let results = join_all(keys.iter().map(|key| store.get_one(key))).await;

        let mut applied = 0;
        let mut first_error = None;
        for (window_id, result) in window_ids.into_iter().zip(results) {
            match result {
                Ok(Some(name)) => match self.windows.get_mut(&window_id) {
                    Some(record) => {
                        record.name = Some(name);
                        applied += 1;
                    }
                    None => log::debug!(
                        "Window {} unregistered during name reload, skipping",
                        window_id
                    ),
                },
                Ok(None) => {}
                Err(source) => {
                    log::warn!("Name lookup for window {} failed: {:#}", window_id, source);
                    first_error.get_or_insert(TrackerError::Store { window_id, source });
                }
            }
        }

        log::info!("Reloaded {} window names from temporary store", applied);
        match first_error {
            Some(err) => Err(err),
            None => Ok(applied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MemoryStore, RecordingTitles};
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    /// Store whose lookups fail for one key
    struct FlakyStore {
        inner: MemoryStore,
        failing_key: String,
    }

    #[async_trait]
    impl TemporaryStore for FlakyStore {
        async fn get_one(&self, key: &str) -> Result<Option<String>> {
            if key == self.failing_key {
                return Err(anyhow!("backend unavailable"));
            }
            self.inner.get_one(key).await
        }

        fn set(&self, key: &str, value: &str) {
            self.inner.set(key, value);
        }

        fn unset(&self, key: &str) {
            self.inner.unset(key);
        }
    }

    #[test]
    fn test_set_name_and_clear() {
        let mut tracker = RelativeOrderTracker::new();
        let store = MemoryStore::new();
        let titles = RecordingTitles::new();
        tracker.register_window(1);

        tracker.set_name(1, "Work", &store, &titles).unwrap();
        assert_eq!(tracker.name(1), Some("Work"));
        assert_eq!(store.get("window1"), Some("Work".to_string()));
        assert_eq!(titles.last_for(1), Some("[Work] ".to_string()));

        tracker.set_name(1, "  ", &store, &titles).unwrap();
        assert_eq!(tracker.name(1), None);
        assert_eq!(store.get("window1"), None);
        assert_eq!(titles.last_for(1), Some(String::new()));
        assert_eq!(titles.calls().len(), 2);
    }

    #[test]
    fn test_set_name_keeps_untrimmed_value() {
        let mut tracker = RelativeOrderTracker::new();
        let store = MemoryStore::new();
        let titles = RecordingTitles::new();
        tracker.register_window(1);

        tracker.set_name(1, " Side ", &store, &titles).unwrap();
        assert_eq!(tracker.name(1), Some(" Side "));
        assert_eq!(titles.last_for(1), Some("[ Side ] ".to_string()));
    }

    #[test]
    fn test_set_name_unknown_window_touches_nothing() {
        let mut tracker = RelativeOrderTracker::new();
        let store = MemoryStore::new();
        let titles = RecordingTitles::new();

        assert!(matches!(
            tracker.set_name(4, "Nope", &store, &titles),
            Err(TrackerError::UnknownWindow(4))
        ));
        assert!(store.is_empty());
        assert!(titles.calls().is_empty());
    }

    #[test]
    fn test_named_windows_in_window_order() {
        let mut tracker = RelativeOrderTracker::new();
        let store = MemoryStore::new();
        let titles = RecordingTitles::new();
        for id in [3, 1, 2] {
            tracker.register_window(id);
        }
        tracker.set_name(2, "B", &store, &titles).unwrap();
        tracker.set_name(3, "A", &store, &titles).unwrap();

        assert_eq!(
            tracker.named_windows(),
            vec![(3, "A".to_string()), (2, "B".to_string())]
        );
    }

    #[tokio::test]
    async fn test_reload_overwrites_only_stored_names() {
        let mut tracker = RelativeOrderTracker::new();
        let store = MemoryStore::new();
        let titles = RecordingTitles::new();
        tracker.register_window(1);
        tracker.register_window(2);
        tracker.set_name(2, "Local", &store, &titles).unwrap();

        store.set("window1", "Restored");
        store.set("window9", "Stale");

        let applied = tracker.reload_names_from_temporary_store(&store).await.unwrap();
        assert_eq!(applied, 2);
        assert_eq!(tracker.name(1), Some("Restored"));
        assert_eq!(tracker.name(2), Some("Local"));
        assert!(!tracker.has_window(9));
        assert_eq!(tracker.name(9), None);
    }

    #[tokio::test]
    async fn test_reload_reports_failure_but_applies_others() {
        let mut tracker = RelativeOrderTracker::new();
        tracker.register_window(1);
        tracker.register_window(2);

        let store = FlakyStore {
            inner: MemoryStore::new(),
            failing_key: "window1".to_string(),
        };
        store.set("window2", "Two");

        let err = tracker
            .reload_names_from_temporary_store(&store)
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Store { window_id: 1, .. }));
        assert_eq!(tracker.name(2), Some("Two"));
        assert_eq!(tracker.name(1), None);
    }
}
