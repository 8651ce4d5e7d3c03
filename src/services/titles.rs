//! Window title decoration.
//!
//! Named windows get their title prefixed with `"[<name>] "`; clearing the
//! name sets an empty preface.

use crate::tracker::WindowId;
use parking_lot::Mutex;

/// Title preface shown for a window named `name`
pub fn title_preface_for(name: &str) -> String {
    format!("[{name}] ")
}

/// Sets or clears the title prefix of a browser window
pub trait TitleDecorator {
    /// Set the preface for `window_id`; an empty string clears it
    fn title_preface(&self, window_id: WindowId, preface: &str);
}

/// Decorator that only logs the requested preface
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTitles;

impl TitleDecorator for LogTitles {
    fn title_preface(&self, window_id: WindowId, preface: &str) {
        if preface.is_empty() {
            log::info!("Window {} title preface cleared", window_id);
        } else {
            log::info!("Window {} title preface set to {:?}", window_id, preface);
        }
    }
}

/// Decorator that remembers every call, in order
#[derive(Debug, Default)]
pub struct RecordingTitles {
    calls: Mutex<Vec<(WindowId, String)>>,
}

impl RecordingTitles {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(window_id, preface)` calls received so far
    pub fn calls(&self) -> Vec<(WindowId, String)> {
        self.calls.lock().clone()
    }

    /// Most recent preface requested for `window_id`
    pub fn last_for(&self, window_id: WindowId) -> Option<String> {
        self.calls
            .lock()
            .iter()
            .rev()
            .find(|(id, _)| *id == window_id)
            .map(|(_, preface)| preface.clone())
    }
}

impl TitleDecorator for RecordingTitles {
    fn title_preface(&self, window_id: WindowId, preface: &str) {
        self.calls.lock().push((window_id, preface.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_preface_format() {
        assert_eq!(title_preface_for("Work"), "[Work] ");
        assert_eq!(title_preface_for(" padded "), "[ padded ] ");
    }

    #[test]
    fn test_recording_titles_tracks_last_call() {
        let titles = RecordingTitles::new();
        titles.title_preface(1, "[A] ");
        titles.title_preface(2, "[B] ");
        titles.title_preface(1, "");

        assert_eq!(titles.calls().len(), 3);
        assert_eq!(titles.last_for(1), Some(String::new()));
        assert_eq!(titles.last_for(2), Some("[B] ".to_string()));
        assert_eq!(titles.last_for(3), None);
    }

    #[test]
    fn test_log_titles_names_and_clears_through_tracker() {
        use crate::services::MemoryStore;
        use crate::tracker::RelativeOrderTracker;

        let mut tracker = RelativeOrderTracker::new();
        tracker.register_window(4);
        let store = MemoryStore::new();

        tracker.set_name(4, "Docs", &store, &LogTitles).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(tracker.name(4), Some("Docs"));

        tracker.set_name(4, "", &store, &LogTitles).unwrap();
        assert_eq!(store.len(), 0);
        assert_eq!(tracker.name(4), None);
    }
}
