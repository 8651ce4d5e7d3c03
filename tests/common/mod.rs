//! Shared integration test helpers for taborder.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{TestContext, browser_session};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers is used per file.

#![allow(dead_code)]

use std::path::PathBuf;
use taborder::services::{MemoryStore, RecordingTitles};
use taborder::{RelativeOrderTracker, TabInfo};
use tempfile::TempDir;

/// Collaborators plus a scratch directory for one test
pub struct TestContext {
    pub store: MemoryStore,
    pub titles: RecordingTitles,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            titles: RecordingTitles::new(),
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path inside the scratch directory
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

/// Two windows the way a browser reports them at startup
///
/// Window 1: tabs 10 (active), 11; named "Work".
/// Window 2: tabs 20, 21 (active), 22.
/// Window 2 has focus.
pub fn browser_session(ctx: &TestContext) -> RelativeOrderTracker {
    let mut tracker = RelativeOrderTracker::new();
    tracker.register_window(1);
    tracker.register_window(2);

    for tab in [TabInfo::new(10, 0, true), TabInfo::new(11, 1, false)] {
        tracker.append_tab_to_window(1, &tab, true).unwrap();
    }
    for tab in [
        TabInfo::new(20, 0, false),
        TabInfo::new(21, 1, true),
        TabInfo::new(22, 2, false),
    ] {
        tracker.append_tab_to_window(2, &tab, true).unwrap();
    }

    tracker.set_name(1, "Work", &ctx.store, &ctx.titles).unwrap();
    tracker.set_focused_window(Some(2));
    tracker
}
