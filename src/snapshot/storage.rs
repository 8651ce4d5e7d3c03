//! File I/O for tracker snapshots
//!
//! Snapshots are stored in `~/.config/taborder/last_order.yaml`. Files with a
//! `.json` extension are read as a bare serialized tracker instead, which is
//! what the browser side writes to its own storage.

use super::TrackerSnapshot;
use crate::config::Config;
use crate::tracker::SerializedTracker;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the path to the default snapshot file
pub fn snapshot_path() -> PathBuf {
    Config::config_dir().join("last_order.yaml")
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Save a snapshot to a specific file
pub fn save_snapshot_to(snapshot: &TrackerSnapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create snapshot directory {:?}", parent))?;
    }

    let contents = if is_json(path) {
        serde_json::to_string_pretty(&snapshot.state).context("Failed to serialize tracker")?
    } else {
        serde_yaml_ng::to_string(snapshot).context("Failed to serialize snapshot")?
    };

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write snapshot to {:?}", path))?;

    log::info!(
        "Saved snapshot ({} windows) to {:?}",
        snapshot.state.window_order.len(),
        path
    );
    Ok(())
}

/// Load a snapshot from a specific file
///
/// Returns `None` if the file doesn't exist or is empty.
/// Returns an error if the file exists but is corrupt.
pub fn load_snapshot_from(path: &Path) -> Result<Option<TrackerSnapshot>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot from {:?}", path))?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    let snapshot = if is_json(path) {
        let state: SerializedTracker = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse tracker JSON from {:?}", path))?;
        TrackerSnapshot {
            saved_at: String::new(),
            state,
        }
    } else {
        serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse snapshot from {:?}", path))?
    };

    log::info!(
        "Loaded snapshot ({} windows) from {:?}",
        snapshot.state.window_order.len(),
        path
    );
    Ok(Some(snapshot))
}

/// Remove a snapshot file (e.g., after a successful restore)
pub fn clear_snapshot_at(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove snapshot file {:?}", path))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{RelativeOrderTracker, TabInfo};
    use tempfile::tempdir;

    fn sample_snapshot() -> TrackerSnapshot {
        let mut tracker = RelativeOrderTracker::new();
        tracker.register_window(3);
        tracker
            .append_tab_to_window(3, &TabInfo::new(30, 0, true), true)
            .unwrap();
        tracker.set_focused_window(Some(3));
        TrackerSnapshot {
            saved_at: "2025-01-01T00:00:00Z".to_string(),
            state: tracker.to_serializable(),
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp = tempdir().unwrap();
        let result = load_snapshot_from(&temp.path().join("nonexistent.yaml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("empty.yaml");
        std::fs::write(&path, "").unwrap();
        assert!(load_snapshot_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("corrupt.yaml");
        std::fs::write(&path, "not: valid: yaml: [[[").unwrap();
        assert!(load_snapshot_from(&path).is_err());
    }

    #[test]
    fn test_save_and_load_yaml_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("order.yaml");

        let snapshot = sample_snapshot();
        save_snapshot_to(&snapshot, &path).unwrap();

        let loaded = load_snapshot_from(&path).unwrap().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_save_and_load_json_keeps_state_only() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("order.json");

        let snapshot = sample_snapshot();
        save_snapshot_to(&snapshot, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"windowOrder\""));
        assert!(!raw.contains("saved_at"));

        let loaded = load_snapshot_from(&path).unwrap().unwrap();
        assert_eq!(loaded.state, snapshot.state);
        assert!(loaded.saved_at.is_empty());
    }

    #[test]
    fn test_clear_snapshot() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("order.yaml");
        save_snapshot_to(&sample_snapshot(), &path).unwrap();
        clear_snapshot_at(&path).unwrap();
        assert!(!path.exists());
        // Clearing a missing file is fine
        clear_snapshot_at(&path).unwrap();
    }
}
