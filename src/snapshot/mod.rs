//! Saved tracker state for restart recovery
//!
//! On checkpoint or shutdown the tracker is serialized into a snapshot file;
//! on the next start it is rebuilt from that file.

pub mod storage;

use crate::error::TrackerError;
use crate::tracker::{RelativeOrderTracker, SerializedTracker};
use serde::{Deserialize, Serialize};

/// Tracker state plus the time it was taken
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    /// Timestamp when the snapshot was taken (RFC 3339)
    pub saved_at: String,
    /// Serialized tracker
    pub state: SerializedTracker,
}

impl TrackerSnapshot {
    /// Capture `tracker` now
    pub fn capture(tracker: &RelativeOrderTracker) -> Self {
        Self {
            saved_at: chrono::Utc::now().to_rfc3339(),
            state: tracker.to_serializable(),
        }
    }

    /// Rebuild the tracker held by this snapshot
    pub fn restore(self) -> Result<RelativeOrderTracker, TrackerError> {
        RelativeOrderTracker::from_serializable(self.state)
    }
}
