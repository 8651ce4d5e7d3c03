//! taborder: authoritative relative order of browser windows and their tabs.
//!
//! Browser event handlers feed window and tab lifecycle events into a single
//! [`RelativeOrderTracker`] owned by the event layer. The tracker is
//! serialized into a snapshot on checkpoint and rebuilt from it after a
//! restart.

pub mod cli;
pub mod config;
pub mod debug;
pub mod error;
pub mod services;
pub mod snapshot;
pub mod tracker;

pub use error::{ConfigError, TrackerError};
pub use taborder_sequence::{IdSequence, SequenceError};
pub use tracker::{NO_ID, RelativeOrderTracker, SerializedTracker, TabId, TabInfo, WindowId};
