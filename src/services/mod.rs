//! External collaborators the tracker talks to.
//!
//! The tracker never owns these; event handlers hand them in by reference
//! when an operation needs them (naming, name reload).

pub mod store;
pub mod titles;

pub use store::{MemoryStore, TemporaryStore, window_name_key};
pub use titles::{LogTitles, RecordingTitles, TitleDecorator, title_preface_for};
