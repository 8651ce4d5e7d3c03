//! Typed errors for sequence mutations.

use thiserror::Error;

/// Errors produced when a mutation would break the uniqueness of ids or
/// refers to an id the sequence does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError<Id: std::fmt::Debug> {
    /// The id is already present; its position was left untouched.
    #[error("id {0:?} is already present in the sequence")]
    DuplicateId(Id),

    /// The id is not present in the sequence.
    #[error("id {0:?} is not present in the sequence")]
    NotFound(Id),
}
