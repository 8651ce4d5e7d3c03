//! Id-keyed ordered sequence for taborder.
//!
//! Browser windows and tabs are identified by opaque integer ids that are not
//! their positions. [`IdSequence`] keeps those ids in a stable relative order
//! and supports positional insert, move and removal by id without callers
//! having to track indices across mutations.

mod error;
mod sequence;

pub use error::SequenceError;
pub use sequence::{IdSequence, Iter};
