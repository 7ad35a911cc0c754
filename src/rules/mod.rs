//! Game rules for Just Divide.
//!
//! - `merge`: the equality/divisibility merge and its single-step resolution
//! - `hints`: which empty cells would merge with the active tile
//! - `transition`: the pure `(state, command) -> state` function
//!
//! Nothing here owns state or performs I/O; `crate::engine` wires these
//! functions to storage, logging and the clock.

pub mod merge;
pub mod hints;
pub mod transition;

pub use hints::compute_hints;
pub use merge::{can_merge, resolve, Merge};
pub use transition::{apply, Transition};
