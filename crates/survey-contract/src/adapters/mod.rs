//! World-state adapters.

pub mod memory_state;
pub mod staged;

pub use memory_state::InMemoryWorldState;
pub use staged::{StagedState, WriteSet};
