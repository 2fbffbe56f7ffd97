//! Outbound ports: the storage abstraction the contract depends on.

pub mod state;

pub use state::{RangeIter, WorldState};
