//! # survey-contract
//!
//! Chaincode side of the survey ledger: typed entity records, an
//! existence-checked CRUD contract over the world state, and the
//! name-driven function router the gateway invokes.
//!
//! ## Role in System
//!
//! - **Single Source of Truth**: the world-state store is the only
//!   persistence authority for survey records
//! - **Generic CRUD**: one contract module serves all entity types,
//!   scoped by a per-type key prefix
//! - **Dispatch Surface**: `ContractRouter` maps the fixed function
//!   catalog (`CreatePoll`, `ReadQuestion`, ...) onto the contract
//!
//! ## Consistency
//!
//! The create/exists check-then-put sequence holds no lock. Per-key
//! serializability across concurrent submitters is the surrounding
//! ledger's ordering guarantee, not this crate's.

pub mod adapters;
pub mod contract;
pub mod dispatch;
pub mod domain;
pub mod ports;

pub use adapters::{InMemoryWorldState, StagedState, WriteSet};
pub use contract::SurveyContract;
pub use dispatch::ContractRouter;
pub use domain::{Answer, ContractError, Poll, Question, Record, Vote};
pub use ports::WorldState;
