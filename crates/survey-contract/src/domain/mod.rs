//! Core domain types: entity records and the contract error taxonomy.

pub mod entities;
pub mod errors;
pub mod fixtures;

pub use entities::{Answer, Poll, Question, Record, Vote};
pub use errors::ContractError;
