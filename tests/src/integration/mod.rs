//! Cross-crate integration: gateway client driving the contract.

pub mod crud_lifecycle;
pub mod submit_phases;
