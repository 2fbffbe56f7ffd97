//! # Survey-Chain Test Suite
//!
//! Unified test crate wiring the gateway client to the contract over
//! the in-process endpoint.
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── crud_lifecycle.rs   # End-to-end CRUD showcase
//!     └── submit_phases.rs    # Timeouts, isolation, no partial effect
//! ```
//!
//! ```bash
//! cargo test -p survey-tests
//! ```

#[cfg(test)]
pub mod integration;

#[cfg(test)]
pub mod harness;
