//! # survey-gateway
//!
//! Client side of the survey ledger: connects a signing identity to a
//! transaction endpoint and invokes contract functions remotely.
//!
//! ## Invocation kinds
//!
//! - **Evaluate** — read path. Executed by a single endpoint, never
//!   ordered or committed. One timeout budget covers proposal+response.
//! - **Submit** — write path. Three ordered phases, each with its own
//!   budget: endorsement, submission to ordering, and the wait for
//!   commit confirmation. A phase timeout is terminal; the client never
//!   retries on its own.
//!
//! ## Resource model
//!
//! The endpoint connection is a single long-lived shared resource:
//! acquired once at [`Gateway::connect`] time, released exactly once on
//! every exit path (explicit [`Gateway::close`] or drop).

pub mod adapters;
pub mod client;
pub mod config;
pub mod errors;
pub mod identity;
pub mod ports;
pub mod transaction;

pub use adapters::InProcessEndpoint;
pub use client::{Contract, Gateway, GatewayOptions, Network};
pub use config::{GatewayConfig, TimeoutConfig};
pub use errors::{GatewayError, InvokeError};
pub use identity::{Ed25519Signer, X509Identity};
pub use ports::{Clock, Signer, SystemClock, TransactionEndpoint, TransactionIdSource, UuidIdSource};
pub use transaction::{CommitStatus, Proposal, SubmitOutcome, Transaction, TxPhase, TxState};
