//! # Transactions
//!
//! Proposal construction and the per-transaction state machine:
//!
//! ```text
//! Proposed ──→ Endorsed ──→ Ordered ──→ Committed   (terminal)
//!     │            │            │
//!     └────────────┴────────────┴──→ Failed { phase, cause }   (terminal)
//! ```
//!
//! Failure at any phase is terminal and carries the failing phase. No
//! state below `Committed` has touched the world state.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Invocation phase, used for timeout budgets and error tagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxPhase {
    /// Read-path execution against a single endpoint.
    Evaluate,
    /// Proposal broadcast and signed-response collection.
    Endorse,
    /// Handing the endorsed envelope to the ordering service.
    Submit,
    /// Waiting for block commitment confirmation.
    CommitStatus,
}

impl fmt::Display for TxPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxPhase::Evaluate => "evaluate",
            TxPhase::Endorse => "endorsement",
            TxPhase::Submit => "submission",
            TxPhase::CommitStatus => "commit-status",
        };
        f.write_str(name)
    }
}

/// A signed invocation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    /// Gateway-assigned transaction ID.
    pub tx_id: String,
    /// Target channel.
    pub channel: String,
    /// Target chaincode.
    pub chaincode: String,
    /// Contract function name, e.g. `CreatePoll`.
    pub function: String,
    /// Positional string arguments.
    pub args: Vec<String>,
    /// Proposal creation time, unix milliseconds.
    pub timestamp_ms: u64,
    /// Submitter's MSP ID.
    pub msp_id: String,
    /// Signature over [`Proposal::digest`], empty until signed.
    pub signature: Vec<u8>,
}

impl Proposal {
    /// SHA-256 digest of the invocation content (everything a signature
    /// must cover; excludes the signature itself).
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.tx_id.as_bytes());
        hasher.update(self.channel.as_bytes());
        hasher.update(self.chaincode.as_bytes());
        hasher.update(self.function.as_bytes());
        for arg in &self.args {
            hasher.update((arg.len() as u64).to_be_bytes());
            hasher.update(arg.as_bytes());
        }
        hasher.update(self.timestamp_ms.to_be_bytes());
        hasher.update(self.msp_id.as_bytes());
        hasher.finalize().into()
    }
}

/// Confirmation that a submitted transaction's block was committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitStatus {
    /// The confirmed transaction.
    pub tx_id: String,
    /// Height of the block carrying it.
    pub block_number: u64,
}

/// Result of a successful submit: response payload plus commit proof.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// Endorsement-time response payload.
    pub payload: Vec<u8>,
    /// Commit confirmation.
    pub status: CommitStatus,
}

/// Lifecycle state of one submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxState {
    Proposed,
    Endorsed,
    Ordered,
    Committed,
    /// Terminal failure, carrying the phase that failed and why.
    Failed { phase: TxPhase, cause: String },
}

impl TxState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxState::Committed | TxState::Failed { .. })
    }
}

/// One submitted transaction tracked through its lifecycle.
///
/// Transitions only move forward; advancing a terminal transaction is a
/// programming error and is rejected.
#[derive(Debug, Clone)]
pub struct Transaction {
    id: String,
    function: String,
    state: TxState,
}

impl Transaction {
    pub fn new(id: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            function: function.into(),
            state: TxState::Proposed,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn state(&self) -> &TxState {
        &self.state
    }

    /// Advance `Proposed -> Endorsed`.
    pub fn endorsed(&mut self) -> Result<(), InvalidTransition> {
        self.advance(TxState::Proposed, TxState::Endorsed)
    }

    /// Advance `Endorsed -> Ordered`.
    pub fn ordered(&mut self) -> Result<(), InvalidTransition> {
        self.advance(TxState::Endorsed, TxState::Ordered)
    }

    /// Advance `Ordered -> Committed`.
    pub fn committed(&mut self) -> Result<(), InvalidTransition> {
        self.advance(TxState::Ordered, TxState::Committed)
    }

    /// Fail terminally at `phase`. Valid from any non-terminal state.
    pub fn failed(&mut self, phase: TxPhase, cause: impl Into<String>) -> Result<(), InvalidTransition> {
        if self.state.is_terminal() {
            return Err(InvalidTransition {
                from: self.state.clone(),
                to: TxState::Failed {
                    phase,
                    cause: cause.into(),
                },
            });
        }
        self.state = TxState::Failed {
            phase,
            cause: cause.into(),
        };
        Ok(())
    }

    fn advance(&mut self, expected: TxState, next: TxState) -> Result<(), InvalidTransition> {
        if self.state != expected {
            return Err(InvalidTransition {
                from: self.state.clone(),
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

/// Attempted state-machine transition that is not legal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transaction transition: {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: TxState,
    pub to: TxState,
}
