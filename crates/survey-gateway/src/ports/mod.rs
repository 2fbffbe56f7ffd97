//! Outbound ports: the endpoint transport plus the explicit clock,
//! id-source, and signer dependencies.

use crate::errors::InvokeError;
use crate::transaction::{CommitStatus, Proposal};
use async_trait::async_trait;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Transport to the ledger network, one phase per method.
///
/// Implementations own the underlying channel; `close` releases it and
/// must be idempotent (the gateway guards against double release, but a
/// well-behaved adapter tolerates it too).
#[async_trait]
pub trait TransactionEndpoint: Send + Sync {
    /// Execute a read-only proposal and return its payload. Nothing is
    /// ordered or committed.
    async fn evaluate(&self, proposal: &Proposal) -> Result<Vec<u8>, InvokeError>;

    /// Execute the proposal for endorsement, returning the
    /// endorsement-time response payload. World state is not modified.
    async fn endorse(&self, proposal: &Proposal) -> Result<Vec<u8>, InvokeError>;

    /// Hand the endorsed transaction to the ordering service.
    async fn submit(&self, tx_id: &str) -> Result<(), InvokeError>;

    /// Wait for the transaction's block to commit.
    async fn commit_status(&self, tx_id: &str) -> Result<CommitStatus, InvokeError>;

    /// Release the underlying channel.
    fn close(&self) {}
}

/// Time source for proposal timestamps.
pub trait Clock: Send + Sync {
    fn now_unix_millis(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Source of unique transaction IDs.
pub trait TransactionIdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// UUID-v4 transaction IDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdSource;

impl TransactionIdSource for UuidIdSource {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Signs proposal digests on behalf of the client identity.
pub trait Signer: Send + Sync {
    fn sign(&self, digest: &[u8; 32]) -> Vec<u8>;
}
