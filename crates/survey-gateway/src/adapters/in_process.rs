//! # In-Process Endpoint
//!
//! Runs the contract router directly against a shared world state,
//! modeling the ledger pipeline faithfully enough for tests and demos:
//!
//! - `evaluate` executes against a throwaway overlay, so a write-path
//!   function evaluated by mistake never touches the state.
//! - `endorse` executes against an overlay and parks the captured write
//!   set, keyed by transaction ID. Nothing is applied yet.
//! - `submit` moves the write set from endorsed to ordered.
//! - `commit_status` applies the ordered write set atomically under the
//!   state lock's discipline and assigns a block number.
//!
//! Failure anywhere before commit leaves the world state unchanged,
//! mirroring the real network's all-or-nothing guarantee.

use crate::errors::InvokeError;
use crate::ports::TransactionEndpoint;
use crate::transaction::{CommitStatus, Proposal};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use survey_contract::{ContractRouter, InMemoryWorldState, StagedState, WorldState, WriteSet};
use tracing::debug;

/// A whole ledger network folded into one process.
pub struct InProcessEndpoint {
    state: Arc<InMemoryWorldState>,
    endorsed: Mutex<HashMap<String, WriteSet>>,
    ordered: Mutex<HashMap<String, WriteSet>>,
    block_height: AtomicU64,
}

impl InProcessEndpoint {
    pub fn new() -> Self {
        Self {
            state: Arc::new(InMemoryWorldState::new()),
            endorsed: Mutex::new(HashMap::new()),
            ordered: Mutex::new(HashMap::new()),
            block_height: AtomicU64::new(0),
        }
    }

    /// The shared world state, for test assertions.
    pub fn state(&self) -> Arc<InMemoryWorldState> {
        Arc::clone(&self.state)
    }

    fn execute_staged(&self, proposal: &Proposal) -> Result<(Vec<u8>, WriteSet), InvokeError> {
        let base: Arc<dyn WorldState> = self.state.clone();
        let staged = Arc::new(StagedState::new(base));
        let router = ContractRouter::new(Arc::clone(&staged));
        let payload = router.invoke(&proposal.function, &proposal.args)?;
        drop(router);

        let staged = Arc::try_unwrap(staged)
            .map_err(|_| InvokeError::Transport("staged state still shared".into()))?;
        Ok((payload, staged.into_write_set()))
    }

    fn lock<'a, T>(
        &self,
        mutex: &'a Mutex<T>,
    ) -> Result<std::sync::MutexGuard<'a, T>, InvokeError> {
        mutex
            .lock()
            .map_err(|_| InvokeError::Transport("endpoint lock poisoned".into()))
    }
}

impl Default for InProcessEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionEndpoint for InProcessEndpoint {
    async fn evaluate(&self, proposal: &Proposal) -> Result<Vec<u8>, InvokeError> {
        // Overlay execution: any writes a misdirected evaluate produces
        // are discarded with the overlay.
        let (payload, _discarded) = self.execute_staged(proposal)?;
        Ok(payload)
    }

    async fn endorse(&self, proposal: &Proposal) -> Result<Vec<u8>, InvokeError> {
        let (payload, write_set) = self.execute_staged(proposal)?;
        debug!(tx_id = %proposal.tx_id, writes = write_set.len(), "proposal endorsed");

        self.lock(&self.endorsed)?
            .insert(proposal.tx_id.clone(), write_set);
        Ok(payload)
    }

    async fn submit(&self, tx_id: &str) -> Result<(), InvokeError> {
        let write_set = self
            .lock(&self.endorsed)?
            .remove(tx_id)
            .ok_or_else(|| InvokeError::Transport(format!("transaction {tx_id} was not endorsed")))?;

        self.lock(&self.ordered)?.insert(tx_id.to_owned(), write_set);
        Ok(())
    }

    async fn commit_status(&self, tx_id: &str) -> Result<CommitStatus, InvokeError> {
        let write_set = self
            .lock(&self.ordered)?
            .remove(tx_id)
            .ok_or_else(|| InvokeError::Transport(format!("transaction {tx_id} was not ordered")))?;

        write_set
            .apply(self.state.as_ref())
            .map_err(InvokeError::Contract)?;

        let block_number = self.block_height.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(tx_id, block_number, "transaction committed");
        Ok(CommitStatus {
            tx_id: tx_id.to_owned(),
            block_number,
        })
    }
}
