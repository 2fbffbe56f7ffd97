//! # Gateway Client
//!
//! The `Gateway -> Network -> Contract` surface callers use to invoke
//! contract functions. Evaluate runs under a single timeout budget;
//! submit walks the endorse/submit/commit-status phases, each under its
//! own budget, tracking the transaction state machine as it goes.
//!
//! A phase timeout is terminal for that transaction and is never
//! retried here; retry policy belongs to the caller.

use crate::config::TimeoutConfig;
use crate::errors::{GatewayError, InvokeError};
use crate::identity::X509Identity;
use crate::ports::{Clock, Signer, SystemClock, TransactionEndpoint, TransactionIdSource, UuidIdSource};
use crate::transaction::{Proposal, SubmitOutcome, Transaction, TxPhase};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything a gateway needs besides the endpoint connection.
pub struct GatewayOptions {
    pub identity: X509Identity,
    pub signer: Arc<dyn Signer>,
    pub timeouts: TimeoutConfig,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn TransactionIdSource>,
}

impl GatewayOptions {
    /// Options with default timeouts, wall clock, and UUID tx IDs.
    pub fn new(identity: X509Identity, signer: Arc<dyn Signer>) -> Self {
        Self {
            identity,
            signer,
            timeouts: TimeoutConfig::default(),
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidIdSource),
        }
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_ids(mut self, ids: Arc<dyn TransactionIdSource>) -> Self {
        self.ids = ids;
        self
    }
}

struct GatewayInner {
    endpoint: Arc<dyn TransactionEndpoint>,
    identity: X509Identity,
    signer: Arc<dyn Signer>,
    timeouts: TimeoutConfig,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn TransactionIdSource>,
    closed: AtomicBool,
}

impl GatewayInner {
    fn release(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.endpoint.close();
            info!("gateway connection released");
        }
    }

    fn ensure_open(&self) -> Result<(), GatewayError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(GatewayError::ConnectionClosed);
        }
        Ok(())
    }
}

impl Drop for GatewayInner {
    fn drop(&mut self) {
        // Last exit path: release exactly once even without close().
        self.release();
    }
}

/// A connected gateway holding the single long-lived endpoint channel.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

impl Gateway {
    /// Take ownership of an endpoint connection. The connection is the
    /// gateway's to release from here on.
    pub fn connect(endpoint: Arc<dyn TransactionEndpoint>, options: GatewayOptions) -> Self {
        info!(msp_id = options.identity.msp_id(), "gateway connected");
        Self {
            inner: Arc::new(GatewayInner {
                endpoint,
                identity: options.identity,
                signer: options.signer,
                timeouts: options.timeouts,
                clock: options.clock,
                ids: options.ids,
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Select a ledger channel.
    pub fn network(&self, channel: impl Into<String>) -> Network {
        Network {
            inner: Arc::clone(&self.inner),
            channel: channel.into(),
        }
    }

    /// Release the endpoint channel. Idempotent; in-flight and later
    /// invocations fail with `ConnectionClosed`.
    pub fn close(&self) {
        self.inner.release();
    }
}

/// A ledger channel selected on a connected gateway.
#[derive(Clone)]
pub struct Network {
    inner: Arc<GatewayInner>,
    channel: String,
}

impl Network {
    /// Select a deployed contract on this channel.
    pub fn contract(&self, chaincode: impl Into<String>) -> Contract {
        Contract {
            inner: Arc::clone(&self.inner),
            channel: self.channel.clone(),
            chaincode: chaincode.into(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

/// A deployed contract reachable through the gateway.
#[derive(Clone)]
pub struct Contract {
    inner: Arc<GatewayInner>,
    channel: String,
    chaincode: String,
}

impl Contract {
    pub fn chaincode(&self) -> &str {
        &self.chaincode
    }

    /// Read path: execute `function` against a single endpoint and
    /// return the payload. Nothing is ordered or committed.
    pub async fn evaluate(&self, function: &str, args: &[&str]) -> Result<Vec<u8>, GatewayError> {
        self.inner.ensure_open()?;
        let proposal = self.proposal(function, args);
        debug!(tx_id = %proposal.tx_id, function, "evaluating transaction");

        let payload = self
            .phase(function, TxPhase::Evaluate, self.inner.timeouts.evaluate, {
                let endpoint = Arc::clone(&self.inner.endpoint);
                let proposal = proposal.clone();
                async move { endpoint.evaluate(&proposal).await }
            })
            .await?;

        debug!(tx_id = %proposal.tx_id, bytes = payload.len(), "evaluate complete");
        Ok(payload)
    }

    /// Write path: endorse, submit for ordering, and await commitment,
    /// each phase under its own timeout budget.
    pub async fn submit(&self, function: &str, args: &[&str]) -> Result<SubmitOutcome, GatewayError> {
        self.inner.ensure_open()?;
        let proposal = self.proposal(function, args);
        let mut tx = Transaction::new(proposal.tx_id.clone(), function);
        debug!(tx_id = tx.id(), function, "submitting transaction");

        let payload = match self
            .phase(function, TxPhase::Endorse, self.inner.timeouts.endorse, {
                let endpoint = Arc::clone(&self.inner.endpoint);
                let proposal = proposal.clone();
                async move { endpoint.endorse(&proposal).await }
            })
            .await
        {
            Ok(payload) => payload,
            Err(err) => return Err(self.fail(&mut tx, TxPhase::Endorse, err)),
        };
        tx.endorsed().map_err(internal_state_error)?;
        debug!(tx_id = tx.id(), "transaction endorsed");

        if let Err(err) = self
            .phase(function, TxPhase::Submit, self.inner.timeouts.submit, {
                let endpoint = Arc::clone(&self.inner.endpoint);
                let tx_id = tx.id().to_owned();
                async move { endpoint.submit(&tx_id).await }
            })
            .await
        {
            return Err(self.fail(&mut tx, TxPhase::Submit, err));
        }
        tx.ordered().map_err(internal_state_error)?;
        debug!(tx_id = tx.id(), "transaction ordered");

        let status = match self
            .phase(
                function,
                TxPhase::CommitStatus,
                self.inner.timeouts.commit_status,
                {
                    let endpoint = Arc::clone(&self.inner.endpoint);
                    let tx_id = tx.id().to_owned();
                    async move { endpoint.commit_status(&tx_id).await }
                },
            )
            .await
        {
            Ok(status) => status,
            Err(err) => return Err(self.fail(&mut tx, TxPhase::CommitStatus, err)),
        };
        tx.committed().map_err(internal_state_error)?;
        info!(
            tx_id = tx.id(),
            function,
            block = status.block_number,
            "transaction committed"
        );

        Ok(SubmitOutcome { payload, status })
    }

    fn proposal(&self, function: &str, args: &[&str]) -> Proposal {
        let mut proposal = Proposal {
            tx_id: self.inner.ids.next_id(),
            channel: self.channel.clone(),
            chaincode: self.chaincode.clone(),
            function: function.to_owned(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timestamp_ms: self.inner.clock.now_unix_millis(),
            msp_id: self.inner.identity.msp_id().to_owned(),
            signature: Vec::new(),
        };
        proposal.signature = self.inner.signer.sign(&proposal.digest());
        proposal
    }

    async fn phase<T, F>(
        &self,
        function: &str,
        phase: TxPhase,
        budget: std::time::Duration,
        work: F,
    ) -> Result<T, GatewayError>
    where
        F: Future<Output = Result<T, InvokeError>>,
    {
        match tokio::time::timeout(budget, work).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(GatewayError::tag(function, phase, err)),
            Err(_) => {
                warn!(function, %phase, budget_ms = budget.as_millis() as u64, "phase timed out");
                Err(GatewayError::Timeout {
                    function: function.to_owned(),
                    phase,
                })
            }
        }
    }

    fn fail(&self, tx: &mut Transaction, phase: TxPhase, err: GatewayError) -> GatewayError {
        if tx.failed(phase, err.to_string()).is_err() {
            // Already terminal; keep the original error as the outcome.
            debug!(tx_id = tx.id(), "transaction already terminal");
        }
        warn!(tx_id = tx.id(), %phase, error = %err, "transaction failed");
        err
    }
}

fn internal_state_error(err: crate::transaction::InvalidTransition) -> GatewayError {
    // Transitions are driven in order above; reaching this indicates a
    // client bug, surfaced as a transport-level failure.
    GatewayError::Transport {
        function: String::new(),
        phase: TxPhase::Submit,
        reason: err.to_string(),
    }
}
