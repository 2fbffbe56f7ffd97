//! Phase-budget behavior: a slow phase times out with the right tag and
//! never leaves a partial effect in the world state.

use crate::harness::{connect, connect_with_timeouts, TestNetwork};
use async_trait::async_trait;
use std::sync::Arc;
use survey_contract::Poll;
use survey_gateway::{
    CommitStatus, Ed25519Signer, Gateway, GatewayError, GatewayOptions, InProcessEndpoint,
    InvokeError, Proposal, TimeoutConfig, TransactionEndpoint, TxPhase, X509Identity,
};

/// Delegates to a real in-process ledger but hangs in one phase.
struct HangingEndpoint {
    inner: Arc<InProcessEndpoint>,
    hang: TxPhase,
}

impl HangingEndpoint {
    async fn stall<T>(&self) -> Result<T, InvokeError> {
        std::future::pending().await
    }
}

#[async_trait]
impl TransactionEndpoint for HangingEndpoint {
    async fn evaluate(&self, proposal: &Proposal) -> Result<Vec<u8>, InvokeError> {
        if self.hang == TxPhase::Evaluate {
            return self.stall().await;
        }
        self.inner.evaluate(proposal).await
    }

    async fn endorse(&self, proposal: &Proposal) -> Result<Vec<u8>, InvokeError> {
        if self.hang == TxPhase::Endorse {
            return self.stall().await;
        }
        self.inner.endorse(proposal).await
    }

    async fn submit(&self, tx_id: &str) -> Result<(), InvokeError> {
        if self.hang == TxPhase::Submit {
            return self.stall().await;
        }
        self.inner.submit(tx_id).await
    }

    async fn commit_status(&self, tx_id: &str) -> Result<CommitStatus, InvokeError> {
        if self.hang == TxPhase::CommitStatus {
            return self.stall().await;
        }
        self.inner.commit_status(tx_id).await
    }
}

/// A network whose endpoint hangs in `hang`, sharing world state with
/// the returned healthy network for pre/post assertions.
fn hanging_network(hang: TxPhase) -> (TestNetwork, Gateway) {
    let healthy = connect();
    let endpoint = Arc::new(HangingEndpoint {
        inner: healthy.endpoint.clone(),
        hang,
    });

    let identity = X509Identity::new("Org1MSP", b"test-certificate".to_vec());
    let signer = Arc::new(Ed25519Signer::from_seed([5u8; 32]));
    let gateway = Gateway::connect(
        endpoint,
        GatewayOptions::new(identity, signer).with_timeouts(TimeoutConfig::for_testing()),
    );

    (healthy, gateway)
}

fn read_poll(payload: &[u8]) -> Poll {
    serde_json::from_slice(payload).expect("poll payload")
}

#[tokio::test(start_paused = true)]
async fn test_endorsement_timeout_leaves_state_unchanged() {
    let (healthy, hanging) = hanging_network(TxPhase::Endorse);
    healthy
        .contract
        .submit("CreatePoll", &["2", "Test", "Hsin", "d", "Ongoing"])
        .await
        .unwrap();

    let contract = hanging.network("mychannel").contract("basic");
    let err = contract
        .submit("UpdatePoll", &["2", "Hijacked", "Hsin", "d", "Completed"])
        .await
        .unwrap_err();

    match err {
        GatewayError::Timeout { function, phase } => {
            assert_eq!(function, "UpdatePoll");
            assert_eq!(phase, TxPhase::Endorse);
        }
        other => panic!("unexpected error: {other}"),
    }

    // The pre-transaction value is still what evaluate sees.
    let poll = read_poll(&healthy.contract.evaluate("ReadPoll", &["2"]).await.unwrap());
    assert_eq!(poll.name, "Test");
    assert_eq!(poll.status, "Ongoing");
}

#[tokio::test(start_paused = true)]
async fn test_submission_timeout_reports_submit_phase() {
    let (healthy, hanging) = hanging_network(TxPhase::Submit);
    let contract = hanging.network("mychannel").contract("basic");

    let err = contract.submit("InitLedger", &[]).await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Timeout {
            phase: TxPhase::Submit,
            ..
        }
    ));
    assert!(healthy.endpoint.state().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_commit_status_timeout_reports_commit_phase() {
    let (healthy, hanging) = hanging_network(TxPhase::CommitStatus);
    let contract = hanging.network("mychannel").contract("basic");

    let err = contract.submit("InitLedger", &[]).await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Timeout {
            phase: TxPhase::CommitStatus,
            ..
        }
    ));
    // Ordered but never confirmed committed: the gateway reports
    // failure and this endpoint has not applied the write set.
    assert!(healthy.endpoint.state().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_evaluate_timeout_reports_evaluate_phase() {
    let (_healthy, hanging) = hanging_network(TxPhase::Evaluate);
    let contract = hanging.network("mychannel").contract("basic");

    let err = contract.evaluate("GetAllPolls", &[]).await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Timeout {
            phase: TxPhase::Evaluate,
            ..
        }
    ));
}

#[tokio::test]
async fn test_concurrent_creates_on_one_id_yield_one_winner() {
    let net = connect_with_timeouts(TimeoutConfig::default());
    let a = net.contract.clone();
    let b = net.contract.clone();

    let (ra, rb) = tokio::join!(
        a.submit("CreatePoll", &["9", "A", "Hsin", "d", "Ongoing"]),
        b.submit("CreatePoll", &["9", "B", "Hsin", "d", "Ongoing"]),
    );

    // Ordering between the two submissions belongs to the ledger; at
    // least one create wins, a loser fails as a business outcome, and
    // the record exists afterwards.
    assert!(ra.is_ok() || rb.is_ok());
    if let Err(err) = ra.and(rb) {
        assert!(err.is_business_outcome());
    }
    let exists = net.contract.evaluate("PollExists", &["9"]).await.unwrap();
    assert_eq!(exists, b"true");
}
