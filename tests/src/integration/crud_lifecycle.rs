//! The full CRUD showcase, driven over the gateway exactly as the demo
//! driver runs it.

use crate::harness::connect;
use survey_contract::{ContractError, Poll};
use survey_gateway::GatewayError;

fn decode_poll(payload: &[u8]) -> Poll {
    serde_json::from_slice(payload).expect("poll payload")
}

fn decode_polls(payload: &[u8]) -> Vec<Poll> {
    serde_json::from_slice(payload).expect("poll list payload")
}

#[tokio::test]
async fn test_end_to_end_crud_showcase() {
    let net = connect();

    // InitLedger seeds the live testing poll "1".
    net.contract.submit("InitLedger", &[]).await.unwrap();
    let polls = decode_polls(&net.contract.evaluate("GetAllPolls", &[]).await.unwrap());
    assert_eq!(polls.len(), 1);
    assert_eq!(polls[0].id, "1");

    // Create poll "2" and read it back.
    net.contract
        .submit(
            "CreatePoll",
            &["2", "Test", "Hsin", "Test Poll to showcase CRUD functions", "Ongoing"],
        )
        .await
        .unwrap();
    let poll = decode_poll(&net.contract.evaluate("ReadPoll", &["2"]).await.unwrap());
    assert_eq!(poll.name, "Test");
    assert_eq!(poll.researcher, "Hsin");
    assert_eq!(poll.status, "Ongoing");

    // Full overwrite, then read reflects exactly the new fields.
    net.contract
        .submit(
            "UpdatePoll",
            &[
                "2",
                "Test CRUD",
                "Hsin",
                "Test Poll to showcase CRUD functions",
                "Completed",
            ],
        )
        .await
        .unwrap();
    let poll = decode_poll(&net.contract.evaluate("ReadPoll", &["2"]).await.unwrap());
    assert_eq!(poll.name, "Test CRUD");
    assert_eq!(poll.status, "Completed");

    // Delete, then the read fails NotFound and only poll "1" remains.
    net.contract.submit("DeletePoll", &["2"]).await.unwrap();
    let err = net.contract.evaluate("ReadPoll", &["2"]).await.unwrap_err();
    assert!(matches!(
        err.contract_error(),
        Some(ContractError::NotFound { .. })
    ));

    let polls = decode_polls(&net.contract.evaluate("GetAllPolls", &[]).await.unwrap());
    assert_eq!(polls.len(), 1);
    assert_eq!(polls[0].id, "1");

    net.gateway.close();
}

#[tokio::test]
async fn test_duplicate_create_is_a_business_outcome() {
    let net = connect();
    net.contract
        .submit("CreatePoll", &["2", "Test", "Hsin", "d", "Ongoing"])
        .await
        .unwrap();

    let err = net
        .contract
        .submit("CreatePoll", &["2", "Test", "Hsin", "d", "Ongoing"])
        .await
        .unwrap_err();

    assert!(err.is_business_outcome());
    assert!(matches!(
        err.contract_error(),
        Some(ContractError::AlreadyExists { .. })
    ));
}

#[tokio::test]
async fn test_list_all_never_mixes_entity_families() {
    let net = connect();

    for id in ["1", "2", "3"] {
        net.contract
            .submit("CreatePoll", &[id, "Poll", "Hsin", "d", "Ongoing"])
            .await
            .unwrap();
    }
    // No votes created: GetAllVotes must be empty, not leak polls.
    let votes = net.contract.evaluate("GetAllVotes", &[]).await.unwrap();
    assert_eq!(votes, b"[]");

    let polls = decode_polls(&net.contract.evaluate("GetAllPolls", &[]).await.unwrap());
    assert_eq!(polls.len(), 3);
}

#[tokio::test]
async fn test_init_ledger_resubmission_is_a_no_op() {
    let net = connect();
    net.contract.submit("InitLedger", &[]).await.unwrap();
    net.contract
        .submit(
            "UpdatePoll",
            &["1", "Edited", "UTAR", "Edited description", "Completed"],
        )
        .await
        .unwrap();

    net.contract.submit("InitLedger", &[]).await.unwrap();

    let poll = decode_poll(&net.contract.evaluate("ReadPoll", &["1"]).await.unwrap());
    assert_eq!(poll.name, "Edited");
    assert_eq!(poll.status, "Completed");
}

#[tokio::test]
async fn test_unknown_function_surfaces_tagged_error() {
    let net = connect();
    let err = net.contract.evaluate("StealPolls", &[]).await.unwrap_err();

    match err {
        GatewayError::Contract { function, source, .. } => {
            assert_eq!(function, "StealPolls");
            assert!(matches!(source, ContractError::UnknownFunction { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}
