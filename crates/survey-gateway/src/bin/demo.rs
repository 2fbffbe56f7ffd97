//! CRUD showcase: drives the full survey lifecycle over the gateway
//! against an in-process ledger.
//!
//! ```text
//! cargo run --bin demo
//! CHAINCODE_NAME=survey CHANNEL_NAME=polls cargo run --bin demo
//! ```

use anyhow::{Context, Result};
use std::sync::Arc;
use survey_contract::Poll;
use survey_gateway::{
    Ed25519Signer, Gateway, GatewayConfig, GatewayOptions, InProcessEndpoint, X509Identity,
};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    let config = GatewayConfig::from_env();
    info!(
        chaincode = %config.chaincode_name,
        channel = %config.channel_name,
        "starting survey demo"
    );

    // A real deployment loads the certificate, private key, and TLS
    // root of trust from the organization's MSP directory; the demo
    // network accepts a fixed identity.
    let identity = X509Identity::new("Org1MSP", b"demo-certificate".to_vec());
    let signer = Arc::new(Ed25519Signer::from_seed([11u8; 32]));

    let endpoint = Arc::new(InProcessEndpoint::new());
    let gateway = Gateway::connect(endpoint, GatewayOptions::new(identity, signer));
    let contract = gateway
        .network(&config.channel_name)
        .contract(&config.chaincode_name);

    info!("--> Submit: InitLedger, seeds the live testing poll");
    contract.submit("InitLedger", &[]).await?;

    info!("--> Evaluate: GetAllPolls");
    print_polls(&contract.evaluate("GetAllPolls", &[]).await?)?;

    info!("--> Submit: CreatePoll, poll 2");
    let created = contract
        .submit(
            "CreatePoll",
            &["2", "Test", "Hsin", "Test Poll to showcase CRUD functions", "Ongoing"],
        )
        .await;
    if let Err(err) = created {
        // AlreadyExists is a normal outcome on a reused ledger.
        if err.is_business_outcome() {
            warn!(%err, "create skipped");
        } else {
            return Err(err.into());
        }
    }

    info!("--> Evaluate: ReadPoll 2");
    print_poll(&contract.evaluate("ReadPoll", &["2"]).await?)?;

    info!("--> Submit: UpdatePoll 2");
    contract
        .submit(
            "UpdatePoll",
            &["2", "Test CRUD", "Hsin", "Updated description", "Completed"],
        )
        .await?;

    info!("--> Evaluate: ReadPoll 2 after update");
    print_poll(&contract.evaluate("ReadPoll", &["2"]).await?)?;

    info!("--> Submit: DeletePoll 2");
    contract.submit("DeletePoll", &["2"]).await?;

    info!("--> Evaluate: GetAllPolls after delete");
    print_polls(&contract.evaluate("GetAllPolls", &[]).await?)?;

    gateway.close();
    info!("demo complete");
    Ok(())
}

fn print_poll(payload: &[u8]) -> Result<()> {
    let poll: Poll = serde_json::from_slice(payload).context("failed to decode poll")?;
    info!(id = %poll.id, name = %poll.name, status = %poll.status, "poll");
    Ok(())
}

fn print_polls(payload: &[u8]) -> Result<()> {
    let polls: Vec<Poll> = serde_json::from_slice(payload).context("failed to decode polls")?;
    info!(count = polls.len(), "polls on the ledger");
    for poll in polls {
        info!(id = %poll.id, name = %poll.name, status = %poll.status, "poll");
    }
    Ok(())
}
