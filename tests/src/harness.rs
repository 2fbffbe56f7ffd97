//! Shared wiring for integration tests.

use std::sync::Arc;
use survey_gateway::{
    Contract, Ed25519Signer, Gateway, GatewayConfig, GatewayOptions, InProcessEndpoint,
    TimeoutConfig, X509Identity,
};

/// A gateway, its contract handle, and the endpoint behind them.
pub struct TestNetwork {
    pub gateway: Gateway,
    pub contract: Contract,
    pub endpoint: Arc<InProcessEndpoint>,
}

/// Connect a gateway to a fresh in-process ledger.
pub fn connect() -> TestNetwork {
    connect_with_timeouts(TimeoutConfig::default())
}

pub fn connect_with_timeouts(timeouts: TimeoutConfig) -> TestNetwork {
    let endpoint = Arc::new(InProcessEndpoint::new());
    let identity = X509Identity::new("Org1MSP", b"test-certificate".to_vec());
    let signer = Arc::new(Ed25519Signer::from_seed([3u8; 32]));

    let gateway = Gateway::connect(
        endpoint.clone(),
        GatewayOptions::new(identity, signer).with_timeouts(timeouts),
    );

    let config = GatewayConfig::default();
    let contract = gateway
        .network(config.channel_name)
        .contract(config.chaincode_name);

    TestNetwork {
        gateway,
        contract,
        endpoint,
    }
}
