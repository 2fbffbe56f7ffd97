//! # Gateway Configuration
//!
//! Channel/chaincode selection and the per-phase timeout budgets.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding the deployed chaincode name.
pub const CHAINCODE_NAME_ENV: &str = "CHAINCODE_NAME";

/// Environment variable overriding the ledger channel name.
pub const CHANNEL_NAME_ENV: &str = "CHANNEL_NAME";

/// Names selecting the deployed contract and ledger channel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Deployed contract to invoke.
    pub chaincode_name: String,
    /// Ledger channel carrying the contract.
    pub channel_name: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            chaincode_name: "basic".into(),
            channel_name: "mychannel".into(),
        }
    }
}

impl GatewayConfig {
    /// Defaults, overridden by `CHAINCODE_NAME` / `CHANNEL_NAME` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(name) = std::env::var(CHAINCODE_NAME_ENV) {
            if !name.is_empty() {
                config.chaincode_name = name;
            }
        }
        if let Ok(name) = std::env::var(CHANNEL_NAME_ENV) {
            if !name.is_empty() {
                config.channel_name = name;
            }
        }
        config
    }
}

/// Independent timeout budgets, one per invocation phase.
///
/// Commit-status is the longest budget: it is bound by the network's
/// block-cut latency rather than a single round trip.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Evaluate: proposal + response against a single endpoint.
    pub evaluate: Duration,
    /// Endorsement: proposal broadcast and signed-response collection.
    pub endorse: Duration,
    /// Submission: handing the endorsed envelope to ordering.
    pub submit: Duration,
    /// Commit-status: waiting for block commitment confirmation.
    pub commit_status: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            evaluate: Duration::from_secs(5),
            endorse: Duration::from_secs(15),
            submit: Duration::from_secs(5),
            commit_status: Duration::from_secs(60),
        }
    }
}

impl TimeoutConfig {
    /// Small budgets for tests.
    pub fn for_testing() -> Self {
        Self {
            evaluate: Duration::from_millis(50),
            endorse: Duration::from_millis(50),
            submit: Duration::from_millis(50),
            commit_status: Duration::from_millis(100),
        }
    }
}
