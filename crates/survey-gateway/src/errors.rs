use crate::transaction::TxPhase;
use survey_contract::ContractError;
use thiserror::Error;

/// Errors produced by an endpoint adapter while executing one phase.
///
/// Contract-layer failures pass through unmodified; the client tags
/// them with the operation and phase before surfacing [`GatewayError`].
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Endorsing peers declined to sign the proposal. Distinct from a
    /// timeout: the peers answered, and the answer was no.
    #[error("endorsement declined: {reason}")]
    EndorsementDeclined { reason: String },

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Errors surfaced to gateway callers, tagged with operation and phase.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{function} timed out during {phase}")]
    Timeout { function: String, phase: TxPhase },

    #[error("{function}: endorsement declined: {reason}")]
    Endorsement { function: String, reason: String },

    #[error("{function} failed during {phase}: {source}")]
    Contract {
        function: String,
        phase: TxPhase,
        #[source]
        source: ContractError,
    },

    #[error("{function} failed during {phase}: {reason}")]
    Transport {
        function: String,
        phase: TxPhase,
        reason: String,
    },

    #[error("gateway connection is closed")]
    ConnectionClosed,
}

impl GatewayError {
    pub(crate) fn tag(function: &str, phase: TxPhase, err: InvokeError) -> Self {
        match err {
            InvokeError::Contract(source) => GatewayError::Contract {
                function: function.to_owned(),
                phase,
                source,
            },
            InvokeError::EndorsementDeclined { reason } => GatewayError::Endorsement {
                function: function.to_owned(),
                reason,
            },
            InvokeError::Transport(reason) => GatewayError::Transport {
                function: function.to_owned(),
                phase,
                reason,
            },
        }
    }

    /// The contract error carried inside, if any.
    pub fn contract_error(&self) -> Option<&ContractError> {
        match self {
            GatewayError::Contract { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Expected business outcomes (`NotFound` / `AlreadyExists`) that a
    /// production caller should handle rather than abort on.
    pub fn is_business_outcome(&self) -> bool {
        self.contract_error()
            .map(ContractError::is_business_outcome)
            .unwrap_or(false)
    }
}
