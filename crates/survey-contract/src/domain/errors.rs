use thiserror::Error;

/// Errors surfaced by the contract layer.
///
/// `NotFound` and `AlreadyExists` are expected business outcomes for a
/// well-behaved caller, not fatal conditions.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("the {entity} {id} does not exist")]
    NotFound { entity: &'static str, id: String },

    #[error("the {entity} {id} already exists")]
    AlreadyExists { entity: &'static str, id: String },

    #[error("failed to decode record at {key}: {reason}")]
    Deserialization { key: String, reason: String },

    #[error("failed to encode record {key}: {reason}")]
    Serialization { key: String, reason: String },

    #[error("failed to access world state: {0}")]
    Io(String),

    #[error("unknown function: {name}")]
    UnknownFunction { name: String },

    #[error("invalid arguments for {function}: expected {expected}, got {got}")]
    InvalidArgument {
        function: String,
        expected: usize,
        got: usize,
    },
}

impl ContractError {
    /// True for outcomes a caller should treat as normal control flow.
    pub fn is_business_outcome(&self) -> bool {
        matches!(
            self,
            ContractError::NotFound { .. } | ContractError::AlreadyExists { .. }
        )
    }
}
