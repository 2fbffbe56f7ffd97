//! # Client Identity
//!
//! Identity and signing inputs are external collaborators: an X.509
//! certificate, its private key, and a TLS root of trust, each loaded
//! from a filesystem path by the process that bootstraps the gateway.
//! This module stays deliberately thin — it loads bytes and signs
//! digests, nothing more.

use crate::ports::Signer;
use ed25519_dalek::{Signer as _, SigningKey};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Identity bootstrap failures.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("failed to read credential file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("invalid private key material: {0}")]
    InvalidKey(String),
}

/// The client's organizational identity: an MSP ID plus certificate
/// credentials in PEM form. The certificate is carried opaquely; the
/// network side validates it.
#[derive(Clone)]
pub struct X509Identity {
    msp_id: String,
    credentials: Vec<u8>,
}

impl X509Identity {
    pub fn new(msp_id: impl Into<String>, credentials: Vec<u8>) -> Self {
        Self {
            msp_id: msp_id.into(),
            credentials,
        }
    }

    /// Load certificate PEM from `path`.
    pub fn from_pem_file(msp_id: impl Into<String>, path: &Path) -> Result<Self, IdentityError> {
        let credentials = std::fs::read(path).map_err(|e| IdentityError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(msp_id, credentials))
    }

    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    pub fn credentials(&self) -> &[u8] {
        &self.credentials
    }
}

impl fmt::Debug for X509Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X509Identity")
            .field("msp_id", &self.msp_id)
            .field("credentials_len", &self.credentials.len())
            .finish()
    }
}

impl fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519Signer").finish_non_exhaustive()
    }
}

/// Ed25519 proposal signer.
pub struct Ed25519Signer {
    signing_key: SigningKey,
}

impl Ed25519Signer {
    /// Create from a 32-byte secret seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Load a raw 32-byte key file.
    pub fn from_key_file(path: &Path) -> Result<Self, IdentityError> {
        let bytes = std::fs::read(path).map_err(|e| IdentityError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let seed: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| IdentityError::InvalidKey(format!("expected 32 bytes, got {}", bytes.len())))?;
        Ok(Self::from_seed(seed))
    }
}

impl Signer for Ed25519Signer {
    fn sign(&self, digest: &[u8; 32]) -> Vec<u8> {
        self.signing_key.sign(digest).to_bytes().to_vec()
    }
}
