//! Signing identity handed to each submission.
//!
//! # Security
//! - Secret keys are loaded ONLY from environment variables or caller memory
//! - Keys are never logged or serialized
//! - An identity is passed per call; nothing installs it on a shared client

use std::sync::Arc;

use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use thiserror::Error;

/// Environment variable name for the base58 secret key.
pub const IDENTITY_SECRET_ENV_VAR: &str = "CNFT_IDENTITY_SECRET";

/// Reasons an identity could not be loaded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Environment variable {0} not set")]
    MissingEnv(&'static str),

    #[error("Invalid secret key: {0}")]
    InvalidSecret(String),
}

/// Cheaply clonable signing identity.
#[derive(Clone)]
pub struct SigningIdentity {
    signer: Arc<dyn Signer + Send + Sync>,
}

impl SigningIdentity {
    /// Wrap any signer.
    pub fn new(signer: Arc<dyn Signer + Send + Sync>) -> Self {
        Self { signer }
    }

    /// Wrap an owned keypair.
    pub fn from_keypair(keypair: Keypair) -> Self {
        Self::new(Arc::new(keypair))
    }

    /// Decode a base58-encoded 64-byte secret key.
    pub fn from_base58_secret(secret: &str) -> Result<Self, IdentityError> {
        let bytes = bs58::decode(secret.trim())
            .into_vec()
            .map_err(|e| IdentityError::InvalidSecret(format!("not base58: {}", e)))?;
        let keypair = Keypair::try_from(bytes.as_slice())
            .map_err(|e| IdentityError::InvalidSecret(e.to_string()))?;

        tracing::info!(pubkey = %keypair.pubkey(), "Signing identity loaded");

        Ok(Self::from_keypair(keypair))
    }

    /// Load identity from environment variable.
    ///
    /// Reads `CNFT_IDENTITY_SECRET` from environment.
    pub fn from_env() -> Result<Self, IdentityError> {
        Self::from_env_value(std::env::var(IDENTITY_SECRET_ENV_VAR).ok())
    }

    fn from_env_value(value: Option<String>) -> Result<Self, IdentityError> {
        let secret = value.ok_or(IdentityError::MissingEnv(IDENTITY_SECRET_ENV_VAR))?;
        Self::from_base58_secret(&secret)
    }

    pub fn pubkey(&self) -> Pubkey {
        self.signer.pubkey()
    }

    /// The all-zero key cannot sign anything on the ledger.
    pub fn is_well_formed(&self) -> bool {
        self.pubkey() != Pubkey::default()
    }

    /// Underlying signer, for ledger client implementations.
    pub fn signer(&self) -> &(dyn Signer + Send + Sync) {
        self.signer.as_ref()
    }
}

impl std::fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("pubkey", &self.pubkey())
            .finish()
    }
}
