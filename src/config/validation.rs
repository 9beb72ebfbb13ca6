//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that addresses decode as ledger public keys
//! - Validate value ranges (timeouts > 0, retry ceilings > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CoreConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::str::FromStr;

use solana_pubkey::Pubkey;
use thiserror::Error;

use crate::config::schema::CoreConfig;

/// Largest supported fee denomination.
pub const MAX_FEE_DECIMALS: u32 = 18;

/// One semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &CoreConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.ledger.rpc_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "ledger.rpc_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "ledger.rpc_url",
            format!("invalid URL '{}': {}", config.ledger.rpc_url, e),
        )),
    }

    if config.ledger.environment.trim().is_empty() {
        errors.push(ValidationError::new("ledger.environment", "must not be empty"));
    }

    check_pubkey(&mut errors, "ledger.tree_address", &config.ledger.tree_address);
    check_pubkey(
        &mut errors,
        "ledger.collection_address",
        &config.ledger.collection_address,
    );

    if config.ledger.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("ledger.rpc_timeout_secs", "must be greater than 0"));
    }
    if config.submission.max_attempts == 0 {
        errors.push(ValidationError::new("submission.max_attempts", "must be greater than 0"));
    }
    if config.fees.decimals > MAX_FEE_DECIMALS {
        errors.push(ValidationError::new(
            "fees.decimals",
            format!("must be at most {}", MAX_FEE_DECIMALS),
        ));
    }
    if config.leaf_resolution.max_retries == 0 {
        errors.push(ValidationError::new(
            "leaf_resolution.max_retries",
            "must be greater than 0",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_pubkey(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(ValidationError::new(field, "must be set"));
    } else if let Err(e) = Pubkey::from_str(value) {
        errors.push(ValidationError::new(field, format!("invalid address: {}", e)));
    }
}
