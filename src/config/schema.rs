//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! transaction lifecycle core. All types derive Serde traits for
//! deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ledger::types::Commitment;
use crate::resilience::retries::RetryPolicy;

/// Root configuration for the lifecycle core.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CoreConfig {
    /// Ledger endpoint and the addresses the core operates against.
    pub ledger: LedgerConfig,

    /// Submission retry and commitment settings.
    pub submission: SubmissionConfig,

    /// Fee denomination settings.
    pub fees: FeeConfig,

    /// Leaf resolution polling settings.
    pub leaf_resolution: LeafResolutionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Ledger connection settings.
///
/// These values are opaque to the core: it carries them, logs them and hands
/// them to collaborators, but never interprets the endpoint itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Deployment tag (e.g. "devnet", "mainnet-beta").
    pub environment: String,

    /// Merkle tree address (base58).
    pub tree_address: String,

    /// Collection mint address (base58).
    pub collection_address: String,

    /// Deadline for a single ledger call in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            environment: "devnet".to_string(),
            tree_address: String::new(),
            collection_address: String::new(),
            rpc_timeout_secs: 90,
        }
    }
}

impl LedgerConfig {
    /// Per-call deadline as a `Duration`.
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }
}

/// Submission settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Retry ceiling for one logical submission.
    pub max_attempts: u32,

    /// Skip preflight simulation when true.
    pub skip_preflight: bool,

    /// Commitment awaited on the fee-reporting path.
    pub fee_commitment: Commitment,

    /// Commitment awaited on the mint path.
    pub mint_commitment: Commitment,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            skip_preflight: false,
            fee_commitment: Commitment::Finalized,
            mint_commitment: Commitment::Confirmed,
        }
    }
}

impl SubmissionConfig {
    /// Submission attempts are resent immediately.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::immediate(self.max_attempts)
    }
}

/// Fee denomination.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Decimal places between the raw fee unit and the display unit.
    pub decimals: u32,
}

impl Default for FeeConfig {
    fn default() -> Self {
        // lamports per SOL
        Self { decimals: 9 }
    }
}

/// Leaf resolution polling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LeafResolutionConfig {
    /// Maximum decode attempts.
    pub max_retries: u32,

    /// Fixed delay between attempts in milliseconds.
    pub delay_ms: u64,
}

impl Default for LeafResolutionConfig {
    fn default() -> Self {
        Self {
            max_retries: 20,
            delay_ms: 1000,
        }
    }
}

impl LeafResolutionConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.max_retries, Duration::from_millis(self.delay_ms))
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuned_budgets() {
        let config = CoreConfig::default();
        assert_eq!(config.submission.max_attempts, 10);
        assert!(!config.submission.skip_preflight);
        assert_eq!(config.submission.fee_commitment, Commitment::Finalized);
        assert_eq!(config.submission.mint_commitment, Commitment::Confirmed);
        assert_eq!(config.fees.decimals, 9);
        assert_eq!(config.leaf_resolution.max_retries, 20);
        assert_eq!(config.leaf_resolution.delay_ms, 1000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CoreConfig = toml::from_str(
            r#"
            [ledger]
            environment = "mainnet-beta"

            [submission]
            fee_commitment = "confirmed"
            "#,
        )
        .unwrap();

        assert_eq!(config.ledger.environment, "mainnet-beta");
        assert_eq!(config.ledger.rpc_timeout_secs, 90);
        assert_eq!(config.submission.fee_commitment, Commitment::Confirmed);
        assert_eq!(config.submission.max_attempts, 10);
    }

    #[test]
    fn test_retry_policies() {
        let config = CoreConfig::default();
        let submit = config.submission.retry_policy();
        assert_eq!(submit.max_attempts(), 10);
        assert_eq!(submit.delay(), Duration::ZERO);

        let leaf = config.leaf_resolution.retry_policy();
        assert_eq!(leaf.max_attempts(), 20);
        assert_eq!(leaf.delay(), Duration::from_millis(1000));
    }
}
