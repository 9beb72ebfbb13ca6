//! Leaf event resolution with fixed-interval polling.
//!
//! # State Machine
//! ```text
//! ATTEMPTING(n) ──decoded──▶ RESOLVED
//!      │
//!      └─failed─▶ n < max: sleep(delay) → ATTEMPTING(n+1)
//!                 n = max: FAILED
//! ```
//!
//! The indexing layer lags the confirmed transaction by up to a few seconds,
//! so the decoded event may not exist yet on the first try.

use std::time::Duration;

use crate::error::{OrchestrationError, OrchestrationResult};
use crate::ledger::client::LedgerHandle;
use crate::ledger::types::{LeafEvent, TxHash};
use crate::lifecycle::cancel::CancelToken;
use crate::lifecycle::stage::Stage;
use crate::observability::metrics;
use crate::resilience::retries::RetryPolicy;

pub const DEFAULT_LEAF_MAX_RETRIES: u32 = 20;
pub const DEFAULT_LEAF_DELAY: Duration = Duration::from_millis(1000);

/// Polls the ledger until the mint's leaf event decodes.
#[derive(Debug, Clone)]
pub struct LeafResolver {
    ledger: LedgerHandle,
    policy: RetryPolicy,
}

impl LeafResolver {
    pub fn new(ledger: LedgerHandle) -> Self {
        Self {
            ledger,
            policy: RetryPolicy::fixed(DEFAULT_LEAF_MAX_RETRIES, DEFAULT_LEAF_DELAY),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Resolves the leaf of a confirmed mint.
    ///
    /// Every failure is treated as "not indexed yet" until the budget runs
    /// out. Each pause suspends the task; it never spins.
    pub async fn resolve_leaf(
        &self,
        signature: &TxHash,
        cancel: Option<&CancelToken>,
    ) -> OrchestrationResult<LeafEvent> {
        let max_attempts = self.policy.max_attempts();
        let mut last_error = String::from("no attempt made");

        for attempt in 1..=max_attempts {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(OrchestrationError::Cancelled {
                    stage: Stage::ResolvingLeaf,
                });
            }

            match self.ledger.decode_leaf_event(signature).await {
                Ok(leaf) => {
                    metrics::record_leaf_poll(true);
                    tracing::info!(
                        signature = %signature,
                        attempt,
                        nonce = leaf.nonce,
                        owner = %leaf.owner,
                        "Leaf resolved"
                    );
                    return Ok(leaf);
                }
                Err(e) => {
                    metrics::record_leaf_poll(false);
                    tracing::warn!(
                        signature = %signature,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Leaf not yet decodable"
                    );
                    last_error = e.to_string();
                }
            }

            if self.policy.allows_another(attempt) && !self.policy.pause(cancel).await {
                return Err(OrchestrationError::Cancelled {
                    stage: Stage::ResolvingLeaf,
                });
            }
        }

        tracing::error!(
            signature = %signature,
            attempts = max_attempts,
            last_error = %last_error,
            "Leaf resolution failed; mint is confirmed but its asset is unresolved"
        );
        Err(OrchestrationError::ResolutionFailed {
            signature: signature.clone(),
            attempts: max_attempts,
            last_error,
        })
    }
}
