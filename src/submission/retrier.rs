//! Submission with a fixed retry ceiling.
//!
//! # Responsibilities
//! - Reject missing or malformed inputs before touching the ledger
//! - Submit (always preflight-checked) and wait for the requested commitment
//! - Treat every failed attempt as transient until the ceiling is reached
//! - Refresh the anchor only when the ledger reports it expired
//!
//! # Known Gap
//! An attempt that timed out or lost its response may still have landed.
//! The next attempt resubmits the same logical operation without checking,
//! so one call can produce more than one on-ledger effect. Deduplication
//! depends on ledger replay-protection semantics and is left to callers.

use crate::error::{OrchestrationError, OrchestrationResult};
use crate::ledger::anchor::AnchorProvider;
use crate::ledger::client::LedgerHandle;
use crate::ledger::identity::SigningIdentity;
use crate::ledger::types::{
    Commitment, ConfirmationResult, LedgerError, LedgerResult, PreparedTransaction, SendOptions,
    SubmissionAnchor,
};
use crate::lifecycle::cancel::CancelToken;
use crate::lifecycle::stage::Stage;
use crate::observability::metrics;
use crate::resilience::retries::RetryPolicy;

/// Retry ceiling observed for submissions.
pub const DEFAULT_SUBMIT_ATTEMPTS: u32 = 10;

/// Inputs to one logical submission, as handed over by the caller.
#[derive(Debug, Clone, Default)]
pub struct SubmitRequest {
    pub transaction: Option<PreparedTransaction>,
    pub identity: Option<SigningIdentity>,
    /// Caller-supplied anchor; fetched when absent.
    pub anchor: Option<SubmissionAnchor>,
    pub cancel: Option<CancelToken>,
}

impl SubmitRequest {
    pub fn new(transaction: PreparedTransaction, identity: SigningIdentity) -> Self {
        Self {
            transaction: Some(transaction),
            identity: Some(identity),
            anchor: None,
            cancel: None,
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: SubmissionAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Checks that both the transaction and the identity are present and usable.
    pub fn validate(self) -> OrchestrationResult<ValidatedSubmission> {
        let transaction = self
            .transaction
            .ok_or_else(|| OrchestrationError::InvalidInput("transaction is required".into()))?;
        let identity = self
            .identity
            .ok_or_else(|| OrchestrationError::InvalidInput("signing identity is required".into()))?;

        if transaction.is_empty() {
            return Err(OrchestrationError::InvalidInput(format!(
                "transaction '{}' has no instructions",
                transaction.label()
            )));
        }
        if !identity.is_well_formed() {
            return Err(OrchestrationError::InvalidInput(
                "signing identity has the default public key".into(),
            ));
        }

        Ok(ValidatedSubmission {
            transaction,
            identity,
            anchor: self.anchor,
            cancel: self.cancel,
        })
    }
}

/// A request whose inputs passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    transaction: PreparedTransaction,
    identity: SigningIdentity,
    anchor: Option<SubmissionAnchor>,
    cancel: Option<CancelToken>,
}

impl ValidatedSubmission {
    pub fn transaction(&self) -> &PreparedTransaction {
        &self.transaction
    }

    pub fn identity(&self) -> &SigningIdentity {
        &self.identity
    }

    pub fn cancel(&self) -> Option<&CancelToken> {
        self.cancel.as_ref()
    }
}

/// Submits and confirms a prepared transaction, retrying up to a ceiling.
#[derive(Debug, Clone)]
pub struct SubmissionRetrier {
    ledger: LedgerHandle,
    anchors: AnchorProvider,
    policy: RetryPolicy,
    skip_preflight: bool,
}

impl SubmissionRetrier {
    pub fn new(ledger: LedgerHandle) -> Self {
        Self {
            anchors: AnchorProvider::new(ledger.clone()),
            ledger,
            policy: RetryPolicy::immediate(DEFAULT_SUBMIT_ATTEMPTS),
            skip_preflight: false,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_skip_preflight(mut self, skip_preflight: bool) -> Self {
        self.skip_preflight = skip_preflight;
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Validates and submits a request.
    pub async fn submit(
        &self,
        request: SubmitRequest,
        commitment: Commitment,
    ) -> OrchestrationResult<ConfirmationResult> {
        let submission = request.validate()?;
        self.submit_validated(&submission, commitment).await
    }

    /// Submits an already validated request.
    ///
    /// The first confirmed attempt ends the loop; a confirmation is never
    /// retried.
    pub async fn submit_validated(
        &self,
        submission: &ValidatedSubmission,
        commitment: Commitment,
    ) -> OrchestrationResult<ConfirmationResult> {
        let options = SendOptions {
            skip_preflight: self.skip_preflight,
            commitment,
        };
        let max_attempts = self.policy.max_attempts();
        let cancel = submission.cancel();
        let mut anchor = submission.anchor;
        let mut last_error = String::from("no attempt made");

        for attempt in 1..=max_attempts {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(cancelled(attempt));
            }

            match self.attempt(submission, &mut anchor, &options).await {
                Ok(confirmation) => {
                    metrics::record_submit_attempt(true);
                    tracing::info!(
                        tx = submission.transaction.label(),
                        attempt,
                        commitment = %commitment,
                        slot = confirmation.settlement.slot,
                        "Transaction confirmed"
                    );
                    return Ok(confirmation);
                }
                Err(e) => {
                    metrics::record_submit_attempt(false);
                    tracing::warn!(
                        tx = submission.transaction.label(),
                        attempt,
                        max_attempts,
                        error = %e,
                        "Submission attempt failed"
                    );
                    if e == LedgerError::AnchorExpired {
                        anchor = None;
                    }
                    last_error = e.to_string();
                }
            }

            if self.policy.allows_another(attempt) && !self.policy.pause(cancel).await {
                return Err(cancelled(attempt + 1));
            }
        }

        tracing::error!(
            tx = submission.transaction.label(),
            attempts = max_attempts,
            last_error = %last_error,
            "Submission failed: max retries exceeded"
        );
        Err(OrchestrationError::SubmissionFailed {
            attempts: max_attempts,
            last_error,
        })
    }

    async fn attempt(
        &self,
        submission: &ValidatedSubmission,
        anchor: &mut Option<SubmissionAnchor>,
        options: &SendOptions,
    ) -> LedgerResult<ConfirmationResult> {
        let current = self.anchors.resolve(*anchor, options.commitment).await?;
        *anchor = Some(current);

        let confirmation = self
            .ledger
            .send_and_confirm(
                &submission.transaction,
                &submission.identity,
                &current,
                options,
            )
            .await?;

        if let Some(err) = &confirmation.settlement.err {
            return Err(LedgerError::Rejected(format!(
                "landed with execution error: {}",
                err
            )));
        }
        Ok(confirmation)
    }
}

fn cancelled(next_attempt: u32) -> OrchestrationError {
    tracing::info!(next_attempt, "Submission cancelled between attempts");
    OrchestrationError::Cancelled {
        stage: Stage::Submitting,
    }
}
