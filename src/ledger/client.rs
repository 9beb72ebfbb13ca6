//! Ledger RPC client boundary with per-call deadlines.
//!
//! # Responsibilities
//! - Define the collaborator interface the core calls into
//! - Wrap every call with a timeout so no attempt hangs forever
//! - Log transport failures at the point they happen

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::ledger::identity::SigningIdentity;
use crate::ledger::types::{
    Commitment, ConfirmationResult, LeafEvent, LedgerResult, PreparedTransaction, SendOptions,
    SubmissionAnchor, TransactionDetails, TxHash,
};
use crate::resilience::timeouts::with_deadline;

/// External ledger client.
///
/// Wire format, signing and RPC method names live behind this trait.
/// Implementations must be safe for concurrent read-only use: the signing
/// identity arrives with each call and is never installed on the client.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetches a recent anchor at the given commitment.
    async fn latest_anchor(&self, commitment: Commitment) -> LedgerResult<SubmissionAnchor>;

    /// Signs, submits and waits for the requested commitment.
    async fn send_and_confirm(
        &self,
        tx: &PreparedTransaction,
        identity: &SigningIdentity,
        anchor: &SubmissionAnchor,
        options: &SendOptions,
    ) -> LedgerResult<ConfirmationResult>;

    /// Fetches the settlement record for a signature, `None` if not yet visible.
    async fn transaction_details(
        &self,
        signature: &TxHash,
        commitment: Commitment,
    ) -> LedgerResult<Option<TransactionDetails>>;

    /// Decodes the leaf event emitted by a confirmed mint.
    async fn decode_leaf_event(&self, signature: &TxHash) -> LedgerResult<LeafEvent>;
}

/// Shared ledger handle applying a deadline to every call.
#[derive(Clone)]
pub struct LedgerHandle {
    inner: Arc<dyn LedgerClient>,
    timeout: Duration,
}

impl LedgerHandle {
    pub fn new(inner: Arc<dyn LedgerClient>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub async fn latest_anchor(&self, commitment: Commitment) -> LedgerResult<SubmissionAnchor> {
        let result = with_deadline(self.timeout, self.inner.latest_anchor(commitment)).await;
        if let Err(e) = &result {
            tracing::warn!(commitment = %commitment, error = %e, "Anchor fetch failed");
        }
        result
    }

    pub async fn send_and_confirm(
        &self,
        tx: &PreparedTransaction,
        identity: &SigningIdentity,
        anchor: &SubmissionAnchor,
        options: &SendOptions,
    ) -> LedgerResult<ConfirmationResult> {
        with_deadline(
            self.timeout,
            self.inner.send_and_confirm(tx, identity, anchor, options),
        )
        .await
    }

    pub async fn transaction_details(
        &self,
        signature: &TxHash,
        commitment: Commitment,
    ) -> LedgerResult<Option<TransactionDetails>> {
        with_deadline(
            self.timeout,
            self.inner.transaction_details(signature, commitment),
        )
        .await
    }

    pub async fn decode_leaf_event(&self, signature: &TxHash) -> LedgerResult<LeafEvent> {
        with_deadline(self.timeout, self.inner.decode_leaf_event(signature)).await
    }

    /// Per-call deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for LedgerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerHandle")
            .field("timeout_secs", &self.timeout.as_secs())
            .finish()
    }
}
