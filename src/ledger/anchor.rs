//! Submission anchor (recent blockhash) provider.

use crate::ledger::client::LedgerHandle;
use crate::ledger::types::{Commitment, LedgerResult, SubmissionAnchor};

/// Source of submission anchors.
#[derive(Debug, Clone)]
pub struct AnchorProvider {
    ledger: LedgerHandle,
}

impl AnchorProvider {
    pub fn new(ledger: LedgerHandle) -> Self {
        Self { ledger }
    }

    /// Uses the caller's anchor when given, otherwise fetches a fresh one.
    ///
    /// Callers batching several transactions into one validity window pass
    /// the same anchor to each call and skip the round trip.
    pub async fn resolve(
        &self,
        supplied: Option<SubmissionAnchor>,
        commitment: Commitment,
    ) -> LedgerResult<SubmissionAnchor> {
        match supplied {
            Some(anchor) => {
                tracing::debug!(
                    blockhash = %anchor.blockhash,
                    last_valid_block_height = anchor.last_valid_block_height,
                    "Using caller-supplied anchor"
                );
                Ok(anchor)
            }
            None => self.refresh(commitment).await,
        }
    }

    /// Always fetches a fresh anchor.
    pub async fn refresh(&self, commitment: Commitment) -> LedgerResult<SubmissionAnchor> {
        let anchor = self.ledger.latest_anchor(commitment).await?;
        tracing::debug!(
            blockhash = %anchor.blockhash,
            last_valid_block_height = anchor.last_valid_block_height,
            "Fetched fresh anchor"
        );
        Ok(anchor)
    }
}
