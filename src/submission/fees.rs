//! Settlement fee extraction.

use crate::config::validation::MAX_FEE_DECIMALS;
use crate::error::{OrchestrationError, OrchestrationResult};
use crate::ledger::client::LedgerHandle;
use crate::ledger::types::{Commitment, FeeReport, TxHash};

/// Decimal places of the ledger's native unit (lamports per SOL).
pub const NATIVE_DECIMALS: u32 = 9;

/// Reads the paid fee of a confirmed transaction.
///
/// Not retried here: a record that is not yet visible surfaces as
/// `DetailsUnavailable` and the caller decides whether to try again.
#[derive(Debug, Clone)]
pub struct FeeExtractor {
    ledger: LedgerHandle,
    commitment: Commitment,
    decimals: u32,
}

impl FeeExtractor {
    pub fn new(ledger: LedgerHandle, commitment: Commitment) -> Self {
        Self {
            ledger,
            commitment,
            decimals: NATIVE_DECIMALS,
        }
    }

    /// Sets the fee denomination; at most `MAX_FEE_DECIMALS`.
    pub fn with_decimals(mut self, decimals: u32) -> OrchestrationResult<Self> {
        if decimals > MAX_FEE_DECIMALS {
            return Err(OrchestrationError::InvalidInput(format!(
                "fee decimals {} exceed the maximum of {}",
                decimals, MAX_FEE_DECIMALS
            )));
        }
        self.decimals = decimals;
        Ok(self)
    }

    pub async fn extract_fee(&self, signature: &TxHash) -> OrchestrationResult<FeeReport> {
        let unavailable = |reason: String| {
            tracing::warn!(signature = %signature, reason = %reason, "Transaction details unavailable");
            OrchestrationError::DetailsUnavailable {
                signature: signature.clone(),
                reason,
            }
        };

        let details = self
            .ledger
            .transaction_details(signature, self.commitment)
            .await
            .map_err(|e| unavailable(e.to_string()))?
            .ok_or_else(|| unavailable(format!("no record at {} commitment", self.commitment)))?;
        let meta = details
            .meta
            .ok_or_else(|| unavailable(format!("record at slot {} has no metadata", details.slot)))?;

        let report = FeeReport::new(meta.fee, self.decimals);
        tracing::info!(
            signature = %signature,
            raw_fee = report.raw_amount,
            fee = report.value(),
            "Fee extracted"
        );
        Ok(report)
    }
}
