//! Typed failures surfaced to the calling service.

use thiserror::Error;

use crate::ledger::types::TxHash;
use crate::lifecycle::stage::Stage;

/// Every way an orchestrated operation can end without its result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrchestrationError {
    /// Missing or malformed transaction or identity. Never retried.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Every submission attempt failed.
    #[error("Submission failed: max retries exceeded after {attempts} attempts: {last_error}")]
    SubmissionFailed { attempts: u32, last_error: String },

    /// Settlement record not yet queryable.
    #[error("Transaction details unavailable for {signature}: {reason}")]
    DetailsUnavailable { signature: TxHash, reason: String },

    /// The mint confirmed on-ledger but its leaf never became queryable.
    #[error("Leaf resolution failed for confirmed transaction {signature} after {attempts} attempts: {last_error}")]
    ResolutionFailed {
        signature: TxHash,
        attempts: u32,
        last_error: String,
    },

    /// The ledger client returned a signature in an unrecognized shape.
    #[error("Unexpected signature format: {0}")]
    UnexpectedSignatureFormat(String),

    /// The caller cancelled between attempts.
    #[error("Operation cancelled during {stage}")]
    Cancelled { stage: Stage },
}

impl OrchestrationError {
    /// Stage the failure is attributed to.
    pub fn stage(&self) -> Stage {
        match self {
            OrchestrationError::InvalidInput(_) => Stage::Building,
            OrchestrationError::SubmissionFailed { .. } => Stage::Submitting,
            OrchestrationError::UnexpectedSignatureFormat(_) => Stage::Confirming,
            OrchestrationError::DetailsUnavailable { .. } => Stage::ExtractingFee,
            OrchestrationError::ResolutionFailed { .. } => Stage::ResolvingLeaf,
            OrchestrationError::Cancelled { stage } => *stage,
        }
    }

    /// True when funds moved on-ledger even though the operation failed.
    pub fn is_partial_success(&self) -> bool {
        matches!(self, OrchestrationError::ResolutionFailed { .. })
    }

    /// Whether the caller may sensibly retry the whole operation.
    ///
    /// A partial success is not: resubmitting would mint a second asset.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            OrchestrationError::InvalidInput(_)
                | OrchestrationError::UnexpectedSignatureFormat(_)
                | OrchestrationError::ResolutionFailed { .. }
        )
    }

    /// Signature of the confirmed transaction, when one exists.
    pub fn confirmed_signature(&self) -> Option<&TxHash> {
        match self {
            OrchestrationError::DetailsUnavailable { signature, .. }
            | OrchestrationError::ResolutionFailed { signature, .. } => Some(signature),
            _ => None,
        }
    }
}

/// Result type for orchestrated operations.
pub type OrchestrationResult<T> = Result<T, OrchestrationError>;
