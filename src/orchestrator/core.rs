//! Orchestrator composition of the submission components.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use solana_pubkey::Pubkey;
use tracing::Instrument;

use crate::config::{validate_config, CoreConfig};
use crate::error::{OrchestrationError, OrchestrationResult};
use crate::ledger::asset::asset_for_leaf;
use crate::ledger::client::{LedgerClient, LedgerHandle};
use crate::ledger::types::{AssetIdentity, Commitment, ConfirmationResult, FeeReport, TxHash};
use crate::lifecycle::stage::{Stage, StageTracker};
use crate::observability::metrics;
use crate::submission::fees::FeeExtractor;
use crate::submission::leaf::LeafResolver;
use crate::submission::retrier::{SubmissionRetrier, SubmitRequest};
use crate::submission::signature::display_hash;

/// Result of `submit_and_confirm`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub confirmation: ConfirmationResult,
    pub fee: FeeReport,
    /// Display form of the transaction signature.
    pub hash: TxHash,
}

/// Root of the transaction lifecycle.
///
/// Built once from an immutable configuration and a shared ledger client;
/// safe to share across tasks.
#[derive(Debug, Clone)]
pub struct TransactionOrchestrator {
    config: Arc<CoreConfig>,
    tree: Pubkey,
    collection: Pubkey,
    submitter: SubmissionRetrier,
    fees: FeeExtractor,
    leaves: LeafResolver,
}

impl TransactionOrchestrator {
    /// Wire the components from configuration.
    ///
    /// Runs the same validation as `parse_config`, so a configuration built
    /// in code is held to the file rules. Fails with `InvalidInput` listing
    /// every offending field.
    pub fn new(ledger: Arc<dyn LedgerClient>, config: Arc<CoreConfig>) -> OrchestrationResult<Self> {
        validate_config(&config).map_err(|errors| {
            let fields = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            tracing::error!(errors = %fields, "Rejected orchestrator configuration");
            OrchestrationError::InvalidInput(format!("invalid configuration: {}", fields))
        })?;

        let tree = parse_address("ledger.tree_address", &config.ledger.tree_address)?;
        let collection =
            parse_address("ledger.collection_address", &config.ledger.collection_address)?;

        let handle = LedgerHandle::new(ledger, config.ledger.rpc_timeout());
        let submitter = SubmissionRetrier::new(handle.clone())
            .with_policy(config.submission.retry_policy())
            .with_skip_preflight(config.submission.skip_preflight);
        let fees = FeeExtractor::new(handle.clone(), config.submission.fee_commitment)
            .with_decimals(config.fees.decimals)?;
        let leaves = LeafResolver::new(handle).with_policy(config.leaf_resolution.retry_policy());

        tracing::info!(
            environment = %config.ledger.environment,
            rpc_url = %config.ledger.rpc_url,
            tree = %tree,
            collection = %collection,
            "Transaction orchestrator initialized"
        );

        Ok(Self {
            config,
            tree,
            collection,
            submitter,
            fees,
            leaves,
        })
    }

    pub fn tree(&self) -> Pubkey {
        self.tree
    }

    pub fn collection(&self) -> Pubkey {
        self.collection
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Submit, confirm at the fee commitment, and report the paid fee.
    pub async fn submit_and_confirm(
        &self,
        request: SubmitRequest,
    ) -> OrchestrationResult<SubmitOutcome> {
        let mut tracker = StageTracker::new();
        let span = tracing::info_span!(
            "submit_and_confirm",
            operation_id = %tracker.operation_id(),
            environment = %self.config.ledger.environment,
        );
        let started = Instant::now();

        let result = async {
            let (confirmation, hash) = self
                .submit_phase(request, self.config.submission.fee_commitment, &mut tracker)
                .await?;

            tracker.advance(Stage::ExtractingFee);
            let fee = self
                .fees
                .extract_fee(&hash)
                .await
                .map_err(|e| fail(&mut tracker, e))?;

            tracker.advance(Stage::Done);
            Ok::<_, OrchestrationError>(SubmitOutcome {
                confirmation,
                fee,
                hash,
            })
        }
        .instrument(span)
        .await;

        metrics::record_operation("submit_and_confirm", &result, started.elapsed());
        result
    }

    /// Submit a mint, confirm it, and resolve the minted asset identity.
    pub async fn mint_and_resolve(&self, request: SubmitRequest) -> OrchestrationResult<AssetIdentity> {
        let mut tracker = StageTracker::new();
        let span = tracing::info_span!(
            "mint_and_resolve",
            operation_id = %tracker.operation_id(),
            environment = %self.config.ledger.environment,
            tree = %self.tree,
        );
        let started = Instant::now();
        let cancel = request.cancel.clone();

        let result = async {
            let (_, hash) = self
                .submit_phase(request, self.config.submission.mint_commitment, &mut tracker)
                .await?;

            tracker.advance(Stage::ResolvingLeaf);
            let leaf = self
                .leaves
                .resolve_leaf(&hash, cancel.as_ref())
                .await
                .map_err(|e| fail(&mut tracker, e))?;

            let asset = asset_for_leaf(&self.tree, &leaf);
            tracker.advance(Stage::Done);
            tracing::info!(asset_id = %asset.id, nonce = asset.nonce, signature = %hash, "Asset minted");
            Ok::<_, OrchestrationError>(asset)
        }
        .instrument(span)
        .await;

        metrics::record_operation("mint_and_resolve", &result, started.elapsed());
        result
    }

    /// Building → Submitting → Confirming.
    async fn submit_phase(
        &self,
        request: SubmitRequest,
        commitment: Commitment,
        tracker: &mut StageTracker,
    ) -> OrchestrationResult<(ConfirmationResult, TxHash)> {
        let submission = request.validate().map_err(|e| fail(tracker, e))?;

        tracker.advance(Stage::Submitting);
        let confirmation = self
            .submitter
            .submit_validated(&submission, commitment)
            .await
            .map_err(|e| fail(tracker, e))?;

        tracker.advance(Stage::Confirming);
        let hash = display_hash(&confirmation.signature).map_err(|e| fail(tracker, e))?;

        Ok((confirmation, hash))
    }
}

fn fail(tracker: &mut StageTracker, err: OrchestrationError) -> OrchestrationError {
    let stage = tracker.fail();
    tracing::warn!(
        operation_id = %tracker.operation_id(),
        stage = %stage,
        partial = err.is_partial_success(),
        error = %err,
        "Operation failed"
    );
    err
}

fn parse_address(field: &str, value: &str) -> OrchestrationResult<Pubkey> {
    Pubkey::from_str(value)
        .map_err(|e| OrchestrationError::InvalidInput(format!("{} '{}': {}", field, value, e)))
}
