//! Per-operation stage machine.

use std::fmt;

use uuid::Uuid;

/// Stage of one logical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Building,
    /// Send plus the wait for the requested commitment.
    Submitting,
    /// Normalizing the confirmed signature.
    Confirming,
    ExtractingFee,
    ResolvingLeaf,
    Done,
    Failed,
}

impl Stage {
    /// Legal forward transitions. `Failed` is reachable from every
    /// non-terminal stage; nothing leaves `Done` or `Failed`.
    pub const fn can_advance_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::Building, Stage::Submitting)
                | (Stage::Submitting, Stage::Confirming)
                | (Stage::Confirming, Stage::ExtractingFee)
                | (Stage::Confirming, Stage::ResolvingLeaf)
                | (Stage::ExtractingFee, Stage::Done)
                | (Stage::ResolvingLeaf, Stage::Done)
        ) || (matches!(next, Stage::Failed) && !self.is_terminal())
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Building => "building",
            Stage::Submitting => "submitting",
            Stage::Confirming => "confirming",
            Stage::ExtractingFee => "extracting_fee",
            Stage::ResolvingLeaf => "resolving_leaf",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks and logs the stages one operation walks through.
#[derive(Debug, Clone)]
pub struct StageTracker {
    operation_id: Uuid,
    history: Vec<Stage>,
}

impl StageTracker {
    /// Starts a new operation in `Building`.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(operation_id: Uuid) -> Self {
        Self {
            operation_id,
            history: vec![Stage::Building],
        }
    }

    pub fn operation_id(&self) -> Uuid {
        self.operation_id
    }

    pub fn current(&self) -> Stage {
        self.history.last().copied().unwrap_or(Stage::Building)
    }

    /// Every stage entered so far, in order.
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    /// Moves to `next`.
    ///
    /// An illegal transition is a programming error; it is logged and
    /// ignored so the recorded history stays a valid path.
    pub fn advance(&mut self, next: Stage) {
        let current = self.current();
        if !current.can_advance_to(next) {
            tracing::error!(
                operation_id = %self.operation_id,
                from = %current,
                to = %next,
                "Illegal stage transition"
            );
            return;
        }
        tracing::debug!(
            operation_id = %self.operation_id,
            from = %current,
            to = %next,
            "Stage transition"
        );
        self.history.push(next);
    }

    /// Records a terminal failure and hands back the stage that failed.
    pub fn fail(&mut self) -> Stage {
        let failed_at = self.current();
        self.advance(Stage::Failed);
        failed_at
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}
