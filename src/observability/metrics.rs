//! Metrics collection.
//!
//! # Metrics
//! - `cnft_submit_attempts_total` (counter): submission attempts by outcome
//! - `cnft_leaf_polls_total` (counter): leaf decode attempts by outcome
//! - `cnft_operations_total` (counter): finished operations by name, outcome
//! - `cnft_operation_duration_seconds` (histogram): end-to-end latency
//!
//! # Design Decisions
//! - Emitted through the `metrics` facade; the embedding service decides on
//!   the exporter, and without one these calls are no-ops

use std::time::Duration;

use crate::error::OrchestrationError;

pub const SUBMIT_ATTEMPTS: &str = "cnft_submit_attempts_total";
pub const LEAF_POLLS: &str = "cnft_leaf_polls_total";
pub const OPERATIONS: &str = "cnft_operations_total";
pub const OPERATION_DURATION: &str = "cnft_operation_duration_seconds";

/// Record one submission attempt.
pub fn record_submit_attempt(success: bool) {
    metrics::counter!(SUBMIT_ATTEMPTS, "outcome" => outcome_label(success)).increment(1);
}

/// Record one leaf decode attempt.
pub fn record_leaf_poll(success: bool) {
    metrics::counter!(LEAF_POLLS, "outcome" => outcome_label(success)).increment(1);
}

/// Record a finished operation.
pub fn record_operation<T>(
    operation: &'static str,
    result: &Result<T, OrchestrationError>,
    elapsed: Duration,
) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) if e.is_partial_success() => "partial",
        Err(OrchestrationError::Cancelled { .. }) => "cancelled",
        Err(_) => "failure",
    };
    metrics::counter!(OPERATIONS, "operation" => operation, "outcome" => outcome).increment(1);
    metrics::histogram!(OPERATION_DURATION, "operation" => operation).record(elapsed.as_secs_f64());
}

fn outcome_label(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    /// Name, sorted labels and value of each recorded metric.
    pub(crate) type Captured = Vec<(String, Vec<(String, String)>, DebugValue)>;

    /// Runs `f` with a thread-local recorder and returns what it recorded.
    pub(crate) fn capture(f: impl FnOnce()) -> Captured {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        metrics::with_local_recorder(&recorder, f);

        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .map(|(composite, _, _, value)| {
                let key = composite.key();
                let mut labels: Vec<(String, String)> = key
                    .labels()
                    .map(|l| (l.key().to_string(), l.value().to_string()))
                    .collect();
                labels.sort();
                (key.name().to_string(), labels, value)
            })
            .collect()
    }

    fn find<'a>(captured: &'a Captured, name: &str, labels: &[(&str, &str)]) -> Option<&'a DebugValue> {
        let mut wanted: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        wanted.sort();
        captured
            .iter()
            .find(|(n, l, _)| n == name && *l == wanted)
            .map(|(_, _, value)| value)
    }

    /// Counter value, 0 when never incremented.
    pub(crate) fn counter(captured: &Captured, name: &str, labels: &[(&str, &str)]) -> u64 {
        match find(captured, name, labels) {
            Some(DebugValue::Counter(value)) => *value,
            _ => 0,
        }
    }

    /// Number of histogram samples, 0 when never recorded.
    pub(crate) fn histogram_len(captured: &Captured, name: &str, labels: &[(&str, &str)]) -> usize {
        match find(captured, name, labels) {
            Some(DebugValue::Histogram(samples)) => samples.len(),
            _ => 0,
        }
    }
}
