use crate::models::ImportedItem;

/// Terminal state of an import run.
///
/// `Aborted` is a normal termination mode, not a failure: batches delivered
/// before the abort stand, and nothing is rolled back. Transport failures
/// are not represented here; they propagate as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Committed,
    Aborted,
}

/// Cooperative cancellation predicate, host-provided.
///
/// Polled (never pushed) at every loop boundary of the import pipeline with
/// the current progress counters. Must be side-effect-free; an in-flight
/// fetch is allowed to finish before the next poll observes cancellation.
pub trait CancellationGate: Send + Sync {
    fn should_cancel(&self, current: usize, total: usize) -> bool;
}

/// Gate for hosts without interactive cancellation.
pub struct NeverCancel;

impl CancellationGate for NeverCancel {
    fn should_cancel(&self, _current: usize, _total: usize) -> bool {
        false
    }
}

/// Host sink for coarse progress messages. Fire-and-forget.
pub trait ProgressSink: Send + Sync {
    fn report_progress(&self, message: &str);
}

/// Host sink receiving finished per-view batches.
///
/// Called once per (media type, view) pair with a non-empty batch. May be
/// called several times within one run; delivery is assumed idempotent-safe
/// on the host side.
pub trait ImportSink: Send + Sync {
    fn deliver(&self, items: Vec<ImportedItem>, media_type: &str);
}
