use std::fmt;
use std::sync::Arc;

use crate::types::KeyPath;

use super::reshape::ReshapeMode;

/// Why a record was left out of a reshaped result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The record has no (or a `null`) value for `key`.
    MissingKey { key: String },
    /// The value for `key` is a list, map or object and cannot be used as a bucket key.
    UnkeyableValue { key: String },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingKey { key } => write!(f, "missing key '{key}'"),
            DropReason::UnkeyableValue { key } => {
                write!(f, "value of '{key}' cannot be used as a key")
            }
        }
    }
}

/// Context about a reshape run.
#[derive(Debug, Clone)]
pub struct ReshapeContext {
    /// Reshape mode of the run.
    pub mode: ReshapeMode,
    /// Key path driving the run.
    pub key_path: KeyPath,
}

/// Counters reported at the end of a reshape run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReshapeStats {
    /// Number of input records.
    pub input: usize,
    /// Records written into the result.
    pub accepted: usize,
    /// Records skipped because their key path did not resolve.
    pub dropped: usize,
}

/// Observer interface for reshape runs.
///
/// Reshaping never fails on incomplete records; it skips them. Implementors can use these
/// callbacks to log or count what was skipped.
pub trait ReshapeObserver: Send + Sync {
    /// Called once per skipped record. `record_index` is the position in the input sequence.
    fn on_dropped(&self, _ctx: &ReshapeContext, _record_index: usize, _reason: &DropReason) {}

    /// Called when a run completes.
    fn on_finished(&self, _ctx: &ReshapeContext, _stats: ReshapeStats) {}

    /// Called at the end of a run whose dropped count reached the configured alert threshold.
    fn on_alert(&self, _ctx: &ReshapeContext, _stats: ReshapeStats) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ReshapeObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ReshapeObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ReshapeObserver for CompositeObserver {
    fn on_dropped(&self, ctx: &ReshapeContext, record_index: usize, reason: &DropReason) {
        for o in &self.observers {
            o.on_dropped(ctx, record_index, reason);
        }
    }

    fn on_finished(&self, ctx: &ReshapeContext, stats: ReshapeStats) {
        for o in &self.observers {
            o.on_finished(ctx, stats);
        }
    }

    fn on_alert(&self, ctx: &ReshapeContext, stats: ReshapeStats) {
        for o in &self.observers {
            o.on_alert(ctx, stats);
        }
    }
}

/// Logs reshape events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ReshapeObserver for StdErrObserver {
    fn on_dropped(&self, ctx: &ReshapeContext, record_index: usize, reason: &DropReason) {
        eprintln!(
            "[reshape][drop] mode={:?} path={} record={} reason={}",
            ctx.mode, ctx.key_path, record_index, reason
        );
    }

    fn on_finished(&self, ctx: &ReshapeContext, stats: ReshapeStats) {
        eprintln!(
            "[reshape][ok] mode={:?} path={} input={} accepted={} dropped={}",
            ctx.mode, ctx.key_path, stats.input, stats.accepted, stats.dropped
        );
    }

    fn on_alert(&self, ctx: &ReshapeContext, stats: ReshapeStats) {
        eprintln!(
            "[ALERT][reshape] mode={:?} path={} dropped={} of {}",
            ctx.mode, ctx.key_path, stats.dropped, stats.input
        );
    }
}
