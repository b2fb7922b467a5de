//! Core data types shared across the pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One discovered image path to be transformed.
///
/// Immutable once created; pushed by exactly one producer and consumed by
/// exactly one consumer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkItem {
    /// Full path of the input file.
    pub path: PathBuf,
}

impl WorkItem {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Outcome of one work item, delivered to the run callback as consumers
/// finish so callers can stream progress in real time.
#[derive(Debug, Clone)]
pub enum ItemOutcome {
    /// The item was transformed and persisted.
    Processed(PathBuf),
    /// The item failed at the item level; the run continues.
    Failed { path: PathBuf, reason: String },
}

/// Statistics for a batch run.
///
/// Item-level failures are reported here; they never affect the process
/// exit status, which reflects fatal environment errors only.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunSummary {
    /// Work items discovered and enqueued
    pub discovered: usize,

    /// Items transformed and persisted successfully
    pub processed: usize,

    /// Items that failed decode, encode, or I/O
    pub failed: usize,

    /// Wall-clock duration of the run in seconds
    pub total_seconds: f64,

    /// Processing rate in images per second
    pub images_per_second: f64,
}
