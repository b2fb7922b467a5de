//! Sub-configuration structs with pipeline defaults.

use serde::{Deserialize, Serialize};

/// Input and output roots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Directory whose files become work items (non-recursive)
    pub input_root: String,

    /// Directory where transformed images are written; created if absent
    pub output_root: String,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input_root: "./input".to_string(),
            output_root: "./output".to_string(),
        }
    }
}

/// Task pool sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of producer tasks
    pub producers: usize,

    /// Number of consumer tasks
    pub consumers: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            producers: 1,
            consumers: 10,
        }
    }
}

/// Shared work queue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Fixed queue capacity; producers block when this many items are
    /// buffered
    pub capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self { capacity: 1000 }
    }
}

/// Box-blur filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Averaging window edge length; must be an odd integer >= 3
    pub window_size: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { window_size: 5 }
    }
}

/// Bounded retry for transient per-item I/O failures.
///
/// Structurally invalid input (a file that does not decode) is never
/// retried regardless of these settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Additional attempts after the first failure
    pub attempts: u32,

    /// Delay between attempts in milliseconds
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 1,
            delay_ms: 250,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
