//! Error types for the smudge blur pipeline.
//!
//! Errors are split along the fault lines that matter at runtime: fatal
//! environment problems detected before any task starts (`StartupError`),
//! recoverable per-item failures inside the transform pipeline
//! (`PipelineError`), and configuration problems (`ConfigError`).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for smudge operations.
#[derive(Error, Debug)]
pub enum SmudgeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fatal environment errors detected before the pool starts
    #[error("Startup error: {0}")]
    Startup(#[from] StartupError),

    /// Per-item pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Fatal environment errors. These abort the whole run before any
/// producer or consumer task is spawned.
#[derive(Error, Debug)]
pub enum StartupError {
    /// The input root does not exist or is not a directory
    #[error("Input root is not a directory: {0}")]
    InputRootMissing(PathBuf),

    /// The output root could not be created
    #[error("Failed to create output root {path}: {source}")]
    CreateOutputRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output root path exists but is not a directory
    #[error("Output root exists and is not a directory: {0}")]
    OutputRootNotDirectory(PathBuf),
}

/// Per-item pipeline errors. These are logged and counted without
/// terminating the consumer pool.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed (structurally invalid input, never retried)
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Image encoding failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Reading the input file failed
    #[error("Read error for {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the output file failed
    #[error("Write error for {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input path is not under the configured input root, so no
    /// output path can be derived for it
    #[error("Cannot derive output path: {path} is outside the input root")]
    OutputPath { path: PathBuf },
}

impl PipelineError {
    /// Whether the failure is plausibly transient I/O that may succeed on
    /// a bounded retry. Structurally invalid input is never transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. })
    }
}

/// Convenience type alias for smudge results.
pub type Result<T> = std::result::Result<T, SmudgeError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let read = PipelineError::Read {
            path: PathBuf::from("a.png"),
            source: std::io::Error::other("boom"),
        };
        let decode = PipelineError::Decode {
            path: PathBuf::from("a.png"),
            message: "bad header".into(),
        };
        assert!(read.is_transient());
        assert!(!decode.is_transient());
    }
}
