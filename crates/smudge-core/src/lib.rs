//! Smudge Core - bounded-queue batch blur pipeline.
//!
//! Smudge discovers image files under an input root, hands them to a pool
//! of consumer tasks through a fixed-capacity queue, box-blurs each color
//! channel, and persists the results under an output root with the same
//! file names.
//!
//! # Architecture
//!
//! ```text
//! Discover → BoundedQueue.push → BoundedQueue.pop → Decode → Blur → Encode
//! ```
//!
//! Producers block while the queue is full and consumers block while it
//! is empty; the queue is the only shared mutable state in the system.
//!
//! # Usage
//!
//! ```rust,ignore
//! use smudge_core::{BatchRunner, Config};
//!
//! #[tokio::main]
//! async fn main() -> smudge_core::Result<()> {
//!     let config = Config::load()?;
//!     let summary = BatchRunner::new(config).run(|_outcome| {}).await?;
//!     println!("processed {} images", summary.processed);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod queue;
pub mod runner;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, Result, SmudgeError, StartupError};
pub use pipeline::{box_blur, Channel, ItemProcessor, PixelGrid};
pub use queue::{BoundedQueue, Closed};
pub use runner::BatchRunner;
pub use types::{ItemOutcome, RunSummary, WorkItem};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
