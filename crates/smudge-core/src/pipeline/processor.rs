//! Per-item transform: decode, blur each channel, re-root, encode.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{Config, RetryConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::types::WorkItem;

use super::decode::decode;
use super::encode::encode;
use super::filter::box_blur;
use super::grid::PixelGrid;

/// Transforms one work item end-to-end on the calling thread.
///
/// Holds no mutable state, so a single instance can be shared across all
/// consumer tasks. The whole transform is CPU- and disk-bound; consumers
/// run it under `spawn_blocking`.
pub struct ItemProcessor {
    input_root: PathBuf,
    output_root: PathBuf,
    window_size: usize,
    retry: RetryConfig,
}

impl ItemProcessor {
    /// Create a processor from the run configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            input_root: config.input_root(),
            output_root: config.output_root(),
            window_size: config.filter.window_size,
            retry: config.retry.clone(),
        }
    }

    /// Process one item, retrying transient I/O failures a bounded number
    /// of times. Structural failures (a file that does not decode or
    /// encode) are returned immediately.
    pub fn process(&self, item: &WorkItem) -> PipelineResult<()> {
        let mut attempt = 0u32;
        loop {
            match self.process_once(&item.path) {
                Ok(()) => return Ok(()),
                Err(e) if e.is_transient() && attempt < self.retry.attempts => {
                    attempt += 1;
                    tracing::warn!(
                        path = ?item.path,
                        attempt,
                        "transient failure, retrying: {e}"
                    );
                    std::thread::sleep(Duration::from_millis(self.retry.delay_ms));
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn process_once(&self, path: &Path) -> PipelineResult<()> {
        let start = std::time::Instant::now();

        let grid = decode(path)?;
        let blurred = PixelGrid {
            channels: grid.channels.map(|ch| box_blur(&ch, self.window_size)),
        };

        let output_path = self.output_path(path)?;
        encode(&blurred, &output_path)?;

        tracing::debug!(
            input = ?path,
            output = ?output_path,
            elapsed = ?start.elapsed(),
            "transformed"
        );
        Ok(())
    }

    /// Derive the output path by replacing the input-root prefix of
    /// `input` with the output root. The base file name is unchanged.
    pub fn output_path(&self, input: &Path) -> PipelineResult<PathBuf> {
        let relative = input
            .strip_prefix(&self.input_root)
            .map_err(|_| PipelineError::OutputPath {
                path: input.to_path_buf(),
            })?;
        Ok(self.output_root.join(relative))
    }
}
