//! Producer/consumer pool that drives the blur pipeline.
//!
//! One task per producer and per consumer, sharing exactly one
//! [`BoundedQueue`] and nothing else mutable. Producers enumerate the
//! input root and block on `push` when the queue is full; consumers block
//! on `pop` when it is empty and run the CPU-bound transform under
//! `spawn_blocking`. When the last producer finishes, the runner closes
//! the queue and the consumers drain it and exit.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::{Result, StartupError};
use crate::pipeline::{discovery, ItemProcessor};
use crate::queue::BoundedQueue;
use crate::types::{ItemOutcome, RunSummary, WorkItem};

/// Orchestrates one batch run over the configured input root.
pub struct BatchRunner {
    config: Config,
}

impl BatchRunner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute the run. `on_item` is invoked from consumer tasks as each
    /// item completes, so callers can stream progress.
    ///
    /// Environment problems (missing input root, unusable output root)
    /// fail the whole run before any task starts. Item-level failures are
    /// logged, reported through `on_item`, counted in the summary, and
    /// never abort the pool.
    pub async fn run<F>(&self, on_item: F) -> Result<RunSummary>
    where
        F: Fn(ItemOutcome) + Send + Sync + 'static,
    {
        self.prepare_roots()?;

        let started = Instant::now();
        let queue = Arc::new(BoundedQueue::<WorkItem>::new(self.config.queue.capacity));
        let processor = Arc::new(ItemProcessor::new(&self.config));
        let on_item = Arc::new(on_item);

        tracing::info!(
            producers = self.config.processing.producers,
            consumers = self.config.processing.consumers,
            capacity = self.config.queue.capacity,
            window = self.config.filter.window_size,
            "starting pool"
        );

        let producer_handles = self.spawn_producers(&queue);
        let consumer_handles = self.spawn_consumers(&queue, &processor, &on_item);

        let mut discovered = 0usize;
        for handle in producer_handles {
            match handle.await {
                Ok(pushed) => discovered += pushed,
                Err(e) => tracing::error!("Producer task panicked: {e}"),
            }
        }
        // Every producer has pushed its last item; wake the whole pool so
        // consumers drain what is buffered and exit.
        queue.close();

        let mut processed = 0usize;
        let mut failed = 0usize;
        for handle in consumer_handles {
            match handle.await {
                Ok((ok, err)) => {
                    processed += ok;
                    failed += err;
                }
                Err(e) => tracing::error!("Consumer task panicked: {e}"),
            }
        }

        let total_seconds = started.elapsed().as_secs_f64();
        let images_per_second = if total_seconds > 0.0 {
            processed as f64 / total_seconds
        } else {
            0.0
        };

        tracing::info!(discovered, processed, failed, "run complete");

        Ok(RunSummary {
            discovered,
            processed,
            failed,
            total_seconds,
            images_per_second,
        })
    }

    /// Validate the environment before any task starts.
    fn prepare_roots(&self) -> std::result::Result<(), StartupError> {
        let input_root = self.config.input_root();
        if !input_root.is_dir() {
            return Err(StartupError::InputRootMissing(input_root));
        }

        let output_root = self.config.output_root();
        if output_root.exists() {
            if !output_root.is_dir() {
                return Err(StartupError::OutputRootNotDirectory(output_root));
            }
        } else {
            std::fs::create_dir_all(&output_root).map_err(|source| {
                StartupError::CreateOutputRoot {
                    path: output_root.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }

    fn spawn_producers(&self, queue: &Arc<BoundedQueue<WorkItem>>) -> Vec<JoinHandle<usize>> {
        let producers = self.config.processing.producers;
        (0..producers)
            .map(|id| {
                let queue = queue.clone();
                let input_root = self.config.input_root();
                tokio::spawn(async move {
                    let items =
                        discovery::stripe(discovery::discover(&input_root), id, producers);
                    tracing::debug!(producer = id, count = items.len(), "discovery complete");

                    let mut pushed = 0usize;
                    for item in items {
                        if queue.push(item).await.is_err() {
                            tracing::warn!(producer = id, "queue closed mid-discovery");
                            break;
                        }
                        pushed += 1;
                    }
                    pushed
                })
            })
            .collect()
    }

    fn spawn_consumers<F>(
        &self,
        queue: &Arc<BoundedQueue<WorkItem>>,
        processor: &Arc<ItemProcessor>,
        on_item: &Arc<F>,
    ) -> Vec<JoinHandle<(usize, usize)>>
    where
        F: Fn(ItemOutcome) + Send + Sync + 'static,
    {
        (0..self.config.processing.consumers)
            .map(|id| {
                let queue = queue.clone();
                let processor = processor.clone();
                let on_item = on_item.clone();
                tokio::spawn(async move {
                    let mut processed = 0usize;
                    let mut failed = 0usize;

                    while let Some(item) = queue.pop().await {
                        let path = item.path.clone();
                        let worker = processor.clone();
                        match tokio::task::spawn_blocking(move || worker.process(&item)).await {
                            Ok(Ok(())) => {
                                processed += 1;
                                on_item(ItemOutcome::Processed(path));
                            }
                            Ok(Err(e)) => {
                                failed += 1;
                                tracing::warn!(consumer = id, path = ?path, "item failed: {e}");
                                on_item(ItemOutcome::Failed {
                                    path,
                                    reason: e.to_string(),
                                });
                            }
                            Err(e) => {
                                // A panicked worker fails its item, not
                                // the pool.
                                failed += 1;
                                tracing::error!(consumer = id, path = ?path, "worker panicked: {e}");
                                on_item(ItemOutcome::Failed {
                                    path,
                                    reason: format!("worker panicked: {e}"),
                                });
                            }
                        }
                    }
                    (processed, failed)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SmudgeError;
    use image::RgbImage;
    use std::path::Path;
    use std::sync::Mutex;

    fn config_for(dir: &Path) -> Config {
        let mut config = Config::default();
        config.io.input_root = dir.join("input").display().to_string();
        config.io.output_root = dir.join("output").display().to_string();
        config.processing.producers = 2;
        config.processing.consumers = 3;
        config.queue.capacity = 4;
        config.retry.delay_ms = 1;
        config
    }

    fn write_png(path: &Path, w: u32, h: u32) {
        RgbImage::from_fn(w, h, |x, y| image::Rgb([x as u8, y as u8, 128]))
            .save(path)
            .unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_run_processes_directory_and_tolerates_bad_items() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let input_root = config.input_root();
        std::fs::create_dir_all(&input_root).unwrap();

        write_png(&input_root.join("a.png"), 12, 9);
        write_png(&input_root.join("b.png"), 7, 7);
        std::fs::write(input_root.join("corrupt.png"), b"garbage").unwrap();

        let outcomes: Arc<Mutex<Vec<ItemOutcome>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = outcomes.clone();
        let runner = BatchRunner::new(config.clone());

        // A corrupt item is reported, not fatal: the run still succeeds.
        let summary = runner
            .run(move |outcome| sink.lock().unwrap().push(outcome))
            .await
            .unwrap();

        assert_eq!(summary.discovered, 3);
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(outcomes.lock().unwrap().len(), 3);

        let output_root = config.output_root();
        assert!(output_root.join("a.png").exists());
        assert!(output_root.join("b.png").exists());
        assert!(!output_root.join("corrupt.png").exists());
    }

    #[tokio::test]
    async fn test_run_empty_input_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        std::fs::create_dir_all(config.input_root()).unwrap();

        let summary = BatchRunner::new(config).run(|_| {}).await.unwrap();
        assert_eq!(summary.discovered, 0);
        assert_eq!(summary.processed, 0);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn test_missing_input_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        // No input directory created.

        let err = BatchRunner::new(config).run(|_| {}).await.unwrap_err();
        assert!(matches!(
            err,
            SmudgeError::Startup(StartupError::InputRootMissing(_))
        ));
    }

    #[tokio::test]
    async fn test_output_root_file_collision_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        std::fs::create_dir_all(config.input_root()).unwrap();
        // Output root exists as a regular file.
        std::fs::write(config.output_root(), b"oops").unwrap();

        let err = BatchRunner::new(config).run(|_| {}).await.unwrap_err();
        assert!(matches!(
            err,
            SmudgeError::Startup(StartupError::OutputRootNotDirectory(_))
        ));
    }

    #[tokio::test]
    async fn test_output_root_is_created_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        std::fs::create_dir_all(config.input_root()).unwrap();

        BatchRunner::new(config.clone()).run(|_| {}).await.unwrap();
        assert!(config.output_root().is_dir());
    }
}
