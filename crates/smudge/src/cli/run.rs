//! The `run` subcommand: drive the blur pipeline over a directory.

use std::path::PathBuf;

use smudge_core::{BatchRunner, Config, ItemOutcome, RunSummary};

/// Arguments for the `run` command.
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Directory containing the images to blur
    pub input: PathBuf,

    /// Directory where blurred images are written (created if absent)
    pub output: PathBuf,

    /// Number of consumer tasks
    #[arg(long)]
    pub consumers: Option<usize>,

    /// Number of producer tasks
    #[arg(long)]
    pub producers: Option<usize>,

    /// Capacity of the shared work queue
    #[arg(long)]
    pub queue_capacity: Option<usize>,

    /// Blur window edge length (odd, >= 3)
    #[arg(long)]
    pub window_size: Option<usize>,

    /// Print the run summary as JSON instead of a table
    #[arg(long)]
    pub json_summary: bool,
}

/// Execute the run command.
///
/// Item-level failures are reflected in the summary but do not affect the
/// exit status; only configuration and environment errors do.
pub async fn execute(args: RunArgs, config: Config) -> anyhow::Result<()> {
    let config = apply_overrides(config, &args);
    config.validate()?;

    // Count up front so the progress bar has a length; the listing is a
    // single readdir and the producers repeat it during the run.
    let total = smudge_core::pipeline::discover(&config.input_root()).len();
    let progress = create_progress_bar(total as u64);

    let bar = progress.clone();
    let summary = BatchRunner::new(config)
        .run(move |outcome| {
            if let ItemOutcome::Failed { path, .. } = &outcome {
                bar.set_message(format!("failed: {}", path.display()));
            }
            bar.inc(1);
        })
        .await?;

    progress.finish_and_clear();

    if args.json_summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

/// Overlay CLI flags on the loaded configuration.
fn apply_overrides(mut config: Config, args: &RunArgs) -> Config {
    config.io.input_root = args.input.display().to_string();
    config.io.output_root = args.output.display().to_string();

    if let Some(consumers) = args.consumers {
        config.processing.consumers = consumers;
    }
    if let Some(producers) = args.producers {
        config.processing.producers = producers;
    }
    if let Some(capacity) = args.queue_capacity {
        config.queue.capacity = capacity;
    }
    if let Some(window_size) = args.window_size {
        config.filter.window_size = window_size;
    }
    config
}

/// Create a progress bar for the batch run.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after the run.
fn print_summary(summary: &RunSummary) {
    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Discovered:   {:>8}", summary.discovered);
    eprintln!("    Processed:    {:>8}", summary.processed);
    if summary.failed > 0 {
        eprintln!("    Failed:       {:>8}", summary.failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>7.1}s", summary.total_seconds);
    eprintln!("    Rate:         {:>7.1} img/sec", summary.images_per_second);
    eprintln!("  ====================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str, output: &str) -> RunArgs {
        RunArgs {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
            consumers: None,
            producers: None,
            queue_capacity: None,
            window_size: None,
            json_summary: false,
        }
    }

    #[test]
    fn test_overrides_replace_roots() {
        let config = apply_overrides(Config::default(), &args("/in", "/out"));
        assert_eq!(config.io.input_root, "/in");
        assert_eq!(config.io.output_root, "/out");
        // Untouched fields keep their configured values.
        assert_eq!(config.processing.consumers, 10);
    }

    #[test]
    fn test_overrides_apply_flags() {
        let mut a = args("/in", "/out");
        a.consumers = Some(2);
        a.window_size = Some(9);
        a.queue_capacity = Some(16);

        let config = apply_overrides(Config::default(), &a);
        assert_eq!(config.processing.consumers, 2);
        assert_eq!(config.filter.window_size, 9);
        assert_eq!(config.queue.capacity, 16);
    }

    #[test]
    fn test_overridden_config_still_validated() {
        let mut a = args("/in", "/out");
        a.window_size = Some(4);
        let config = apply_overrides(Config::default(), &a);
        assert!(config.validate().is_err());
    }
}
