//! Tracing bootstrap for the smudge CLI.
//!
//! The base level comes from `[logging]` in the config file, `--verbose`
//! raises it to debug, and `RUST_LOG` overrides both. Logs go to stderr;
//! stdout is reserved for summaries and `config show` output.

use smudge_core::config::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber from the logging configuration
/// plus the global CLI flags.
pub fn init(logging: &LoggingConfig, verbose: bool, json_logs: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(logging, verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs || logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Pick the default filter directive: `--verbose` floors the configured
/// level at debug, but never lowers a more detailed one.
fn level_directive<'a>(logging: &'a LoggingConfig, verbose: bool) -> &'a str {
    if verbose && logging.level != "trace" {
        "debug"
    } else {
        logging.level.as_str()
    }
}
