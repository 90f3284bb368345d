//! Logging and tracing initialization.

use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over `config.level`. Logs go to stderr
/// unless `config.file` names a writable file.
pub fn init_logging(config: &LoggingConfig) {
    tracing::subscriber::set_global_default(build_subscriber(config)).ok();
}

/// Run `f` with a subscriber built from `config` active on this thread.
///
/// Used while loading the configuration itself, before the global
/// subscriber can be built from it.
pub fn with_logging<T>(config: &LoggingConfig, f: impl FnOnce() -> T) -> T {
    tracing::subscriber::with_default(build_subscriber(config), f)
}

fn build_subscriber(config: &LoggingConfig) -> Box<dyn Subscriber + Send + Sync> {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let writer = make_writer(config);

    if config.json {
        Box::new(
            fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .json()
                .finish(),
        )
    } else {
        Box::new(
            fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_ansi(config.file.is_none())
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    }
}

fn make_writer(config: &LoggingConfig) -> BoxMakeWriter {
    if let Some(path) = &config.file {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
        {
            Ok(file) => return BoxMakeWriter::new(Mutex::new(file)),
            Err(e) => eprintln!("Failed to open log file {}: {e}", path.display()),
        }
    }
    BoxMakeWriter::new(std::io::stderr)
}
