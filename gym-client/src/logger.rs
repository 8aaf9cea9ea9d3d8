//! Logging Infrastructure
//!
//! Structured logging setup for front ends embedding the client.

use tracing_subscriber::EnvFilter;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Default filter directive when `RUST_LOG` is not set
fn default_filter(level: &str) -> String {
    format!("gym_client={level},shared={level}")
}

/// Initialize the logger at `info`
pub fn init_logger() {
    init_logger_with(None, LogFormat::Pretty);
}

/// Initialize the logger with an explicit level and format
///
/// `RUST_LOG` wins over `log_level` when set. Calling this more than once keeps
/// the first subscriber.
pub fn init_logger_with(log_level: Option<&str>, format: LogFormat) {
    let level = log_level.unwrap_or("info");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Logger already initialized");
    }
}
