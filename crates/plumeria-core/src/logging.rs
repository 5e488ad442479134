// Logging module — powered by tracing-subscriber
//
// A compatibility bridge (`tracing_log::LogTracer`) captures the
// `log::*` macro calls used across the crates and routes them through
// the tracing subscriber.

use plumeria_configs::LoggingSettings;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact text format: timestamp LEVEL target - message
    Compact,
    /// JSON Lines format for structured logging
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

fn build_env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", level, e))
}

/// Initialize logging based on configuration.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    // Bridge `log` crate → tracing
    tracing_log::LogTracer::init().ok(); // ok() in case already initialized

    let layer = if LogFormat::from_str(&settings.format) == LogFormat::Json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(build_env_filter(&settings.level)?)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(build_env_filter(&settings.level)?)
            .boxed()
    };

    tracing_subscriber::registry().with(layer).try_init().ok();

    Ok(())
}
