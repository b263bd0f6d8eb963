//! Logging capability for the provider core, plus shared tracing init
//!
//! The request pipeline only ever needs one logging operation: report an
//! error line. That capability is injected at client construction instead of
//! living behind a process-wide global, so embedders can capture it and tests
//! can assert on it.

use std::sync::OnceLock;

/// The one logging operation the core requires
pub trait ErrorSink: Send + Sync {
    /// Report an error line
    fn error(&self, message: &str);
}

/// Default sink: forwards to `tracing::error!`
///
/// With no subscriber installed this is effectively a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ErrorSink for NoopSink {
    fn error(&self, _message: &str) {}
}

static INIT: OnceLock<()> = OnceLock::new();

fn parse_level() -> tracing::Level {
    match std::env::var("BUILDLIGHT_LOG")
        .unwrap_or_else(|_| "info".to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

/// Initialize process-level tracing output from `BUILDLIGHT_LOG`.
///
/// This is safe to call multiple times; only the first call initializes the
/// subscriber. It is intentionally best-effort and never returns an error.
pub fn init() {
    if INIT.get().is_some() {
        return;
    }
    let level = parse_level();
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
    let _ = INIT.set(());
}
