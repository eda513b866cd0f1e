//! Routes `signinkit-core` log output into `tracing`.

use std::sync::Arc;

use signinkit_core::logger::{set_logger, LogLevel, Logger};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Forwards bridge log records to the `tracing` subscriber.
struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: String) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "signinkit_core", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "signinkit_core", "{message}"),
            LogLevel::Info => tracing::info!(target: "signinkit_core", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "signinkit_core", "{message}"),
            LogLevel::Error => tracing::error!(target: "signinkit_core", "{message}"),
        }
    }
}

/// Installs a stderr formatter filtered by `filter` and hooks up the bridge logger.
pub fn init(filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    set_logger(Arc::new(TracingLogger), None);
}
