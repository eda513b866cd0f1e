use std::sync::{Arc, OnceLock};

/// A sink for `SignInKit` log messages, implemented by the host.
///
/// Records emitted through the `log` crate anywhere in the process are
/// forwarded here once [`set_logger`] has been called.
///
/// # Examples
///
/// ```rust
/// use signinkit_core::logger::{LogLevel, Logger};
///
/// struct StderrLogger;
///
/// impl Logger for StderrLogger {
///     fn log(&self, level: LogLevel, message: String) {
///         eprintln!("[{level:?}] {message}");
///     }
/// }
/// ```
///
/// ## Kotlin (Godot plugin)
///
/// ```kotlin
/// object LogcatLogger : Logger {
///     override fun log(level: LogLevel, message: String) {
///         when (level) {
///             LogLevel.ERROR -> Log.e("GodotGoogleSignIn", message)
///             LogLevel.WARN -> Log.w("GodotGoogleSignIn", message)
///             else -> Log.d("GodotGoogleSignIn", message)
///         }
///     }
/// }
///
/// // once, from the plugin constructor
/// setLogger(LogcatLogger, null)
/// ```
#[uniffi::export(with_foreign)]
pub trait Logger: Sync + Send {
    /// Records one message at `level`.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, uniffi::Enum)]
pub enum LogLevel {
    /// Very detailed tracing output.
    Trace,
    /// Debugging information.
    Debug,
    /// Progress of sign-in operations.
    Info,
    /// Recoverable problems, e.g. a failed sign-out.
    Warn,
    /// Failed operations.
    Error,
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// `log::Log` implementation that hands records to the host [`Logger`].
struct ForeignLogger;

impl ForeignLogger {
    /// Debug and trace output from dependencies is dropped.
    fn accepts(metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info || metadata.target().starts_with("signinkit")
    }
}

impl log::Log for ForeignLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Self::accepts(metadata)
    }

    fn log(&self, record: &log::Record) {
        if !Self::accepts(record.metadata()) {
            return;
        }

        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(record.level().into(), record.args().to_string());
        } else {
            eprintln!("Logger not set: {}", record.args());
        }
    }

    fn flush(&self) {}
}

/// The host logger, set once per process.
static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Installs the host logger.
///
/// `max_level` caps what is forwarded; `None` forwards everything down to
/// [`LogLevel::Trace`]. Only the first logger is kept; later calls only adjust
/// the level. If another `log` implementation was installed first, nothing
/// changes.
#[uniffi::export]
pub fn set_logger(logger: Arc<dyn Logger>, max_level: Option<LogLevel>) {
    static LOGGER: ForeignLogger = ForeignLogger;

    let level = max_level.unwrap_or(LogLevel::Trace).into();
    if LOGGER_INSTANCE.get().is_some() {
        log::debug!("logger already set, keeping the first one");
        log::set_max_level(level);
        return;
    }

    match log::set_logger(&LOGGER) {
        Ok(()) => {
            let _ = LOGGER_INSTANCE.set(logger);
            log::set_max_level(level);
        }
        Err(e) => eprintln!("Failed to set logger: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_conversions() {
        assert_eq!(LogLevel::from(log::Level::Warn), LogLevel::Warn);
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert!(LogLevel::Error > LogLevel::Info);
    }

    #[test]
    fn test_dependency_debug_output_is_dropped() {
        let own = log::Metadata::builder()
            .level(log::Level::Debug)
            .target("signinkit_core::bridge")
            .build();
        let foreign = log::Metadata::builder()
            .level(log::Level::Debug)
            .target("hyper::proto")
            .build();
        let foreign_warning = log::Metadata::builder()
            .level(log::Level::Warn)
            .target("hyper::proto")
            .build();

        assert!(ForeignLogger::accepts(&own));
        assert!(!ForeignLogger::accepts(&foreign));
        assert!(ForeignLogger::accepts(&foreign_warning));
    }
}
