//! Named logger handles
//!
//! A [`NamedLogger`] adapts one engine [`Logger`] to the registry's
//! vocabulary. Configuring a handle mutates its engine in place, so every
//! holder of the same [`LoggerPtr`] observes the change immediately.

use crate::core::{Logger, LoggerMetrics, LogLevel, Result, SinkKind, Sinks, TimeType};
use parking_lot::RwLock;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Folder under the temp directory used when no artifact path is configured
pub const ARTIFACT_SUBFOLDER: &str = "logger_registry";

/// Image dumping threshold of a freshly created logger
pub const DEFAULT_LOG_IMAGE: LogLevel = LogLevel::Info;

pub fn default_artifact_dir() -> PathBuf {
    std::env::temp_dir().join(ARTIFACT_SUBFOLDER)
}

/// Shared handle returned by the registry
pub type LoggerPtr = Arc<NamedLogger>;

pub struct NamedLogger {
    logger: Logger,
    path: RwLock<Option<PathBuf>>,
    log_image: RwLock<LogLevel>,
}

impl NamedLogger {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            path: RwLock::new(None),
            log_image: RwLock::new(DEFAULT_LOG_IMAGE),
        }
    }

    pub fn name(&self) -> &str {
        self.logger.name()
    }

    /// The wrapped engine logger
    pub fn engine(&self) -> &Logger {
        &self.logger
    }

    pub fn level(&self) -> LogLevel {
        self.logger.level()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.logger.set_level(level);
    }

    /// Reads the engine's live threshold, never a cached copy
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.logger.should_log(level)
    }

    pub fn set_pattern(&self, pattern: &str, time_type: TimeType) {
        self.logger.set_pattern(pattern, time_type);
    }

    pub fn pattern(&self) -> String {
        self.logger.pattern()
    }

    pub fn set_time_type(&self, time_type: TimeType) {
        self.logger.set_time_type(time_type);
    }

    pub fn time_type(&self) -> TimeType {
        self.logger.time_type()
    }

    /// Root directory for side artifacts such as dumped images
    pub fn path(&self) -> PathBuf {
        self.path.read().clone().unwrap_or_else(default_artifact_dir)
    }

    pub fn set_path(&self, path: impl Into<PathBuf>) {
        *self.path.write() = Some(path.into());
    }

    /// Lowest record level at which image arguments are persisted
    pub fn log_image(&self) -> LogLevel {
        *self.log_image.read()
    }

    pub fn set_log_image(&self, level: LogLevel) {
        *self.log_image.write() = level;
    }

    /// Enable the sinks whose bit is set and silence the others
    pub fn set_sinks(&self, sinks: Sinks) {
        for kind in [SinkKind::Stdout, SinkKind::Syslog] {
            let level = if sinks.contains(kind.flag()) {
                LogLevel::Trace
            } else {
                LogLevel::Off
            };
            self.logger.set_sink_level(kind, level);
        }
    }

    pub fn sink_level(&self, kind: SinkKind) -> Option<LogLevel> {
        self.logger.sink_level(kind)
    }

    /// Format and forward a record. Nothing is formatted when `level` is disabled.
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        self.logger.log(level, fmt::format(args));
    }

    /// Like [`log`](Self::log), building the message lazily
    pub fn log_with<F: FnOnce() -> String>(&self, level: LogLevel, message: F) {
        if !self.is_enabled(level) {
            return;
        }
        self.logger.log(level, message());
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.logger.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.logger.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.logger.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.logger.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.logger.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.logger.log(LogLevel::Critical, message);
    }

    pub fn flush(&self) -> Result<()> {
        self.logger.flush()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.logger.metrics()
    }
}

impl fmt::Debug for NamedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedLogger")
            .field("name", &self.name())
            .field("level", &self.level())
            .field("path", &self.path())
            .field("log_image", &self.log_image())
            .finish()
    }
}
