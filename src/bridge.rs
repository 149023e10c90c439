//! `log` facade bridge
//!
//! Routes records emitted through the `log` crate macros into named loggers:
//! a record's target picks the logger, so `log::warn!(target: "net", ...)`
//! lands on `get_logger("net")` with all its rules applied.

use crate::core::{LogLevel, LoggerError, Result};
use crate::registry::{registry, LoggerRegistry};
use log::{LevelFilter, Log, Metadata, Record};

pub struct LogBridge {
    registry: &'static LoggerRegistry,
}

impl LogBridge {
    pub fn new(registry: &'static LoggerRegistry) -> Self {
        Self { registry }
    }

    /// Bridge into the process-wide registry
    pub fn global() -> Self {
        Self::new(registry())
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.registry
            .get_logger(metadata.target())
            .is_enabled(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        let logger = self.registry.get_logger(record.target());
        logger.log(LogLevel::from(record.level()), *record.args());
    }

    fn flush(&self) {
        if let Err(e) = self.registry.flush_all() {
            eprintln!("[LOGGER ERROR] Failed to flush bridged loggers: {}", e);
        }
    }
}

/// Install the bridge as the `log` backend, forwarding records up to `max_level`
pub fn init_log_bridge(max_level: LevelFilter) -> Result<()> {
    log::set_boxed_logger(Box::new(LogBridge::global()))
        .map(|()| log::set_max_level(max_level))
        .map_err(|e| LoggerError::other(format!("could not install log bridge: {}", e)))
}
