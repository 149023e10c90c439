//! Shared helpers for the integration tests

#![allow(dead_code)]

use logger_registry::core::{Appender, FormattedEntry, LogLevel, Logger, Result, SinkKind, TimeType};
use logger_registry::LoggerRegistry;
use parking_lot::Mutex;
use std::sync::Arc;

/// Pattern used by every captured logger: `name|level|message`
pub const TEST_PATTERN: &str = "%n|%l|%v";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub logger: String,
    pub level: LogLevel,
    pub line: String,
}

/// Appender keeping every record it receives, shared between clones
#[derive(Clone, Default)]
pub struct MemoryAppender {
    records: Arc<Mutex<Vec<Captured>>>,
}

impl MemoryAppender {
    pub fn records(&self) -> Vec<Captured> {
        self.records.lock().clone()
    }

    pub fn records_for(&self, logger: &str) -> Vec<Captured> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.logger == logger)
            .cloned()
            .collect()
    }

    pub fn lines_for(&self, logger: &str) -> Vec<String> {
        self.records_for(logger).into_iter().map(|r| r.line).collect()
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, record: &FormattedEntry<'_>) -> Result<()> {
        self.records.lock().push(Captured {
            logger: record.entry.logger.clone(),
            level: record.entry.level,
            line: record.line.to_string(),
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Registry whose loggers write to two memory sinks standing in for stdout
/// and the system log, both enabled at creation
pub struct Harness {
    pub registry: LoggerRegistry,
    pub stdout: MemoryAppender,
    pub syslog: MemoryAppender,
}

impl Harness {
    pub fn new() -> Self {
        let stdout = MemoryAppender::default();
        let syslog = MemoryAppender::default();
        let (out, sys) = (stdout.clone(), syslog.clone());
        let registry = LoggerRegistry::with_creator(move |name| {
            Logger::builder(name)
                .pattern(TEST_PATTERN, TimeType::Utc)
                .sink(SinkKind::Stdout, out.clone(), true)
                .sink(SinkKind::Syslog, sys.clone(), true)
                .build()
        });
        Self {
            registry,
            stdout,
            syslog,
        }
    }
}
