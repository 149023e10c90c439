//! Engine logger
//!
//! A `Logger` owns a live threshold level, a compiled pattern and an ordered
//! set of sinks, each sink carrying its own threshold. Named handles from the
//! registry wrap one of these and delegate all record I/O to it.

use super::{
    appender::Appender,
    error::Result,
    log_entry::{FormattedEntry, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    pattern::PatternFormatter,
    sinks::SinkKind,
    time_type::TimeType,
};
use parking_lot::RwLock;
use std::any::Any;

struct Sink {
    kind: SinkKind,
    level: LogLevel,
    appender: Box<dyn Appender>,
}

impl Sink {
    fn admits(&self, level: LogLevel) -> bool {
        self.level != LogLevel::Off && level >= self.level
    }
}

pub struct Logger {
    name: String,
    level: RwLock<LogLevel>,
    formatter: RwLock<PatternFormatter>,
    sinks: RwLock<Vec<Sink>>,
    metrics: LoggerMetrics,
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(LogLevel::Info),
            formatter: RwLock::new(PatternFormatter::default()),
            sinks: RwLock::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hand one formatted record to every admitting sink.
    ///
    /// Each appender call is wrapped in `catch_unwind` so a failing sink
    /// never keeps the record from the others. Returns `true` if any sink
    /// failed.
    fn process_sync(sinks: &mut [Sink], record: &FormattedEntry<'_>) -> bool {
        let mut has_error = false;

        for sink in sinks.iter_mut().filter(|s| s.admits(record.entry.level)) {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                sink.appender.append(record)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Sink '{}' failed for logger '{}': {}",
                        sink.appender.name(),
                        record.entry.logger,
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink '{}' panicked: {}. \
                         Other sinks continue to function.",
                        sink.appender.name(),
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        has_error
    }

    pub fn add_sink(&self, kind: SinkKind, appender: Box<dyn Appender>, level: LogLevel) {
        self.sinks.write().push(Sink {
            kind,
            level,
            appender,
        });
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    #[inline]
    pub fn should_log(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= *self.level.read()
    }

    /// Recompile the pattern used by every sink of this logger
    pub fn set_pattern(&self, pattern: &str, time_type: TimeType) {
        let formatter = PatternFormatter::new(pattern, time_type);
        *self.formatter.write() = formatter;
    }

    pub fn set_time_type(&self, time_type: TimeType) {
        self.formatter.write().set_time_type(time_type);
    }

    pub fn pattern(&self) -> String {
        self.formatter.read().pattern().to_string()
    }

    pub fn time_type(&self) -> TimeType {
        self.formatter.read().time_type()
    }

    /// Set the threshold of every sink of the given kind
    pub fn set_sink_level(&self, kind: SinkKind, level: LogLevel) {
        for sink in self.sinks.write().iter_mut().filter(|s| s.kind == kind) {
            sink.level = level;
        }
    }

    /// Threshold of the first sink of the given kind, if the logger has one
    pub fn sink_level(&self, kind: SinkKind) -> Option<LogLevel> {
        self.sinks
            .read()
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.level)
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.should_log(level) {
            return;
        }

        let entry = LogEntry::new(self.name.as_str(), level, message.into());
        let line = self.formatter.read().format(&entry);
        let record = FormattedEntry {
            entry: &entry,
            line: &line.text,
            color_range: line.color_range.clone(),
        };

        let mut sinks = self.sinks.write();
        if Self::process_sync(&mut sinks, &record) {
            self.metrics.record_dropped();
        } else {
            self.metrics.record_logged();
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut sinks = self.sinks.write();
        for sink in sinks.iter_mut() {
            sink.appender.flush()?;
        }
        Ok(())
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!(
                "[LOGGER ERROR] Failed to flush logger '{}' during shutdown: {}",
                self.name, e
            );
        }
    }
}

/// Builder for constructing an engine `Logger` with a fluent API
///
/// # Example
/// ```
/// use logger_registry::core::{Logger, LogLevel, SinkKind, TimeType};
/// use logger_registry::appenders::ConsoleAppender;
///
/// let logger = Logger::builder("svc")
///     .level(LogLevel::Debug)
///     .pattern("[%n] [%l] %v", TimeType::Utc)
///     .sink(SinkKind::Stdout, ConsoleAppender::new(), true)
///     .build();
///
/// assert_eq!(logger.sink_level(SinkKind::Stdout), Some(LogLevel::Trace));
/// ```
pub struct LoggerBuilder {
    name: String,
    level: LogLevel,
    formatter: PatternFormatter,
    sinks: Vec<Sink>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LogLevel::Info,
            formatter: PatternFormatter::default(),
            sinks: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn pattern(mut self, pattern: &str, time_type: TimeType) -> Self {
        self.formatter = PatternFormatter::new(pattern, time_type);
        self
    }

    /// Add a sink. An enabled sink admits every level, a disabled one nothing.
    #[must_use = "builder methods return a new value"]
    pub fn sink<A: Appender + 'static>(mut self, kind: SinkKind, appender: A, enabled: bool) -> Self {
        self.sinks.push(Sink {
            kind,
            level: if enabled { LogLevel::Trace } else { LogLevel::Off },
            appender: Box::new(appender),
        });
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            name: self.name,
            level: RwLock::new(self.level),
            formatter: RwLock::new(self.formatter),
            sinks: RwLock::new(self.sinks),
            metrics: LoggerMetrics::new(),
        }
    }
}
