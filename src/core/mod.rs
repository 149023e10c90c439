//! Core engine types: levels, records, patterns, sinks and the engine logger

pub mod appender;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod pattern;
pub mod sinks;
pub mod time_type;

pub use appender::Appender;
pub use error::{LoggerError, Result};
pub use log_entry::{FormattedEntry, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use pattern::{FormattedLine, PatternFormatter, DEFAULT_PATTERN};
pub use sinks::{SinkKind, Sinks};
pub use time_type::TimeType;
