//! Sink implementations

pub mod console;
pub mod syslog;

pub use console::ConsoleAppender;
pub use syslog::SyslogAppender;

pub use crate::core::Appender;
