//! Logging macros
//!
//! The macros check the logger's live level before touching any argument, so
//! a disabled record costs one comparison: no hook runs and nothing is
//! formatted. Every argument goes through [`crate::hook::preprocess`], which
//! is where payloads such as images are turned into text.
//!
//! Pass hooked payloads by value (`info!(logger, "{}", frame)`); the macro
//! borrows them.
//!
//! # Examples
//!
//! ```
//! use logger_registry::{info, warn, LoggerRegistry};
//!
//! let registry = LoggerRegistry::new();
//! let logger = registry.get_logger("server");
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! warn!(logger, "Server listening on port {}", port);
//!
//! // A leading format string targets the default logger
//! info!("registry holds {} loggers", registry.logger_names().len());
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use logger_registry::{LoggerRegistry, LogLevel};
/// # let logger = LoggerRegistry::new().get_logger("doc");
/// use logger_registry::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        match (&$logger, $level) {
            (logger, level) => {
                let logger: &$crate::NamedLogger = logger;
                let level: $crate::LogLevel = level;
                if logger.is_enabled(level) {
                    logger.log(
                        level,
                        format_args!($fmt $(, $crate::hook::preprocess(&$arg, logger, level))*),
                    );
                }
            }
        }
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($fmt:literal $($rest:tt)*) => {
        $crate::log!($crate::registry::default_logger(), $crate::LogLevel::Trace, $fmt $($rest)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// ```
/// # use logger_registry::{LoggerRegistry, LogLevel};
/// # let logger = LoggerRegistry::new().get_logger("doc");
/// use logger_registry::debug;
/// logger.set_level(LogLevel::Debug);
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:literal $($rest:tt)*) => {
        $crate::log!($crate::registry::default_logger(), $crate::LogLevel::Debug, $fmt $($rest)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($fmt:literal $($rest:tt)*) => {
        $crate::log!($crate::registry::default_logger(), $crate::LogLevel::Info, $fmt $($rest)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($fmt:literal $($rest:tt)*) => {
        $crate::log!($crate::registry::default_logger(), $crate::LogLevel::Warn, $fmt $($rest)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use logger_registry::LoggerRegistry;
/// # let logger = LoggerRegistry::new().get_logger("doc");
/// use logger_registry::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($fmt:literal $($rest:tt)*) => {
        $crate::log!($crate::registry::default_logger(), $crate::LogLevel::Error, $fmt $($rest)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($fmt:literal $($rest:tt)*) => {
        $crate::log!($crate::registry::default_logger(), $crate::LogLevel::Critical, $fmt $($rest)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}
