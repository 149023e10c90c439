//! # Logger Registry
//!
//! Named logger handles over a small synchronous logging engine, configured
//! by name or by regex.
//!
//! ## Features
//!
//! - **Shared handles**: `get_logger(name)` always returns the same `Arc` for a name
//! - **Deferred configuration**: rules keyed by a literal name or a regex apply to
//!   matching loggers that exist now and to those created later
//! - **Sinks**: stdout and the platform system log, each enabled per logger
//! - **Argument hooks**: payloads such as images are converted (and optionally
//!   dumped to disk) before formatting
//! - **Cheap when disabled**: the macros skip all formatting below the live level
//!
//! ## Example
//!
//! ```
//! use logger_registry::{info, ConfigRule, LoggerRegistry, LogLevel, Sinks, Target};
//!
//! let registry = LoggerRegistry::new();
//! registry
//!     .configure(
//!         Target::regex(r"svc\..*"),
//!         ConfigRule::new().with_level(LogLevel::Warn).with_sinks(Sinks::STDOUT),
//!     )
//!     .unwrap();
//!
//! let logger = registry.get_logger("svc.db");
//! info!(logger, "filtered out");
//! assert!(logger.is_enabled(LogLevel::Error));
//! ```

pub mod appenders;
pub mod bridge;
pub mod config;
pub mod core;
pub mod handle;
pub mod hook;
#[cfg(feature = "image")]
pub mod image;
pub mod macros;
pub mod registry;

pub mod prelude {
    pub use crate::core::{LogLevel, LoggerError, Result, Sinks, TimeType};
    pub use crate::handle::{LoggerPtr, NamedLogger};
    pub use crate::hook::{Argument, Processed};
    #[cfg(feature = "image")]
    pub use crate::image::Image;
    pub use crate::registry::{
        configure, default_logger, get_logger, reapply, ConfigRule, LoggerRegistry, Target,
    };
}

pub use crate::config::{parse_records, LoggerConfig};
pub use crate::core::{
    Appender, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result, SinkKind,
    Sinks, TimeType,
};
pub use crate::handle::{LoggerPtr, NamedLogger};
#[cfg(feature = "image")]
pub use crate::image::Image;
pub use crate::registry::{
    configure, default_logger, get_logger, name_to_pattern, reapply, registry, ConfigRule,
    LoggerRegistry, Target, DEFAULT_LOGGER_NAME,
};
pub use bridge::{init_log_bridge, LogBridge};
