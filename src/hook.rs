//! Argument preprocessing
//!
//! Every argument of the logging macros goes through [`Argument::preprocess`]
//! before it reaches the formatter. Ordinary `Display` values pass through
//! untouched. A payload type that cannot be formatted directly opts in by
//! implementing [`Argument`] itself and returning a short textual stand-in,
//! optionally performing a side effect keyed on the destination logger and
//! the record level (see [`crate::image::Image`]).
//!
//! A hook must not fail: problems are reported through the returned text.

use crate::core::LogLevel;
use crate::handle::NamedLogger;
use std::fmt;

/// What an argument turns into before formatting
pub enum Processed<'a> {
    /// The original value, formatted as is
    Borrowed(&'a dyn fmt::Display),
    /// A replacement produced by a hook
    Owned(String),
}

impl fmt::Display for Processed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Processed::Borrowed(value) => fmt::Display::fmt(*value, f),
            Processed::Owned(text) => f.pad(text),
        }
    }
}

impl fmt::Debug for Processed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Processed::Borrowed(value) => write!(f, "Borrowed({})", value),
            Processed::Owned(text) => write!(f, "Owned({:?})", text),
        }
    }
}

pub trait Argument {
    /// Convert `self` for a record at `level` on `logger`
    fn preprocess<'a>(&'a self, logger: &NamedLogger, level: LogLevel) -> Processed<'a>;
}

impl<T: fmt::Display> Argument for T {
    #[inline]
    fn preprocess<'a>(&'a self, _logger: &NamedLogger, _level: LogLevel) -> Processed<'a> {
        Processed::Borrowed(self)
    }
}

/// Entry point used by the logging macros
#[inline]
pub fn preprocess<'a, T: Argument + ?Sized>(
    arg: &'a T,
    logger: &NamedLogger,
    level: LogLevel,
) -> Processed<'a> {
    arg.preprocess(logger, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Logger;

    struct Secret;

    impl Argument for Secret {
        fn preprocess<'a>(&'a self, logger: &NamedLogger, level: LogLevel) -> Processed<'a> {
            Processed::Owned(format!("<redacted for {} at {}>", logger.name(), level.name()))
        }
    }

    #[test]
    fn test_display_passes_through() {
        let logger = NamedLogger::new(Logger::new("unit"));
        let value = 42;
        let processed = preprocess(&value, &logger, LogLevel::Info);
        assert!(matches!(processed, Processed::Borrowed(_)));
        assert_eq!(processed.to_string(), "42");
        assert_eq!(preprocess(&"text", &logger, LogLevel::Info).to_string(), "text");
    }

    #[test]
    fn test_custom_hook_replaces_argument() {
        let logger = NamedLogger::new(Logger::new("unit"));
        let processed = preprocess(&Secret, &logger, LogLevel::Warn);
        assert_eq!(processed.to_string(), "<redacted for unit at warning>");
    }

    #[test]
    fn test_format_width_applies_to_borrowed() {
        let logger = NamedLogger::new(Logger::new("unit"));
        let processed = preprocess(&7, &logger, LogLevel::Info);
        assert_eq!(format!("{:>3}", processed), "  7");
    }
}
