//! Pattern-based record formatting
//!
//! A pattern is an spdlog-style template compiled once into tokens:
//!
//! | flag | renders |
//! |------|---------|
//! | `%v` | message |
//! | `%n` | logger name |
//! | `%l` / `%L` | level name / one-letter level |
//! | `%t` / `%P` | thread id / process id |
//! | `%Y %y %m %d %H %M %S` | date and time parts |
//! | `%e %f %F` | milli-, micro-, nanoseconds |
//! | `%z` / `%E` | utc offset / epoch seconds |
//! | `%T` / `%D` | `%H:%M:%S` / `%m/%d/%y` |
//! | `%^ ... %$` | color range |
//! | `%%` | a literal `%` |
//!
//! Unknown flags are rendered verbatim.

use super::log_entry::LogEntry;
use super::time_type::TimeType;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::{self, Write};
use std::ops::Range;

pub const DEFAULT_PATTERN: &str = "[%Y-%m-%d %H:%M:%S.%e] [%n] [%^%l%$] %v";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Message,
    Name,
    Level,
    ShortLevel,
    ThreadId,
    ProcessId,
    /// chrono strftime specifier
    Time(&'static str),
    ColorStart,
    ColorEnd,
}

/// Output of [`PatternFormatter::format`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    pub text: String,
    pub color_range: Option<Range<usize>>,
}

#[derive(Debug, Clone)]
pub struct PatternFormatter {
    pattern: String,
    time_type: TimeType,
    tokens: Vec<Token>,
}

impl PatternFormatter {
    pub fn new(pattern: impl Into<String>, time_type: TimeType) -> Self {
        let pattern = pattern.into();
        let tokens = Self::compile(&pattern);
        Self {
            pattern,
            time_type,
            tokens,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn time_type(&self) -> TimeType {
        self.time_type
    }

    pub fn set_time_type(&mut self, time_type: TimeType) {
        self.time_type = time_type;
    }

    fn compile(pattern: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            let token = match chars.next() {
                Some('v') => Token::Message,
                Some('n') => Token::Name,
                Some('l') => Token::Level,
                Some('L') => Token::ShortLevel,
                Some('t') => Token::ThreadId,
                Some('P') => Token::ProcessId,
                Some('Y') => Token::Time("%Y"),
                Some('y') => Token::Time("%y"),
                Some('m') => Token::Time("%m"),
                Some('d') => Token::Time("%d"),
                Some('H') => Token::Time("%H"),
                Some('M') => Token::Time("%M"),
                Some('S') => Token::Time("%S"),
                Some('e') => Token::Time("%3f"),
                Some('f') => Token::Time("%6f"),
                Some('F') => Token::Time("%9f"),
                Some('z') => Token::Time("%:z"),
                Some('E') => Token::Time("%s"),
                Some('T') => Token::Time("%H:%M:%S"),
                Some('D') => Token::Time("%m/%d/%y"),
                Some('^') => Token::ColorStart,
                Some('$') => Token::ColorEnd,
                Some('%') => {
                    literal.push('%');
                    continue;
                }
                Some(other) => {
                    literal.push('%');
                    literal.push(other);
                    continue;
                }
                None => {
                    literal.push('%');
                    break;
                }
            };

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(token);
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }
        tokens
    }

    pub fn format(&self, entry: &LogEntry) -> FormattedLine {
        match self.time_type {
            TimeType::Local => self.render(entry, &entry.timestamp.with_timezone(&Local)),
            TimeType::Utc => self.render(entry, &entry.timestamp),
        }
    }

    fn render<Tz: TimeZone>(&self, entry: &LogEntry, time: &DateTime<Tz>) -> FormattedLine
    where
        Tz::Offset: fmt::Display,
    {
        let mut text = String::with_capacity(self.pattern.len() + entry.message.len() + 32);
        let mut color_start = None;
        let mut color_range = None;

        for token in &self.tokens {
            // Writing into a String cannot fail
            let _ = match token {
                Token::Literal(s) => write!(text, "{}", s),
                Token::Message => write!(text, "{}", entry.message),
                Token::Name => write!(text, "{}", entry.logger),
                Token::Level => write!(text, "{}", entry.level.name()),
                Token::ShortLevel => write!(text, "{}", entry.level.short_code()),
                Token::ThreadId => write!(text, "{}", entry.thread_id),
                Token::ProcessId => write!(text, "{}", std::process::id()),
                Token::Time(spec) => write!(text, "{}", time.format(spec)),
                Token::ColorStart => {
                    color_start = Some(text.len());
                    Ok(())
                }
                Token::ColorEnd => {
                    if let Some(start) = color_start.take() {
                        color_range = Some(start..text.len());
                    }
                    Ok(())
                }
            };
        }

        FormattedLine { text, color_range }
    }
}

impl Default for PatternFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN, TimeType::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use chrono::Utc;

    fn fixed_entry(level: LogLevel, message: &str) -> LogEntry {
        // 2025-01-08 10:30:45.123456 UTC
        let timestamp = Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456);
        LogEntry::new("svc.x", level, message.to_string()).with_timestamp(timestamp)
    }

    #[test]
    fn test_basic_flags() {
        let formatter = PatternFormatter::new("[%n] [%l] %v", TimeType::Utc);
        let line = formatter.format(&fixed_entry(LogLevel::Warn, "disk low"));
        assert_eq!(line.text, "[svc.x] [warning] disk low");
        assert_eq!(line.color_range, None);
    }

    #[test]
    fn test_utc_time_flags() {
        let formatter = PatternFormatter::new("%Y-%m-%d %H:%M:%S.%e|%f|%T|%D", TimeType::Utc);
        let line = formatter.format(&fixed_entry(LogLevel::Info, ""));
        assert_eq!(
            line.text,
            "2025-01-08 10:30:45.123|123456|10:30:45|01/08/25"
        );
    }

    #[test]
    fn test_local_time_matches_chrono_local() {
        let entry = fixed_entry(LogLevel::Info, "");
        let formatter = PatternFormatter::new("%H:%M", TimeType::Local);
        let expected = entry
            .timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string();
        assert_eq!(formatter.format(&entry).text, expected);
    }

    #[test]
    fn test_color_range() {
        let formatter = PatternFormatter::new("[%^%L%$] %v", TimeType::Utc);
        let line = formatter.format(&fixed_entry(LogLevel::Error, "boom"));
        assert_eq!(line.text, "[E] boom");
        assert_eq!(line.color_range, Some(1..2));
    }

    #[test]
    fn test_escapes_and_unknown_flags() {
        let formatter = PatternFormatter::new("100%% %q %v %", TimeType::Utc);
        let line = formatter.format(&fixed_entry(LogLevel::Info, "ok"));
        assert_eq!(line.text, "100% %q ok %");
    }

    #[test]
    fn test_default_pattern() {
        let formatter = PatternFormatter::default();
        assert_eq!(formatter.pattern(), DEFAULT_PATTERN);
        assert_eq!(formatter.time_type(), TimeType::Local);
        let line = formatter.format(&fixed_entry(LogLevel::Info, "hello"));
        assert!(line.text.ends_with("[svc.x] [info] hello"));
        let range = line.color_range.expect("color range");
        assert_eq!(&line.text[range], "info");
    }
}
