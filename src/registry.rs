//! Logger registry
//!
//! The registry keeps two caches behind a single reader/writer lock:
//!
//! - created loggers, keyed by name; at most one handle exists per name
//! - configuration rules, keyed by regex pattern and kept in registration order
//!
//! A rule applies to every logger whose whole name matches its pattern, both
//! to loggers that already exist (when the rule is registered, or on
//! [`LoggerRegistry::reapply`]) and to loggers created later. Matching rules
//! are applied in registration order; a field a rule leaves unset never
//! overwrites what an earlier rule set. Rules are applied under the shared
//! side of the lock, after the exclusive section that inserted the logger or
//! rule has been downgraded, so no rule can be registered mid-application.
//!
//! # Example
//!
//! ```
//! use logger_registry::{ConfigRule, LoggerRegistry, LogLevel, Target};
//!
//! let registry = LoggerRegistry::new();
//! registry
//!     .configure(Target::regex(r"svc\..*"), ConfigRule::new().with_level(LogLevel::Warn))
//!     .unwrap();
//!
//! let logger = registry.get_logger("svc.db");
//! assert_eq!(logger.level(), LogLevel::Warn);
//! assert!(std::sync::Arc::ptr_eq(&logger, &registry.get_logger("svc.db")));
//! ```

use crate::appenders::{ConsoleAppender, SyslogAppender};
use crate::core::{LogLevel, Logger, LoggerError, Result, SinkKind, Sinks, TimeType};
use crate::handle::{LoggerPtr, NamedLogger};
use indexmap::map::Entry;
use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockWriteGuard};
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

/// Name reserved for the default logger
pub const DEFAULT_LOGGER_NAME: &str = "";

const METACHARACTERS: &[char] = &[
    '\\', '^', '.', '[', '$', '(', ')', '|', '*', '+', '?', '{', ']', '}',
];

/// Escape a literal logger name so it only ever matches itself
pub fn name_to_pattern(name: &str) -> String {
    let mut pattern = String::with_capacity(name.len() * 2);
    for c in name.chars() {
        if METACHARACTERS.contains(&c) {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{})$", pattern))
        .map_err(|e| LoggerError::invalid_pattern(pattern, e))
}

/// What a configuration rule is registered for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// A literal logger name
    Name(String),
    /// A regex matched against whole logger names
    Regex(String),
}

impl Target {
    pub fn name(name: impl Into<String>) -> Self {
        Target::Name(name.into())
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Target::Regex(pattern.into())
    }

    /// Key under which the rule is cached
    pub fn to_pattern(&self) -> String {
        match self {
            Target::Name(name) => name_to_pattern(name),
            Target::Regex(pattern) => pattern.clone(),
        }
    }
}

/// Deferred configuration for every logger matching a pattern.
/// Unset fields leave the logger untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRule {
    pub level: Option<LogLevel>,
    pub pattern: Option<String>,
    pub time_type: Option<TimeType>,
    pub path: Option<PathBuf>,
    pub sinks: Option<Sinks>,
    pub log_image: Option<LogLevel>,
}

impl ConfigRule {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>, time_type: TimeType) -> Self {
        self.pattern = Some(pattern.into());
        self.time_type = Some(time_type);
        self
    }

    #[must_use]
    pub fn with_time_type(mut self, time_type: TimeType) -> Self {
        self.time_type = Some(time_type);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_sinks(mut self, sinks: Sinks) -> Self {
        self.sinks = Some(sinks);
        self
    }

    #[must_use]
    pub fn with_log_image(mut self, level: LogLevel) -> Self {
        self.log_image = Some(level);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == ConfigRule::default()
    }

    /// Overlay the fields `other` sets
    pub fn merge(&mut self, other: &ConfigRule) {
        if other.level.is_some() {
            self.level = other.level;
        }
        if other.pattern.is_some() {
            self.pattern = other.pattern.clone();
        }
        if other.time_type.is_some() {
            self.time_type = other.time_type;
        }
        if other.path.is_some() {
            self.path = other.path.clone();
        }
        if other.sinks.is_some() {
            self.sinks = other.sinks;
        }
        if other.log_image.is_some() {
            self.log_image = other.log_image;
        }
    }

    pub fn apply_to(&self, logger: &NamedLogger) {
        if let Some(level) = self.level {
            logger.set_level(level);
        }
        match (&self.pattern, self.time_type) {
            (Some(pattern), time_type) => {
                logger.set_pattern(pattern, time_type.unwrap_or_else(|| logger.time_type()))
            }
            (None, Some(time_type)) => logger.set_time_type(time_type),
            (None, None) => {}
        }
        if let Some(ref path) = self.path {
            logger.set_path(path.clone());
        }
        if let Some(sinks) = self.sinks {
            logger.set_sinks(sinks);
        }
        if let Some(level) = self.log_image {
            logger.set_log_image(level);
        }
    }
}

struct RuleEntry {
    regex: Regex,
    rule: ConfigRule,
}

fn apply_rules<'a>(rules: impl IntoIterator<Item = &'a RuleEntry>, logger: &NamedLogger) {
    for entry in rules {
        if entry.regex.is_match(logger.name()) {
            entry.rule.apply_to(logger);
        }
    }
}

#[derive(Default)]
struct RegistryState {
    loggers: HashMap<String, LoggerPtr>,
    rules: IndexMap<String, RuleEntry>,
}

/// Builds the engine logger behind a new handle
pub type LoggerCreator = dyn Fn(&str) -> Logger + Send + Sync;

/// Engine with a stdout sink and a system-log sink, enabled per
/// [`Sinks::compiled_defaults`]
pub fn default_backend(name: &str) -> Logger {
    let defaults = Sinks::compiled_defaults();
    Logger::builder(name)
        .sink(
            SinkKind::Stdout,
            ConsoleAppender::new(),
            defaults.contains(Sinks::STDOUT),
        )
        .sink(
            SinkKind::Syslog,
            SyslogAppender::new(name),
            defaults.contains(Sinks::SYSTEMD),
        )
        .build()
}

pub struct LoggerRegistry {
    state: RwLock<RegistryState>,
    creator: Box<LoggerCreator>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::with_creator(default_backend)
    }

    pub fn with_creator<F>(creator: F) -> Self
    where
        F: Fn(&str) -> Logger + Send + Sync + 'static,
    {
        Self {
            state: RwLock::new(RegistryState::default()),
            creator: Box::new(creator),
        }
    }

    /// Get or create the logger called `name`.
    ///
    /// Every call with the same name returns the same shared handle. A newly
    /// created logger receives every matching rule before it is returned.
    pub fn get_logger(&self, name: &str) -> LoggerPtr {
        if let Some(logger) = self.state.read().loggers.get(name) {
            return Arc::clone(logger);
        }

        let mut state = self.state.write();
        if let Some(existing) = state.loggers.get(name) {
            // Lost the race to another creator
            return Arc::clone(existing);
        }
        let logger = Arc::new(NamedLogger::new((self.creator)(name)));
        state.loggers.insert(name.to_string(), Arc::clone(&logger));

        let state = RwLockWriteGuard::downgrade(state);
        apply_rules(state.rules.values(), &logger);
        logger
    }

    pub fn default_logger(&self) -> LoggerPtr {
        self.get_logger(DEFAULT_LOGGER_NAME)
    }

    /// Register `rule` for `target`, merging into any rule already cached
    /// under the same pattern, then re-apply the rule set to every existing
    /// logger the pattern matches.
    ///
    /// An invalid regex is rejected here and nothing is stored.
    pub fn configure(&self, target: Target, rule: ConfigRule) -> Result<()> {
        let pattern = target.to_pattern();
        let regex = compile(&pattern)?;

        let mut state = self.state.write();
        match state.rules.entry(pattern) {
            Entry::Occupied(mut entry) => entry.get_mut().rule.merge(&rule),
            Entry::Vacant(entry) => {
                entry.insert(RuleEntry {
                    regex: regex.clone(),
                    rule,
                });
            }
        }

        let state = RwLockWriteGuard::downgrade(state);
        for (_, logger) in state.loggers.iter().filter(|(name, _)| regex.is_match(name)) {
            apply_rules(state.rules.values(), logger);
        }
        Ok(())
    }

    /// Re-apply every cached rule to every created logger
    pub fn reapply(&self) {
        let state = self.state.read();
        for logger in state.loggers.values() {
            apply_rules(state.rules.values(), logger);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.read().loggers.contains_key(name)
    }

    /// Names of all created loggers, sorted
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.read().loggers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Cached rule patterns in registration order
    pub fn rule_patterns(&self) -> Vec<String> {
        self.state.read().rules.keys().cloned().collect()
    }

    /// The merged rule cached under `target`, if any
    pub fn rule(&self, target: &Target) -> Option<ConfigRule> {
        self.state
            .read()
            .rules
            .get(&target.to_pattern())
            .map(|entry| entry.rule.clone())
    }

    pub fn flush_all(&self) -> Result<()> {
        let loggers: Vec<LoggerPtr> = self.state.read().loggers.values().cloned().collect();
        for logger in loggers {
            logger.flush()?;
        }
        Ok(())
    }

    /// Forget every logger and rule. Handles already given out stay usable
    /// but are no longer reachable through the registry.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.loggers.clear();
        state.rules.clear();
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: OnceLock<LoggerRegistry> = OnceLock::new();

/// The process-wide registry, built with [`LoggerRegistry::new`] on first use
pub fn registry() -> &'static LoggerRegistry {
    REGISTRY.get_or_init(LoggerRegistry::new)
}

/// Install a custom process-wide registry. Fails once [`registry`] has been used.
pub fn install(registry: LoggerRegistry) -> Result<()> {
    REGISTRY
        .set(registry)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

pub fn get_logger(name: &str) -> LoggerPtr {
    registry().get_logger(name)
}

pub fn default_logger() -> LoggerPtr {
    registry().default_logger()
}

pub fn configure(target: Target, rule: ConfigRule) -> Result<()> {
    registry().configure(target, rule)
}

pub fn reapply() {
    registry().reapply()
}
