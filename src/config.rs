//! Structured configuration
//!
//! A configuration document holds one logger record or a list of them:
//!
//! ```json
//! { "loggers": [
//!     { "name": "svc\\..*", "regex": true, "level": 3 },
//!     { "name": "x", "level": "0", "sink": 1, "pattern": "[%n] %v", "time_type": 1 }
//! ] }
//! ```
//!
//! Recognized fields: `name` (required), `regex`, `level` (0..6), `pattern`,
//! `time_type` (0 local, 1 UTC), `sink` (bit 1 stdout, bit 2 system log),
//! `log_img` (image dump threshold, 0..6) and `img_path`. Integer fields take
//! numbers or numeric strings. Every record is validated on its own, so one
//! bad record never keeps its siblings from being applied.

use crate::core::{LogLevel, LoggerError, Result, Sinks, TimeType};
use crate::handle::LoggerPtr;
use crate::registry::{registry, ConfigRule, LoggerRegistry, Target};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Int(i64),
    Text(String),
}

fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Lenient>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Lenient::Int(value)) => Ok(Some(value)),
        Some(Lenient::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected an integer, found '{}'", text))),
    }
}

/// One logger record of a configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Literal logger name, or a pattern when `regex` is set
    pub name: String,

    #[serde(default)]
    pub regex: bool,

    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub time_type: Option<i64>,

    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub sink: Option<i64>,

    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub log_img: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_path: Option<PathBuf>,
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn target(&self) -> Target {
        if self.regex {
            Target::Regex(self.name.clone())
        } else {
            Target::Name(self.name.clone())
        }
    }

    /// Translate the record into a rule. Unknown level and time type
    /// values map to `Off` and `Local`.
    pub fn to_rule(&self) -> Result<ConfigRule> {
        let mut rule = ConfigRule::new();
        rule.level = self.level.map(LogLevel::from_index);
        rule.pattern = self.pattern.clone();
        rule.time_type = self.time_type.map(TimeType::from_index);
        rule.log_image = self.log_img.map(LogLevel::from_index);
        rule.path = self.img_path.clone();

        if let Some(mask) = self.sink {
            if mask < 0 {
                return Err(LoggerError::config(
                    self.component(),
                    format!("sink mask must not be negative, found {}", mask),
                ));
            }
            rule.sinks = Some(Sinks::from_bits(mask));
        }
        Ok(rule)
    }

    fn component(&self) -> String {
        format!("logger '{}'", self.name)
    }
}

fn parse_record(value: &Value) -> Result<LoggerConfig> {
    LoggerConfig::deserialize(value).map_err(|e| {
        let component = match value.get("name").and_then(Value::as_str) {
            Some(name) => format!("logger '{}'", name),
            None => "logger".to_string(),
        };
        LoggerError::config(component, e.to_string())
    })
}

/// Split a document into records, each parsed independently.
///
/// Accepts a single record, an array of records, `{"logger": ...}` or
/// `{"loggers": [...]}`.
pub fn parse_records(document: &Value) -> Vec<Result<LoggerConfig>> {
    match document {
        Value::Array(records) => records.iter().map(parse_record).collect(),
        Value::Object(map) => {
            if let Some(inner) = map.get("loggers").or_else(|| map.get("logger")) {
                parse_records(inner)
            } else {
                vec![parse_record(document)]
            }
        }
        other => vec![Err(LoggerError::config(
            "document",
            format!("expected a logger record or a list of records, found {}", other),
        ))],
    }
}

/// Read a configuration file; the format follows the file extension
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_ref()))
        .build()?;
    Ok(settings.try_deserialize::<Value>()?)
}

impl LoggerRegistry {
    /// Register the record as a rule. A literal name also creates the
    /// logger, which is returned configured.
    pub fn apply_config(&self, record: &LoggerConfig) -> Result<Option<LoggerPtr>> {
        let rule = record.to_rule()?;
        self.configure(record.target(), rule)?;
        if record.regex {
            Ok(None)
        } else {
            Ok(Some(self.get_logger(&record.name)))
        }
    }

    /// Apply every record of a document, one result per record
    pub fn apply_document(&self, document: &Value) -> Vec<Result<Option<LoggerPtr>>> {
        parse_records(document)
            .into_iter()
            .map(|record| {
                let applied = record.and_then(|record| self.apply_config(&record));
                if let Err(ref e) = applied {
                    eprintln!("[LOGGER WARNING] Could not apply configuration: {}", e);
                }
                applied
            })
            .collect()
    }

    pub fn apply_file(&self, path: impl AsRef<Path>) -> Result<Vec<Result<Option<LoggerPtr>>>> {
        let document = load_document(path)?;
        Ok(self.apply_document(&document))
    }
}

pub fn apply_document(document: &Value) -> Vec<Result<Option<LoggerPtr>>> {
    registry().apply_document(document)
}

pub fn apply_file(path: impl AsRef<Path>) -> Result<Vec<Result<Option<LoggerPtr>>>> {
    registry().apply_file(path)
}
