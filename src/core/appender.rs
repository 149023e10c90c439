//! Appender trait for log output destinations

use super::{error::Result, log_entry::FormattedEntry};

pub trait Appender: Send + Sync {
    fn append(&mut self, record: &FormattedEntry<'_>) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
