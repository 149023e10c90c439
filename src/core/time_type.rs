//! Timestamp zone selection for pattern rendering

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeType {
    #[default]
    Local = 0,
    Utc = 1,
}

impl TimeType {
    /// `1` selects UTC; every other value falls back to local time.
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => TimeType::Utc,
            _ => TimeType::Local,
        }
    }
}
