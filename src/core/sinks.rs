//! Sink selection bitmask

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Bitmask of enabled sinks: bit 1 is stdout, bit 2 the system log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Sinks(u8);

impl Sinks {
    pub const NONE: Sinks = Sinks(0);
    pub const STDOUT: Sinks = Sinks(1);
    pub const SYSTEMD: Sinks = Sinks(2);

    const KNOWN: u8 = Self::STDOUT.0 | Self::SYSTEMD.0;

    /// Unknown bits are ignored.
    pub fn from_bits(bits: i64) -> Self {
        Sinks((bits & Self::KNOWN as i64) as u8)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, other: Sinks) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    /// Sinks enabled by default in this build
    pub fn compiled_defaults() -> Self {
        let mut sinks = Sinks::NONE;
        if cfg!(feature = "stdout") {
            sinks = sinks | Sinks::STDOUT;
        }
        if cfg!(feature = "syslog") {
            sinks = sinks | Sinks::SYSTEMD;
        }
        sinks
    }
}

impl BitOr for Sinks {
    type Output = Sinks;

    fn bitor(self, rhs: Sinks) -> Sinks {
        Sinks(self.0 | rhs.0)
    }
}

impl fmt::Display for Sinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Sinks::STDOUT) {
            names.push("stdout");
        }
        if self.contains(Sinks::SYSTEMD) {
            names.push("systemd");
        }
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join("|"))
        }
    }
}

/// Identifies a sink slot on an engine logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Stdout,
    Syslog,
}

impl SinkKind {
    pub fn flag(&self) -> Sinks {
        match self {
            SinkKind::Stdout => Sinks::STDOUT,
            SinkKind::Syslog => Sinks::SYSTEMD,
        }
    }
}
