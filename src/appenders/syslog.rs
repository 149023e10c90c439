//! System-log sink
//!
//! Sends each record as an RFC 3164 style datagram (`<PRI>ident: line`) to
//! the local syslog socket. The socket is opened on the first record the
//! sink admits, so a disabled sink never touches it. When the socket cannot
//! be reached the failure is reported once and later records are discarded.

use crate::core::{Appender, FormattedEntry, LogLevel, LoggerError, Result};
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::net::UnixDatagram;

pub const DEFAULT_SYSLOG_SOCKET: &str = "/dev/log";

/// syslog facility `user`
const FACILITY_USER: u8 = 1;

pub struct SyslogAppender {
    ident: String,
    socket_path: PathBuf,
    #[cfg(unix)]
    socket: Option<UnixDatagram>,
    unavailable: bool,
}

impl SyslogAppender {
    pub fn new(ident: impl Into<String>) -> Self {
        Self::with_socket(ident, DEFAULT_SYSLOG_SOCKET)
    }

    pub fn with_socket(ident: impl Into<String>, socket_path: impl Into<PathBuf>) -> Self {
        Self {
            ident: ident.into(),
            socket_path: socket_path.into(),
            #[cfg(unix)]
            socket: None,
            unavailable: false,
        }
    }

    /// syslog severity for a record level
    pub fn severity(level: LogLevel) -> u8 {
        match level {
            LogLevel::Trace | LogLevel::Debug => 7,
            LogLevel::Info => 6,
            LogLevel::Warn => 4,
            LogLevel::Error => 3,
            LogLevel::Critical | LogLevel::Off => 2,
        }
    }

    fn datagram(&self, record: &FormattedEntry<'_>) -> String {
        let priority = FACILITY_USER * 8 + Self::severity(record.entry.level);
        let ident = if self.ident.is_empty() {
            "logger"
        } else {
            self.ident.as_str()
        };
        format!("<{}>{}: {}", priority, ident, record.line)
    }

    #[cfg(unix)]
    fn send(&mut self, payload: &[u8]) -> Result<()> {
        if self.socket.is_none() {
            let socket = UnixDatagram::unbound()?;
            socket.connect(&self.socket_path).map_err(|e| {
                LoggerError::io_operation(
                    "connecting to syslog",
                    format!("cannot reach '{}'", self.socket_path.display()),
                    e,
                )
            })?;
            self.socket = Some(socket);
        }

        let sent = match self.socket {
            Some(ref socket) => socket.send(payload).map(|_| ()),
            None => Ok(()),
        };
        if let Err(e) = sent {
            self.socket = None;
            return Err(e.into());
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn send(&mut self, _payload: &[u8]) -> Result<()> {
        Ok(())
    }
}

impl Appender for SyslogAppender {
    fn append(&mut self, record: &FormattedEntry<'_>) -> Result<()> {
        if self.unavailable {
            return Ok(());
        }

        let payload = self.datagram(record);
        self.send(payload.as_bytes()).map_err(|e| {
            self.unavailable = true;
            LoggerError::writer(format!("system log disabled for '{}': {}", self.ident, e))
        })
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "syslog"
    }
}
