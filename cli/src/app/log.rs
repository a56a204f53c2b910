//! The user-visible output log.
//!
//! Git output and progress messages are appended here in order. An echoing
//! log prints info entries to stdout and error entries to stderr as they
//! arrive; the interactive menu turns echo off and prints each batch with
//! timestamps instead.

use std::fmt;

use chrono::{DateTime, Local};
use tracing::warn;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// One entry in the output log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub at: DateTime<Local>,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stamp = self.at.format("%H:%M:%S");
        let mut lines = self.message.lines();
        if let Some(first) = lines.next() {
            write!(f, "[{stamp}] {first}")?;
        }
        for line in lines {
            write!(f, "\n           {line}")?;
        }
        Ok(())
    }
}

/// Ordered list of entries shown to the user.
#[derive(Debug, Default)]
pub struct OutputLog {
    entries: Vec<LogEntry>,
    echo: bool,
}

impl OutputLog {
    /// A log that prints entries as they are added.
    #[must_use]
    pub const fn echoing() -> Self {
        Self {
            entries: Vec::new(),
            echo: true,
        }
    }

    /// A log that only records entries.
    #[cfg(test)]
    #[must_use]
    pub const fn silent() -> Self {
        Self {
            entries: Vec::new(),
            echo: false,
        }
    }

    /// Turns printing on or off for entries added from now on.
    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.push(LogLevel::Info, message.as_ref());
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        warn!(message = message.trim_end(), "operation reported an error");
        self.push(LogLevel::Error, message);
    }

    fn push(&mut self, level: LogLevel, message: &str) {
        let message = message.trim_end();
        if message.is_empty() {
            return;
        }

        if self.echo {
            match level {
                LogLevel::Info => println!("{message}"),
                LogLevel::Error => eprintln!("{message}"),
            }
        }

        self.entries.push(LogEntry {
            level,
            message: message.to_string(),
            at: Local::now(),
        });
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries added after the first `start`.
    #[must_use]
    pub fn since(&self, start: usize) -> &[LogEntry] {
        self.entries.get(start..).unwrap_or_default()
    }
}

#[cfg(test)]
impl OutputLog {
    /// Whether any entry at `level` contains `needle`.
    #[must_use]
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.level == level && e.message.contains(needle))
    }
}
