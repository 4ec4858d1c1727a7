//! Console log levels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a console event
///
/// Ordered from least to most important. `Quiet` is shown even when the
/// console runs with `--quiet`, which is why prompts use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Developer diagnostics
    Debug,
    /// Detailed progress
    Info,
    /// Default build progress
    Lifecycle,
    /// Warnings
    Warn,
    /// Always shown, including quiet mode
    Quiet,
    /// Errors
    Error,
}

impl LogLevel {
    /// All levels in ascending order
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Lifecycle,
        LogLevel::Warn,
        LogLevel::Quiet,
        LogLevel::Error,
    ];

    /// Upper-case name used in diagnostic output
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Lifecycle => "LIFECYCLE",
            LogLevel::Warn => "WARN",
            LogLevel::Quiet => "QUIET",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "lifecycle" => Ok(LogLevel::Lifecycle),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "quiet" => Ok(LogLevel::Quiet),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}
