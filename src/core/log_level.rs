//! Log level definitions

use super::error::LoggerError;
use std::fmt;
use std::str::FromStr;

/// Name of the environment variable consulted for the initial level.
pub const LEVEL_ENV_VAR: &str = "DEFERLOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
}

impl LogLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// Three-letter tag substituted for the `%(LEVEL)` placeholder.
    pub fn to_tag(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRC",
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warning => "WRN",
            LogLevel::Error => "ERR",
            LogLevel::Critical => "CRT",
        }
    }

    /// Display color for records at this level. Trace renders plain.
    pub fn color_code(&self) -> Option<colored::Color> {
        use colored::Color::*;
        match self {
            LogLevel::Trace => None,
            LogLevel::Debug => Some(BrightWhite),
            LogLevel::Info => Some(BrightGreen),
            LogLevel::Warning => Some(BrightYellow),
            LogLevel::Error => Some(BrightMagenta),
            LogLevel::Critical => Some(BrightRed),
        }
    }

    /// Whether a record at this level passes the configured threshold.
    ///
    /// Critical is the maximum level, so it passes every threshold.
    #[inline]
    pub fn enabled_at(&self, threshold: LogLevel) -> bool {
        *self >= threshold
    }

    /// Initial level from the `DEFERLOG_LEVEL` environment variable.
    ///
    /// Absent or unrecognized values fall back to `Info`.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(LEVEL_ENV_VAR).ok().as_deref())
    }

    pub fn from_env_value(value: Option<&str>) -> Self {
        value
            .and_then(|s| s.parse().ok())
            .unwrap_or(LogLevel::Info)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" | "TRC" => Ok(LogLevel::Trace),
            "DEBUG" | "DBG" => Ok(LogLevel::Debug),
            "INFO" | "INF" => Ok(LogLevel::Info),
            "WARNING" | "WARN" | "WRN" => Ok(LogLevel::Warning),
            "ERROR" | "ERR" => Ok(LogLevel::Error),
            "CRITICAL" | "CRIT" | "CRT" => Ok(LogLevel::Critical),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}
