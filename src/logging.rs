//! Structured logging for diagnostic flows
//!
//! A small console logger in the spirit of the rest of the tool: leveled,
//! optionally colored, with a per-session correlation ID so the events of a
//! single invocation can be grepped together. Silent unless `--verbose` or
//! `--debug` raises the level.

use crate::error::AppError;
use chrono::Utc;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m", // Cyan
            LogLevel::Info => "\x1b[32m",  // Green
            LogLevel::Warn => "\x1b[33m",  // Yellow
            LogLevel::Error => "\x1b[31m", // Red
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// Console logger with level filtering and a session correlation ID
#[derive(Debug, Clone)]
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    session_id: String,
}

impl Logger {
    /// Create a logger emitting `min_level` and above
    pub fn new(min_level: LogLevel, use_color: bool) -> Self {
        Self {
            min_level,
            use_color,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a logger from verbosity flags: debug wins over verbose; the
    /// default level keeps normal runs quiet.
    pub fn from_flags(verbose: bool, debug: bool, use_color: bool) -> Self {
        let min_level = if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };
        Self::new(min_level, use_color)
    }

    /// Session correlation ID shared by all entries from this logger
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn debug(&self, component: &str, message: &str) {
        self.log(LogLevel::Debug, component, message);
    }

    pub fn info(&self, component: &str, message: &str) {
        self.log(LogLevel::Info, component, message);
    }

    pub fn warn(&self, component: &str, message: &str) {
        self.log(LogLevel::Warn, component, message);
    }

    pub fn error(&self, component: &str, message: &str) {
        self.log(LogLevel::Error, component, message);
    }

    fn log(&self, level: LogLevel, component: &str, message: &str) {
        if level < self.min_level {
            return;
        }
        eprintln!("{}", self.format_entry(level, component, message));
    }

    fn format_entry(&self, level: LogLevel, component: &str, message: &str) -> String {
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        let short_session = &self.session_id[..8];

        if self.use_color {
            format!(
                "{} {}{:5}{} [{}] {}: {}",
                timestamp,
                level.color_code(),
                level.as_str(),
                LogLevel::reset_code(),
                short_session,
                component,
                message
            )
        } else {
            format!(
                "{} {:5} [{}] {}: {}",
                timestamp,
                level.as_str(),
                short_session,
                component,
                message
            )
        }
    }
}
