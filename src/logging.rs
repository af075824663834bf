//! Structured logging for the disguise benchmark plotter
//!
//! Level-filtered console logging with optional JSON entries for
//! integration with log aggregators. Everything here is synchronous;
//! the tool runs single-threaded start to finish.

use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Trace level - most detailed
    Trace = 0,
    /// Debug level - detailed information for debugging
    Debug = 1,
    /// Info level - general application information
    Info = 2,
    /// Warning level - potentially harmful situations
    Warn = 3,
    /// Error level - error events but application can continue
    Error = 4,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Trace => "\x1b[37m", // White
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

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp when log entry was created
    pub timestamp: DateTime<Utc>,
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Additional structured fields
    pub fields: HashMap<String, serde_json::Value>,
}

/// Console logger with level filtering and optional JSON output
pub struct Logger {
    /// Minimum log level to output
    min_level: LogLevel,
    /// Whether to use colored output
    use_colors: bool,
    /// Emit entries as JSON lines instead of formatted text
    json_output: bool,
    /// Component name stamped on every entry
    name: String,
}

impl Logger {
    /// Create a new logger
    pub fn new(min_level: LogLevel, use_colors: bool) -> Self {
        Self {
            min_level,
            use_colors,
            json_output: false,
            name: "dbp".to_string(),
        }
    }

    /// Create a logger derived from verbosity flags
    pub fn from_flags(verbose: bool, debug: bool, use_colors: bool) -> Self {
        let level = if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };
        Self::new(level, use_colors)
    }

    /// Switch to JSON-lines output
    pub fn with_json_output(mut self, json: bool) -> Self {
        self.json_output = json;
        self
    }

    /// Set the component name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Minimum level currently in effect
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Whether a message at `level` would be emitted
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Log a message at the given level
    pub fn log(&self, level: LogLevel, message: &str) {
        self.log_with_fields(level, message, HashMap::new());
    }

    /// Log a message with additional structured fields
    pub fn log_with_fields(
        &self,
        level: LogLevel,
        message: &str,
        fields: HashMap<String, serde_json::Value>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            logger: self.name.clone(),
            fields,
        };

        let line = if self.json_output {
            serde_json::to_string(&entry).unwrap_or_else(|_| entry.message.clone())
        } else {
            self.format_entry(&entry)
        };

        let stderr = io::stderr();
        let mut handle = stderr.lock();
        let _ = writeln!(handle, "{}", line);
    }

    fn format_entry(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%H:%M:%S%.3f");
        let mut line = if self.use_colors {
            format!(
                "{}{:5}{} [{}] {}",
                entry.level.color_code(),
                entry.level.as_str(),
                LogLevel::reset_code(),
                timestamp,
                entry.message
            )
        } else {
            format!(
                "{:5} [{}] {}",
                entry.level.as_str(),
                timestamp,
                entry.message
            )
        };

        if !entry.fields.is_empty() {
            let mut keys: Vec<&String> = entry.fields.keys().collect();
            keys.sort();
            for key in keys {
                line.push_str(&format!(" {}={}", key, entry.fields[key]));
            }
        }

        line
    }

    /// Log at trace level
    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }

    /// Log at debug level
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log at info level
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log at warn level
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Log at error level
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}
