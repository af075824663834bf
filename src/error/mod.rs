//! Error handling for the disguise benchmark plotter

use thiserror::Error;

/// Custom error types for the disguise benchmark plotter
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (benchmark records, JSON, etc.)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Input discovery errors (globs, filename conventions)
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Statistics calculation errors
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// Chart rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new discovery error
    pub fn discovery<S: Into<String>>(message: S) -> Self {
        Self::Discovery(message.into())
    }

    /// Create a new statistics error
    pub fn statistics<S: Into<String>>(message: S) -> Self {
        Self::Statistics(message.into())
    }

    /// Create a new render error
    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Discovery(_) => "DISCOVERY",
            Self::Statistics(_) => "STATS",
            Self::Render(_) => "RENDER",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file or command line arguments.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid input: {}\n\nSuggestion: Check the chart dimensions, units, and other option values.", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check file paths, permissions and disk space.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse data: {}\n\nSuggestion: Check that the result file matches the selected input format.", msg)
            }
            Self::Discovery(msg) => {
                format!("No usable input found: {}\n\nSuggestion: Check the glob pattern and that the result files follow the expected naming convention.", msg)
            }
            Self::Statistics(msg) => {
                format!("Statistics calculation failed: {}\n\nSuggestion: This usually indicates an empty or malformed sample.", msg)
            }
            Self::Render(msg) => {
                format!("Chart rendering failed: {}\n\nSuggestion: Check the output path and that the extension is .svg or .png.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) => 1, // Invalid configuration/usage
            Self::Discovery(_) => 2,                    // No matching input
            Self::Parse(_) => 3,                        // Malformed input
            Self::Io(_) => 5,                           // I/O issues
            Self::Statistics(_) | Self::Render(_) => 6, // Analysis/rendering issues
            Self::Internal(_) => 99,                    // Internal/unexpected errors
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Discovery(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Io(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Statistics(_) | Self::Render(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<csv::Error> for AppError {
    fn from(error: csv::Error) -> Self {
        Self::parse(format!("CSV parse error: {}", error))
    }
}

impl From<glob::PatternError> for AppError {
    fn from(error: glob::PatternError) -> Self {
        Self::discovery(format!("Invalid glob pattern: {}", error))
    }
}

impl From<glob::GlobError> for AppError {
    fn from(error: glob::GlobError) -> Self {
        Self::discovery(format!("Glob walk error: {}", error))
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self::parse(format!("Float parse error: {}", error))
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error context trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error
    fn context(self, message: &'static str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let original_error = e.into();
            let context = f();
            AppError::internal(format!("{}: {}", context, original_error))
        })
    }

    fn context(self, message: &'static str) -> Result<T> {
        self.with_context(|| message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let error = AppError::config("bad option");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(error.category(), "CONFIG");

        let error = AppError::parse("bad float");
        assert!(matches!(error, AppError::Parse(_)));
        assert_eq!(error.category(), "PARSE");
    }

    #[test]
    fn test_error_display() {
        let error = AppError::discovery("no files matched results/*.csv");
        assert_eq!(
            error.to_string(),
            "Discovery error: no files matched results/*.csv"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::config("x").exit_code(), 1);
        assert_eq!(AppError::validation("x").exit_code(), 1);
        assert_eq!(AppError::discovery("x").exit_code(), 2);
        assert_eq!(AppError::parse("x").exit_code(), 3);
        assert_eq!(AppError::io("x").exit_code(), 5);
        assert_eq!(AppError::render("x").exit_code(), 6);
        assert_eq!(AppError::internal("x").exit_code(), 99);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
    }

    #[test]
    fn test_format_for_console_plain() {
        let error = AppError::statistics("empty sample");
        let formatted = error.format_for_console(false);
        assert_eq!(formatted, "[STATS] Statistics error: empty sample");
    }

    #[test]
    fn test_error_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let with_ctx = result.context("reading results file");
        let error = with_ctx.unwrap_err();
        assert!(error.to_string().contains("reading results file"));
    }
}
