//! Error handling for the network diagnostics CLI

use thiserror::Error;

/// Custom error types for netcheck
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport-level failure of an outbound request
    #[error("Network error: {0}")]
    Network(String),

    /// Non-JSON or malformed response body
    #[error("Parse error: {0}")]
    Parse(String),

    /// DNS-over-HTTPS query returned no answer records
    #[error("No DNS records found for '{0}'")]
    NoRecords(String),

    /// Selector key does not name a known provider
    #[error("Unknown provider '{key}' (expected one of: {expected})")]
    UnknownProvider { key: String, expected: &'static str },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new no-records error for the given domain
    pub fn no_records<S: Into<String>>(domain: S) -> Self {
        Self::NoRecords(domain.into())
    }

    /// Create a new unknown-provider error
    pub fn unknown_provider<S: Into<String>>(key: S, expected: &'static str) -> Self {
        Self::UnknownProvider {
            key: key.into(),
            expected,
        }
    }

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

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "NETWORK",
            Self::Parse(_) => "PARSE",
            Self::NoRecords(_) => "DNS",
            Self::UnknownProvider { .. } => "PROVIDER",
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Io(_) => "IO",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Check if error is recoverable (can retry)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(_) | Self::NoRecords(_) => true,
            Self::Parse(_) | Self::UnknownProvider { .. } => false,
            Self::Config(_) | Self::Validation(_) | Self::Io(_) | Self::Internal(_) => false,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Network(msg) => {
                format!("Network connectivity issue: {}\n\nSuggestion: Check your internet connection and try again.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse a provider response: {}\n\nSuggestion: The service may be degraded or returning an error page. Try again or switch providers.", msg)
            }
            Self::NoRecords(domain) => {
                format!("The DNS resolver returned no records for '{}'.\n\nSuggestion: Check the spelling of the domain, or verify it exists with 'dig' or 'nslookup'.", domain)
            }
            Self::UnknownProvider { key, expected } => {
                format!("'{}' is not a known provider.\n\nSuggestion: Use one of: {}.", key, expected)
            }
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file or command line arguments.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid input: {}\n\nSuggestion: Check the format of your domain, IP address, or other arguments.", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check file permissions and disk space.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::UnknownProvider { .. } => 1,
            Self::Network(_) | Self::NoRecords(_) => 2,
            Self::Parse(_) => 3,
            Self::Io(_) => 4,
            Self::Internal(_) => 70,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Convenient Result type alias for the crate
pub type Result<T> = std::result::Result<T, AppError>;
