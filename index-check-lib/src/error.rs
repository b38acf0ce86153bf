//! Error handling for indexation checking operations.
//!
//! This module defines the error type shared by the library. Only validation,
//! configuration and file errors ever reach a caller before a batch starts;
//! everything that goes wrong while checking a single URL is folded into that
//! URL's [`CheckResult`](crate::CheckResult) instead.

use std::fmt;
use std::time::Duration;

/// Main error type for indexation checking operations.
#[derive(Debug, Clone)]
pub enum IndexCheckError {
    /// Caller input rejected before any API call (missing key, empty list, ...)
    Validation { message: String },

    /// Network-related errors (connection refused, DNS, TLS, ...)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// The search API answered with a non-success HTTP status
    HttpStatus { status: u16, message: String },

    /// The search API answered with a body we could not parse
    ParseError {
        message: String,
        content: Option<String>,
    },

    /// The body parsed but did not have the expected shape
    UnexpectedResponse { message: String },

    /// The search API reported a failure inside a successful response
    /// (quota exceeded, invalid key, ...)
    ApiError { message: String },

    /// Timeout errors when a request takes too long
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Unknown label or code for one of the locale tables
    UnknownLocale { table: String, value: String },

    /// Configuration errors (invalid settings, bad TOML, ...)
    ConfigError { message: String },

    /// File I/O errors when reading URL lists or writing exports
    FileError { path: String, message: String },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl IndexCheckError {
    /// Create a new validation error.
    pub fn validation<M: Into<String>>(message: M) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new HTTP status error.
    pub fn http_status<M: Into<String>>(status: u16, message: M) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Create a new response shape error.
    pub fn unexpected_response<M: Into<String>>(message: M) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
        }
    }

    /// Create a new API-reported error.
    pub fn api<M: Into<String>>(message: M) -> Self {
        Self::ApiError {
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new unknown locale error.
    pub fn unknown_locale<T: Into<String>, V: Into<String>>(table: T, value: V) -> Self {
        Self::UnknownLocale {
            table: table.into(),
            value: value.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error belongs to a single URL check rather than to the run.
    pub fn is_per_url(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::HttpStatus { .. }
                | Self::ParseError { .. }
                | Self::UnexpectedResponse { .. }
                | Self::ApiError { .. }
                | Self::Timeout { .. }
        )
    }
}

impl fmt::Display for IndexCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { message } => write!(f, "{}", message),
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::HttpStatus { status, message } => {
                write!(f, "HTTP {}: {}", status, message)
            }
            Self::ParseError { message, content: _ } => {
                write!(f, "Parse error: {}", message)
            }
            Self::UnexpectedResponse { message } => {
                write!(f, "Unexpected response: {}", message)
            }
            Self::ApiError { message } => write!(f, "API error: {}", message),
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::UnknownLocale { table, value } => {
                write!(f, "Unknown {} '{}' (use --list-locales)", table, value)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for IndexCheckError {}

impl From<reqwest::Error> for IndexCheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else if err.is_decode() {
            Self::ParseError {
                message: format!("Failed to decode response: {}", err),
                content: None,
            }
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for IndexCheckError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: format!("JSON parsing failed: {}", err),
            content: None,
        }
    }
}

impl From<csv::Error> for IndexCheckError {
    fn from(err: csv::Error) -> Self {
        Self::Internal {
            message: format!("CSV error: {}", err),
        }
    }
}

impl From<std::io::Error> for IndexCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = IndexCheckError::http_status(401, "Unauthorized");
        assert_eq!(err.to_string(), "HTTP 401: Unauthorized");

        let err = IndexCheckError::validation("Please provide an API key");
        assert_eq!(err.to_string(), "Please provide an API key");

        let err = IndexCheckError::unknown_locale("country", "Atlantis");
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn test_per_url_classification() {
        assert!(IndexCheckError::network("boom").is_per_url());
        assert!(IndexCheckError::api("quota exceeded").is_per_url());
        assert!(IndexCheckError::timeout("search request", Duration::from_secs(1)).is_per_url());
        assert!(!IndexCheckError::validation("no urls").is_per_url());
        assert!(!IndexCheckError::config("bad").is_per_url());
    }
}
