//! Error types for the provider configuration broker
//!
//! Expected failure modes are deliberately *not* errors here: credential
//! validation reports them as [`crate::validate::ValidationResult`] data and
//! compile gate failures surface as `None`. `GateError` covers the remaining
//! cases: malformed inputs, proxy collaborator failures, and I/O performed by
//! the surrounding tooling.

use thiserror::Error;

/// Result type alias for broker operations
pub type GateResult<T> = Result<T, GateError>;

/// Main error type for the broker
#[derive(Error, Debug, Clone)]
pub enum GateError {
    /// Configuration related errors (malformed settings, unknown provider names)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Proxy-lifecycle collaborator errors
    #[error("Proxy error: {message}")]
    Proxy { message: String },

    /// I/O errors from the surrounding tooling
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Serialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl GateError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a proxy error
    pub fn proxy(message: impl Into<String>) -> Self {
        Self::Proxy {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for GateError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_json::Error> for GateError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GateError::config("bad provider name");
        assert_eq!(err.to_string(), "Configuration error: bad provider name");

        let err = GateError::proxy("spawn failed");
        assert_eq!(err.to_string(), "Proxy error: spawn failed");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GateError = io.into();
        assert!(matches!(err, GateError::Io { .. }));
    }
}
