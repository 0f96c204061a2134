//! Domain error types
//!
//! This module defines the error hierarchy for cloudenv. All errors are
//! domain-specific and don't expose third-party types such as the HTTP
//! client's error type.

use thiserror::Error;

/// Main cloudenv error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CloudEnvError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Config server errors
    #[error("Config server error: {0}")]
    Server(#[from] ServerError),

    /// A placeholder references a key that is absent from the merged map
    /// and carries no default literal
    #[error("value for property ${{{key}}} can't be found (in \"{value}\")")]
    UnresolvedReference {
        /// The referenced key that could not be found
        key: String,
        /// The raw value containing the reference
        value: String,
    },

    /// Placeholder expansion did not terminate within the step bound
    #[error("reference cycle detected while expanding \"{key}\" (value \"{value}\")")]
    CycleDetected {
        /// The property whose expansion did not terminate
        key: String,
        /// The raw value that triggered the cycle
        value: String,
    },

    /// A property source contains a value the flattener cannot coerce
    #[error("property \"{key}\" has a value that can't be converted to a string")]
    UnsupportedScalar {
        /// The dot-joined path of the offending value
        key: String,
    },

    /// A caller-supplied key or value transform failed
    #[error("formatting of property \"{key}\" failed: {message}")]
    Formatting {
        /// The property being formatted
        key: String,
        /// What went wrong
        message: String,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Config server-specific errors
///
/// Errors that occur when talking to the Spring Cloud Config server.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to connect to the config server
    #[error("Failed to connect to config server: {0}")]
    ConnectionFailed(String),

    /// The server rejected the supplied credentials
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The requested environment or file does not exist on the server
    #[error("Not found on config server: {0}")]
    NotFound(String),

    /// Unexpected HTTP status
    #[error("Config server returned status {status}: {message}")]
    Status {
        /// The HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The response body could not be decoded as an environment document
    #[error("Invalid response from config server: {0}")]
    InvalidResponse(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for CloudEnvError {
    fn from(err: std::io::Error) -> Self {
        CloudEnvError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CloudEnvError {
    fn from(err: serde_json::Error) -> Self {
        CloudEnvError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CloudEnvError {
    fn from(err: toml::de::Error) -> Self {
        CloudEnvError::Configuration(format!("TOML parse error: {err}"))
    }
}
