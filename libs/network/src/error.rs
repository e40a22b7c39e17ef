//! Transport Error Types
//!
//! Connect and write failures are fatal to the run; nothing here is retried.

use std::net::SocketAddr;
use thiserror::Error;

/// Main transport error type
#[derive(Error, Debug)]
pub enum TransportError {
    /// Network I/O errors on an established connection
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Connection establishment errors
    #[error("Connection error: {message} (remote: {remote})")]
    Connection {
        message: String,
        remote: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },

    /// Transport timeout errors
    #[error("Timeout error: {operation} exceeded {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },
}

/// Result type alias for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

impl TransportError {
    /// Create a network error with source
    pub fn network_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a connection error with source
    pub fn connection_with_source(
        message: impl Into<String>,
        remote: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Connection {
            message: message.into(),
            remote: remote.into(),
            source: Some(source),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>, field: Option<&str>) -> Self {
        Self::Configuration {
            message: message.into(),
            field: field.map(|s| s.to_string()),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }
}

/// Resolved peer address, for log fields
pub(crate) fn describe_peer(addr: Option<SocketAddr>, fallback: &str) -> String {
    addr.map(|a| a.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_names_remote() {
        let err = TransportError::connection_with_source(
            "Failed to connect",
            "127.0.0.1:9",
            std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
        );
        assert!(matches!(&err, TransportError::Connection { remote, .. } if remote == "127.0.0.1:9"));
        assert!(err.to_string().contains("127.0.0.1:9"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_timeout_message() {
        let err = TransportError::timeout("TCP connect", 250);
        assert_eq!(err.to_string(), "Timeout error: TCP connect exceeded 250ms");
        assert!(std::error::Error::source(&err).is_none());
    }
}
