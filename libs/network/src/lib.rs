//! Network Infrastructure
//!
//! Client-side transport for the SIA transmitter: one TCP connection per
//! message, bounded response reads, and typed transport errors.

pub mod error;
pub mod transports;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use transports::{Exchange, TcpClientConfig, TcpTransport, Transport};

// Constants for configuration
pub const DEFAULT_RESPONSE_LIMIT: usize = 100;
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 5;
