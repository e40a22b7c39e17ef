//! Transport Layer
//!
//! The transmitter opens a fresh connection for every message: connect,
//! write one frame, read one bounded response, close. There is no pooling
//! and no reuse between messages.

use async_trait::async_trait;

pub mod tcp;


pub use tcp::{TcpClientConfig, TcpTransport};

/// Outcome of one connect/write/read/close cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Peer the message went to
    pub peer: String,
    pub bytes_sent: usize,
    /// Raw response bytes, at most the configured limit; empty if the peer
    /// closed or stayed silent
    pub response: Vec<u8>,
}

/// One-shot request transport
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver `message` on a new connection and read back a bounded response
    async fn exchange(&self, message: &[u8]) -> crate::Result<Exchange>;

    /// Human-readable destination for logs
    fn destination(&self) -> String;
}
