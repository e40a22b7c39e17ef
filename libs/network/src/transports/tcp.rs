//! TCP Transport Implementation
//!
//! Client-side TCP for delivering frames to the receiver under test. Each
//! call to [`Transport::exchange`] owns its own `TcpStream` from connect to
//! shutdown.

use crate::error::describe_peer;
use crate::{Result, TransportError, DEFAULT_CONNECTION_TIMEOUT_SECS, DEFAULT_RESPONSE_LIMIT};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use super::{Exchange, Transport};

/// TCP client configuration
#[derive(Debug, Clone)]
pub struct TcpClientConfig {
    /// Receiver address as `host:port`
    pub remote_address: String,
    /// Bound on connecting and on waiting for a response
    pub connect_timeout: Duration,
    /// Maximum response bytes read per message
    pub response_limit: usize,
}

impl TcpClientConfig {
    pub fn new(remote_address: impl Into<String>) -> Self {
        Self {
            remote_address: remote_address.into(),
            ..Default::default()
        }
    }
}

impl Default for TcpClientConfig {
    fn default() -> Self {
        Self {
            remote_address: String::new(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECTION_TIMEOUT_SECS),
            response_limit: DEFAULT_RESPONSE_LIMIT,
        }
    }
}

/// Connection-per-message TCP transport
#[derive(Debug, Clone)]
pub struct TcpTransport {
    config: TcpClientConfig,
}

impl TcpTransport {
    /// Create from configuration
    pub fn from_config(config: TcpClientConfig) -> Result<Self> {
        if config.remote_address.is_empty() {
            return Err(TransportError::configuration(
                "No remote address configured",
                Some("remote_address"),
            ));
        }
        if config.response_limit == 0 {
            return Err(TransportError::configuration(
                "Response limit must be non-zero",
                Some("response_limit"),
            ));
        }
        Ok(Self { config })
    }

    async fn connect(&self) -> Result<TcpStream> {
        let remote = &self.config.remote_address;
        let stream = tokio::time::timeout(self.config.connect_timeout, TcpStream::connect(remote))
            .await
            .map_err(|_| {
                TransportError::timeout("TCP connect", self.config.connect_timeout.as_millis() as u64)
            })?
            .map_err(|e| {
                TransportError::connection_with_source("Failed to connect to receiver", remote, e)
            })?;

        if let Err(e) = stream.set_nodelay(true) {
            warn!("Failed to set TCP_NODELAY: {}", e);
        }
        Ok(stream)
    }

    /// Read one chunk of response; silence until the timeout is not an error
    async fn read_response(&self, stream: &mut TcpStream, peer: &str) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; self.config.response_limit];
        let received =
            match tokio::time::timeout(self.config.connect_timeout, stream.read(&mut buffer)).await {
                Ok(Ok(n)) => n,
                Ok(Err(e)) => {
                    return Err(TransportError::network_with_source(
                        "Failed to read response",
                        e,
                    ))
                }
                Err(_) => {
                    debug!(peer = %peer, "No response before timeout");
                    0
                }
            };
        buffer.truncate(received);
        Ok(buffer)
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn exchange(&self, message: &[u8]) -> Result<Exchange> {
        debug!(
            remote = %self.config.remote_address,
            "Trying to send: {}",
            String::from_utf8_lossy(message).escape_debug()
        );

        let mut stream = self.connect().await?;
        let peer = describe_peer(stream.peer_addr().ok(), &self.config.remote_address);

        stream
            .write_all(message)
            .await
            .map_err(|e| TransportError::network_with_source("Failed to write message", e))?;
        stream
            .flush()
            .await
            .map_err(|e| TransportError::network_with_source("Failed to flush TCP stream", e))?;

        let response = self.read_response(&mut stream, &peer).await?;
        debug!(
            peer = %peer,
            bytes = response.len(),
            "Received from server: {}",
            String::from_utf8_lossy(&response).escape_debug()
        );

        if let Err(e) = stream.shutdown().await {
            warn!("Error shutting down TCP connection: {}", e);
        }

        Ok(Exchange {
            peer,
            bytes_sent: message.len(),
            response,
        })
    }

    fn destination(&self) -> String {
        self.config.remote_address.clone()
    }
}
