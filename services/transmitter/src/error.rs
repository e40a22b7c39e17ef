//! Transmitter errors
//!
//! Every variant ends the run. Deliberately malformed messages are fuzz
//! inputs, not errors, and never appear here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransmitterError {
    /// Configuration or scripted test cases could not be loaded
    #[error(transparent)]
    Config(#[from] transmitter_config::ConfigError),

    /// Connect, write or read failed
    #[error(transparent)]
    Transport(#[from] network::TransportError),

    /// Message construction failed
    #[error(transparent)]
    Protocol(#[from] codec::ProtocolError),
}

pub type Result<T> = std::result::Result<T, TransmitterError>;
