//! Error types for the TCP transport

use std::net::SocketAddr;

use thiserror::Error;

/// Errors that can occur while exchanging a frame with the amplifier
///
/// Errors during the read phase are not represented here: a failed or
/// interrupted read yields whatever bytes were collected instead.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Host name could not be resolved to a socket address
    #[error("Could not resolve {host}: {reason}")]
    Resolve { host: String, reason: String },

    /// The device did not accept the connection within the timeout
    #[error("Timed out connecting to {addr}")]
    ConnectTimeout { addr: SocketAddr },

    /// The connection was refused or failed outright
    #[error("Connection to {addr} failed: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The device stopped accepting data within the timeout
    #[error("Timed out sending to {addr}")]
    WriteTimeout { addr: SocketAddr },

    /// Writing the frame failed
    #[error("Sending to {addr} failed: {source}")]
    Write {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    /// Whether this error came from the connection-level timeout
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            TransportError::ConnectTimeout { .. } | TransportError::WriteTimeout { .. }
        )
    }
}

/// Whether an I/O error is the platform's way of reporting a timeout
pub(crate) fn is_timeout_kind(error: &std::io::Error) -> bool {
    matches!(
        error.kind(),
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
    )
}
