//! TCP transport for the HTD Lync 12 amplifier
//!
//! Every exchange opens a fresh connection, writes one 6-byte frame, reads
//! the reply with the requested [`ReceiveMode`] and closes the connection.
//! The device sends no framing for its replies, so the drain mode simply
//! waits for the line to go quiet.

mod config;
mod error;
mod receive;

pub use config::{
    DrainTiming, TransportConfig, DEFAULT_HOST, DEFAULT_POLL_INTERVAL, DEFAULT_PORT,
    DEFAULT_TIMEOUT,
};
pub use error::TransportError;
pub use receive::{drain_until_idle, read_single};

use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use lync_protocol::{Frame, HexBytes};
use tracing::{debug, trace};

use crate::error::is_timeout_kind;

/// How the response to a frame is collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiveMode {
    /// One read of up to `read_buffer_size` bytes
    Single,
    /// Non-blocking reads until the device has been quiet for one timeout
    DrainUntilIdle,
}

/// Something that can deliver a frame to the amplifier and return the reply
///
/// Implemented by [`LyncClient`] for real devices; tests substitute an
/// in-memory amplifier.
pub trait Transport {
    /// Send one frame and return every byte received for it.
    ///
    /// An empty vector means the device sent nothing back in time.
    fn send(&self, frame: &Frame, mode: ReceiveMode) -> Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, frame: &Frame, mode: ReceiveMode) -> Result<Vec<u8>, TransportError> {
        (**self).send(frame, mode)
    }
}

/// Connection-per-call client for a single amplifier
#[derive(Debug, Clone)]
pub struct LyncClient {
    config: TransportConfig,
}

impl LyncClient {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn resolve(&self) -> Result<SocketAddr, TransportError> {
        let host = self.config.host.as_str();
        let mut addrs = (host, self.config.port)
            .to_socket_addrs()
            .map_err(|e| TransportError::Resolve {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        addrs.next().ok_or_else(|| TransportError::Resolve {
            host: host.to_string(),
            reason: "no addresses returned".to_string(),
        })
    }

    fn connect(&self, addr: SocketAddr) -> Result<TcpStream, TransportError> {
        let stream = TcpStream::connect_timeout(&addr, self.config.timeout).map_err(|e| {
            if is_timeout_kind(&e) {
                TransportError::ConnectTimeout { addr }
            } else {
                TransportError::Connect { addr, source: e }
            }
        })?;

        let timeout = Some(self.config.timeout);
        stream
            .set_read_timeout(timeout)
            .and_then(|_| stream.set_write_timeout(timeout))
            .map_err(|e| TransportError::Connect { addr, source: e })?;

        Ok(stream)
    }
}

impl Default for LyncClient {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl Transport for LyncClient {
    fn send(&self, frame: &Frame, mode: ReceiveMode) -> Result<Vec<u8>, TransportError> {
        let addr = self.resolve()?;
        let mut stream = self.connect(addr)?;

        let bytes = frame.to_bytes();
        debug!(%addr, frame = %HexBytes(&bytes), ?mode, "Sending frame");

        stream.write_all(&bytes).map_err(|e| {
            if is_timeout_kind(&e) {
                TransportError::WriteTimeout { addr }
            } else {
                TransportError::Write { addr, source: e }
            }
        })?;

        let response = match mode {
            ReceiveMode::Single => read_single(&mut stream, self.config.read_buffer_size),
            ReceiveMode::DrainUntilIdle => {
                if let Err(e) = stream.set_nonblocking(true) {
                    debug!(error = %e, "Could not switch socket to non-blocking, relying on read timeout");
                }
                drain_until_idle(&mut stream, &self.config.drain_timing())
            }
        };

        debug!(%addr, bytes = response.len(), "Received response");
        trace!(response = %HexBytes(&response), "Response bytes");

        Ok(response)
    }
}
