use lync_client::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Zone {0} not found in device response")]
    ZoneNotFound(u8),

    #[error("Invalid zone index: {0}")]
    InvalidZone(u8),

    #[error("Invalid input index: {0} (expected 1..={max})", max = lync_protocol::MAX_INPUT)]
    InvalidInput(u8),
}

impl SdkError {
    /// Whether the underlying failure was a connection-level timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, SdkError::Transport(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, SdkError>;
