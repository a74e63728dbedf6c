//! Error types for frame decoding

use thiserror::Error;

/// Errors that can occur while decoding a command frame
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame was not exactly [`FRAME_LENGTH`](crate::FRAME_LENGTH) bytes long
    #[error("Invalid frame length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Frame did not start with the `0x02 0x00` header
    #[error("Invalid frame header: {0:02X} {1:02X}")]
    InvalidHeader(u8, u8),

    /// Opcode byte is not one the amplifier understands
    #[error("Unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    /// Trailing checksum byte does not match the frame contents
    #[error("Checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    ChecksumMismatch { expected: u8, actual: u8 },
}

/// Result type alias for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;
