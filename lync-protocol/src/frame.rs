//! Outbound command frames
//!
//! Every request sent to the amplifier is a fixed 6-byte frame:
//!
//! ```text
//! 0x02 0x00 <target> <opcode> <operand> <checksum>
//! ```
//!
//! - `target`: zone index, or `0x00` for broadcast-style commands
//! - `opcode`: function family (see [`Opcode`])
//! - `operand`: value or sub-opcode (see [`ZoneCommand`])
//! - `checksum`: 8-bit wrapping sum of the five preceding bytes

use std::fmt;

use crate::error::{ProtocolError, ProtocolResult};

/// Leading bytes of every frame, outbound and inbound.
pub const FRAME_HEADER: [u8; 2] = [0x02, 0x00];

/// Total length of a command frame including the checksum byte.
pub const FRAME_LENGTH: usize = 6;

/// Target byte addressing every zone at once.
pub const BROADCAST_TARGET: u8 = 0x00;

/// Highest input index that still encodes to a `SelectInput` operand.
pub const MAX_INPUT: u8 = 14;

const INPUT_OPERAND_BASE: u8 = 0x0F;

/// Compute the frame checksum: the sum of all bytes modulo 256.
///
/// This is a plain additive checksum, not a CRC.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// Function family selected by the fourth frame byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Zone and system commands; the operand is a [`ZoneCommand`]
    Command = 0x04,
    /// Query every zone record (single-read response)
    QueryZones = 0x05,
    /// Query zones, names and source tables in one block
    QueryFullStatus = 0x0C,
    /// Query a zone's name
    QueryZoneName = 0x0D,
    /// Query the name of one of a zone's sources
    QuerySourceName = 0x0E,
    /// Set a zone's volume; the operand is an encoded volume byte
    SetVolume = 0x15,
}

impl Opcode {
    /// Raw byte value of this opcode
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ProtocolError;

    fn try_from(value: u8) -> ProtocolResult<Self> {
        match value {
            0x04 => Ok(Opcode::Command),
            0x05 => Ok(Opcode::QueryZones),
            0x0C => Ok(Opcode::QueryFullStatus),
            0x0D => Ok(Opcode::QueryZoneName),
            0x0E => Ok(Opcode::QuerySourceName),
            0x15 => Ok(Opcode::SetVolume),
            other => Err(ProtocolError::UnknownOpcode(other)),
        }
    }
}

/// Operand values understood by [`Opcode::Command`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneCommand {
    AllPowerOn,
    AllPowerOff,
    PowerOn,
    PowerOff,
    DndOn,
    DndOff,
    MuteOn,
    MuteOff,
    /// Select a 1-based input for the zone
    SelectInput(u8),
}

impl ZoneCommand {
    /// Operand byte for this command.
    ///
    /// `SelectInput` wraps on overflow; callers validate against [`MAX_INPUT`].
    pub fn operand(self) -> u8 {
        match self {
            ZoneCommand::AllPowerOn => 0x55,
            ZoneCommand::AllPowerOff => 0x56,
            ZoneCommand::PowerOn => 0x57,
            ZoneCommand::PowerOff => 0x58,
            ZoneCommand::DndOn => 0x59,
            ZoneCommand::DndOff => 0x5A,
            ZoneCommand::MuteOn => 0x1E,
            ZoneCommand::MuteOff => 0x1F,
            ZoneCommand::SelectInput(input) => input.wrapping_add(INPUT_OPERAND_BASE),
        }
    }

    /// Interpret a raw operand byte, if it names a known command
    pub fn from_operand(operand: u8) -> Option<Self> {
        match operand {
            0x55 => Some(ZoneCommand::AllPowerOn),
            0x56 => Some(ZoneCommand::AllPowerOff),
            0x57 => Some(ZoneCommand::PowerOn),
            0x58 => Some(ZoneCommand::PowerOff),
            0x59 => Some(ZoneCommand::DndOn),
            0x5A => Some(ZoneCommand::DndOff),
            0x1E => Some(ZoneCommand::MuteOn),
            0x1F => Some(ZoneCommand::MuteOff),
            op if (INPUT_OPERAND_BASE + 1..=INPUT_OPERAND_BASE + MAX_INPUT).contains(&op) => {
                Some(ZoneCommand::SelectInput(op - INPUT_OPERAND_BASE))
            }
            _ => None,
        }
    }
}

/// A single command frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub target: u8,
    pub opcode: Opcode,
    pub operand: u8,
}

impl Frame {
    pub fn new(target: u8, opcode: Opcode, operand: u8) -> Self {
        Self {
            target,
            opcode,
            operand,
        }
    }

    /// A zone or system command (`opcode 0x04`)
    pub fn command(target: u8, command: ZoneCommand) -> Self {
        Self::new(target, Opcode::Command, command.operand())
    }

    /// Query every zone record in one single-read response
    pub fn query_zones() -> Self {
        Self::new(BROADCAST_TARGET, Opcode::QueryZones, 0x07)
    }

    /// Query the full status block (zones, names, and source tables)
    pub fn query_full_status() -> Self {
        Self::new(0x01, Opcode::QueryFullStatus, 0x00)
    }

    pub fn query_zone_name(zone: u8) -> Self {
        Self::new(zone, Opcode::QueryZoneName, 0x00)
    }

    /// Query the name of a 1-based source; the wire operand is 0-based
    pub fn query_source_name(zone: u8, source: u8) -> Self {
        Self::new(zone, Opcode::QuerySourceName, source.saturating_sub(1))
    }

    /// Set volume with an already encoded volume byte
    pub fn set_volume(zone: u8, encoded_volume: u8) -> Self {
        Self::new(zone, Opcode::SetVolume, encoded_volume)
    }

    /// Serialize to the 6-byte wire format, checksum included
    pub fn to_bytes(&self) -> [u8; FRAME_LENGTH] {
        let payload = [
            FRAME_HEADER[0],
            FRAME_HEADER[1],
            self.target,
            self.opcode.as_byte(),
            self.operand,
        ];
        let mut bytes = [0u8; FRAME_LENGTH];
        bytes[..5].copy_from_slice(&payload);
        bytes[5] = checksum(&payload);
        bytes
    }

    /// Parse and validate a 6-byte command frame
    pub fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        if bytes.len() != FRAME_LENGTH {
            return Err(ProtocolError::InvalidLength {
                expected: FRAME_LENGTH,
                actual: bytes.len(),
            });
        }

        if bytes[..2] != FRAME_HEADER {
            return Err(ProtocolError::InvalidHeader(bytes[0], bytes[1]));
        }

        let expected = checksum(&bytes[..5]);
        if bytes[5] != expected {
            return Err(ProtocolError::ChecksumMismatch {
                expected,
                actual: bytes[5],
            });
        }

        Ok(Self {
            target: bytes[2],
            opcode: Opcode::try_from(bytes[3])?,
            operand: bytes[4],
        })
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&HexBytes(&self.to_bytes()), f)
    }
}

/// Displays a byte slice as space-separated upper-case hex pairs
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

/// Build a command frame from its parts.
///
/// No range validation happens here; callers clamp operands.
pub fn build_command(target: u8, opcode: Opcode, operand: u8) -> [u8; FRAME_LENGTH] {
    Frame::new(target, opcode, operand).to_bytes()
}
