//! Builders for synthetic amplifier responses
//!
//! Available to this crate's tests and, through the `test-support` feature,
//! to downstream crates that need to stand in for a real device.

use crate::frame::{checksum, Opcode, FRAME_HEADER};
use crate::volume::encode_volume;
use crate::zone::{ZONE_RECORD_LENGTH, ZONE_RECORD_MARKER};

/// Length of a name or source-name record
pub const TEXT_RECORD_LENGTH: usize = 18;

/// Width of the text field inside a name record
pub const TEXT_FIELD_LENGTH: usize = 11;

/// Zone state to encode as a 14-byte record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneRecord {
    pub zone: u8,
    pub power: bool,
    pub mute: bool,
    pub dnd: bool,
    /// 1-based selected source
    pub source: u8,
    pub volume: u8,
}

impl ZoneRecord {
    pub fn new(zone: u8) -> Self {
        Self {
            zone,
            source: 1,
            ..Default::default()
        }
    }

    pub fn to_bytes(&self) -> [u8; ZONE_RECORD_LENGTH] {
        let mut record = [0u8; ZONE_RECORD_LENGTH];
        record[..2].copy_from_slice(&FRAME_HEADER);
        record[2] = self.zone;
        record[3] = ZONE_RECORD_MARKER;
        record[4] = (self.power as u8) | (self.mute as u8) << 1 | (self.dnd as u8) << 2;
        record[8] = self.source.saturating_sub(1);
        record[9] = encode_volume(self.volume);
        record[13] = checksum(&record[..13]);
        record
    }
}

/// The leading record the amplifier echoes before a zone table
pub fn echo_record() -> [u8; ZONE_RECORD_LENGTH] {
    let mut record = [0u8; ZONE_RECORD_LENGTH];
    record[..2].copy_from_slice(&FRAME_HEADER);
    record[4] = 0x07;
    record[13] = checksum(&record[..13]);
    record
}

/// An 18-byte text record: header, null-padded text field, trailer byte, checksum
pub fn text_record(zone: u8, opcode: Opcode, text: &str, trailer: u8) -> [u8; TEXT_RECORD_LENGTH] {
    let mut record = [0u8; TEXT_RECORD_LENGTH];
    record[..2].copy_from_slice(&FRAME_HEADER);
    record[2] = zone;
    record[3] = opcode.as_byte();
    for (slot, byte) in record[4..4 + TEXT_FIELD_LENGTH].iter_mut().zip(text.bytes()) {
        *slot = byte;
    }
    record[15] = trailer;
    record[17] = checksum(&record[..17]);
    record
}

/// A zone-name record as found in query responses and status blocks
pub fn name_record(zone: u8, name: &str) -> [u8; TEXT_RECORD_LENGTH] {
    text_record(zone, Opcode::QueryZoneName, name, zone)
}

/// A source-name record; `source` is 1-based and stored 0-based
pub fn source_record(zone: u8, source: u8, name: &str) -> [u8; TEXT_RECORD_LENGTH] {
    text_record(zone, Opcode::QuerySourceName, name, source.saturating_sub(1))
}

/// A full status block: echo, zone table, then name and source tables
pub fn status_block(zones: &[ZoneRecord], names: &[(u8, &str)], sources: &[(u8, u8, &str)]) -> Vec<u8> {
    let mut block = echo_record().to_vec();
    for zone in zones {
        block.extend_from_slice(&zone.to_bytes());
    }
    for (zone, name) in names {
        block.extend_from_slice(&name_record(*zone, name));
    }
    for (zone, source, name) in sources {
        block.extend_from_slice(&source_record(*zone, *source, name));
    }
    block
}
