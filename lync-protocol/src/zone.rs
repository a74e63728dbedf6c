//! Fixed-width zone record parsing
//!
//! A zone record is 14 bytes:
//!
//! ```text
//! 0x02 0x00 <zone> 0x05 <flags> .. .. .. <source> <volume> .. .. .. <checksum>
//! ```
//!
//! `flags` carries power, mute and dnd in bits 0, 1 and 2. `source` is
//! 0-based on the wire. `volume` uses the offset encoding in [`crate::volume`].
//!
//! The amplifier answers different queries with differently shaped blocks of
//! these records, so the caller states which shape it asked for through
//! [`ZoneSelection`] instead of the parser guessing from content.

use crate::model::Zone;
use crate::volume::decode_volume;

/// Length of a single zone record
pub const ZONE_RECORD_LENGTH: usize = 14;

/// Byte at offset 3 identifying a zone record
pub const ZONE_RECORD_MARKER: u8 = 0x05;

const POWER_BIT: u8 = 0b0000_0001;
const MUTE_BIT: u8 = 0b0000_0010;
const DND_BIT: u8 = 0b0000_0100;

/// Which part of a zone block the caller wants decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSelection {
    /// Every consecutive record after the echo record
    All,
    /// Exactly the record in the slot for this zone index
    Single(u8),
}

/// Result of decoding a zone block, shaped by the [`ZoneSelection`] used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneTable {
    All(Vec<Zone>),
    Single(Option<Zone>),
}

impl ZoneTable {
    /// Flatten into a list regardless of the selection used
    pub fn into_zones(self) -> Vec<Zone> {
        match self {
            ZoneTable::All(zones) => zones,
            ZoneTable::Single(zone) => zone.into_iter().collect(),
        }
    }
}

/// Decode one zone record.
///
/// Returns `None` when the record is too short or does not carry the zone
/// marker; full-table parsing uses that as its stop condition.
pub fn extract_zone(record: &[u8]) -> Option<Zone> {
    if record.len() < ZONE_RECORD_LENGTH || record[3] != ZONE_RECORD_MARKER {
        return None;
    }

    let flags = record[4];
    Some(Zone {
        index: record[2],
        source: record[8].wrapping_add(1),
        volume: decode_volume(record[9]),
        power: flags & POWER_BIT != 0,
        mute: flags & MUTE_BIT != 0,
        dnd: flags & DND_BIT != 0,
        ..Default::default()
    })
}

/// Decode a zone block according to `selection`
pub fn parse_zone_table(buffer: &[u8], selection: ZoneSelection) -> ZoneTable {
    let start = table_offset(buffer.len(), selection);

    match selection {
        ZoneSelection::Single(_) => {
            let zone = buffer
                .get(start..start + ZONE_RECORD_LENGTH)
                .and_then(extract_zone);
            ZoneTable::Single(zone)
        }
        ZoneSelection::All => {
            let zones = buffer
                .get(start..)
                .unwrap_or_default()
                .chunks_exact(ZONE_RECORD_LENGTH)
                .map_while(extract_zone)
                .collect();
            ZoneTable::All(zones)
        }
    }
}

/// Decode every zone record of a full-table block
pub fn extract_zones(buffer: &[u8]) -> Vec<Zone> {
    parse_zone_table(buffer, ZoneSelection::All).into_zones()
}

/// Decode the record in the slot for `index`
pub fn extract_zone_at(buffer: &[u8], index: u8) -> Option<Zone> {
    match parse_zone_table(buffer, ZoneSelection::Single(index)) {
        ZoneTable::Single(zone) => zone,
        ZoneTable::All(_) => None,
    }
}

/// A buffer holding exactly one record always starts at offset 0
fn table_offset(len: usize, selection: ZoneSelection) -> usize {
    if len == ZONE_RECORD_LENGTH {
        return 0;
    }
    match selection {
        ZoneSelection::All => ZONE_RECORD_LENGTH,
        ZoneSelection::Single(index) => index as usize * ZONE_RECORD_LENGTH,
    }
}
