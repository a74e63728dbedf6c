//! Name strings and name/source tables
//!
//! Zone names and source names arrive as text records sharing the frame
//! header:
//!
//! ```text
//! 0x02 0x00 <zone> 0x0D <name, null padded ...>            <trailer> 0x00 <checksum>
//! 0x02 0x00 <zone> 0x0E <name, null padded ...>            <source>  0x00 <checksum>
//! ```
//!
//! A single query answers with one such record; the full status block
//! concatenates them after the zone table. Tables are matched against the
//! raw bytes by record header, so entries that cannot be found are left out
//! rather than failing the whole parse.

use std::collections::HashMap;

use crate::frame::{Opcode, FRAME_HEADER};
use crate::model::{Source, Zone};

/// Offset of the first text byte within a record
pub const STRING_OFFSET: usize = 4;

/// Longest string [`extract_string`] will return
pub const MAX_STRING_LENGTH: usize = 12;

/// Offset of the 0-based source index, counted from the zone byte of a
/// source record header.
///
/// The name field before it is fixed-width, so the index sits at the same
/// place whatever the name length.
pub const SOURCE_INDEX_OFFSET: usize = 13;

const ZONE_BYTE: usize = 2;

/// Read a null-terminated string starting at offset 4.
///
/// Each byte maps to one Latin-1 character. Stops at the first null byte,
/// after [`MAX_STRING_LENGTH`] characters, or at the end of `data`; a
/// missing terminator yields the prefix read so far.
pub fn extract_string(data: &[u8]) -> String {
    data.iter()
        .skip(STRING_OFFSET)
        .take(MAX_STRING_LENGTH)
        .take_while(|b| **b != 0x00)
        .map(|b| char::from(*b))
        .collect()
}

/// Correlate zone names out of a status block.
///
/// Zones without a matching name record are absent from the returned map.
pub fn extract_zone_names(zones: &[Zone], buffer: &[u8]) -> HashMap<u8, String> {
    zones
        .iter()
        .filter_map(|zone| {
            let start = record_starts(buffer, zone.index, Opcode::QueryZoneName).next()?;
            Some((zone.index, extract_string(&buffer[start..])))
        })
        .collect()
}

/// Correlate each zone's source table out of a status block.
///
/// Sources are returned in the order they appear. Records whose index byte
/// falls past the end of the buffer are skipped.
pub fn extract_zone_sources(zones: &[Zone], buffer: &[u8]) -> HashMap<u8, Vec<Source>> {
    let mut sources: HashMap<u8, Vec<Source>> = HashMap::new();

    for zone in zones {
        for start in record_starts(buffer, zone.index, Opcode::QuerySourceName) {
            let index_at = start + ZONE_BYTE + SOURCE_INDEX_OFFSET;
            let Some(raw_index) = buffer.get(index_at) else {
                continue;
            };

            let name: String = buffer[start + STRING_OFFSET..index_at]
                .iter()
                .take_while(|b| **b != 0x00)
                .map(|b| char::from(*b))
                .collect();

            sources
                .entry(zone.index)
                .or_default()
                .push(Source::new(raw_index.wrapping_add(1), name));
        }
    }

    sources
}

/// Positions of every `0x02 0x00 <zone> <opcode>` header in `buffer`
fn record_starts(buffer: &[u8], zone: u8, opcode: Opcode) -> impl Iterator<Item = usize> + '_ {
    let header = [FRAME_HEADER[0], FRAME_HEADER[1], zone, opcode.as_byte()];
    buffer
        .windows(header.len())
        .enumerate()
        .filter(move |(_, window)| window[..] == header[..])
        .map(|(position, _)| position)
}
