//! # lync-protocol
//!
//! Frame codec and response parsing for the HTD Lync 12 multi-zone amplifier.
//! This crate does no I/O: it turns commands into 6-byte frames and raw
//! response bytes into [`Zone`] and [`Source`] snapshots.
//!
//! ## Usage
//!
//! ```rust
//! use lync_protocol::{Frame, ZoneCommand};
//!
//! let frame = Frame::command(3, ZoneCommand::PowerOn);
//! assert_eq!(frame.to_bytes(), [0x02, 0x00, 0x03, 0x04, 0x57, 0x60]);
//! ```
//!
//! ```rust
//! use lync_protocol::{parse_zone_table, ZoneSelection, ZoneTable};
//!
//! let record = [0x02, 0x00, 0x02, 0x05, 0x01, 0, 0, 0, 0x00, 0xD8, 0, 0, 0, 0xE2];
//! if let ZoneTable::Single(Some(zone)) = parse_zone_table(&record, ZoneSelection::Single(2)) {
//!     assert!(zone.power);
//!     assert_eq!(zone.volume, 20);
//! }
//! ```

pub mod error;
pub mod frame;
pub mod model;
pub mod tables;
pub mod volume;
pub mod zone;

#[cfg(any(test, feature = "test-support"))]
pub mod fixtures;

// Re-export the codec surface for convenient top-level access
pub use error::{ProtocolError, ProtocolResult};
pub use frame::{
    build_command, checksum, Frame, HexBytes, Opcode, ZoneCommand, BROADCAST_TARGET, FRAME_LENGTH,
    MAX_INPUT,
};
pub use model::{Source, Zone};
pub use tables::{extract_string, extract_zone_names, extract_zone_sources};
pub use volume::{clamp_volume, decode_volume, encode_volume, VOLUME_MAX, VOLUME_MIN};
pub use zone::{
    extract_zone, extract_zone_at, extract_zones, parse_zone_table, ZoneSelection, ZoneTable,
    ZONE_RECORD_LENGTH,
};
