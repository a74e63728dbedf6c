//! # Lync SDK - zone control for the HTD Lync 12
//!
//! A synchronous, per-call API over the amplifier's binary TCP protocol:
//!
//! ```rust,no_run
//! use lync_sdk::{LyncConfig, LyncSystem};
//!
//! fn main() -> Result<(), lync_sdk::SdkError> {
//!     let system = LyncSystem::new(LyncConfig::default().with_host("192.168.1.40"));
//!
//!     let zone = system.zone_volume_set(2, 35)?;   // clamps, powers on, re-queries
//!     let zone = system.zone_mute_toggle(zone.index)?;
//!     println!("{} muted: {}", zone.index, zone.mute);
//!     Ok(())
//! }
//! ```
//!
//! Every operation returns freshly queried state. Nothing is cached between
//! calls and no connection outlives a call.
//!
//! ## Architecture
//!
//! ```text
//! lync-sdk (LyncSystem: power/mute/dnd/input/volume/query)
//!     ↓
//! lync-client (Transport: one TCP connection per frame)
//!     ↓
//! lync-protocol (frames, checksums, zone/name/source decoding)
//! ```

pub use config::{LyncConfig, DEFAULT_VOLUME_STEP};
pub use error::{Result, SdkError};
pub use system::{LyncSystem, QueryOptions};

// Re-export the types callers need without depending on the lower crates
pub use lync_client::{LyncClient, ReceiveMode, Transport, TransportConfig, TransportError};
pub use lync_protocol::{Frame, Source, Zone, ZoneCommand};

pub mod logging;

mod config;
mod error;
mod system;
