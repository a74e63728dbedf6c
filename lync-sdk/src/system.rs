//! LyncSystem - main entry point for the SDK
//!
//! Every operation is synchronous and self-contained: it opens its own
//! connection(s), and mutations always finish with a fresh query so the
//! returned [`Zone`] reflects what the amplifier reports afterwards.

use lync_client::{LyncClient, ReceiveMode, Transport};
use lync_protocol::{
    clamp_volume, encode_volume, extract_string, extract_zone_names, extract_zone_sources,
    parse_zone_table, Frame, ZoneCommand, ZoneSelection, ZoneTable, BROADCAST_TARGET, MAX_INPUT,
};
use tracing::{debug, info};

use crate::config::LyncConfig;
use crate::error::{Result, SdkError};
use crate::Zone;

/// Which follow-up round trips a single-zone query makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    /// Also fetch the zone name
    pub name: bool,
    /// Also fetch the name of the selected source
    pub source_name: bool,
}

impl QueryOptions {
    /// Zone name and source name
    pub const FULL: Self = Self {
        name: true,
        source_name: true,
    };

    /// State only, one round trip
    pub const STATE_ONLY: Self = Self {
        name: false,
        source_name: false,
    };
}

/// Control surface for one amplifier
///
/// # Example
///
/// ```rust,no_run
/// use lync_sdk::{LyncConfig, LyncSystem};
///
/// fn main() -> Result<(), lync_sdk::SdkError> {
///     let system = LyncSystem::new(LyncConfig::from_env());
///
///     let zone = system.zone_power_on(3)?;
///     assert!(zone.power);
///
///     for zone in system.query_full_status()? {
///         println!("{}: {:?} at {}", zone.index, zone.name, zone.volume);
///     }
///     Ok(())
/// }
/// ```
///
/// Toggles and relative volume changes read the zone, then write it, over
/// two separate connections. Another controller changing the zone in
/// between wins or loses arbitrarily; the device offers no compare-and-set.
#[derive(Debug, Clone)]
pub struct LyncSystem<T: Transport = LyncClient> {
    transport: T,
    config: LyncConfig,
}

impl LyncSystem<LyncClient> {
    /// Create a system talking TCP to the configured amplifier
    pub fn new(config: LyncConfig) -> Self {
        let client = LyncClient::new(config.transport());
        Self::with_transport(client, config)
    }
}

impl<T: Transport> LyncSystem<T> {
    /// Create a system on top of any transport
    pub fn with_transport(transport: T, config: LyncConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &LyncConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Every zone with its name, source table and selected source name
    pub fn query_full_status(&self) -> Result<Vec<Zone>> {
        let data = self.exchange(Frame::query_full_status(), ReceiveMode::DrainUntilIdle)?;

        let mut zones = match parse_zone_table(&data, ZoneSelection::All) {
            ZoneTable::All(zones) => zones,
            ZoneTable::Single(zone) => zone.into_iter().collect(),
        };
        let mut names = extract_zone_names(&zones, &data);
        let mut sources = extract_zone_sources(&zones, &data);

        for zone in &mut zones {
            zone.name = names.remove(&zone.index);
            zone.sources = sources.remove(&zone.index).unwrap_or_default();
            zone.source_name = zone.source_by_index(zone.source).map(|s| s.name.clone());
            if zone.name.is_none() {
                debug!(zone = zone.index, "No name record for zone in status block");
            }
        }

        debug!(zones = zones.len(), bytes = data.len(), "Decoded full status");
        Ok(zones)
    }

    /// One zone with its name and selected source name
    pub fn query_zone(&self, zone: u8) -> Result<Zone> {
        self.query_zone_with(zone, QueryOptions::FULL)
    }

    /// One zone, fetching only the names asked for in `options`
    pub fn query_zone_with(&self, zone: u8, options: QueryOptions) -> Result<Zone> {
        validate_zone(zone)?;
        let data = self.exchange(Frame::query_zones(), ReceiveMode::Single)?;

        let mut found = match parse_zone_table(&data, ZoneSelection::Single(zone)) {
            ZoneTable::Single(found) => found,
            ZoneTable::All(_) => None,
        }
        .ok_or(SdkError::ZoneNotFound(zone))?;

        // An empty reply leaves the name unset rather than blank
        if options.name {
            found.name = Some(self.query_zone_name(found.index)?).filter(|n| !n.is_empty());
        }
        if options.source_name {
            found.source_name = Some(self.query_zone_source_name(found.index, found.source)?)
                .filter(|n| !n.is_empty());
        }

        Ok(found)
    }

    pub fn query_zone_name(&self, zone: u8) -> Result<String> {
        validate_zone(zone)?;
        let data = self.exchange(Frame::query_zone_name(zone), ReceiveMode::Single)?;
        Ok(extract_string(&data))
    }

    /// Name of a zone's 1-based source
    pub fn query_zone_source_name(&self, zone: u8, source: u8) -> Result<String> {
        validate_zone(zone)?;
        let data = self.exchange(Frame::query_source_name(zone, source), ReceiveMode::Single)?;
        Ok(extract_string(&data))
    }

    // ========================================================================
    // Power, mute and do-not-disturb
    // ========================================================================

    pub fn zone_power_on(&self, zone: u8) -> Result<Zone> {
        self.zone_command(zone, ZoneCommand::PowerOn)
    }

    pub fn zone_power_off(&self, zone: u8) -> Result<Zone> {
        self.zone_command(zone, ZoneCommand::PowerOff)
    }

    pub fn zone_power_toggle(&self, zone: u8) -> Result<Zone> {
        let current = self.query_zone_with(zone, QueryOptions::STATE_ONLY)?;
        if current.power {
            self.zone_power_off(zone)
        } else {
            self.zone_power_on(zone)
        }
    }

    pub fn zone_mute_on(&self, zone: u8) -> Result<Zone> {
        self.zone_command(zone, ZoneCommand::MuteOn)
    }

    pub fn zone_mute_off(&self, zone: u8) -> Result<Zone> {
        self.zone_command(zone, ZoneCommand::MuteOff)
    }

    pub fn zone_mute_toggle(&self, zone: u8) -> Result<Zone> {
        let current = self.query_zone_with(zone, QueryOptions::STATE_ONLY)?;
        if current.mute {
            self.zone_mute_off(zone)
        } else {
            self.zone_mute_on(zone)
        }
    }

    pub fn zone_dnd_on(&self, zone: u8) -> Result<Zone> {
        self.zone_command(zone, ZoneCommand::DndOn)
    }

    pub fn zone_dnd_off(&self, zone: u8) -> Result<Zone> {
        self.zone_command(zone, ZoneCommand::DndOff)
    }

    pub fn zone_dnd_toggle(&self, zone: u8) -> Result<Zone> {
        let current = self.query_zone_with(zone, QueryOptions::STATE_ONLY)?;
        if current.dnd {
            self.zone_dnd_off(zone)
        } else {
            self.zone_dnd_on(zone)
        }
    }

    /// Power every zone on and return the full status
    pub fn all_power_on(&self) -> Result<Vec<Zone>> {
        self.system_command(ZoneCommand::AllPowerOn)
    }

    /// Power every zone off and return the full status
    pub fn all_power_off(&self) -> Result<Vec<Zone>> {
        self.system_command(ZoneCommand::AllPowerOff)
    }

    // ========================================================================
    // Input and volume
    // ========================================================================

    /// Select the 1-based input for a zone
    pub fn zone_set_input(&self, zone: u8, input: u8) -> Result<Zone> {
        if !(1..=MAX_INPUT).contains(&input) {
            return Err(SdkError::InvalidInput(input));
        }
        self.zone_command(zone, ZoneCommand::SelectInput(input))
    }

    /// Set an absolute volume.
    ///
    /// The value is clamped to the configured bounds. Setting a volume also
    /// powers the zone on.
    pub fn zone_volume_set(&self, zone: u8, value: i32) -> Result<Zone> {
        validate_zone(zone)?;
        let volume = clamp_volume(value)
            .max(self.config.volume_min)
            .min(self.config.volume_max);
        if i32::from(volume) != value {
            debug!(zone, requested = value, volume, "Clamped volume");
        }

        info!(zone, volume, "Setting volume");
        self.exchange(Frame::set_volume(zone, encode_volume(volume)), ReceiveMode::Single)?;
        self.exchange(Frame::command(zone, ZoneCommand::PowerOn), ReceiveMode::Single)?;

        self.query_zone(zone)
    }

    /// Raise the volume by the configured step
    pub fn zone_volume_up(&self, zone: u8) -> Result<Zone> {
        self.zone_volume_step(zone, i32::from(self.config.volume_step))
    }

    /// Lower the volume by the configured step
    pub fn zone_volume_down(&self, zone: u8) -> Result<Zone> {
        self.zone_volume_step(zone, -i32::from(self.config.volume_step))
    }

    fn zone_volume_step(&self, zone: u8, delta: i32) -> Result<Zone> {
        let current = self.query_zone_with(zone, QueryOptions::STATE_ONLY)?;
        self.zone_volume_set(zone, i32::from(current.volume) + delta)
    }

    // ========================================================================
    // Plumbing
    // ========================================================================

    /// Send a per-zone command, discard the acknowledgement, re-query the zone
    fn zone_command(&self, zone: u8, command: ZoneCommand) -> Result<Zone> {
        validate_zone(zone)?;
        info!(zone, ?command, "Sending zone command");
        self.exchange(Frame::command(zone, command), ReceiveMode::Single)?;
        self.query_zone(zone)
    }

    fn system_command(&self, command: ZoneCommand) -> Result<Vec<Zone>> {
        info!(?command, "Sending system command");
        self.exchange(Frame::command(BROADCAST_TARGET, command), ReceiveMode::Single)?;
        self.query_full_status()
    }

    fn exchange(&self, frame: Frame, mode: ReceiveMode) -> Result<Vec<u8>> {
        let data = self.transport.send(&frame, mode)?;
        if data.is_empty() {
            debug!(%frame, "Empty response");
        }
        Ok(data)
    }
}

fn validate_zone(zone: u8) -> Result<()> {
    if zone == 0 {
        return Err(SdkError::InvalidZone(zone));
    }
    Ok(())
}
