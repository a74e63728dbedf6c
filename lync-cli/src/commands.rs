//! Command grammar and dispatch onto [`LyncSystem`]

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Subcommand, ValueEnum};
use lync_sdk::{LyncSystem, Transport, Zone};
use serde::Serialize;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch every zone (`power on|off`) or one zone (`power <zone> on|off|toggle`)
    Power {
        /// Zone index, or `on`/`off` for every zone
        target: PowerTarget,
        /// Required when a zone index is given
        state: Option<Switch>,
    },
    /// Mute a zone
    Mute { zone: u8, state: Switch },
    /// Do-not-disturb for a zone
    Dnd { zone: u8, state: Switch },
    /// Select a zone's input (1-based)
    Input { zone: u8, source: u8 },
    /// Change a zone's volume: `up`, `down`, or an absolute level 0..=60
    Volume {
        zone: u8,
        #[arg(allow_negative_numbers = true)]
        level: VolumeChange,
    },
    /// Read state without changing anything
    Query {
        #[command(subcommand)]
        what: QueryTarget,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTarget {
    /// Full status of every zone, with names and source tables
    Zones,
    /// One zone with its name and selected source name
    Zone { zone: u8 },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
    Toggle,
}

/// First argument of `power`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerTarget {
    AllOn,
    AllOff,
    Zone(u8),
}

impl FromStr for PowerTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "on" => Ok(PowerTarget::AllOn),
            "off" => Ok(PowerTarget::AllOff),
            other => other
                .parse()
                .map(PowerTarget::Zone)
                .map_err(|_| format!("expected a zone index, 'on' or 'off', got '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeChange {
    Up,
    Down,
    Set(i32),
}

impl FromStr for VolumeChange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(VolumeChange::Up),
            "down" => Ok(VolumeChange::Down),
            other => other
                .parse()
                .map(VolumeChange::Set)
                .map_err(|_| format!("expected 'up', 'down' or a volume level, got '{}'", s)),
        }
    }
}

/// What a command printed: one zone or the full status
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
    Zone(Zone),
    Zones(Vec<Zone>),
}

impl Output {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize result")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Power { target, state } => write!(f, "power {:?} {:?}", target, state),
            Command::Mute { zone, state } => write!(f, "mute {} {:?}", zone, state),
            Command::Dnd { zone, state } => write!(f, "dnd {} {:?}", zone, state),
            Command::Input { zone, source } => write!(f, "input {} {}", zone, source),
            Command::Volume { zone, level } => write!(f, "volume {} {:?}", zone, level),
            Command::Query { what } => write!(f, "query {:?}", what),
        }
    }
}

/// Run one command and return what the amplifier reports afterwards
pub fn run<T: Transport>(system: &LyncSystem<T>, command: &Command) -> Result<Output> {
    let output = match *command {
        Command::Power { target, state } => match (target, state) {
            (PowerTarget::AllOn, None) => Output::Zones(system.all_power_on()?),
            (PowerTarget::AllOff, None) => Output::Zones(system.all_power_off()?),
            (PowerTarget::Zone(zone), Some(Switch::On)) => Output::Zone(system.zone_power_on(zone)?),
            (PowerTarget::Zone(zone), Some(Switch::Off)) => Output::Zone(system.zone_power_off(zone)?),
            (PowerTarget::Zone(zone), Some(Switch::Toggle)) => {
                Output::Zone(system.zone_power_toggle(zone)?)
            }
            (PowerTarget::Zone(zone), None) => {
                bail!("power {} needs a state: on, off or toggle", zone)
            }
            (_, Some(_)) => bail!("power on|off applies to every zone and takes no state"),
        },
        Command::Mute { zone, state } => Output::Zone(match state {
            Switch::On => system.zone_mute_on(zone)?,
            Switch::Off => system.zone_mute_off(zone)?,
            Switch::Toggle => system.zone_mute_toggle(zone)?,
        }),
        Command::Dnd { zone, state } => Output::Zone(match state {
            Switch::On => system.zone_dnd_on(zone)?,
            Switch::Off => system.zone_dnd_off(zone)?,
            Switch::Toggle => system.zone_dnd_toggle(zone)?,
        }),
        Command::Input { zone, source } => Output::Zone(system.zone_set_input(zone, source)?),
        Command::Volume { zone, level } => Output::Zone(match level {
            VolumeChange::Up => system.zone_volume_up(zone)?,
            VolumeChange::Down => system.zone_volume_down(zone)?,
            VolumeChange::Set(value) => system.zone_volume_set(zone, value)?,
        }),
        Command::Query { what } => match what {
            QueryTarget::Zones => Output::Zones(system.query_full_status()?),
            QueryTarget::Zone { zone } => Output::Zone(system.query_zone(zone)?),
        },
    };

    Ok(output)
}
