//! In-memory amplifier used as a [`Transport`] stand-in
//!
//! Holds per-zone state, applies commands the way the device does and
//! answers queries with byte-accurate responses built from the
//! `lync_protocol::fixtures` builders. Every frame received is logged so
//! tests can assert on the exact wire traffic.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use lync_protocol::fixtures::{echo_record, name_record, source_record, status_block, ZoneRecord};
use lync_protocol::{Frame, Opcode, ZoneCommand};
use lync_sdk::{ReceiveMode, Transport, TransportError};

#[derive(Debug, Default)]
struct DeviceState {
    zones: BTreeMap<u8, ZoneRecord>,
    names: BTreeMap<u8, String>,
    /// zone -> [(1-based source, name)]
    sources: BTreeMap<u8, Vec<(u8, String)>>,
    received: Vec<([u8; 6], ReceiveMode)>,
}

#[derive(Debug, Default)]
pub struct FakeAmplifier {
    state: RefCell<DeviceState>,
}

impl FakeAmplifier {
    /// Zones `1..=count`, all off, source 1, volume 0
    pub fn with_zones(count: u8) -> Self {
        let amp = Self::default();
        {
            let mut state = amp.state.borrow_mut();
            for zone in 1..=count {
                state.zones.insert(zone, ZoneRecord::new(zone));
            }
        }
        amp
    }

    pub fn named(self, zone: u8, name: &str) -> Self {
        self.state.borrow_mut().names.insert(zone, name.to_string());
        self
    }

    pub fn with_source(self, zone: u8, source: u8, name: &str) -> Self {
        self.state
            .borrow_mut()
            .sources
            .entry(zone)
            .or_default()
            .push((source, name.to_string()));
        self
    }

    /// Change a zone behind the SDK's back, as another controller would
    pub fn update(&self, zone: u8, change: impl FnOnce(&mut ZoneRecord)) {
        if let Some(record) = self.state.borrow_mut().zones.get_mut(&zone) {
            change(record);
        }
    }

    pub fn zone(&self, zone: u8) -> ZoneRecord {
        self.state.borrow().zones[&zone]
    }

    /// Every frame received so far, in order
    pub fn frames(&self) -> Vec<[u8; 6]> {
        self.state.borrow().received.iter().map(|(bytes, _)| *bytes).collect()
    }

    pub fn modes(&self) -> Vec<ReceiveMode> {
        self.state.borrow().received.iter().map(|(_, mode)| *mode).collect()
    }

    /// Frames that changed device state, ignoring queries
    pub fn commands(&self) -> Vec<[u8; 6]> {
        self.frames()
            .into_iter()
            .filter(|bytes| bytes[3] == Opcode::Command.as_byte() || bytes[3] == Opcode::SetVolume.as_byte())
            .collect()
    }

    pub fn clear_log(&self) {
        self.state.borrow_mut().received.clear();
    }

    fn apply(state: &mut DeviceState, target: u8, command: ZoneCommand) {
        match command {
            ZoneCommand::AllPowerOn | ZoneCommand::AllPowerOff => {
                let on = command == ZoneCommand::AllPowerOn;
                for record in state.zones.values_mut() {
                    record.power = on;
                }
            }
            _ => {
                let Some(record) = state.zones.get_mut(&target) else {
                    return;
                };
                match command {
                    ZoneCommand::PowerOn => record.power = true,
                    ZoneCommand::PowerOff => record.power = false,
                    ZoneCommand::MuteOn => record.mute = true,
                    ZoneCommand::MuteOff => record.mute = false,
                    ZoneCommand::DndOn => record.dnd = true,
                    ZoneCommand::DndOff => record.dnd = false,
                    ZoneCommand::SelectInput(input) => record.source = input,
                    ZoneCommand::AllPowerOn | ZoneCommand::AllPowerOff => {}
                }
            }
        }
    }

    fn full_status(state: &DeviceState) -> Vec<u8> {
        let zones: Vec<ZoneRecord> = state.zones.values().copied().collect();
        let names: Vec<(u8, &str)> = state.names.iter().map(|(z, n)| (*z, n.as_str())).collect();
        let sources: Vec<(u8, u8, &str)> = state
            .sources
            .iter()
            .flat_map(|(zone, list)| list.iter().map(move |(s, n)| (*zone, *s, n.as_str())))
            .collect();
        status_block(&zones, &names, &sources)
    }
}

impl Transport for FakeAmplifier {
    fn send(&self, frame: &Frame, mode: ReceiveMode) -> Result<Vec<u8>, TransportError> {
        let bytes = frame.to_bytes();
        let decoded = Frame::decode(&bytes).expect("SDK sent a malformed frame");
        assert_eq!(decoded, *frame);

        let mut state = self.state.borrow_mut();
        state.received.push((bytes, mode));

        let response = match frame.opcode {
            Opcode::Command => {
                if let Some(command) = ZoneCommand::from_operand(frame.operand) {
                    Self::apply(&mut state, frame.target, command);
                }
                bytes.to_vec()
            }
            Opcode::SetVolume => {
                if let Some(record) = state.zones.get_mut(&frame.target) {
                    // Raw 0x00 is the top of the scale
                    record.volume = frame.operand.wrapping_sub(0xC4);
                }
                bytes.to_vec()
            }
            Opcode::QueryZones => {
                let mut block = echo_record().to_vec();
                for record in state.zones.values() {
                    block.extend_from_slice(&record.to_bytes());
                }
                block
            }
            Opcode::QueryFullStatus => Self::full_status(&state),
            Opcode::QueryZoneName => state
                .names
                .get(&frame.target)
                .map(|name| name_record(frame.target, name).to_vec())
                .unwrap_or_default(),
            Opcode::QuerySourceName => {
                let source = frame.operand + 1;
                state
                    .sources
                    .get(&frame.target)
                    .and_then(|list| list.iter().find(|(s, _)| *s == source))
                    .map(|(s, name)| source_record(frame.target, *s, name).to_vec())
                    .unwrap_or_default()
            }
        };

        Ok(response)
    }
}

/// A transport that can never reach the device
#[derive(Debug, Default)]
pub struct Unreachable;

impl Transport for Unreachable {
    fn send(&self, _frame: &Frame, _mode: ReceiveMode) -> Result<Vec<u8>, TransportError> {
        Err(TransportError::ConnectTimeout {
            addr: "192.168.124.7:10006".parse().expect("valid socket address"),
        })
    }
}
