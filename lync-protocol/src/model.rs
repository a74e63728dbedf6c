//! Zone and source snapshots decoded from amplifier responses

use serde::{Deserialize, Serialize};

/// One selectable input feed of a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// 1-based source index
    pub index: u8,
    pub name: String,
}

impl Source {
    pub fn new(index: u8, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// Snapshot of a single zone as reported by the amplifier
///
/// Zones are rebuilt on every query; nothing here is kept in sync with the
/// device. `name` and `source_name` stay `None` when they were not requested
/// or could not be correlated in the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// 1-based zone index
    pub index: u8,
    pub name: Option<String>,
    pub power: bool,
    /// 1-based index of the selected source
    pub source: u8,
    pub source_name: Option<String>,
    /// Volume in `0..=60`
    pub volume: u8,
    pub mute: bool,
    /// Do-not-disturb flag
    pub dnd: bool,
    pub sources: Vec<Source>,
}

impl Zone {
    /// Look up one of this zone's sources by its 1-based index
    pub fn source_by_index(&self, index: u8) -> Option<&Source> {
        self.sources.iter().find(|s| s.index == index)
    }
}
