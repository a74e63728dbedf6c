//! End-to-end session tests against an in-memory amplifier

mod helpers;

use helpers::{FakeAmplifier, Unreachable};
use lync_protocol::{clamp_volume, decode_volume, encode_volume};
use lync_sdk::{LyncConfig, LyncSystem, QueryOptions, ReceiveMode, SdkError, Source};
use proptest::prelude::*;
use rstest::rstest;

const QUERY_ZONES: [u8; 6] = [0x02, 0x00, 0x00, 0x05, 0x07, 0x0E];

fn system(amp: &FakeAmplifier) -> LyncSystem<&FakeAmplifier> {
    LyncSystem::with_transport(amp, LyncConfig::default())
}

fn living_room() -> FakeAmplifier {
    FakeAmplifier::with_zones(3)
        .named(1, "Kitchen")
        .named(3, "Craft Room")
        .with_source(1, 1, "Tuner")
        .with_source(1, 2, "Streamer")
        .with_source(3, 1, "Source 1")
}

#[test]
fn test_power_on_zone_three() {
    let amp = living_room();
    let zone = system(&amp).zone_power_on(3).unwrap();

    let frames = amp.frames();
    assert_eq!(frames[0], [0x02, 0x00, 0x03, 0x04, 0x57, 0x60]);
    assert_eq!(frames[1], QUERY_ZONES);
    // Name and source-name follow-ups
    assert_eq!(frames[2], [0x02, 0x00, 0x03, 0x0D, 0x00, 0x12]);
    assert_eq!(frames[3], [0x02, 0x00, 0x03, 0x0E, 0x00, 0x13]);
    assert_eq!(frames.len(), 4);

    assert_eq!(zone.index, 3);
    assert!(zone.power);
    assert_eq!(zone.name.as_deref(), Some("Craft Room"));
    assert_eq!(zone.source_name.as_deref(), Some("Source 1"));
    assert!(amp.modes().iter().all(|mode| *mode == ReceiveMode::Single));
}

/// Requests above the range are clamped to 60 before encoding, and setting
/// a volume powers the zone on. The device reports volume 60 as raw `0x00`,
/// which reads back as the minimum.
#[test]
fn test_volume_set_clamps_and_powers_on() {
    let amp = living_room();
    let zone = system(&amp).zone_volume_set(2, 75).unwrap();

    assert_eq!(
        amp.commands(),
        vec![
            [0x02, 0x00, 0x02, 0x15, 0x00, 0x19],
            [0x02, 0x00, 0x02, 0x04, 0x57, 0x5F],
        ]
    );
    assert_eq!(amp.zone(2).volume, 60);
    assert!(zone.power);
    assert_eq!(zone.volume, decode_volume(encode_volume(60)));
}

#[test]
fn test_volume_set_below_range() {
    let amp = living_room();
    let zone = system(&amp).zone_volume_set(1, -12).unwrap();

    assert_eq!(amp.commands()[0], [0x02, 0x00, 0x01, 0x15, 0xC4, 0xDC]);
    assert_eq!(zone.volume, 0);
    assert!(zone.power);
}

#[test]
fn test_volume_set_in_range_reads_back() {
    let amp = living_room();
    let zone = system(&amp).zone_volume_set(1, 35).unwrap();

    assert_eq!(zone.volume, 35);
    assert_eq!(amp.zone(1).volume, 35);
}

#[test]
fn test_volume_respects_configured_bounds() {
    let amp = living_room();
    let config = LyncConfig::default().with_volume_bounds(10, 40);
    let system = LyncSystem::with_transport(&amp, config);

    assert_eq!(system.zone_volume_set(1, 55).unwrap().volume, 40);
    assert_eq!(system.zone_volume_set(1, 2).unwrap().volume, 10);
}

#[rstest]
#[case::up_from_middle(20, true, 25)]
#[case::down_from_middle(20, false, 15)]
#[case::down_floors_at_zero(3, false, 0)]
#[case::up_to_top(55, true, 60)]
fn test_volume_step(#[case] start: u8, #[case] up: bool, #[case] expected: u8) {
    let amp = living_room();
    amp.update(1, |record| record.volume = start);
    let system = system(&amp);

    if up {
        system.zone_volume_up(1).unwrap();
    } else {
        system.zone_volume_down(1).unwrap();
    }

    assert_eq!(amp.zone(1).volume, expected);
    assert_eq!(amp.commands()[0][4], encode_volume(expected));
    // Read, set volume, power on, re-query
    assert_eq!(amp.frames()[0], QUERY_ZONES);
}

#[test]
fn test_volume_step_uses_configured_step() {
    let amp = living_room();
    amp.update(2, |record| record.volume = 30);
    let system = LyncSystem::with_transport(&amp, LyncConfig::default().with_volume_step(2));

    system.zone_volume_down(2).unwrap();
    assert_eq!(amp.zone(2).volume, 28);
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    Power,
    Mute,
    Dnd,
}

#[rstest]
#[case::power(Flag::Power, 0x57, 0x58)]
#[case::mute(Flag::Mute, 0x1E, 0x1F)]
#[case::dnd(Flag::Dnd, 0x59, 0x5A)]
fn test_toggle_flips_state(#[case] flag: Flag, #[case] on: u8, #[case] off: u8) {
    let amp = living_room();
    let system = system(&amp);
    let toggle = |zone| match flag {
        Flag::Power => system.zone_power_toggle(zone),
        Flag::Mute => system.zone_mute_toggle(zone),
        Flag::Dnd => system.zone_dnd_toggle(zone),
    };
    let read = |zone: &lync_sdk::Zone| match flag {
        Flag::Power => zone.power,
        Flag::Mute => zone.mute,
        Flag::Dnd => zone.dnd,
    };

    let zone = toggle(1).unwrap();
    assert!(read(&zone));
    // State-only read first, then the command
    assert_eq!(amp.frames()[0], QUERY_ZONES);
    assert_eq!(amp.frames()[1][4], on);

    amp.clear_log();
    let zone = toggle(1).unwrap();
    assert!(!read(&zone));
    assert_eq!(amp.commands().len(), 1);
    assert_eq!(amp.commands()[0][4], off);
}

#[test]
fn test_toggle_sees_external_change() {
    let amp = living_room();
    let system = system(&amp);

    system.zone_mute_on(2).unwrap();
    // Another controller unmutes between our calls
    amp.update(2, |record| record.mute = false);

    let zone = system.zone_mute_toggle(2).unwrap();
    assert!(zone.mute);
}

#[test]
fn test_set_input() {
    let amp = living_room();
    let zone = system(&amp).zone_set_input(1, 4).unwrap();

    assert_eq!(amp.commands(), vec![[0x02, 0x00, 0x01, 0x04, 0x13, 0x1A]]);
    assert_eq!(zone.source, 4);
}

#[rstest]
#[case(0)]
#[case(15)]
#[case(255)]
fn test_set_input_rejects_out_of_range(#[case] input: u8) {
    let amp = living_room();
    let err = system(&amp).zone_set_input(1, input).unwrap_err();

    assert!(matches!(err, SdkError::InvalidInput(i) if i == input));
    assert!(amp.frames().is_empty());
}

#[test]
fn test_zone_zero_is_rejected() {
    let amp = living_room();
    let system = system(&amp);

    assert!(matches!(system.zone_power_on(0), Err(SdkError::InvalidZone(0))));
    assert!(matches!(system.zone_volume_set(0, 10), Err(SdkError::InvalidZone(0))));
    assert!(matches!(system.query_zone(0), Err(SdkError::InvalidZone(0))));
    assert!(amp.frames().is_empty());
}

#[test]
fn test_missing_zone_is_not_found() {
    let amp = FakeAmplifier::with_zones(2);
    let err = system(&amp).query_zone(5).unwrap_err();
    assert!(matches!(err, SdkError::ZoneNotFound(5)));
}

#[test]
fn test_query_zone_state_only_makes_one_round_trip() {
    let amp = living_room();
    amp.update(3, |record| {
        record.power = true;
        record.volume = 18;
    });

    let zone = system(&amp)
        .query_zone_with(3, QueryOptions::STATE_ONLY)
        .unwrap();

    assert_eq!(amp.frames(), vec![QUERY_ZONES]);
    assert!(zone.power);
    assert_eq!(zone.volume, 18);
    assert_eq!(zone.name, None);
    assert_eq!(zone.source_name, None);
}

#[test]
fn test_unnamed_zone_has_no_name() {
    let amp = living_room();
    let zone = system(&amp).query_zone(2).unwrap();

    assert_eq!(zone.name, None);
    assert_eq!(zone.source_name, None);
}

#[test]
fn test_query_names_directly() {
    let amp = living_room();
    let system = system(&amp);

    assert_eq!(system.query_zone_name(1).unwrap(), "Kitchen");
    assert_eq!(system.query_zone_source_name(1, 2).unwrap(), "Streamer");
    assert_eq!(amp.frames()[1], [0x02, 0x00, 0x01, 0x0E, 0x01, 0x12]);
}

#[test]
fn test_full_status() {
    let amp = living_room();
    amp.update(1, |record| {
        record.power = true;
        record.source = 2;
        record.volume = 42;
    });

    let zones = system(&amp).query_full_status().unwrap();

    assert_eq!(amp.frames(), vec![[0x02, 0x00, 0x01, 0x0C, 0x00, 0x0F]]);
    assert_eq!(amp.modes(), vec![ReceiveMode::DrainUntilIdle]);
    assert_eq!(zones.len(), 3);

    let kitchen = &zones[0];
    assert_eq!(kitchen.name.as_deref(), Some("Kitchen"));
    assert!(kitchen.power);
    assert_eq!(kitchen.volume, 42);
    assert_eq!(
        kitchen.sources,
        vec![Source::new(1, "Tuner"), Source::new(2, "Streamer")]
    );
    assert_eq!(kitchen.source_name.as_deref(), Some("Streamer"));

    let unnamed = &zones[1];
    assert_eq!(unnamed.name, None);
    assert!(unnamed.sources.is_empty());
    assert_eq!(unnamed.source_name, None);

    assert_eq!(zones[2].name.as_deref(), Some("Craft Room"));
    assert_eq!(zones[2].source_name.as_deref(), Some("Source 1"));
}

#[test]
fn test_all_power() {
    let amp = living_room();
    let system = system(&amp);

    let zones = system.all_power_on().unwrap();
    assert_eq!(amp.commands(), vec![[0x02, 0x00, 0x00, 0x04, 0x55, 0x5B]]);
    assert!(zones.iter().all(|zone| zone.power));

    let zones = system.all_power_off().unwrap();
    assert!(zones.iter().all(|zone| !zone.power));
}

#[test]
fn test_transport_failure_propagates() {
    let system = LyncSystem::with_transport(Unreachable, LyncConfig::default());

    let err = system.zone_power_on(1).unwrap_err();
    assert!(err.is_timeout());
    assert!(matches!(err, SdkError::Transport(_)));
}

#[test]
fn test_zone_serializes_with_null_names() {
    let amp = living_room();
    let zone = system(&amp).query_zone(2).unwrap();
    let json = serde_json::to_value(&zone).unwrap();

    assert_eq!(json["index"], 2);
    assert!(json["name"].is_null());
    assert_eq!(json["power"], false);
    assert_eq!(json["source"], 1);
    assert!(json["sources"].as_array().unwrap().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any requested volume goes out clamped and encoded, followed by power-on
    #[test]
    fn prop_volume_set_wire_operand(value in any::<i32>(), zone in 1u8..=3) {
        let amp = living_room();
        system(&amp).zone_volume_set(zone, value).unwrap();

        let commands = amp.commands();
        prop_assert_eq!(commands.len(), 2);
        prop_assert_eq!(commands[0][3], 0x15);
        prop_assert_eq!(commands[0][4], encode_volume(clamp_volume(value)));
        prop_assert_eq!(commands[1][4], 0x57);
        prop_assert!(amp.zone(zone).power);
    }
}
