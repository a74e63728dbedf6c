//! Print every zone the amplifier reports, then nudge one zone's volume
//!
//! Run with: LYNC_HOST=192.168.1.40 cargo run -p lync-sdk --example zone_report [zone]

use lync_sdk::logging::init_logging_from_env;
use lync_sdk::{LyncConfig, LyncSystem, SdkError};

fn main() -> Result<(), SdkError> {
    if let Err(e) = init_logging_from_env() {
        eprintln!("Logging disabled: {}", e);
    }

    let config = LyncConfig::from_env();
    println!("Lync 12 at {}:{}", config.host, config.port);
    println!("=========================");

    let system = LyncSystem::new(config);

    let zones = system.query_full_status()?;
    if zones.is_empty() {
        println!("No zone records in the status block");
        return Ok(());
    }

    for zone in &zones {
        println!(
            "{:>2} {:<12} {:<3} vol {:>2}{}{}  source {} ({})",
            zone.index,
            zone.name.as_deref().unwrap_or("-"),
            if zone.power { "on" } else { "off" },
            zone.volume,
            if zone.mute { " muted" } else { "" },
            if zone.dnd { " dnd" } else { "" },
            zone.source,
            zone.source_name.as_deref().unwrap_or("unknown"),
        );
    }

    let Some(target) = std::env::args().nth(1).and_then(|arg| arg.parse::<u8>().ok()) else {
        return Ok(());
    };

    println!("\nRaising zone {} by one step", target);
    let zone = system.zone_volume_up(target)?;
    println!("   Volume now {} (power {})", zone.volume, zone.power);

    Ok(())
}
