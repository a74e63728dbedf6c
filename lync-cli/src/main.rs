use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing::{debug, error};

use lync_sdk::logging::{self, LoggingMode};
use lync_sdk::{LyncConfig, LyncSystem, SdkError};

pub mod commands;

use commands::Command;

/// Control an HTD Lync 12 amplifier
///
/// Every command prints the zone state reported by the amplifier after it
/// ran, as JSON.
#[derive(Parser, Debug)]
#[command(name = "lync")]
#[command(about = "Control an HTD Lync 12 multi-zone amplifier")]
#[command(version)]
pub struct Args {
    /// Amplifier host name or IP address
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Amplifier control port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Connection timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Validate command line arguments
    pub fn validate(&self) -> Result<()> {
        if self.port == Some(0) {
            return Err(anyhow::anyhow!("Port must not be 0"));
        }

        if self.timeout_ms == Some(0) {
            return Err(anyhow::anyhow!("Timeout must be positive"));
        }

        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}'. Valid levels: error, warn, info, debug, trace",
                    self.log_level
                ));
            }
        }

        Ok(())
    }

    /// Layer the flags over the `LYNC_*` environment
    pub fn config(&self) -> LyncConfig {
        let mut config = LyncConfig::from_env();
        if let Some(host) = &self.host {
            config = config.with_host(host.clone());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        config
    }
}

/// Initialize tracing on stderr so stdout stays pure JSON
///
/// `RUST_LOG`, when set, wins over `--log-level`.
fn init_tracing(log_level: &str) -> Result<()> {
    let level = log_level.to_lowercase();
    let mode = match level.as_str() {
        "debug" | "trace" => LoggingMode::Debug,
        _ => LoggingMode::Development,
    };
    let directive = std::env::var("RUST_LOG").unwrap_or(level);

    logging::init_with_filter(mode, &directive)?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    if let Err(e) = init_tracing(&args.log_level) {
        eprintln!("Warning: {:#}", e);
    }

    let config = args.config();
    debug!(host = %config.host, port = config.port, command = %args.command, "Running command");
    let system = LyncSystem::new(config);

    let result = commands::run(&system, &args.command)
        .and_then(|output| output.to_json())
        .with_context(|| format!("'{}' failed", args.command));

    match result {
        Ok(json) => println!("{}", json),
        Err(e) => {
            if e.downcast_ref::<SdkError>().is_some_and(SdkError::is_timeout) {
                error!(host = %system.config().host, port = system.config().port, "Timed out talking to the amplifier");
            }
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
