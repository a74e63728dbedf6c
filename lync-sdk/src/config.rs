//! Session configuration
//!
//! Defaults match the factory setup of a Lync 12 controller on its usual
//! address. Environment variables overlay the defaults:
//!
//! - `LYNC_HOST`: amplifier host name or IP
//! - `LYNC_PORT`: control port
//! - `LYNC_TIMEOUT_MS`: per-connection timeout in milliseconds
//! - `LYNC_VOLUME_STEP`: step used by volume up/down

use std::time::Duration;

use lync_client::{TransportConfig, DEFAULT_HOST, DEFAULT_POLL_INTERVAL, DEFAULT_PORT, DEFAULT_TIMEOUT};
use lync_protocol::{VOLUME_MAX, VOLUME_MIN};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default increment for relative volume changes
pub const DEFAULT_VOLUME_STEP: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyncConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub volume_step: u8,
    pub volume_min: u8,
    pub volume_max: u8,
}

impl Default for LyncConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            volume_step: DEFAULT_VOLUME_STEP,
            volume_min: VOLUME_MIN,
            volume_max: VOLUME_MAX,
        }
    }
}

impl LyncConfig {
    /// Defaults overlaid with any `LYNC_*` environment variables
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values from a key lookup; unparsable values are logged and
    /// ignored
    fn overlay<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("LYNC_HOST").filter(|h| !h.is_empty()) {
            self.host = host;
        }
        if let Some(port) = parse_var(&lookup, "LYNC_PORT") {
            self.port = port;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "LYNC_TIMEOUT_MS") {
            self.timeout = Duration::from_millis(ms);
        }
        if let Some(step) = parse_var(&lookup, "LYNC_VOLUME_STEP") {
            self.volume_step = step;
        }
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_volume_step(mut self, step: u8) -> Self {
        self.volume_step = step;
        self
    }

    /// Restrict the volume range. Bounds are kept inside the device range
    /// and swapped if given in the wrong order.
    pub fn with_volume_bounds(mut self, min: u8, max: u8) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.volume_min = min.min(VOLUME_MAX);
        self.volume_max = max.min(VOLUME_MAX);
        self
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::new(self.host.clone(), self.port)
            .with_timeout(self.timeout)
            .with_poll_interval(self.poll_interval)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparsable environment variable");
            None
        }
    }
}
