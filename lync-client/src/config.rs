//! Connection settings for the TCP transport

use std::time::Duration;

/// Default amplifier address
pub const DEFAULT_HOST: &str = "192.168.124.7";

/// Default amplifier control port
pub const DEFAULT_PORT: u16 = 10006;

/// Default per-connection timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Default pause between empty polls while draining
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Where and how to reach the amplifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    /// Connect, write and single-read budget; the drain loop idles for one
    /// timeout and gives up after two
    pub timeout: Duration,
    pub poll_interval: Duration,
    /// Capacity of the single-read buffer
    pub read_buffer_size: usize,
    /// Capacity of each drain-loop read
    pub drain_chunk_size: usize,
}

impl TransportConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Timing for the drain-until-idle strategy
    pub fn drain_timing(&self) -> DrainTiming {
        DrainTiming {
            idle: self.timeout,
            ceiling: self.timeout * 2,
            poll_interval: self.poll_interval,
            chunk_size: self.drain_chunk_size,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            read_buffer_size: 1024,
            drain_chunk_size: 8192,
        }
    }
}

/// Stop conditions for [`drain_until_idle`](crate::drain_until_idle)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainTiming {
    /// Quiet period after the last received byte that ends the read
    pub idle: Duration,
    /// Quiet period that ends the read even if nothing arrived
    pub ceiling: Duration,
    pub poll_interval: Duration,
    pub chunk_size: usize,
}
