//! Response read strategies
//!
//! Both strategies are generic over [`Read`] so they can be driven by a
//! socket or by a scripted reader in tests.

use std::io::{ErrorKind, Read};
use std::thread;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::config::DrainTiming;

/// One blocking read of up to `buffer_size` bytes.
///
/// A read error (including a read timeout) is logged and yields an empty
/// response.
pub fn read_single<R: Read>(reader: &mut R, buffer_size: usize) -> Vec<u8> {
    let mut buffer = vec![0u8; buffer_size];
    match reader.read(&mut buffer) {
        Ok(n) => {
            buffer.truncate(n);
            buffer
        }
        Err(e) => {
            warn!(error = %e, "Single read failed, treating response as empty");
            Vec::new()
        }
    }
}

/// Poll a non-blocking reader until the device goes quiet.
///
/// Returns when at least one byte has arrived and nothing new came for
/// `timing.idle`, or when `timing.ceiling` passed since the last byte (or
/// since the start). End of stream stops early. `WouldBlock`, `Interrupted`
/// and `TimedOut` are retried after `timing.poll_interval`; any other error
/// ends the read with the bytes collected so far.
pub fn drain_until_idle<R: Read>(reader: &mut R, timing: &DrainTiming) -> Vec<u8> {
    let mut collected = Vec::new();
    let mut chunk = vec![0u8; timing.chunk_size.max(1)];
    let mut last_reset = Instant::now();

    loop {
        let quiet = last_reset.elapsed();
        if !collected.is_empty() && quiet >= timing.idle {
            trace!(bytes = collected.len(), "Device idle, ending drain");
            break;
        }
        if quiet >= timing.ceiling {
            debug!(bytes = collected.len(), "Drain ceiling reached");
            break;
        }

        match reader.read(&mut chunk) {
            Ok(0) => {
                debug!(bytes = collected.len(), "Device closed the connection");
                break;
            }
            Ok(n) => {
                collected.extend_from_slice(&chunk[..n]);
                last_reset = Instant::now();
            }
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::WouldBlock | ErrorKind::Interrupted | ErrorKind::TimedOut
                ) =>
            {
                thread::sleep(timing.poll_interval);
            }
            Err(e) => {
                warn!(error = %e, bytes = collected.len(), "Drain read failed, keeping partial data");
                break;
            }
        }
    }

    collected
}
