//! `std` clock and delay

use std::thread;
use std::time::{Duration, Instant};

use aircycle_core::time::{TimeSource, TimestampUs};
use embedded_hal::delay::DelayNs;

/// Monotonic clock plus blocking sleep
///
/// Time counts from construction. `thread::sleep` may overshoot by the
/// scheduler's granularity; the loop tolerates that since the next cycle's
/// timestamp is always read fresh.
#[derive(Debug, Clone)]
pub struct StdPlatform {
    origin: Instant,
}

impl StdPlatform {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for StdPlatform {
    fn now_us(&mut self) -> TimestampUs {
        i64::try_from(self.origin.elapsed().as_micros()).unwrap_or(i64::MAX)
    }

    fn precision_us(&self) -> u32 {
        1
    }
}

impl DelayNs for StdPlatform {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
