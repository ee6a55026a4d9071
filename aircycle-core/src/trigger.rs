//! Forced-mode acquisition
//!
//! ## State Machine
//!
//! ```text
//!            trigger_measurement
//!   Idle ─────────────────────────▶ Measuring
//!    ▲                                  │
//!    │     sleep(duration), then poll   │
//!    └──────── mode != Forced ──────────┘
//! ```
//!
//! Both phases live inside one blocking [`AcquisitionTrigger::run`]: it
//! enters `Measuring` when it commands forced mode and returns only after
//! the sensor is back in `Idle`, so callers never see a measurement in
//! flight.
//!
//! The sensor signals completion only through its operating mode, so after
//! sleeping the expected duration the trigger polls the mode and sleeps one
//! slice (5 ms by default) per poll that still reports `Forced`. Usually the
//! first poll already sees the sensor back in sleep mode.
//!
//! Driver errors here are logged and otherwise ignored: the cycle carries on
//! and a failed measurement shows up as a sample without fresh data.

use embedded_hal::delay::DelayNs;

use crate::errors::DriverError;
use crate::settings::SensorSettings;
use crate::traits::driver::poll_measurement_done;
use crate::traits::{OperatingMode, SensorDriver};

/// What one trigger run did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerOutcome {
    /// A forced measurement was started
    pub triggered: bool,
    /// Total time spent sleeping, µs
    pub waited_us: u64,
    /// Operating-mode reads
    pub polls: u32,
    /// Driver calls that failed
    pub driver_errors: u8,
}

/// Applies engine settings and waits out a forced measurement
#[derive(Debug, Clone)]
pub struct AcquisitionTrigger {
    poll_slice_us: u32,
}

impl AcquisitionTrigger {
    /// Trigger polling every `poll_slice_us` while the sensor is busy
    pub fn new(poll_slice_us: u32) -> Self {
        Self {
            poll_slice_us: poll_slice_us.max(1),
        }
    }

    /// Run one acquisition according to `settings`
    ///
    /// Returns immediately without touching the driver when no measurement
    /// is due. Otherwise returns once the sensor has left forced mode.
    pub fn run<D, P>(&mut self, driver: &mut D, delay: &mut P, settings: &SensorSettings) -> TriggerOutcome
    where
        D: SensorDriver + ?Sized,
        P: DelayNs + ?Sized,
    {
        let mut outcome = TriggerOutcome::default();
        if !settings.trigger_measurement {
            return outcome;
        }
        outcome.triggered = true;

        note(&mut outcome, "set_config", driver.set_config(&settings.acquisition));
        note(&mut outcome, "set_heater", driver.set_heater(&settings.heater));
        note(
            &mut outcome,
            "set_operating_mode",
            driver.set_operating_mode(OperatingMode::Forced),
        );

        let duration_us = driver.measurement_duration_us(&settings.acquisition);
        delay.delay_us(duration_us);
        outcome.waited_us += u64::from(duration_us);

        loop {
            outcome.polls += 1;
            match poll_measurement_done(driver) {
                Ok(()) => break,
                Err(nb::Error::WouldBlock) => {
                    delay.delay_us(self.poll_slice_us);
                    outcome.waited_us += u64::from(self.poll_slice_us);
                }
                Err(nb::Error::Other(e)) => {
                    // Mode unreadable: stop waiting, the fetch decides freshness
                    note(&mut outcome, "operating_mode", Err(e));
                    break;
                }
            }
        }

        log_trace!(
            "measurement done after {} us, {} polls",
            outcome.waited_us,
            outcome.polls
        );
        outcome
    }
}

impl Default for AcquisitionTrigger {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_POLL_SLICE_US)
    }
}

fn note(outcome: &mut TriggerOutcome, call: &'static str, result: Result<(), DriverError>) {
    if let Err(e) = result {
        log_warn!("driver {} failed: {}", call, e);
        outcome.driver_errors = outcome.driver_errors.saturating_add(1);
    }
}
