//! Sensor Driver Contract
//!
//! The loop needs four things from the sensor: apply a configuration,
//! start a forced (single-shot) measurement, report its operating mode, and
//! hand over the latest latched sample. Register maps, bus transactions and
//! compensation formulas stay inside the driver.
//!
//! ## Forced Mode
//!
//! ```text
//!   Sleep ──set_operating_mode(Forced)──▶ Forced ──(conversion done)──▶ Sleep
//!                                          │
//!                          operating_mode() reports Forced until then
//! ```
//!
//! The sensor has no ready interrupt, so completion is detected by polling
//! [`SensorDriver::operating_mode`].

use crate::constants::sensor::{MODE_FORCED, MODE_PARALLEL, MODE_SEQUENTIAL, MODE_SLEEP};
use crate::errors::DriverError;
use crate::sample::RawSample;
use crate::settings::{AcquisitionConfig, HeaterConfig};

/// Sensor power/operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    /// Idle; latched data can be read
    Sleep,
    /// Single-shot measurement running
    Forced,
    /// Parallel heater-profile mode
    Parallel,
    /// Sequential heater-profile mode
    Sequential,
}

impl OperatingMode {
    /// Decode the driver's mode register value
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            MODE_SLEEP => Some(Self::Sleep),
            MODE_FORCED => Some(Self::Forced),
            MODE_PARALLEL => Some(Self::Parallel),
            MODE_SEQUENTIAL => Some(Self::Sequential),
            _ => None,
        }
    }

    /// Mode register value
    pub fn code(self) -> u8 {
        match self {
            Self::Sleep => MODE_SLEEP,
            Self::Forced => MODE_FORCED,
            Self::Parallel => MODE_PARALLEL,
            Self::Sequential => MODE_SEQUENTIAL,
        }
    }
}

/// Gas sensor driver as seen by the loop
///
/// Implementations own their bus handle and any delay they need for register
/// access. Every method may fail with a [`DriverError`]; the loop only treats
/// failures of [`init`](Self::init) as fatal.
pub trait SensorDriver {
    /// Probe the device and load its calibration
    fn init(&mut self) -> Result<(), DriverError>;

    /// Apply oversampling for the climate channels
    fn set_config(&mut self, config: &AcquisitionConfig) -> Result<(), DriverError>;

    /// Apply the gas heater settings for forced mode
    fn set_heater(&mut self, heater: &HeaterConfig) -> Result<(), DriverError>;

    /// Switch operating mode; `Forced` starts a measurement
    fn set_operating_mode(&mut self, mode: OperatingMode) -> Result<(), DriverError>;

    /// Current operating mode
    fn operating_mode(&mut self) -> Result<OperatingMode, DriverError>;

    /// Expected duration of a forced measurement with `config`, in µs
    fn measurement_duration_us(&mut self, config: &AcquisitionConfig) -> u32;

    /// Latest latched sample
    fn fetch_sample(&mut self) -> Result<RawSample, DriverError>;
}

impl<T: SensorDriver + ?Sized> SensorDriver for &mut T {
    fn init(&mut self) -> Result<(), DriverError> {
        (**self).init()
    }

    fn set_config(&mut self, config: &AcquisitionConfig) -> Result<(), DriverError> {
        (**self).set_config(config)
    }

    fn set_heater(&mut self, heater: &HeaterConfig) -> Result<(), DriverError> {
        (**self).set_heater(heater)
    }

    fn set_operating_mode(&mut self, mode: OperatingMode) -> Result<(), DriverError> {
        (**self).set_operating_mode(mode)
    }

    fn operating_mode(&mut self) -> Result<OperatingMode, DriverError> {
        (**self).operating_mode()
    }

    fn measurement_duration_us(&mut self, config: &AcquisitionConfig) -> u32 {
        (**self).measurement_duration_us(config)
    }

    fn fetch_sample(&mut self) -> Result<RawSample, DriverError> {
        (**self).fetch_sample()
    }
}

/// Non-blocking completion check
///
/// - `Ok(())` - sensor is out of forced mode
/// - `Err(nb::Error::WouldBlock)` - measurement still running
/// - `Err(nb::Error::Other(e))` - mode could not be read
pub fn poll_measurement_done<D>(driver: &mut D) -> nb::Result<(), DriverError>
where
    D: SensorDriver + ?Sized,
{
    match driver.operating_mode() {
        Ok(OperatingMode::Forced) => Err(nb::Error::WouldBlock),
        Ok(_) => Ok(()),
        Err(e) => Err(nb::Error::Other(e)),
    }
}
