//! Latest sample latched by the sensor
//!
//! Drivers built without an FPU report climate channels in fixed point
//! (centi-°C, milli-%RH); drivers with float support report them directly.
//! [`Readings`] keeps both forms so the unit correction happens in exactly
//! one place.

use crate::constants::sensor::{STATUS_GAS_VALID, STATUS_HEAT_STABLE, STATUS_NEW_DATA};
use crate::constants::{HUMIDITY_FIXED_POINT_SCALE, TEMPERATURE_FIXED_POINT_SCALE};

bitflags::bitflags! {
    /// Status flags latched with a sample
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SampleStatus: u8 {
        /// Not read before
        const NEW_DATA = STATUS_NEW_DATA;
        /// Gas resistance valid
        const GAS_VALID = STATUS_GAS_VALID;
        /// Heater reached target temperature
        const HEAT_STABLE = STATUS_HEAT_STABLE;
    }
}

/// Channel values in the driver's native representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Readings {
    /// Integer driver output
    Fixed {
        /// Centi-degrees Celsius
        temperature: i16,
        /// Pa
        pressure: u32,
        /// Milli-percent relative humidity
        humidity: u32,
        /// Ω
        gas_resistance: u32,
    },
    /// Floating point driver output
    Float {
        /// °C
        temperature: f32,
        /// Pa
        pressure: f32,
        /// %RH
        humidity: f32,
        /// Ω
        gas_resistance: f32,
    },
}

impl Readings {
    /// Temperature in °C
    pub fn temperature_c(&self) -> f32 {
        match *self {
            Self::Fixed { temperature, .. } => temperature as f32 / TEMPERATURE_FIXED_POINT_SCALE,
            Self::Float { temperature, .. } => temperature,
        }
    }

    /// Relative humidity in %
    pub fn humidity_pct(&self) -> f32 {
        match *self {
            Self::Fixed { humidity, .. } => humidity as f32 / HUMIDITY_FIXED_POINT_SCALE,
            Self::Float { humidity, .. } => humidity,
        }
    }

    /// Pressure in Pa, unscaled in both forms
    pub fn pressure_pa(&self) -> f32 {
        match *self {
            Self::Fixed { pressure, .. } => pressure as f32,
            Self::Float { pressure, .. } => pressure,
        }
    }

    /// Gas resistance in Ω, unscaled in both forms
    pub fn gas_resistance_ohm(&self) -> f32 {
        match *self {
            Self::Fixed { gas_resistance, .. } => gas_resistance as f32,
            Self::Float { gas_resistance, .. } => gas_resistance,
        }
    }
}

impl Default for Readings {
    fn default() -> Self {
        Self::Fixed {
            temperature: 0,
            pressure: 0,
            humidity: 0,
            gas_resistance: 0,
        }
    }
}

/// One sample fetched from the driver
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawSample {
    /// Latched flags
    pub status: SampleStatus,
    /// Channel values
    pub readings: Readings,
}

impl RawSample {
    /// Data from a measurement that has not been consumed yet
    pub fn is_fresh(&self) -> bool {
        self.status.contains(SampleStatus::NEW_DATA)
    }

    /// Gas channel can be trusted
    pub fn gas_valid(&self) -> bool {
        self.status.contains(SampleStatus::GAS_VALID)
    }
}
