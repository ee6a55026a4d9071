//! Acquisition settings decided by the engine
//!
//! Every cycle the engine's scheduler returns a fresh [`SensorSettings`]: what
//! to measure, how to configure the sensor for it, and when to call again.
//! The loop only reads these values and never persists them.

use heapless::Vec;

use crate::constants::{MAX_PHYSICAL_SENSORS, SAMPLE_RATE_LP_HZ, SAMPLE_RATE_ULP_HZ};
use crate::signals::{ProcessMask, VirtualSensor};
use crate::time::TimestampNs;

/// Output cadence requested from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SampleRate {
    /// One sample every 300 s
    UltraLowPower,
    /// One sample every 3 s
    #[default]
    LowPower,
}

impl SampleRate {
    /// Engine rate in Hz
    pub fn hz(self) -> f32 {
        match self {
            Self::UltraLowPower => SAMPLE_RATE_ULP_HZ,
            Self::LowPower => SAMPLE_RATE_LP_HZ,
        }
    }
}

/// Oversampling factor for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Oversampling {
    /// Channel skipped
    #[default]
    Skipped = 0,
    /// 1x
    X1 = 1,
    /// 2x
    X2 = 2,
    /// 4x
    X4 = 3,
    /// 8x
    X8 = 4,
    /// 16x
    X16 = 5,
}

impl Oversampling {
    /// Decode the engine's register-style code; out of range codes saturate to 16x
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Skipped,
            1 => Self::X1,
            2 => Self::X2,
            3 => Self::X4,
            4 => Self::X8,
            _ => Self::X16,
        }
    }

    /// Number of conversions this setting performs
    pub fn samples(self) -> u32 {
        match self {
            Self::Skipped => 0,
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
        }
    }
}

/// Oversampling for the three climate channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AcquisitionConfig {
    /// Temperature channel
    pub temperature: Oversampling,
    /// Humidity channel
    pub humidity: Oversampling,
    /// Pressure channel
    pub pressure: Oversampling,
}

/// Gas heater settings for a forced measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaterConfig {
    /// Run the gas measurement at all
    pub enabled: bool,
    /// Target hot-plate temperature in °C
    pub temperature_c: u16,
    /// Heating duration in ms
    pub duration_ms: u16,
}

/// Per-cycle settings computed by the engine's scheduler
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorSettings {
    /// When the engine wants to be called next
    pub next_call_ns: TimestampNs,
    /// Oversampling to apply before triggering
    pub acquisition: AcquisitionConfig,
    /// Heater to apply before triggering
    pub heater: HeaterConfig,
    /// Whether a forced measurement is due now
    pub trigger_measurement: bool,
    /// Which quantities must be read and forwarded this cycle
    pub process_data: ProcessMask,
}

/// One requested output at a cadence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRequest {
    /// Output wanted
    pub sensor: VirtualSensor,
    /// Rate in Hz
    pub sample_rate_hz: f32,
}

/// Physical input settings the engine needs to serve a subscription
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredInput {
    /// Raw physical input identifier
    pub sensor_id: u8,
    /// Rate in Hz
    pub sample_rate_hz: f32,
}

/// Bounded list filled by the engine during subscription
pub type RequiredSettings = Vec<RequiredInput, MAX_PHYSICAL_SENSORS>;
