//! Signals exchanged with the fusion engine
//!
//! Physical inputs flow into the engine as [`InputSignal`]s; derived
//! quantities come back as [`OutputSignal`]s. Identifiers follow the engine's
//! numbering so concrete engine bindings can pass them through unchanged.
//!
//! Output identifiers are kept raw (`u8`) on [`OutputSignal`]: engines may
//! expose more outputs than this crate knows, and those must survive until the
//! demultiplexer decides to ignore them.

use crate::time::TimestampNs;

/// Physical quantity fed into the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PhysicalInput {
    /// Pressure in Pa
    Pressure = 1,
    /// Relative humidity in %
    Humidity = 2,
    /// Temperature in °C
    Temperature = 3,
    /// Gas resistance in Ω
    GasResistor = 4,
    /// Self-heating offset in °C, subtracted from temperature by the engine
    HeatSource = 14,
}

impl PhysicalInput {
    /// Engine identifier
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Derived quantity produced by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VirtualSensor {
    /// Indoor air quality index (0-500), auto-scaled to recent history
    Iaq = 1,
    /// Static IAQ, not scaled to history
    StaticIaq = 2,
    /// CO2 equivalent in ppm
    Co2Equivalent = 3,
    /// Breath-VOC equivalent in ppm
    BreathVocEquivalent = 4,
    /// Temperature as measured, °C
    RawTemperature = 6,
    /// Pressure as measured, Pa
    RawPressure = 7,
    /// Humidity as measured, %
    RawHumidity = 8,
    /// Gas resistance as measured, Ω
    RawGas = 9,
    /// Temperature with self-heating removed, °C
    HeatCompensatedTemperature = 14,
    /// Humidity corrected for self-heating, %
    HeatCompensatedHumidity = 15,
    /// Compensated gas value, log(Ω)
    CompensatedGas = 18,
    /// Gas resistance as a percentile of its history, %
    GasPercentage = 21,
}

impl VirtualSensor {
    /// Engine identifier
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a known output; `None` for identifiers this crate does not use
    pub fn from_id(id: u8) -> Option<Self> {
        let sensor = match id {
            1 => Self::Iaq,
            2 => Self::StaticIaq,
            3 => Self::Co2Equivalent,
            4 => Self::BreathVocEquivalent,
            6 => Self::RawTemperature,
            7 => Self::RawPressure,
            8 => Self::RawHumidity,
            9 => Self::RawGas,
            14 => Self::HeatCompensatedTemperature,
            15 => Self::HeatCompensatedHumidity,
            18 => Self::CompensatedGas,
            21 => Self::GasPercentage,
            _ => return None,
        };
        Some(sensor)
    }

    /// Whether the engine attaches a meaningful accuracy class
    pub fn has_accuracy(self) -> bool {
        matches!(
            self,
            Self::Iaq
                | Self::StaticIaq
                | Self::Co2Equivalent
                | Self::BreathVocEquivalent
                | Self::CompensatedGas
                | Self::GasPercentage
        )
    }
}

/// Confidence class attached to adaptive outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Accuracy {
    /// Stabilizing, value not usable yet
    #[default]
    Unreliable = 0,
    /// Low confidence, background history uncertain
    Low = 1,
    /// Calibrating
    Medium = 2,
    /// Calibrated
    High = 3,
}

impl Accuracy {
    /// Known class; `None` for anything above 3
    pub fn from_raw(raw: u8) -> Option<Self> {
        let accuracy = match raw {
            0 => Self::Unreliable,
            1 => Self::Low,
            2 => Self::Medium,
            3 => Self::High,
            _ => return None,
        };
        Some(accuracy)
    }
}

/// One physical reading handed to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSignal {
    /// Which quantity
    pub sensor: PhysicalInput,
    /// Value in the engine's unit for that quantity
    pub value: f32,
    /// When the cycle's settings were decided
    pub timestamp_ns: TimestampNs,
}

impl InputSignal {
    /// Build an input signal
    pub fn new(sensor: PhysicalInput, value: f32, timestamp_ns: TimestampNs) -> Self {
        Self {
            sensor,
            value,
            timestamp_ns,
        }
    }
}

/// One derived value returned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OutputSignal {
    /// Raw engine identifier
    pub sensor_id: u8,
    /// Value
    pub value: f32,
    /// Raw accuracy class
    pub accuracy: u8,
    /// Engine timestamp
    pub timestamp_ns: TimestampNs,
}

impl OutputSignal {
    /// Known output this signal carries, if any
    pub fn sensor(&self) -> Option<VirtualSensor> {
        VirtualSensor::from_id(self.sensor_id)
    }
}

bitflags::bitflags! {
    /// Physical quantities the engine wants read this cycle
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ProcessMask: u32 {
        /// Pressure
        const PRESSURE = 1 << 0;
        /// Humidity
        const HUMIDITY = 1 << 1;
        /// Temperature (implies the heat-source offset input)
        const TEMPERATURE = 1 << 2;
        /// Gas resistance
        const GAS = 1 << 3;
    }
}
