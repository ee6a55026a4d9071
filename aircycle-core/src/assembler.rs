//! Input assembly
//!
//! Turns the latest sensor sample into the flat list of typed signals the
//! engine consumes. Rules:
//!
//! 1. Nothing is fetched unless the engine asked for at least one quantity.
//! 2. A sample without the new-data flag contributes nothing.
//! 3. Temperature always comes paired with the heat-source (self-heating)
//!    offset; the engine's compensation needs both.
//! 4. Gas resistance is dropped unless the sample marks it valid. A stale gas
//!    reading would skew the engine's baseline, a missing one does not.
//!
//! All signals of a cycle carry the timestamp captured *before* the engine
//! decided the settings, not the time the sample was read.
//!
//! ```text
//! order: Pressure, Temperature, HeatSource, Humidity, GasResistor
//! ```

use heapless::Vec;

use crate::constants::MAX_PHYSICAL_SENSORS;
use crate::sample::RawSample;
use crate::signals::{InputSignal, PhysicalInput, ProcessMask};
use crate::time::TimestampNs;
use crate::traits::SensorDriver;

/// Inputs for one processing step
pub type InputBatch = Vec<InputSignal, MAX_PHYSICAL_SENSORS>;

/// Builds engine inputs from driver samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputAssembler {
    temperature_offset: f32,
}

impl InputAssembler {
    /// Assembler reporting `temperature_offset` °C of self-heating
    pub fn new(temperature_offset: f32) -> Self {
        Self { temperature_offset }
    }

    /// Configured self-heating offset, °C
    pub fn temperature_offset(&self) -> f32 {
        self.temperature_offset
    }

    /// Fetch the latest sample and convert what `mask` asks for
    ///
    /// Driver errors yield an empty batch; the next cycle tries again.
    pub fn assemble<D>(&self, driver: &mut D, timestamp_ns: TimestampNs, mask: ProcessMask) -> InputBatch
    where
        D: SensorDriver + ?Sized,
    {
        if mask.is_empty() {
            return InputBatch::new();
        }

        match driver.fetch_sample() {
            Ok(sample) => self.from_sample(&sample, timestamp_ns, mask),
            Err(e) => {
                log_warn!("sample fetch failed: {}", e);
                InputBatch::new()
            }
        }
    }

    /// Convert an already fetched sample
    pub fn from_sample(&self, sample: &RawSample, timestamp_ns: TimestampNs, mask: ProcessMask) -> InputBatch {
        let mut batch = InputBatch::new();
        if mask.is_empty() || !sample.is_fresh() {
            return batch;
        }

        let readings = &sample.readings;
        let mut push = |sensor: PhysicalInput, value: f32| {
            if batch.push(InputSignal::new(sensor, value, timestamp_ns)).is_err() {
                log_warn!("input batch full, dropping {:?}", sensor);
            }
        };

        if mask.contains(ProcessMask::PRESSURE) {
            push(PhysicalInput::Pressure, readings.pressure_pa());
        }
        if mask.contains(ProcessMask::TEMPERATURE) {
            push(PhysicalInput::Temperature, readings.temperature_c());
            push(PhysicalInput::HeatSource, self.temperature_offset);
        }
        if mask.contains(ProcessMask::HUMIDITY) {
            push(PhysicalInput::Humidity, readings.humidity_pct());
        }
        if mask.contains(ProcessMask::GAS) && sample.gas_valid() {
            push(PhysicalInput::GasResistor, readings.gas_resistance_ohm());
        }

        batch
    }
}

impl Default for InputAssembler {
    fn default() -> Self {
        Self::new(0.0)
    }
}
