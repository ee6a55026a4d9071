//! Output demultiplexing
//!
//! Runs one processing step and unpacks the engine's output vector into a
//! flat [`AirQualityReport`]. Fields the engine did not produce keep their
//! zero defaults; identifiers this crate does not know are skipped, so newer
//! engines exposing extra outputs keep working.
//!
//! The engine stamps every output of a batch with the same time. The report
//! takes the timestamp of the last recognized output.
//!
//! An accuracy class outside 0-3 on an adaptive output is logged and reported
//! as [`Accuracy::Unreliable`]: a value whose confidence is unknown must not
//! be presented as calibrated.

use crate::errors::EngineStatus;
use crate::signals::{Accuracy, InputSignal, OutputSignal, VirtualSensor};
use crate::time::TimestampNs;
use crate::traits::{FusionEngine, OutputBuffer, OutputSink};

/// Everything the engine reported for one batch
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AirQualityReport {
    /// Engine timestamp of the batch, ns
    pub timestamp_ns: TimestampNs,
    /// IAQ index (0-500)
    pub iaq: f32,
    /// IAQ accuracy
    pub iaq_accuracy: Accuracy,
    /// Temperature with self-heating removed, °C
    pub heat_compensated_temperature: f32,
    /// Temperature as measured, °C
    pub raw_temperature: f32,
    /// Pressure, Pa
    pub raw_pressure: f32,
    /// Humidity corrected for self-heating, %
    pub heat_compensated_humidity: f32,
    /// Humidity as measured, %
    pub raw_humidity: f32,
    /// Gas resistance, Ω
    pub raw_gas: f32,
    /// Static IAQ
    pub static_iaq: f32,
    /// Static IAQ accuracy
    pub static_iaq_accuracy: Accuracy,
    /// CO2 equivalent, ppm
    pub co2_equivalent: f32,
    /// CO2 equivalent accuracy
    pub co2_accuracy: Accuracy,
    /// Breath-VOC equivalent, ppm
    pub breath_voc_equivalent: f32,
    /// Breath-VOC accuracy
    pub breath_voc_accuracy: Accuracy,
    /// Compensated gas value
    pub compensated_gas: f32,
    /// Compensated gas accuracy
    pub compensated_gas_accuracy: Accuracy,
    /// Gas percentage, %
    pub gas_percentage: f32,
    /// Gas percentage accuracy
    pub gas_percentage_accuracy: Accuracy,
    /// Status of the processing step
    pub engine_status: EngineStatus,
}

impl AirQualityReport {
    /// Map an engine output vector into named fields
    pub fn from_outputs(outputs: &[OutputSignal], engine_status: EngineStatus) -> Self {
        let mut report = Self {
            engine_status,
            ..Self::default()
        };

        for output in outputs {
            let Some(sensor) = output.sensor() else {
                continue;
            };
            let value = output.value;
            let accuracy = match Accuracy::from_raw(output.accuracy) {
                Some(accuracy) => accuracy,
                None => {
                    if sensor.has_accuracy() {
                        log_warn!("output {} has unknown accuracy class {}", output.sensor_id, output.accuracy);
                    }
                    Accuracy::Unreliable
                }
            };

            match sensor {
                VirtualSensor::Iaq => {
                    report.iaq = value;
                    report.iaq_accuracy = accuracy;
                }
                VirtualSensor::StaticIaq => {
                    report.static_iaq = value;
                    report.static_iaq_accuracy = accuracy;
                }
                VirtualSensor::Co2Equivalent => {
                    report.co2_equivalent = value;
                    report.co2_accuracy = accuracy;
                }
                VirtualSensor::BreathVocEquivalent => {
                    report.breath_voc_equivalent = value;
                    report.breath_voc_accuracy = accuracy;
                }
                VirtualSensor::HeatCompensatedTemperature => report.heat_compensated_temperature = value,
                VirtualSensor::RawPressure => report.raw_pressure = value,
                VirtualSensor::HeatCompensatedHumidity => report.heat_compensated_humidity = value,
                VirtualSensor::RawGas => report.raw_gas = value,
                VirtualSensor::RawTemperature => report.raw_temperature = value,
                VirtualSensor::RawHumidity => report.raw_humidity = value,
                VirtualSensor::CompensatedGas => {
                    report.compensated_gas = value;
                    report.compensated_gas_accuracy = accuracy;
                }
                VirtualSensor::GasPercentage => {
                    report.gas_percentage = value;
                    report.gas_percentage_accuracy = accuracy;
                }
            }

            // Last one wins
            report.timestamp_ns = output.timestamp_ns;
        }

        report
    }

    /// Qualitative band of the IAQ index; `None` when it is not a number
    pub fn iaq_level(&self) -> Option<IaqLevel> {
        IaqLevel::from_index(self.iaq)
    }
}

/// Indoor air quality bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IaqLevel {
    /// 0-50
    Excellent,
    /// 51-100
    Good,
    /// 101-150
    Moderate,
    /// 151-200
    Poor,
    /// 201-300
    VeryPoor,
    /// 301+
    Hazardous,
}

impl IaqLevel {
    /// Band for an IAQ index
    ///
    /// `None` for NaN, infinities and negative values, which no engine
    /// produces for a valid index.
    pub fn from_index(iaq: f32) -> Option<Self> {
        if !iaq.is_finite() || iaq < 0.0 {
            return None;
        }
        let level = match iaq as u32 {
            0..=50 => Self::Excellent,
            51..=100 => Self::Good,
            101..=150 => Self::Moderate,
            151..=200 => Self::Poor,
            201..=300 => Self::VeryPoor,
            _ => Self::Hazardous,
        };
        Some(level)
    }
}

/// Process `inputs` and hand the report to `sink`
///
/// Does nothing for an empty batch. Otherwise the sink is called exactly
/// once, even when the engine produced no outputs.
pub fn process<E, S>(engine: &mut E, inputs: &[InputSignal], sink: &mut S) -> Option<AirQualityReport>
where
    E: FusionEngine + ?Sized,
    S: OutputSink + ?Sized,
{
    if inputs.is_empty() {
        return None;
    }

    let mut outputs = OutputBuffer::new();
    let status = engine.do_steps(inputs, &mut outputs);

    if status.is_error() {
        log_warn!("engine processing failed with status {}", status);
    } else if status.is_warning() {
        log_debug!("engine processing warning {}", status);
    }

    let report = AirQualityReport::from_outputs(&outputs, status);
    sink.output_ready(&report);
    Some(report)
}
