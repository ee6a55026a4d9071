//! Common test fixtures for integration tests
//!
//! This module provides:
//! - A simulated forced-mode gas sensor with scripted failures
//! - A small fusion engine that keeps real adaptive state (a running gas
//!   baseline) so save/restore can be checked end to end
//! - A simulated clock whose delays advance time
//! - Recording sink and in-memory blob store

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use aircycle_core::{
    constants::MAX_OUTPUTS,
    errors::{DriverError, EngineError, EngineStatus, StorageError},
    sample::{RawSample, Readings, SampleStatus},
    settings::{
        AcquisitionConfig, HeaterConfig, Oversampling, RequiredInput, RequiredSettings, SensorRequest,
        SensorSettings,
    },
    signals::{InputSignal, OutputSignal, PhysicalInput, ProcessMask, VirtualSensor},
    time::{TimestampNs, TimestampUs},
    traits::{
        ConfigSource, FusionEngine, OperatingMode, OutputBuffer, OutputSink, SensorDriver,
        StateStore, TimeSource,
    },
    AirQualityReport,
};
use embedded_hal::delay::DelayNs;

/// Forced-mode sensor: each measurement produces one fresh sample
pub struct SimSensor {
    pub mode: OperatingMode,
    /// Mode reads that still report `Forced` after a trigger
    pub busy_polls: u32,
    remaining_busy: u32,
    /// Sample latched by the last completed measurement
    latched: Option<RawSample>,
    pub temperature_centi: i16,
    pub humidity_milli: u32,
    pub pressure_pa: u32,
    pub gas_ohm: u32,
    pub gas_valid: bool,
    /// Fail every bus transaction while set
    pub bus_down: bool,
    pub triggers: u32,
    pub fetches: u32,
}

impl SimSensor {
    pub fn new() -> Self {
        Self {
            mode: OperatingMode::Sleep,
            busy_polls: 1,
            remaining_busy: 0,
            latched: None,
            temperature_centi: 2350,
            humidity_milli: 45_000,
            pressure_pa: 101_325,
            gas_ohm: 120_000,
            gas_valid: true,
            bus_down: false,
            triggers: 0,
            fetches: 0,
        }
    }

    fn bus(&self) -> Result<(), DriverError> {
        if self.bus_down {
            Err(DriverError::CommunicationFailure)
        } else {
            Ok(())
        }
    }

    fn complete(&mut self) {
        let mut status = SampleStatus::NEW_DATA | SampleStatus::HEAT_STABLE;
        if self.gas_valid {
            status |= SampleStatus::GAS_VALID;
        }
        self.latched = Some(RawSample {
            status,
            readings: Readings::Fixed {
                temperature: self.temperature_centi,
                pressure: self.pressure_pa,
                humidity: self.humidity_milli,
                gas_resistance: self.gas_ohm,
            },
        });
        self.mode = OperatingMode::Sleep;
    }
}

impl SensorDriver for SimSensor {
    fn init(&mut self) -> Result<(), DriverError> {
        self.bus()
    }

    fn set_config(&mut self, _config: &AcquisitionConfig) -> Result<(), DriverError> {
        self.bus()
    }

    fn set_heater(&mut self, _heater: &HeaterConfig) -> Result<(), DriverError> {
        self.bus()
    }

    fn set_operating_mode(&mut self, mode: OperatingMode) -> Result<(), DriverError> {
        self.bus()?;
        self.mode = mode;
        if mode == OperatingMode::Forced {
            self.triggers += 1;
            self.remaining_busy = self.busy_polls;
        }
        Ok(())
    }

    fn operating_mode(&mut self) -> Result<OperatingMode, DriverError> {
        self.bus()?;
        if self.mode == OperatingMode::Forced {
            if self.remaining_busy == 0 {
                self.complete();
            } else {
                self.remaining_busy -= 1;
            }
        }
        Ok(self.mode)
    }

    fn measurement_duration_us(&mut self, config: &AcquisitionConfig) -> u32 {
        let cycles = config.temperature.samples() + config.humidity.samples() + config.pressure.samples();
        cycles * 2_000 + 1_000
    }

    fn fetch_sample(&mut self) -> Result<RawSample, DriverError> {
        self.bus()?;
        self.fetches += 1;
        // Reading clears the new-data flag
        Ok(self.latched.take().unwrap_or(RawSample {
            status: SampleStatus::empty(),
            readings: Readings::Fixed {
                temperature: 0,
                pressure: 0,
                humidity: 0,
                gas_resistance: 0,
            },
        }))
    }
}

/// Engine with a learned gas baseline as its adaptive state
pub struct BaselineEngine {
    pub period_ns: i64,
    pub baseline: f32,
    pub samples: u32,
    pub subscribed: Vec<SensorRequest>,
    pub processed: Vec<Vec<InputSignal>>,
    pub reject_state: bool,
    /// Report every cycle as due for a forced measurement
    pub trigger: bool,
    pub mask: ProcessMask,
}

impl BaselineEngine {
    pub fn new() -> Self {
        Self {
            period_ns: 3_000_000_000,
            baseline: 0.0,
            samples: 0,
            subscribed: Vec::new(),
            processed: Vec::new(),
            reject_state: false,
            trigger: true,
            mask: ProcessMask::all(),
        }
    }

    fn encode(&self) -> [u8; 8] {
        let mut blob = [0u8; 8];
        blob[..4].copy_from_slice(&self.baseline.to_le_bytes());
        blob[4..].copy_from_slice(&self.samples.to_le_bytes());
        blob
    }
}

impl FusionEngine for BaselineEngine {
    fn init(&mut self) -> Result<(), EngineError> {
        self.baseline = 0.0;
        self.samples = 0;
        Ok(())
    }

    fn set_configuration(&mut self, blob: &[u8]) -> Result<(), EngineError> {
        if blob.starts_with(b"AQCFG") {
            Ok(())
        } else {
            Err(EngineError::Rejected(EngineStatus(-34)))
        }
    }

    fn get_configuration(&mut self, buf: &mut [u8]) -> Result<usize, EngineError> {
        buf[..5].copy_from_slice(b"AQCFG");
        Ok(5)
    }

    fn set_state(&mut self, blob: &[u8]) -> Result<(), EngineError> {
        if self.reject_state || blob.len() != 8 {
            return Err(EngineError::Rejected(EngineStatus(-32)));
        }
        let mut baseline = [0u8; 4];
        let mut samples = [0u8; 4];
        baseline.copy_from_slice(&blob[..4]);
        samples.copy_from_slice(&blob[4..]);
        self.baseline = f32::from_le_bytes(baseline);
        self.samples = u32::from_le_bytes(samples);
        Ok(())
    }

    fn get_state(&mut self, buf: &mut [u8]) -> Result<usize, EngineError> {
        let blob = self.encode();
        buf[..blob.len()].copy_from_slice(&blob);
        Ok(blob.len())
    }

    fn update_subscription(
        &mut self,
        requested: &[SensorRequest],
        required: &mut RequiredSettings,
    ) -> Result<(), EngineError> {
        self.subscribed = requested.to_vec();
        for input in [PhysicalInput::Pressure, PhysicalInput::Temperature, PhysicalInput::Humidity, PhysicalInput::GasResistor] {
            let _ = required.push(RequiredInput {
                sensor_id: input.id(),
                sample_rate_hz: requested[0].sample_rate_hz,
            });
        }
        Ok(())
    }

    fn sensor_control(&mut self, timestamp_ns: TimestampNs) -> SensorSettings {
        SensorSettings {
            next_call_ns: timestamp_ns + self.period_ns,
            acquisition: AcquisitionConfig {
                temperature: Oversampling::X2,
                humidity: Oversampling::X1,
                pressure: Oversampling::X1,
            },
            heater: HeaterConfig {
                enabled: true,
                temperature_c: 320,
                duration_ms: 197,
            },
            trigger_measurement: self.trigger,
            process_data: self.mask,
        }
    }

    fn do_steps(&mut self, inputs: &[InputSignal], outputs: &mut OutputBuffer) -> EngineStatus {
        self.processed.push(inputs.to_vec());
        let ts = inputs.first().map_or(0, |s| s.timestamp_ns);

        let gas = inputs.iter().find(|s| s.sensor == PhysicalInput::GasResistor);
        if let Some(gas) = gas {
            self.samples += 1;
            self.baseline += (gas.value - self.baseline) / self.samples as f32;
            let ratio = if gas.value > 0.0 { self.baseline / gas.value } else { 1.0 };
            push(outputs, VirtualSensor::Iaq, 25.0 * ratio * 2.0, accuracy(self.samples), ts);
            push(outputs, VirtualSensor::RawGas, gas.value, 0, ts);
        }
        if let Some(t) = inputs.iter().find(|s| s.sensor == PhysicalInput::Temperature) {
            let offset = inputs
                .iter()
                .find(|s| s.sensor == PhysicalInput::HeatSource)
                .map_or(0.0, |s| s.value);
            push(outputs, VirtualSensor::HeatCompensatedTemperature, t.value - offset, 0, ts);
        }
        if let Some(p) = inputs.iter().find(|s| s.sensor == PhysicalInput::Pressure) {
            push(outputs, VirtualSensor::RawPressure, p.value, 0, ts);
        }
        debug_assert!(outputs.len() <= MAX_OUTPUTS);

        if gas.is_none() {
            // Gas missing: processed but no IAQ update
            EngineStatus(2)
        } else {
            EngineStatus::OK
        }
    }
}

fn accuracy(samples: u32) -> u8 {
    match samples {
        0..=2 => 0,
        3..=5 => 1,
        6..=9 => 2,
        _ => 3,
    }
}

fn push(outputs: &mut OutputBuffer, sensor: VirtualSensor, value: f32, accuracy: u8, ts: TimestampNs) {
    let _ = outputs.push(OutputSignal {
        sensor_id: sensor.id(),
        value,
        accuracy,
        timestamp_ns: ts,
    });
}

/// Clock advanced only by delays and by `work_us` per cycle
pub struct SimClock {
    pub now_us: TimestampUs,
    pub slept_us: u64,
    pub delays: u32,
}

impl SimClock {
    pub fn new(start_us: TimestampUs) -> Self {
        Self {
            now_us: start_us,
            slept_us: 0,
            delays: 0,
        }
    }

    pub fn advance(&mut self, us: i64) {
        self.now_us += us;
    }
}

impl TimeSource for SimClock {
    fn now_us(&mut self) -> TimestampUs {
        self.now_us
    }

    fn precision_us(&self) -> u32 {
        1
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.delays += 1;
        self.slept_us += u64::from(us);
        self.now_us += i64::from(us);
    }
}

/// Sink that keeps every report
#[derive(Default)]
pub struct Collector {
    pub reports: Vec<AirQualityReport>,
}

impl OutputSink for Collector {
    fn output_ready(&mut self, report: &AirQualityReport) {
        self.reports.push(*report);
    }
}

/// Blob store backed by a vector, shareable between "power cycles"
#[derive(Clone, Default)]
pub struct Flash {
    pub state: Vec<u8>,
    pub config: Vec<u8>,
    pub writes: Rc<Cell<u32>>,
    pub fail_writes: bool,
}

impl StateStore for Flash {
    fn load_state(&mut self, buf: &mut [u8]) -> usize {
        let len = self.state.len().min(buf.len());
        buf[..len].copy_from_slice(&self.state[..len]);
        len
    }

    fn save_state(&mut self, blob: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io);
        }
        self.state = blob.to_vec();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

impl ConfigSource for Flash {
    fn load_config(&mut self, buf: &mut [u8]) -> usize {
        let len = self.config.len().min(buf.len());
        buf[..len].copy_from_slice(&self.config[..len]);
        len
    }
}
