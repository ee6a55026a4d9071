//! Fakes for unit tests
//!
//! Every collaborator records the calls it receives so tests can assert on
//! exactly what the loop did, in what order.

use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::demux::AirQualityReport;
use crate::errors::{DriverError, EngineError, EngineStatus, StorageError};
use crate::sample::{RawSample, Readings, SampleStatus};
use crate::settings::{
    AcquisitionConfig, HeaterConfig, RequiredInput, RequiredSettings, SensorRequest,
    SensorSettings,
};
use crate::signals::{InputSignal, OutputSignal, ProcessMask};
use crate::time::{TimeSource, TimestampNs, TimestampUs};
use crate::traits::{
    ConfigSource, FusionEngine, OperatingMode, OutputBuffer, OutputSink, SensorDriver, StateStore,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverCall {
    Init,
    SetConfig(AcquisitionConfig),
    SetHeater(HeaterConfig),
    SetMode(OperatingMode),
    ReadMode,
    Duration,
    Fetch,
}

/// Driver that finishes each forced measurement after `busy_polls` mode reads
pub struct FakeDriver {
    pub calls: Vec<DriverCall>,
    pub init_error: Option<DriverError>,
    pub config_error: Option<DriverError>,
    pub mode_error: Option<DriverError>,
    pub duration_us: u32,
    pub busy_polls: u32,
    pending_busy: u32,
    pub sample: Result<RawSample, DriverError>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            init_error: None,
            config_error: None,
            mode_error: None,
            duration_us: 12_000,
            busy_polls: 0,
            pending_busy: 0,
            sample: Ok(fresh_sample()),
        }
    }

    pub fn with_sample(mut self, sample: RawSample) -> Self {
        self.sample = Ok(sample);
        self
    }

    pub fn count(&self, call: fn(&DriverCall) -> bool) -> usize {
        self.calls.iter().filter(|c| call(c)).count()
    }
}

impl SensorDriver for FakeDriver {
    fn init(&mut self) -> Result<(), DriverError> {
        self.calls.push(DriverCall::Init);
        self.init_error.map_or(Ok(()), Err)
    }

    fn set_config(&mut self, config: &AcquisitionConfig) -> Result<(), DriverError> {
        self.calls.push(DriverCall::SetConfig(*config));
        self.config_error.map_or(Ok(()), Err)
    }

    fn set_heater(&mut self, heater: &HeaterConfig) -> Result<(), DriverError> {
        self.calls.push(DriverCall::SetHeater(*heater));
        Ok(())
    }

    fn set_operating_mode(&mut self, mode: OperatingMode) -> Result<(), DriverError> {
        self.calls.push(DriverCall::SetMode(mode));
        if mode == OperatingMode::Forced {
            self.pending_busy = self.busy_polls;
        }
        Ok(())
    }

    fn operating_mode(&mut self) -> Result<OperatingMode, DriverError> {
        self.calls.push(DriverCall::ReadMode);
        if let Some(err) = self.mode_error {
            return Err(err);
        }
        if self.pending_busy > 0 {
            self.pending_busy -= 1;
            Ok(OperatingMode::Forced)
        } else {
            Ok(OperatingMode::Sleep)
        }
    }

    fn measurement_duration_us(&mut self, _config: &AcquisitionConfig) -> u32 {
        self.calls.push(DriverCall::Duration);
        self.duration_us
    }

    fn fetch_sample(&mut self) -> Result<RawSample, DriverError> {
        self.calls.push(DriverCall::Fetch);
        self.sample
    }
}

/// Fresh fixed-point sample with a valid gas reading
pub fn fresh_sample() -> RawSample {
    RawSample {
        status: SampleStatus::NEW_DATA | SampleStatus::GAS_VALID | SampleStatus::HEAT_STABLE,
        readings: Readings::Fixed {
            temperature: 2512,
            pressure: 100_870,
            humidity: 41_250,
            gas_resistance: 152_000,
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Init,
    SetConfiguration(usize),
    GetConfiguration,
    SetState(usize),
    GetState,
    UpdateSubscription(usize),
    SensorControl(TimestampNs),
    DoSteps(usize),
}

/// Engine returning canned settings and outputs
pub struct ScriptedEngine {
    pub calls: Vec<EngineCall>,
    pub settings: SensorSettings,
    /// `next_call_ns = timestamp + period_ns`
    pub period_ns: i64,
    pub outputs: Vec<OutputSignal>,
    pub status: EngineStatus,
    pub state: Vec<u8>,
    pub configuration: Vec<u8>,
    pub subscription: Vec<SensorRequest>,
    pub inputs_seen: Vec<Vec<InputSignal>>,
    pub init_error: Option<EngineError>,
    pub config_error: Option<EngineError>,
    pub state_error: Option<EngineError>,
    pub subscription_error: Option<EngineError>,
    pub get_state_error: Option<EngineError>,
    /// Length `get_state` claims to have written, whatever it copied
    pub reported_state_len: Option<usize>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            settings: SensorSettings {
                trigger_measurement: true,
                process_data: ProcessMask::all(),
                ..SensorSettings::default()
            },
            period_ns: 3_000_000_000,
            outputs: Vec::new(),
            status: EngineStatus::OK,
            state: Vec::from(&b"fresh"[..]),
            configuration: Vec::from(&b"default-config"[..]),
            subscription: Vec::new(),
            inputs_seen: Vec::new(),
            init_error: None,
            config_error: None,
            state_error: None,
            subscription_error: None,
            get_state_error: None,
            reported_state_len: None,
        }
    }

    pub fn idle() -> Self {
        let mut engine = Self::new();
        engine.settings.trigger_measurement = false;
        engine.settings.process_data = ProcessMask::empty();
        engine
    }

    pub fn has_call(&self, call: &EngineCall) -> bool {
        self.calls.contains(call)
    }
}

fn copy_into(src: &[u8], buf: &mut [u8]) -> Result<usize, EngineError> {
    if src.len() > buf.len() {
        return Err(EngineError::BlobTooLarge {
            len: src.len(),
            max: buf.len(),
        });
    }
    buf[..src.len()].copy_from_slice(src);
    Ok(src.len())
}

impl FusionEngine for ScriptedEngine {
    fn init(&mut self) -> Result<(), EngineError> {
        self.calls.push(EngineCall::Init);
        self.init_error.map_or(Ok(()), Err)
    }

    fn set_configuration(&mut self, blob: &[u8]) -> Result<(), EngineError> {
        self.calls.push(EngineCall::SetConfiguration(blob.len()));
        if let Some(err) = self.config_error {
            return Err(err);
        }
        self.configuration = blob.to_vec();
        Ok(())
    }

    fn get_configuration(&mut self, buf: &mut [u8]) -> Result<usize, EngineError> {
        self.calls.push(EngineCall::GetConfiguration);
        copy_into(&self.configuration, buf)
    }

    fn set_state(&mut self, blob: &[u8]) -> Result<(), EngineError> {
        self.calls.push(EngineCall::SetState(blob.len()));
        if let Some(err) = self.state_error {
            return Err(err);
        }
        self.state = blob.to_vec();
        Ok(())
    }

    fn get_state(&mut self, buf: &mut [u8]) -> Result<usize, EngineError> {
        self.calls.push(EngineCall::GetState);
        if let Some(err) = self.get_state_error {
            return Err(err);
        }
        let copied = copy_into(&self.state, buf)?;
        Ok(self.reported_state_len.unwrap_or(copied))
    }

    fn update_subscription(
        &mut self,
        requested: &[SensorRequest],
        required: &mut RequiredSettings,
    ) -> Result<(), EngineError> {
        self.calls.push(EngineCall::UpdateSubscription(requested.len()));
        if let Some(err) = self.subscription_error {
            return Err(err);
        }
        self.subscription = requested.to_vec();
        for id in [1u8, 2, 3, 4] {
            let _ = required.push(RequiredInput {
                sensor_id: id,
                sample_rate_hz: requested[0].sample_rate_hz,
            });
        }
        Ok(())
    }

    fn sensor_control(&mut self, timestamp_ns: TimestampNs) -> SensorSettings {
        self.calls.push(EngineCall::SensorControl(timestamp_ns));
        SensorSettings {
            next_call_ns: timestamp_ns + self.period_ns,
            ..self.settings
        }
    }

    fn do_steps(&mut self, inputs: &[InputSignal], outputs: &mut OutputBuffer) -> EngineStatus {
        self.calls.push(EngineCall::DoSteps(inputs.len()));
        self.inputs_seen.push(inputs.to_vec());
        for output in &self.outputs {
            let _ = outputs.push(*output);
        }
        self.status
    }
}

/// Clock that only moves when the loop sleeps (plus optional work per read)
pub struct SimPlatform {
    pub now_us: TimestampUs,
    pub sleeps: Vec<u32>,
    /// Added to the clock on every read, to model time spent working
    pub work_per_read_us: i64,
}

impl SimPlatform {
    pub fn new(start_us: TimestampUs) -> Self {
        Self {
            now_us: start_us,
            sleeps: Vec::new(),
            work_per_read_us: 0,
        }
    }
}

impl TimeSource for SimPlatform {
    fn now_us(&mut self) -> TimestampUs {
        let now = self.now_us;
        self.now_us += self.work_per_read_us;
        now
    }

    fn precision_us(&self) -> u32 {
        1
    }
}

impl DelayNs for SimPlatform {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.sleeps.push(us);
        self.now_us += us as i64;
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub reports: Vec<AirQualityReport>,
}

impl OutputSink for RecordingSink {
    fn output_ready(&mut self, report: &AirQualityReport) {
        self.reports.push(*report);
    }
}

/// In-memory blob storage
#[derive(Default)]
pub struct MemoryStore {
    pub state: Vec<u8>,
    pub config: Vec<u8>,
    pub saves: Vec<Vec<u8>>,
    pub save_error: Option<StorageError>,
}

impl MemoryStore {
    pub fn with_state(state: &[u8]) -> Self {
        Self {
            state: state.to_vec(),
            ..Self::default()
        }
    }
}

impl StateStore for MemoryStore {
    fn load_state(&mut self, buf: &mut [u8]) -> usize {
        let len = self.state.len().min(buf.len());
        buf[..len].copy_from_slice(&self.state[..len]);
        len
    }

    fn save_state(&mut self, blob: &[u8]) -> Result<(), StorageError> {
        if let Some(err) = self.save_error {
            return Err(err);
        }
        self.state = blob.to_vec();
        self.saves.push(blob.to_vec());
        Ok(())
    }
}

impl ConfigSource for MemoryStore {
    fn load_config(&mut self, buf: &mut [u8]) -> usize {
        let len = self.config.len().min(buf.len());
        buf[..len].copy_from_slice(&self.config[..len]);
        len
    }
}
