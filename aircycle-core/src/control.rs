//! Main loop
//!
//! [`AirQualityLoop`] owns the sensor driver and the fusion engine and runs
//! the measurement cycle:
//!
//! ```text
//! now ─▶ sensor_control ─▶ trigger ─▶ assemble ─▶ process ─▶ persist ─▶ sleep
//!  ▲                                                                      │
//!  └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The clock, delay, output sink and state store are borrowed per call, so a
//! test can inspect them between cycles. Cancellation is cooperative and only
//! checked between cycles; sleeps are never interrupted.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;

use crate::assembler::{InputAssembler, InputBatch};
use crate::config::LoopConfig;
use crate::demux::{self, AirQualityReport};
use crate::errors::{EngineError, InitError, InitStage};
use crate::persistence::{self, Restored, SaveOutcome, StatePersistence};
use crate::settings::SensorSettings;
use crate::subscription;
use crate::time::{remaining_us, us_to_ns, TimeSource, TimestampNs};
use crate::traits::{ConfigSource, FusionEngine, OutputSink, SensorDriver, StateStore};
use crate::trigger::{AcquisitionTrigger, TriggerOutcome};

/// Everything one cycle did
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Timestamp captured at the start of the cycle
    pub timestamp_ns: TimestampNs,
    /// Settings the engine chose for this cycle
    pub settings: SensorSettings,
    /// Acquisition result
    pub trigger: TriggerOutcome,
    /// Inputs handed to the engine
    pub inputs: InputBatch,
    /// Report sent to the sink, if the batch was non-empty
    pub report: Option<AirQualityReport>,
    /// Persistence check result
    pub save: SaveOutcome,
    /// End-of-cycle sleep, `None` on overrun
    pub sleep_us: Option<u32>,
}

/// Duty-cycled measurement loop
pub struct AirQualityLoop<D, E> {
    driver: D,
    engine: E,
    config: LoopConfig,
    trigger: AcquisitionTrigger,
    assembler: InputAssembler,
    persistence: StatePersistence,
    cycles: u64,
}

impl<D, E> AirQualityLoop<D, E>
where
    D: SensorDriver,
    E: FusionEngine,
{
    /// Bring up driver and engine, restore persisted blobs, subscribe
    ///
    /// Stops at the first failing step. Engine warnings count as failures
    /// here: a half-applied configuration is worse than none.
    pub fn init<S, C>(
        config: LoopConfig,
        mut driver: D,
        mut engine: E,
        state: &mut S,
        configuration: &mut C,
    ) -> Result<Self, InitError>
    where
        S: StateStore + ?Sized,
        C: ConfigSource + ?Sized,
    {
        driver.init().map_err(InitError::driver)?;
        log_info!("sensor driver ready");

        engine
            .init()
            .map_err(|e| InitError::engine(InitStage::Engine, e))?;

        match persistence::restore_configuration(&mut engine, configuration)
            .map_err(|e| InitError::engine(InitStage::Configuration, e))?
        {
            Restored::Applied(len) => log_info!("engine configuration loaded ({} bytes)", len),
            Restored::Nothing => log_info!("no engine configuration stored, using defaults"),
        }

        match persistence::restore_state(&mut engine, state)
            .map_err(|e| InitError::engine(InitStage::State, e))?
        {
            Restored::Applied(len) => log_info!("engine state restored ({} bytes)", len),
            Restored::Nothing => log_info!("no engine state stored, starting fresh"),
        }

        subscription::configure_outputs(&mut engine, config.sample_rate)
            .map_err(|e| InitError::engine(InitStage::Subscription, e))?;
        log_info!("subscribed at {:?}", config.sample_rate);

        Ok(Self {
            driver,
            engine,
            trigger: AcquisitionTrigger::new(config.poll_slice_us),
            assembler: InputAssembler::new(config.temperature_offset),
            persistence: StatePersistence::new(config.save_interval),
            config,
            cycles: 0,
        })
    }

    /// Run one measurement cycle
    pub fn run_cycle<P, S, St>(&mut self, platform: &mut P, sink: &mut S, store: &mut St) -> CycleReport
    where
        P: TimeSource + DelayNs + ?Sized,
        S: OutputSink + ?Sized,
        St: StateStore + ?Sized,
    {
        let timestamp_ns = us_to_ns(platform.now_us());
        let settings = self.engine.sensor_control(timestamp_ns);

        let trigger = self.trigger.run(&mut self.driver, platform, &settings);
        let inputs = self
            .assembler
            .assemble(&mut self.driver, timestamp_ns, settings.process_data);
        let report = demux::process(&mut self.engine, &inputs, sink);

        let save = self.persistence.tick(&mut self.engine, store);
        self.cycles = self.cycles.saturating_add(1);

        let now_us = platform.now_us();
        let sleep_us = remaining_us(settings.next_call_ns, now_us);
        match sleep_us {
            Some(us) => platform.delay_us(us),
            None => log_debug!(
                "cycle overran next call by {} ns",
                us_to_ns(now_us).saturating_sub(settings.next_call_ns)
            ),
        }

        CycleReport {
            timestamp_ns,
            settings,
            trigger,
            inputs,
            report,
            save,
            sleep_us,
        }
    }

    /// Run cycles until `stop` is set, returning how many ran
    ///
    /// `stop` is checked before every cycle.
    pub fn run_until<P, S, St>(&mut self, platform: &mut P, sink: &mut S, store: &mut St, stop: &AtomicBool) -> u64
    where
        P: TimeSource + DelayNs + ?Sized,
        S: OutputSink + ?Sized,
        St: StateStore + ?Sized,
    {
        let mut ran = 0;
        while !stop.load(Ordering::Acquire) {
            self.run_cycle(platform, sink, store);
            ran += 1;
        }
        log_info!("loop stopped after {} cycles", ran);
        ran
    }

    /// Run cycles forever
    pub fn run_forever<P, S, St>(&mut self, platform: &mut P, sink: &mut S, store: &mut St) -> !
    where
        P: TimeSource + DelayNs + ?Sized,
        S: OutputSink + ?Sized,
        St: StateStore + ?Sized,
    {
        loop {
            self.run_cycle(platform, sink, store);
        }
    }

    /// Snapshot and save engine state now, outside the interval
    ///
    /// The next periodic save comes a full interval after this one.
    pub fn save_state_now<St>(&mut self, store: &mut St) -> SaveOutcome
    where
        St: StateStore + ?Sized,
    {
        self.persistence.save_now(&mut self.engine, store)
    }

    /// Serialize the active engine configuration into `buf`
    pub fn export_configuration(&mut self, buf: &mut [u8]) -> Result<usize, EngineError> {
        self.engine.get_configuration(buf)
    }

    /// Active configuration
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Cycles run so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Samples since the last state save
    pub fn samples_since_save(&self) -> u32 {
        self.persistence.counter()
    }

    /// Sensor driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable sensor driver, for driver-specific calls between cycles
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Fusion engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Give back driver and engine
    pub fn into_parts(self) -> (D, E) {
        (self.driver, self.engine)
    }
}
