//! Measurement loop for duty-cycled gas sensors feeding an air-quality
//! fusion engine.
//!
//! The crate owns the control loop only. The sensor driver, the fusion engine
//! and the platform (clock, delay, durable storage) are injected through the
//! traits in [`traits`], so every piece can be replaced by a fake in tests.
//!
//! Key constraints:
//! - Single-threaded, one measurement at a time
//! - No heap allocation: per-cycle buffers are `heapless` containers
//! - The only suspension points are explicit delays
//!
//! ```no_run
//! # fn demo<D, E, P, S, St>(driver: D, engine: E, platform: &mut P, sink: &mut S, store: &mut St)
//! # where
//! #     D: aircycle_core::traits::SensorDriver,
//! #     E: aircycle_core::traits::FusionEngine,
//! #     P: aircycle_core::traits::TimeSource + embedded_hal::delay::DelayNs,
//! #     S: aircycle_core::traits::OutputSink,
//! #     St: aircycle_core::traits::StateStore,
//! # {
//! use aircycle_core::{AirQualityLoop, LoopConfig, SampleRate, NoConfig};
//!
//! let config = LoopConfig::builder()
//!     .with_sample_rate(SampleRate::LowPower)
//!     .with_temperature_offset(1.5)
//!     .with_save_interval(10_000)
//!     .build()
//!     .expect("valid config");
//!
//! let mut air = AirQualityLoop::init(config, driver, engine, store, &mut NoConfig)
//!     .expect("sensor and engine came up");
//! air.run_forever(platform, sink, store);
//! # }
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod assembler;
pub mod config;
pub mod constants;
pub mod control;
pub mod demux;
pub mod errors;
pub mod persistence;
pub mod sample;
pub mod settings;
pub mod signals;
pub mod subscription;
pub mod time;
pub mod traits;
pub mod trigger;

#[cfg(test)]
pub(crate) mod mock;

// Public API
pub use config::{LoopConfig, LoopConfigBuilder};
pub use control::{AirQualityLoop, CycleReport};
pub use demux::{AirQualityReport, IaqLevel};
pub use errors::{
    ConfigError, DriverError, EngineError, EngineStatus, InitError, InitStage, StorageError,
};
pub use persistence::{NoConfig, NoState, SaveOutcome};
pub use settings::{SampleRate, SensorSettings};
pub use signals::{Accuracy, InputSignal, OutputSignal, PhysicalInput, ProcessMask, VirtualSensor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
