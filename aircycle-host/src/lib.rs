//! Host Capabilities for the AirCycle Loop
//!
//! ## Overview
//!
//! `aircycle-core` only describes what it needs from the platform. This crate
//! supplies those capabilities on targets with `std`:
//!
//! - **Storage**: engine state and configuration blobs in plain files
//! - **Platform**: monotonic clock from `std::time::Instant`, delays through
//!   `std::thread::sleep`
//! - **Sinks**: reports to the `log` facade or as JSON lines to any writer
//! - **Config**: `LoopConfig` loaded from a JSON file
//!
//! ## Example Usage
//!
//! ```no_run
//! use aircycle_host::{load_loop_config, FileConfigSource, FileStateStore, JsonLinesSink, StdPlatform};
//!
//! # fn run<D, E>(driver: D, engine: E) -> Result<(), Box<dyn std::error::Error>>
//! # where D: aircycle_core::traits::SensorDriver, E: aircycle_core::traits::FusionEngine {
//! let config = load_loop_config("/etc/aircycle/loop.json")?;
//! let mut state = FileStateStore::new("/var/lib/aircycle/state.bin");
//! let mut engine_config = FileConfigSource::new("/etc/aircycle/engine.config");
//!
//! let mut air = aircycle_core::AirQualityLoop::init(config, driver, engine, &mut state, &mut engine_config)?;
//! let mut sink = JsonLinesSink::new(std::io::stdout());
//! air.run_forever(&mut StdPlatform::new(), &mut sink, &mut state);
//! # }
//! ```

pub mod config;
pub mod error;
pub mod platform;
pub mod sink;
pub mod storage;

pub use config::load_loop_config;
pub use error::HostError;
pub use platform::StdPlatform;
pub use sink::{JsonLinesSink, LogSink};
pub use storage::{FileConfigSource, FileStateStore};
