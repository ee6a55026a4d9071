//! Capability Traits for the Measurement Loop
//!
//! The loop is written against narrow single-purpose contracts so each
//! collaborator can be swapped for a fake in tests or a different binding on
//! another target.
//!
//! ## Module Organization
//!
//! - [`driver`] - Sensor driver (configure, trigger, poll mode, fetch sample)
//! - [`engine`] - Fusion engine (schedule, process, state and config blobs)
//! - [`time`] - Monotonic microsecond clock
//! - [`storage`] - Durable blob I/O and the output callback
//!
//! Delays are taken from [`embedded_hal::delay::DelayNs`] rather than a
//! trait of our own, so any HAL delay provider plugs in directly.

pub mod driver;
pub mod engine;
pub mod storage;
pub mod time;

pub use driver::{OperatingMode, SensorDriver};
pub use engine::{FusionEngine, OutputBuffer};
pub use storage::{ConfigSource, OutputSink, StateStore};
pub use time::TimeSource;
