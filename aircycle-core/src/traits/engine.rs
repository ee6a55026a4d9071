//! Fusion Engine Contract
//!
//! The engine derives air-quality metrics from raw physical signals and holds
//! all adaptive state across cycles. Its algorithm is opaque to the loop; the
//! loop only needs the calls below.
//!
//! ## Call Sequence
//!
//! ```text
//! init ─▶ set_configuration? ─▶ set_state? ─▶ update_subscription
//!                                                   │
//!        ┌──────────────────────────────────────────┘
//!        ▼
//!   sensor_control(t) ─▶ do_steps(inputs) ─▶ get_state (every N cycles)
//!        ▲                                         │
//!        └─────────────────────────────────────────┘
//! ```
//!
//! ## Buffers
//!
//! Blob buffers are sized by the engine maxima in
//! [`constants::engine`](crate::constants::engine). Output buffers are
//! `heapless` vectors, so an engine can never write past the capacity the
//! loop provides.

use heapless::Vec;

use crate::constants::MAX_OUTPUTS;
use crate::errors::{EngineError, EngineStatus};
use crate::settings::{RequiredSettings, SensorRequest, SensorSettings};
use crate::signals::{InputSignal, OutputSignal};
use crate::time::TimestampNs;

/// Output vector filled by one processing step
pub type OutputBuffer = Vec<OutputSignal, MAX_OUTPUTS>;

/// Air-quality fusion engine
pub trait FusionEngine {
    /// Reset to a fresh instance with default state
    fn init(&mut self) -> Result<(), EngineError>;

    /// Load a serialized configuration
    fn set_configuration(&mut self, blob: &[u8]) -> Result<(), EngineError>;

    /// Serialize the active configuration into `buf`, returning its length
    fn get_configuration(&mut self, buf: &mut [u8]) -> Result<usize, EngineError>;

    /// Restore adaptive state from a previous snapshot
    fn set_state(&mut self, blob: &[u8]) -> Result<(), EngineError>;

    /// Snapshot adaptive state into `buf`, returning its length
    fn get_state(&mut self, buf: &mut [u8]) -> Result<usize, EngineError>;

    /// Enable outputs at the requested rates
    ///
    /// The engine fills `required` with the physical inputs it will need.
    fn update_subscription(
        &mut self,
        requested: &[SensorRequest],
        required: &mut RequiredSettings,
    ) -> Result<(), EngineError>;

    /// Decide this cycle's acquisition and the next wake-up time
    ///
    /// Pure computation; no I/O.
    fn sensor_control(&mut self, timestamp_ns: TimestampNs) -> SensorSettings;

    /// Process one batch of inputs
    ///
    /// `outputs` arrives empty; the engine pushes what it produced, possibly
    /// nothing. The returned status is informational and travels with the
    /// report.
    fn do_steps(&mut self, inputs: &[InputSignal], outputs: &mut OutputBuffer) -> EngineStatus;
}

impl<T: FusionEngine + ?Sized> FusionEngine for &mut T {
    fn init(&mut self) -> Result<(), EngineError> {
        (**self).init()
    }

    fn set_configuration(&mut self, blob: &[u8]) -> Result<(), EngineError> {
        (**self).set_configuration(blob)
    }

    fn get_configuration(&mut self, buf: &mut [u8]) -> Result<usize, EngineError> {
        (**self).get_configuration(buf)
    }

    fn set_state(&mut self, blob: &[u8]) -> Result<(), EngineError> {
        (**self).set_state(blob)
    }

    fn get_state(&mut self, buf: &mut [u8]) -> Result<usize, EngineError> {
        (**self).get_state(buf)
    }

    fn update_subscription(
        &mut self,
        requested: &[SensorRequest],
        required: &mut RequiredSettings,
    ) -> Result<(), EngineError> {
        (**self).update_subscription(requested, required)
    }

    fn sensor_control(&mut self, timestamp_ns: TimestampNs) -> SensorSettings {
        (**self).sensor_control(timestamp_ns)
    }

    fn do_steps(&mut self, inputs: &[InputSignal], outputs: &mut OutputBuffer) -> EngineStatus {
        (**self).do_steps(inputs, outputs)
    }
}
