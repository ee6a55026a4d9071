//! Error and Status Types for the Measurement Loop
//!
//! ## Design Philosophy
//!
//! Errors are small `Copy` values with no heap data, so they can be returned
//! from the hot path and stored without allocation. Status codes reported by
//! the collaborators (sensor driver, fusion engine) are preserved verbatim so
//! they can be handed back to the application unchanged.
//!
//! ## Severity
//!
//! Only initialization failures are fatal. Everything that goes wrong inside
//! a running cycle is either swallowed (driver and storage errors, the next
//! cycle retries) or forwarded with the output report (engine status).
//!
//! ```rust
//! use aircycle_core::{EngineStatus, InitError, InitStage};
//!
//! fn report(err: InitError) {
//!     let (driver, engine) = err.status_pair();
//!     match err.stage {
//!         InitStage::Driver => { /* check wiring, driver code in `driver` */ }
//!         InitStage::State => { /* persisted state is stale or corrupt */ }
//!         _ => { /* engine rejected something, code in `engine` */ }
//!     }
//!     let _ = (driver, engine);
//! }
//!
//! assert!(EngineStatus::OK.is_ok());
//! assert!(EngineStatus(2).is_warning());
//! ```

use core::fmt;

use thiserror_no_std::Error;

/// Errors reported by the sensor driver
///
/// Codes mirror the driver's signed status convention (0 = OK, negative =
/// error) so they can be reported back in [`InitError`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// Driver handle or callback missing
    #[error("driver handle or callback missing")]
    NullPointer,

    /// Bus transaction failed
    #[error("bus communication failure")]
    CommunicationFailure,

    /// No device answered with the expected chip id
    #[error("sensor not found")]
    DeviceNotFound,

    /// Bus transfer length out of range
    #[error("invalid transfer length")]
    InvalidLength,

    /// Sensor self test did not pass
    #[error("sensor self test failed")]
    SelfTestFailed,

    /// Any other negative driver code
    #[error("driver status {0}")]
    Other(i8),
}

impl DriverError {
    /// Signed driver status code
    pub fn code(&self) -> i8 {
        match self {
            Self::NullPointer => -1,
            Self::CommunicationFailure => -2,
            Self::DeviceNotFound => -3,
            Self::InvalidLength => -4,
            Self::SelfTestFailed => -5,
            Self::Other(code) => *code,
        }
    }

    /// Map a raw driver status to a result (0 and positive codes are success)
    pub fn check(code: i8) -> Result<(), DriverError> {
        match code {
            c if c >= 0 => Ok(()),
            -1 => Err(Self::NullPointer),
            -2 => Err(Self::CommunicationFailure),
            -3 => Err(Self::DeviceNotFound),
            -4 => Err(Self::InvalidLength),
            -5 => Err(Self::SelfTestFailed),
            c => Err(Self::Other(c)),
        }
    }
}

/// Raw status returned by the fusion engine
///
/// Zero is success, negative values are errors and positive values are
/// warnings. The status of every processing call travels with its report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineStatus(pub i32);

impl EngineStatus {
    /// Success
    pub const OK: EngineStatus = EngineStatus(0);

    /// True for exactly zero
    pub fn is_ok(&self) -> bool {
        self.0 == 0
    }

    /// True for positive codes
    pub fn is_warning(&self) -> bool {
        self.0 > 0
    }

    /// True for negative codes
    pub fn is_error(&self) -> bool {
        self.0 < 0
    }

    /// Strict check: anything but OK is a rejection
    pub fn into_result(self) -> Result<(), EngineError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(EngineError::Rejected(self))
        }
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors reported by the fusion engine
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Engine returned a non-OK status
    #[error("engine rejected call with status {0}")]
    Rejected(EngineStatus),

    /// Blob does not fit the engine's declared maximum
    #[error("blob of {len} bytes exceeds engine maximum of {max}")]
    BlobTooLarge {
        /// Length that was offered
        len: usize,
        /// Engine-declared maximum
        max: usize,
    },
}

impl EngineError {
    /// Status code to report back to the caller
    pub fn status(&self) -> EngineStatus {
        match self {
            Self::Rejected(status) => *status,
            // Matches the engine's "invalid length" family of codes
            Self::BlobTooLarge { .. } => EngineStatus(-41),
        }
    }
}

/// Durable storage failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Backing store not present or not writable
    #[error("storage unavailable")]
    Unavailable,

    /// Read or write failed part way
    #[error("storage I/O failure")]
    Io,
}

/// Rejected loop configuration
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Save interval must be at least one sample
    #[error("state save interval must be at least one sample")]
    ZeroSaveInterval,

    /// Poll slice must be non-zero or polling would spin
    #[error("poll slice must be non-zero")]
    ZeroPollSlice,

    /// Temperature offset is NaN or infinite
    #[error("temperature offset {0} is not finite")]
    InvalidTemperatureOffset(f32),
}

/// Initialization step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStage {
    /// Sensor driver bring-up
    Driver,
    /// Fusion engine bring-up
    Engine,
    /// Applying the persisted engine configuration
    Configuration,
    /// Restoring the persisted engine state
    State,
    /// Subscribing to outputs
    Subscription,
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Driver => "driver",
            Self::Engine => "engine",
            Self::Configuration => "configuration",
            Self::State => "state",
            Self::Subscription => "subscription",
        };
        f.write_str(name)
    }
}

/// Fatal initialization failure
///
/// Carries the combined driver/engine status pair. Exactly one of the two is
/// non-zero: initialization stops at the first failing step.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("initialization failed at {stage}: driver status {driver_status}, engine status {engine_status}")]
pub struct InitError {
    /// Step that failed
    pub stage: InitStage,
    /// Driver status (0 unless the driver failed)
    pub driver_status: i8,
    /// Engine status (0 unless the engine failed)
    pub engine_status: i32,
}

impl InitError {
    /// Driver bring-up failed
    pub fn driver(error: DriverError) -> Self {
        Self {
            stage: InitStage::Driver,
            driver_status: error.code(),
            engine_status: 0,
        }
    }

    /// An engine call failed during `stage`
    pub fn engine(stage: InitStage, error: EngineError) -> Self {
        Self {
            stage,
            driver_status: 0,
            engine_status: error.status().0,
        }
    }

    /// `(driver_status, engine_status)`
    pub fn status_pair(&self) -> (i8, i32) {
        (self.driver_status, self.engine_status)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DriverError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "driver status {}", self.code())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EngineError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Rejected(status) => defmt::write!(fmt, "engine status {}", status.0),
            Self::BlobTooLarge { len, max } => defmt::write!(fmt, "blob {} > max {}", len, max),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InitError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "init failed: driver {}, engine {}",
            self.driver_status,
            self.engine_status
        )
    }
}
