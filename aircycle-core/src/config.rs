//! Loop configuration
//!
//! Everything the loop needs that is not a capability: the cadence to
//! subscribe with, the device's self-heating offset, how often to persist
//! engine state, and the poll slice used while waiting for a measurement.
//!
//! ```rust
//! use aircycle_core::{LoopConfig, SampleRate};
//!
//! let config = LoopConfig::builder()
//!     .with_sample_rate(SampleRate::UltraLowPower)
//!     .with_temperature_offset(2.0)
//!     .with_save_interval(288) // once a day at 300 s cadence
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.save_interval, 288);
//! ```

use crate::constants::DEFAULT_POLL_SLICE_US;
use crate::errors::ConfigError;
use crate::settings::SampleRate;

/// Default state save interval, in samples
pub const DEFAULT_SAVE_INTERVAL: u32 = 10_000;

/// Validated loop configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoopConfig {
    /// Output cadence
    pub sample_rate: SampleRate,
    /// Device self-heating in °C, passed to the engine with every temperature
    pub temperature_offset: f32,
    /// Persist engine state every this many cycles
    pub save_interval: u32,
    /// Sleep between mode polls while a measurement finishes, in µs
    pub poll_slice_us: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            sample_rate: SampleRate::LowPower,
            temperature_offset: 0.0,
            save_interval: DEFAULT_SAVE_INTERVAL,
            poll_slice_us: DEFAULT_POLL_SLICE_US,
        }
    }
}

impl LoopConfig {
    /// Start from defaults
    pub fn builder() -> LoopConfigBuilder {
        LoopConfigBuilder::new()
    }

    /// Check invariants; needed after deserializing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.save_interval == 0 {
            return Err(ConfigError::ZeroSaveInterval);
        }
        if self.poll_slice_us == 0 {
            return Err(ConfigError::ZeroPollSlice);
        }
        if !self.temperature_offset.is_finite() {
            return Err(ConfigError::InvalidTemperatureOffset(self.temperature_offset));
        }
        Ok(())
    }
}

/// Builder for [`LoopConfig`]
#[derive(Debug, Clone)]
pub struct LoopConfigBuilder {
    config: LoopConfig,
}

impl LoopConfigBuilder {
    /// Builder seeded with defaults
    pub fn new() -> Self {
        Self {
            config: LoopConfig::default(),
        }
    }

    /// Output cadence
    pub fn with_sample_rate(mut self, rate: SampleRate) -> Self {
        self.config.sample_rate = rate;
        self
    }

    /// Self-heating offset in °C
    pub fn with_temperature_offset(mut self, offset_c: f32) -> Self {
        self.config.temperature_offset = offset_c;
        self
    }

    /// State save interval in samples
    pub fn with_save_interval(mut self, samples: u32) -> Self {
        self.config.save_interval = samples;
        self
    }

    /// Mode poll slice in µs
    pub fn with_poll_slice_us(mut self, us: u32) -> Self {
        self.config.poll_slice_us = us;
        self
    }

    /// Validate and finish
    pub fn build(self) -> Result<LoopConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for LoopConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
