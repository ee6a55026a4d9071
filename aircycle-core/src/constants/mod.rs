//! Constants for the Measurement Loop
//!
//! Numeric values used across the loop live here, grouped by which
//! collaborator defines them.
//!
//! ## Organization
//!
//! - **Engine**: buffer maxima and cadence rates declared by the fusion engine
//! - **Sensor**: status bits, operating modes and unit scales of the driver
//!
//! The loop never chooses these values itself; they describe the contracts of
//! the collaborators it drives.

/// Fusion engine maxima and sample rates.
pub mod engine;

/// Sensor driver status bits, modes and unit scales.
pub mod sensor;

pub use engine::{
    MAX_OUTPUTS, MAX_PHYSICAL_SENSORS, MAX_PROPERTY_BLOB_SIZE, MAX_STATE_BLOB_SIZE,
    NUM_REQUESTED_OUTPUTS, SAMPLE_RATE_LP_HZ, SAMPLE_RATE_ULP_HZ,
};

pub use sensor::{
    DEFAULT_POLL_SLICE_US, HUMIDITY_FIXED_POINT_SCALE, NS_PER_US,
    TEMPERATURE_FIXED_POINT_SCALE,
};
