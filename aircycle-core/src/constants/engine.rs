//! Fusion Engine Limits
//!
//! Maxima the engine declares for its buffers, and the two cadences the loop
//! can subscribe with. Buffers built from these sizes are stack allocated.

// ===== BUFFER MAXIMA =====

/// Maximum number of physical inputs the engine accepts in one step.
///
/// Bounds the per-cycle input batch. At most five are ever produced
/// (pressure, temperature, heat source, humidity, gas).
pub const MAX_PHYSICAL_SENSORS: usize = 8;

/// Maximum number of outputs one processing step can produce.
pub const MAX_OUTPUTS: usize = 19;

/// Largest serialized state snapshot the engine produces.
///
/// ~221 bytes, small enough for a single flash page or EEPROM block.
pub const MAX_STATE_BLOB_SIZE: usize = 221;

/// Largest configuration blob the engine accepts.
pub const MAX_PROPERTY_BLOB_SIZE: usize = 2277;

/// Number of derived outputs the loop subscribes to.
pub const NUM_REQUESTED_OUTPUTS: usize = 10;

// ===== SAMPLE RATES =====

/// Ultra-low-power cadence: one sample every 300 s.
pub const SAMPLE_RATE_ULP_HZ: f32 = 0.003_333_3;

/// Low-power cadence: one sample every 3 s.
pub const SAMPLE_RATE_LP_HZ: f32 = 0.333_33;
