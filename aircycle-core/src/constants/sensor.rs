//! Sensor Driver Conventions
//!
//! Status bits, operating mode codes and unit scales of the gas sensor
//! driver, as seen by the loop.

// ===== SAMPLE STATUS BITS =====

/// Sample holds data from a measurement not yet read.
pub const STATUS_NEW_DATA: u8 = 0x80;

/// Gas resistance in this sample is valid.
pub const STATUS_GAS_VALID: u8 = 0x20;

/// Heater reached its target temperature.
pub const STATUS_HEAT_STABLE: u8 = 0x10;

// ===== OPERATING MODES =====

/// Sensor idle, data (if any) latched.
pub const MODE_SLEEP: u8 = 0;

/// Single-shot measurement in progress.
pub const MODE_FORCED: u8 = 1;

/// Parallel heater-profile mode.
pub const MODE_PARALLEL: u8 = 2;

/// Sequential heater-profile mode.
pub const MODE_SEQUENTIAL: u8 = 3;

// ===== TIMING =====

/// Sleep between operating-mode polls once the expected duration elapsed.
///
/// 5 ms is well under one heater step, so the loop rarely overshoots the
/// end of a measurement by more than one slice.
pub const DEFAULT_POLL_SLICE_US: u32 = 5_000;

/// Nanoseconds per microsecond, for engine timestamps.
pub const NS_PER_US: i64 = 1_000;

// ===== UNIT SCALES =====

/// Fixed-point temperature is reported in centi-degrees Celsius.
pub const TEMPERATURE_FIXED_POINT_SCALE: f32 = 100.0;

/// Fixed-point humidity is reported in milli-percent relative humidity.
pub const HUMIDITY_FIXED_POINT_SCALE: f32 = 1000.0;
