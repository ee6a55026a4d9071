//! Time Source Abstraction
//!
//! This module provides the `TimeSource` trait the loop reads its cycle
//! timestamps from.
//!
//! ## Requirements
//!
//! - **Monotonic**: the engine's scheduling assumes time never goes back
//! - **Microseconds**: the loop converts to nanoseconds itself
//! - **Cheap**: read twice per cycle
//!
//! ## Implementations
//!
//! - `aircycle_host::StdPlatform`: `std::time::Instant` on hosts

use crate::time::TimestampUs;

/// Monotonic microsecond clock
///
/// ## Example Implementation
///
/// ```rust
/// use aircycle_core::traits::TimeSource;
/// use aircycle_core::time::TimestampUs;
///
/// struct TickTimer {
///     ticks: u64, // 32 kHz RTC ticks, read from hardware
/// }
///
/// impl TimeSource for TickTimer {
///     fn now_us(&mut self) -> TimestampUs {
///         (self.ticks * 1_000_000 / 32_768) as i64
///     }
///
///     fn precision_us(&self) -> u32 {
///         31
///     }
/// }
/// ```
///
/// ## Platform-Specific Considerations
///
/// ### Bare Metal
/// - Use a free-running timer and extend it to 64 bits
/// - Timer wraparound must not show up as time going backwards
///
/// ### Linux/Unix
/// - Use `CLOCK_MONOTONIC`, never wall-clock time
pub trait TimeSource {
    /// Current time in microseconds since an arbitrary fixed origin
    fn now_us(&mut self) -> TimestampUs;

    /// Smallest step the clock can resolve, in microseconds
    fn precision_us(&self) -> u32;
}

impl<T: TimeSource + ?Sized> TimeSource for &mut T {
    fn now_us(&mut self) -> TimestampUs {
        (**self).now_us()
    }

    fn precision_us(&self) -> u32 {
        (**self).precision_us()
    }
}
