//! Time handling for the measurement loop
//!
//! The platform supplies a monotonic microsecond clock; the engine works in
//! nanoseconds. Conversions between the two live here. Clock
//! implementations belong to the platform.

pub use crate::traits::TimeSource;

use crate::constants::NS_PER_US;

/// Monotonic timestamp in microseconds
pub type TimestampUs = i64;

/// Monotonic timestamp in nanoseconds, as the engine expects
pub type TimestampNs = i64;

/// Microseconds to engine nanoseconds
pub fn us_to_ns(us: TimestampUs) -> TimestampNs {
    us.saturating_mul(NS_PER_US)
}

/// Time left until `deadline_ns`, in whole microseconds
///
/// `None` when the deadline has already passed (or is now): the caller must
/// not sleep at all. Long waits saturate at `u32::MAX` µs.
pub fn remaining_us(deadline_ns: TimestampNs, now_us: TimestampUs) -> Option<u32> {
    let remaining = deadline_ns.saturating_sub(us_to_ns(now_us)) / NS_PER_US;
    if remaining > 0 {
        Some(u32::try_from(remaining).unwrap_or(u32::MAX))
    } else {
        None
    }
}
