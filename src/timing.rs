//! Overflow-safe elapsed-time arithmetic on a wrapping millisecond counter.
//!
//! The firmware clock is a `u32` millisecond counter that wraps to zero
//! after ~49.7 days.  Every "how long since" question in the monitor goes
//! through [`elapsed_ms`] so a wrap between the stored timestamp and now
//! still yields the true duration.
//!
//! Only a single wrap is handled.  A timestamp left untouched for more than
//! one full counter period aliases to a shorter duration.

/// Modulus of the firmware millisecond counter (2^32).
pub const COUNTER_MODULUS: u64 = 1 << 32;

/// Milliseconds elapsed from `since` to `now` on the `u32` counter.
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    if since > now {
        // (M - since) + now, computed without leaving u32.
        (u32::MAX - since) + 1 + now
    } else {
        now - since
    }
}

/// Elapsed time on a counter that wraps at an arbitrary `modulus`.
///
/// Used for narrower hardware counters (e.g. a 24-bit RTC).  Both inputs
/// must already be below `modulus`.
pub fn elapsed_with_modulus(now: u64, since: u64, modulus: u64) -> u64 {
    debug_assert!(now < modulus && since < modulus);
    if since > now {
        (modulus - since) + now
    } else {
        now - since
    }
}
