//! Monotonic time source

/// Free-running microsecond clock
///
/// The counter is 32 bits wide and wraps roughly every 71.6 minutes.
/// Consumers must compare timestamps with `wrapping_sub` so that intervals
/// spanning the wrap are still measured correctly.
pub trait MonotonicClock {
    /// Current time in microseconds
    fn now_micros(&self) -> u32;
}

