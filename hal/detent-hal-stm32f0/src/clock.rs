//! Monotonic clock backed by the embassy-time driver

use detent_hal::MonotonicClock;
use embassy_time::Instant;

/// Microsecond clock reading `embassy_time::Instant`
///
/// The 64-bit tick count is truncated to 32 bits; consumers compare
/// timestamps with wrapping arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    #[inline]
    fn now_micros(&self) -> u32 {
        Instant::now().as_micros() as u32
    }
}
