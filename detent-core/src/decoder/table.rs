//! Quadrature transition table
//!
//! The four phase pairs form a Gray-code ring:
//!
//! ```text
//!   forward:  00 → 01 → 11 → 10 → 00
//!   backward: 00 → 10 → 11 → 01 → 00
//! ```
//!
//! Every ordered pair of readings maps to a signed quarter-step. Only moves
//! to an adjacent ring position carry a direction; staying put, jumping two
//! positions (both lines flipping at once) and anything else is 0.

/// Direction of each `(previous << 2) | current` transition
pub const TRANSITIONS: [i8; 16] = [
    0, 1, -1, 0, //
    -1, 0, 0, 1, //
    1, 0, 0, -1, //
    0, -1, 1, 0, //
];

/// Combined instantaneous reading of both encoder lines
///
/// Bit 1 holds phase A, bit 0 holds phase B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhasePair(u8);

impl PhasePair {
    /// Both lines low
    pub const LOW: Self = Self(0b00);

    /// Build a pair from the two line levels
    #[inline]
    pub const fn new(a: bool, b: bool) -> Self {
        Self(((a as u8) << 1) | b as u8)
    }

    /// Build a pair from its 2-bit encoding; higher bits are discarded
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// 2-bit encoding (0-3)
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Phase A level
    pub const fn a(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// Phase B level
    pub const fn b(self) -> bool {
        self.0 & 0b01 != 0
    }

    /// Signed quarter-step for moving from `self` to `next`
    #[inline]
    pub const fn delta_to(self, next: PhasePair) -> i8 {
        TRANSITIONS[((self.0 << 2) | next.0) as usize]
    }
}
