//! Input device configuration
//!
//! Tuning values for the quadrature decoder and the encoder's push
//! button. Everything here is supplied once at startup.

use detent_hal::Pull;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest usable detent width (quarter-cycle transitions per click)
pub const MIN_DETENT_WIDTH: u8 = 2;

/// Default detent width: half-cycle detents
pub const DEFAULT_DETENT_WIDTH: u8 = 2;

/// Default debounce floor between accepted edges (µs)
pub const DEFAULT_MIN_EDGE_INTERVAL_US: u32 = 700;

/// Default inactivity window after which a partial detent is dropped (µs)
pub const DEFAULT_IDLE_RESET_INTERVAL_US: u32 = 8000;

/// Default lockout between accepted button presses (ms)
pub const DEFAULT_BUTTON_LOCKOUT_MS: u32 = 160;

/// Quadrature encoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderConfig {
    /// Bias applied to both phase inputs
    pub pull: Pull,
    /// Invert the reported direction
    pub reversed: bool,
    /// Quarter-cycle transitions per click (4 = full cycle, 2 = half cycle)
    pub detent_width: u8,
    /// Edges closer than this to the last accepted edge are bounce (µs)
    pub min_edge_interval_us: u32,
    /// Partial detent progress older than this is discarded (µs)
    pub idle_reset_interval_us: u32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            pull: Pull::Up,
            reversed: false,
            detent_width: DEFAULT_DETENT_WIDTH,
            min_edge_interval_us: DEFAULT_MIN_EDGE_INTERVAL_US,
            idle_reset_interval_us: DEFAULT_IDLE_RESET_INTERVAL_US,
        }
    }
}

impl EncoderConfig {
    /// Detent width with the lower bound applied
    ///
    /// A single quarter-cycle is never accepted as a click: noise at the
    /// cycle boundary would register as motion.
    pub fn clamped_detent_width(&self) -> u8 {
        self.detent_width.max(MIN_DETENT_WIDTH)
    }
}

/// Push button configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Pressed level is low (pull-up wiring)
    pub active_low: bool,
    /// Presses within this window of the last accepted press are ignored
    pub lockout_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            active_low: true,
            lockout_ms: DEFAULT_BUTTON_LOCKOUT_MS,
        }
    }
}

impl ButtonConfig {
    /// Bias that holds the button at its released level
    pub fn pull(&self) -> Pull {
        Pull::from_pullup(self.active_low)
    }
}

/// Complete input configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Rotary encoder
    pub encoder: EncoderConfig,
    /// Encoder push button
    pub button: ButtonConfig,
}
