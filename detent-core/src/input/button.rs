//! Push button press detection
//!
//! Reports each press once, on the released-to-pressed edge. A press that
//! follows the previous accepted press too closely is treated as contact
//! chatter and dropped.

use detent_hal::{ConfigurableInput, MonotonicClock};

use crate::config::ButtonConfig;

/// Edge detector with press lockout
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressDetector {
    active_low: bool,
    lockout_us: u32,
    pressed: bool,
    last_press_us: Option<u32>,
}

impl PressDetector {
    /// Create a detector in the released state
    pub fn new(config: &ButtonConfig) -> Self {
        Self {
            active_low: config.active_low,
            lockout_us: config.lockout_ms.saturating_mul(1000),
            pressed: false,
            last_press_us: None,
        }
    }

    /// Feed the raw pin level read at `now_us`
    ///
    /// Returns true exactly once per accepted press.
    pub fn update(&mut self, level_high: bool, now_us: u32) -> bool {
        let pressed = level_high != self.active_low;
        let edge = pressed && !self.pressed;
        self.pressed = pressed;

        if !edge {
            return false;
        }

        if let Some(last) = self.last_press_us {
            if now_us.wrapping_sub(last) < self.lockout_us {
                return false;
            }
        }

        self.last_press_us = Some(now_us);
        true
    }

    /// Whether the button is currently held
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

/// Push button on one GPIO line
pub struct PushButton<P, C> {
    pin: P,
    clock: C,
    detector: PressDetector,
}

impl<P: ConfigurableInput, C: MonotonicClock> PushButton<P, C> {
    /// Configure the pin with the bias that holds it released
    ///
    /// A button already held at startup is not reported until it has been
    /// released and pressed again.
    pub fn new(mut pin: P, clock: C, config: &ButtonConfig) -> Self {
        pin.set_pull(config.pull());
        let mut detector = PressDetector::new(config);
        detector.pressed = pin.is_high() != config.active_low;

        Self {
            pin,
            clock,
            detector,
        }
    }

    /// Sample the pin; true when a new press was accepted
    pub fn poll(&mut self) -> bool {
        let level = self.pin.is_high();
        self.detector.update(level, self.clock.now_micros())
    }

    /// Whether the button is currently held (as of the last poll)
    pub fn is_pressed(&self) -> bool {
        self.detector.is_pressed()
    }
}
