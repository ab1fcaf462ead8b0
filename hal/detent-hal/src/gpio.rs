//! GPIO pin abstractions
//!
//! Provides traits for the digital inputs an encoder or push button is
//! wired to. Chip-specific HALs implement them on their pin types.

/// Internal bias resistor selection for an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pull {
    /// Pulled towards VCC; contacts short the line to ground
    #[default]
    Up,
    /// Pulled towards ground; contacts short the line to VCC
    Down,
}

impl Pull {
    /// Select a pull from a "use pull-up" flag
    pub const fn from_pullup(use_pullup: bool) -> Self {
        if use_pullup {
            Pull::Up
        } else {
            Pull::Down
        }
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip. Reads must be cheap and free of side effects,
/// they are issued from tight polling loops.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// Input pin whose internal pull can be selected at runtime
pub trait ConfigurableInput: InputPin {
    /// Put the pin into input mode with the given bias
    fn set_pull(&mut self, pull: Pull);
}

/// Adapter for any `embedded-hal` 1.0 input
///
/// The bias of an `embedded-hal` pin is fixed when the HAL hands it out, so
/// [`ConfigurableInput::set_pull`] only records the request. Read errors are
/// reported as a low level.
pub struct HalInput<P> {
    pin: P,
    pull: Pull,
}

impl<P> HalInput<P> {
    /// Wrap a pin that was already configured with `pull`
    pub fn new(pin: P, pull: Pull) -> Self {
        Self { pin, pull }
    }

    /// Bias most recently requested for this pin
    pub fn pull(&self) -> Pull {
        self.pull
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: embedded_hal::digital::InputPin> InputPin for HalInput<P> {
    fn is_high(&mut self) -> bool {
        self.pin.is_high().unwrap_or(false)
    }
}

impl<P: embedded_hal::digital::InputPin> ConfigurableInput for HalInput<P> {
    fn set_pull(&mut self, pull: Pull) {
        self.pull = pull;
    }
}
