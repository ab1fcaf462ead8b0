//! GPIO inputs for STM32F0
//!
//! Wraps embassy-stm32 `Flex` pins so the pull can be chosen after the pin
//! has been handed out.

use detent_hal::{ConfigurableInput, InputPin, Pull};
use embassy_stm32::gpio::{self, Flex};

/// Input pin with runtime-selectable pull
pub struct FlexInput<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexInput<'d> {
    /// Wrap a flex pin, putting it into input mode with `pull`
    pub fn new(mut pin: Flex<'d>, pull: Pull) -> Self {
        pin.set_as_input(to_embassy(pull));
        Self { pin }
    }
}

impl InputPin for FlexInput<'_> {
    #[inline]
    fn is_high(&mut self) -> bool {
        self.pin.is_high()
    }
}

impl ConfigurableInput for FlexInput<'_> {
    fn set_pull(&mut self, pull: Pull) {
        self.pin.set_as_input(to_embassy(pull));
    }
}

fn to_embassy(pull: Pull) -> gpio::Pull {
    match pull {
        Pull::Up => gpio::Pull::Up,
        Pull::Down => gpio::Pull::Down,
    }
}
