//! Pin-owning rotary encoder
//!
//! Binds a [`QuadratureDecoder`] to two phase inputs and a clock. The
//! owner of the polling loop holds this value and calls [`sample`] every
//! tick; UI code drains clicks with [`consume_step`].
//!
//! [`sample`]: RotaryEncoder::sample
//! [`consume_step`]: RotaryEncoder::consume_step

use detent_hal::{ConfigurableInput, MonotonicClock, Pull};

use crate::config::EncoderConfig;

use super::quadrature::{QuadratureDecoder, SampleOutcome};
use super::table::PhasePair;

/// Quadrature encoder on two GPIO lines
pub struct RotaryEncoder<A, B, C> {
    pin_a: A,
    pin_b: B,
    clock: C,
    pull: Pull,
    decoder: QuadratureDecoder,
}

impl<A, B, C> RotaryEncoder<A, B, C>
where
    A: ConfigurableInput,
    B: ConfigurableInput,
    C: MonotonicClock,
{
    /// Configure the phase inputs and start decoding from their current level
    ///
    /// Both lines are switched to inputs with the configured pull. The
    /// reading taken right after is the resting state, and the current
    /// time counts as the last accepted edge.
    pub fn new(mut pin_a: A, mut pin_b: B, clock: C, config: &EncoderConfig) -> Self {
        pin_a.set_pull(config.pull);
        pin_b.set_pull(config.pull);

        let initial = PhasePair::new(pin_a.is_high(), pin_b.is_high());
        let decoder = QuadratureDecoder::new(config, initial, clock.now_micros());

        Self {
            pin_a,
            pin_b,
            clock,
            pull: config.pull,
            decoder,
        }
    }

    /// Read both lines and advance the decoder
    ///
    /// Call from the polling loop, ideally at 500 Hz or more. When neither
    /// line moved this costs two pin reads and a compare; the clock is only
    /// read once an edge is seen.
    #[inline]
    pub fn sample(&mut self) -> SampleOutcome {
        let current = PhasePair::new(self.pin_a.is_high(), self.pin_b.is_high());
        if current == self.decoder.previous() {
            return SampleOutcome::Unchanged;
        }
        self.decoder.update(current, self.clock.now_micros())
    }

    /// Take one queued click: +1, -1, or 0 when idle
    pub fn consume_step(&mut self) -> i8 {
        self.decoder.consume_step()
    }

    /// Take up to `limit` queued clicks, returning their signed sum
    pub fn consume_burst(&mut self, limit: u32) -> i32 {
        self.decoder.consume_burst(limit)
    }

    /// Net clicks waiting to be consumed
    pub fn pending_steps(&self) -> i32 {
        self.decoder.pending_steps()
    }

    /// Invert direction for all following edges
    pub fn set_reversed(&mut self, reversed: bool) {
        self.decoder.set_reversed(reversed);
    }

    /// Bias applied to the phase inputs
    pub fn pull(&self) -> Pull {
        self.pull
    }

    /// Decoder state
    pub fn decoder(&self) -> &QuadratureDecoder {
        &self.decoder
    }

    /// Release the pins and clock
    pub fn release(self) -> (A, B, C) {
        (self.pin_a, self.pin_b, self.clock)
    }
}
