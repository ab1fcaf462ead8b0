//! Quadrature decoding state machine
//!
//! Turns a stream of timestamped phase-pair readings into a signed queue
//! of detent clicks. The machine is pure: it never touches hardware, the
//! caller supplies every reading together with the time it was taken.
//!
//! Per reading:
//!
//! 1. Unchanged pair: nothing happens.
//! 2. Changed within `min_edge_interval_us` of the last accepted edge:
//!    bounce. The new pair is remembered so later readings compare against
//!    it, but neither the timestamp nor the accumulator moves.
//! 3. Changed after more than `idle_reset_interval_us`: the partial
//!    detent left over from before the pause is dropped first.
//! 4. The table delta is applied (negated when reversed). Reaching
//!    `±detent_width` commits one click to the queue.

use crate::config::EncoderConfig;

use super::table::PhasePair;

/// What a single reading did to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleOutcome {
    /// Same pair as the previous reading
    Unchanged,
    /// Edge arrived inside the debounce window and was not counted
    Bounce,
    /// Edge accepted but carries no direction (skip or illegal transition)
    Ambiguous,
    /// Edge counted towards a detent that has not completed yet
    Partial,
    /// A detent completed and one click was queued (+1 or -1)
    Step(i8),
}

/// Decoder state for one encoder
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    reversed: bool,
    detent_width: i16,
    min_edge_interval_us: u32,
    idle_reset_interval_us: u32,
    /// Last reading, bounced or not
    previous: PhasePair,
    /// Sum of deltas inside the current, uncommitted detent
    accumulator: i16,
    /// Committed clicks not yet consumed
    queued_steps: i32,
    last_edge_us: u32,
}

impl QuadratureDecoder {
    /// Create a decoder resting at `initial`, with `now_us` as the last edge
    pub fn new(config: &EncoderConfig, initial: PhasePair, now_us: u32) -> Self {
        Self {
            reversed: config.reversed,
            detent_width: i16::from(config.clamped_detent_width()),
            min_edge_interval_us: config.min_edge_interval_us,
            idle_reset_interval_us: config.idle_reset_interval_us,
            previous: initial,
            accumulator: 0,
            queued_steps: 0,
            last_edge_us: now_us,
        }
    }

    /// Feed one reading taken at `now_us`
    ///
    /// Timestamps are compared with wrapping arithmetic, so the 32-bit
    /// microsecond counter may roll over between calls.
    #[inline]
    pub fn update(&mut self, current: PhasePair, now_us: u32) -> SampleOutcome {
        if current == self.previous {
            return SampleOutcome::Unchanged;
        }

        let elapsed = now_us.wrapping_sub(self.last_edge_us);

        if elapsed < self.min_edge_interval_us {
            self.previous = current;
            return SampleOutcome::Bounce;
        }

        if elapsed > self.idle_reset_interval_us {
            self.accumulator = 0;
        }

        let delta = self.previous.delta_to(current);
        self.previous = current;
        self.last_edge_us = now_us;

        if delta == 0 {
            return SampleOutcome::Ambiguous;
        }

        let delta = if self.reversed { -delta } else { delta };
        self.accumulator += i16::from(delta);

        if self.accumulator >= self.detent_width {
            self.accumulator = 0;
            self.queued_steps = self.queued_steps.saturating_add(1);
            SampleOutcome::Step(1)
        } else if self.accumulator <= -self.detent_width {
            self.accumulator = 0;
            self.queued_steps = self.queued_steps.saturating_sub(1);
            SampleOutcome::Step(-1)
        } else {
            SampleOutcome::Partial
        }
    }

    /// Take one queued click
    ///
    /// Returns +1 or -1 and moves the queue one unit towards zero, or 0 when
    /// nothing is queued.
    pub fn consume_step(&mut self) -> i8 {
        if self.queued_steps > 0 {
            self.queued_steps -= 1;
            1
        } else if self.queued_steps < 0 {
            self.queued_steps += 1;
            -1
        } else {
            0
        }
    }

    /// Take up to `limit` queued clicks at once
    ///
    /// Returns the signed number of clicks taken. Anything beyond `limit`
    /// stays queued for the next call.
    pub fn consume_burst(&mut self, limit: u32) -> i32 {
        let limit = limit.min(i32::MAX as u32) as i32;
        let taken = self.queued_steps.clamp(-limit, limit);
        self.queued_steps -= taken;
        taken
    }

    /// Net clicks waiting to be consumed
    pub fn pending_steps(&self) -> i32 {
        self.queued_steps
    }

    /// Progress towards the next click, in quarter-cycles
    pub fn accumulator(&self) -> i16 {
        self.accumulator
    }

    /// Last phase pair seen
    pub fn previous(&self) -> PhasePair {
        self.previous
    }

    /// Timestamp of the last accepted edge (µs)
    pub fn last_edge_us(&self) -> u32 {
        self.last_edge_us
    }

    /// Effective detent width, after clamping
    pub fn detent_width(&self) -> u8 {
        self.detent_width as u8
    }

    /// Whether direction is inverted
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Invert direction for all following edges
    ///
    /// Clicks already in the queue are left as they are.
    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Clean edge spacing: past debounce, inside the idle window
    const SPACING_US: u32 = 1000;

    const FORWARD: [u8; 4] = [0b01, 0b11, 0b10, 0b00];
    const BACKWARD: [u8; 4] = [0b10, 0b11, 0b01, 0b00];

    fn config(detent_width: u8, reversed: bool) -> EncoderConfig {
        EncoderConfig {
            detent_width,
            reversed,
            ..EncoderConfig::default()
        }
    }

    /// Feed `pairs` at fixed spacing starting one spacing after `start_us`
    fn feed(decoder: &mut QuadratureDecoder, pairs: &[u8], start_us: u32) -> u32 {
        let mut now = start_us;
        for &bits in pairs {
            now += SPACING_US;
            decoder.update(PhasePair::from_bits(bits), now);
        }
        now
    }

    fn drain(decoder: &mut QuadratureDecoder) -> i32 {
        let mut total = 0;
        loop {
            match decoder.consume_step() {
                0 => return total,
                step => total += i32::from(step),
            }
        }
    }

    #[test]
    fn test_full_cycle_forward_scenario() {
        let mut decoder = QuadratureDecoder::new(&config(4, false), PhasePair::LOW, 0);

        let mut now = 0;
        for (i, &bits) in FORWARD.iter().enumerate() {
            now += SPACING_US;
            let outcome = decoder.update(PhasePair::from_bits(bits), now);
            if i < 3 {
                assert_eq!(outcome, SampleOutcome::Partial);
                assert_eq!(decoder.accumulator(), i as i16 + 1);
            } else {
                assert_eq!(outcome, SampleOutcome::Step(1));
            }
        }

        assert_eq!(decoder.accumulator(), 0);
        assert_eq!(decoder.pending_steps(), 1);
        assert_eq!(decoder.consume_step(), 1);
        assert_eq!(decoder.consume_step(), 0);
    }

    #[test]
    fn test_full_cycle_backward_scenario() {
        let mut decoder = QuadratureDecoder::new(&config(4, false), PhasePair::LOW, 0);
        feed(&mut decoder, &BACKWARD, 0);

        assert_eq!(decoder.pending_steps(), -1);
        assert_eq!(decoder.consume_step(), -1);
        assert_eq!(decoder.consume_step(), 0);
    }

    #[test]
    fn test_half_cycle_detents() {
        let mut decoder = QuadratureDecoder::new(&config(2, false), PhasePair::LOW, 0);
        feed(&mut decoder, &FORWARD, 0);
        assert_eq!(decoder.pending_steps(), 2);
    }

    #[test]
    fn test_detent_width_clamped_to_two() {
        let mut decoder = QuadratureDecoder::new(&config(1, false), PhasePair::LOW, 0);
        assert_eq!(decoder.detent_width(), 2);

        assert_eq!(
            decoder.update(PhasePair::from_bits(0b01), SPACING_US),
            SampleOutcome::Partial
        );
        assert_eq!(decoder.pending_steps(), 0);
        assert_eq!(
            decoder.update(PhasePair::from_bits(0b11), 2 * SPACING_US),
            SampleOutcome::Step(1)
        );
    }

    #[test]
    fn test_unchanged_reading_is_noop() {
        let mut decoder = QuadratureDecoder::new(&config(4, false), PhasePair::LOW, 0);
        assert_eq!(
            decoder.update(PhasePair::LOW, 50_000),
            SampleOutcome::Unchanged
        );
        assert_eq!(decoder.last_edge_us(), 0);
    }

    #[test]
    fn test_bounce_is_not_counted() {
        let mut decoder = QuadratureDecoder::new(&config(4, false), PhasePair::LOW, 0);

        assert_eq!(
            decoder.update(PhasePair::from_bits(0b01), 1000),
            SampleOutcome::Partial
        );
        // 200 µs later: inside the 700 µs debounce window
        assert_eq!(
            decoder.update(PhasePair::from_bits(0b11), 1200),
            SampleOutcome::Bounce
        );

        assert_eq!(decoder.accumulator(), 1);
        assert_eq!(decoder.last_edge_us(), 1000);
        // The bounced reading becomes the comparison point
        assert_eq!(decoder.previous(), PhasePair::from_bits(0b11));
    }

    #[test]
    fn test_bounce_burst_settles() {
        let mut decoder = QuadratureDecoder::new(&config(4, false), PhasePair::LOW, 0);
        decoder.update(PhasePair::from_bits(0b01), 1000);

        // Chatter between 01 and 11 inside the window
        decoder.update(PhasePair::from_bits(0b11), 1100);
        decoder.update(PhasePair::from_bits(0b01), 1200);
        decoder.update(PhasePair::from_bits(0b11), 1300);
        assert_eq!(decoder.accumulator(), 1);

        // Line settles on 11; the next real edge is judged from there
        assert_eq!(
            decoder.update(PhasePair::from_bits(0b10), 2500),
            SampleOutcome::Partial
        );
        assert_eq!(decoder.accumulator(), 2);
    }

    #[test]
    fn test_idle_reset_drops_partial_detent() {
        let mut decoder = QuadratureDecoder::new(&config(4, false), PhasePair::LOW, 0);
        let now = feed(&mut decoder, &FORWARD[..3], 0);
        assert_eq!(decoder.accumulator(), 3);

        // Long pause, then the cycle completes
        let later = now + 8001;
        assert_eq!(
            decoder.update(PhasePair::from_bits(0b00), later),
            SampleOutcome::Partial
        );
        assert_eq!(decoder.accumulator(), 1);
        assert_eq!(decoder.pending_steps(), 0);
    }

    #[test]
    fn test_gap_at_threshold_keeps_progress() {
        let mut decoder = QuadratureDecoder::new(&config(4, false), PhasePair::LOW, 0);
        let now = feed(&mut decoder, &FORWARD[..3], 0);

        assert_eq!(
            decoder.update(PhasePair::from_bits(0b00), now + 8000),
            SampleOutcome::Step(1)
        );
    }

    #[test]
    fn test_skip_transitions_are_ambiguous() {
        let mut decoder = QuadratureDecoder::new(&config(4, false), PhasePair::LOW, 0);

        assert_eq!(
            decoder.update(PhasePair::from_bits(0b11), 1000),
            SampleOutcome::Ambiguous
        );
        assert_eq!(decoder.accumulator(), 0);
        assert_eq!(decoder.previous(), PhasePair::from_bits(0b11));
        assert_eq!(decoder.last_edge_us(), 1000);

        decoder.update(PhasePair::from_bits(0b01), 2000);
        assert_eq!(decoder.accumulator(), -1);
        assert_eq!(
            decoder.update(PhasePair::from_bits(0b10), 3000),
            SampleOutcome::Ambiguous
        );
        assert_eq!(decoder.accumulator(), -1);
        assert_eq!(decoder.previous(), PhasePair::from_bits(0b10));
        assert_eq!(decoder.last_edge_us(), 3000);
    }

    #[test]
    fn test_ambiguous_edge_counts_as_activity() {
        let mut decoder = QuadratureDecoder::new(&config(4, false), PhasePair::LOW, 0);
        let now = feed(&mut decoder, &FORWARD[..2], 0);
        assert_eq!(decoder.accumulator(), 2);

        // Skip 11 -> 00 keeps the idle timer fresh
        decoder.update(PhasePair::from_bits(0b00), now + 5000);
        decoder.update(PhasePair::from_bits(0b01), now + 10_000);
        assert_eq!(decoder.accumulator(), 3);
    }

    #[test]
    fn test_reversed_negates_steps() {
        let mut decoder = QuadratureDecoder::new(&config(4, true), PhasePair::LOW, 0);
        feed(&mut decoder, &FORWARD, 0);
        assert_eq!(decoder.consume_step(), -1);
    }

    #[test]
    fn test_set_reversed_applies_to_later_edges() {
        let mut decoder = QuadratureDecoder::new(&config(4, false), PhasePair::LOW, 0);
        let now = feed(&mut decoder, &FORWARD, 0);
        assert_eq!(decoder.pending_steps(), 1);

        decoder.set_reversed(true);
        assert!(decoder.is_reversed());
        let now = feed(&mut decoder, &FORWARD, now);
        feed(&mut decoder, &FORWARD, now);

        assert_eq!(decoder.pending_steps(), -1);
    }

    #[test]
    fn test_direction_change_mid_detent() {
        let mut decoder = QuadratureDecoder::new(&config(4, false), PhasePair::LOW, 0);
        // Two quarters forward, then back out to rest
        feed(&mut decoder, &[0b01, 0b11, 0b01, 0b00], 0);
        assert_eq!(decoder.accumulator(), 0);
        assert_eq!(decoder.pending_steps(), 0);
    }

    #[test]
    fn test_timestamp_wraparound() {
        let start = u32::MAX - 1500;
        let mut decoder = QuadratureDecoder::new(&config(2, false), PhasePair::LOW, start);

        decoder.update(PhasePair::from_bits(0b01), start.wrapping_add(1000));
        // 1000 µs later, across the wrap
        assert_eq!(
            decoder.update(PhasePair::from_bits(0b11), start.wrapping_add(2000)),
            SampleOutcome::Step(1)
        );
    }

    #[test]
    fn test_consume_burst_limits() {
        let mut decoder = QuadratureDecoder::new(&config(2, false), PhasePair::LOW, 0);
        decoder.queued_steps = 5;
        assert_eq!(decoder.consume_burst(3), 3);
        assert_eq!(decoder.consume_burst(3), 2);
        assert_eq!(decoder.consume_burst(3), 0);

        decoder.queued_steps = -4;
        assert_eq!(decoder.consume_burst(3), -3);
        assert_eq!(decoder.pending_steps(), -1);
        assert_eq!(decoder.consume_burst(0), 0);
        assert_eq!(decoder.consume_burst(u32::MAX), -1);
    }

    #[test]
    fn test_queue_saturates() {
        let mut decoder = QuadratureDecoder::new(&config(2, false), PhasePair::LOW, 0);
        decoder.queued_steps = i32::MAX;
        feed(&mut decoder, &FORWARD[..2], 0);
        assert_eq!(decoder.pending_steps(), i32::MAX);
    }

    proptest! {
        #[test]
        fn prop_drain_returns_exactly_n(n in -500i32..500) {
            let mut decoder = QuadratureDecoder::new(&config(2, false), PhasePair::LOW, 0);
            decoder.queued_steps = n;

            for _ in 0..n.unsigned_abs() {
                prop_assert_eq!(i32::from(decoder.consume_step()), n.signum());
            }
            prop_assert_eq!(decoder.consume_step(), 0);
            prop_assert_eq!(decoder.pending_steps(), 0);
        }

        #[test]
        fn prop_reversal_mirrors_outcomes(
            readings in proptest::collection::vec((0u8..4, 0u32..12_000), 0..200),
            detent_width in 2u8..6,
        ) {
            let mut normal = QuadratureDecoder::new(&config(detent_width, false), PhasePair::LOW, 0);
            let mut mirrored = QuadratureDecoder::new(&config(detent_width, true), PhasePair::LOW, 0);

            let mut now = 0u32;
            for (bits, gap) in readings {
                now = now.wrapping_add(gap);
                let pair = PhasePair::from_bits(bits);
                let a = normal.update(pair, now);
                let b = mirrored.update(pair, now);
                match (a, b) {
                    (SampleOutcome::Step(x), SampleOutcome::Step(y)) => prop_assert_eq!(x, -y),
                    (x, y) => prop_assert_eq!(x, y),
                }
                prop_assert_eq!(normal.accumulator(), -mirrored.accumulator());
            }
            prop_assert_eq!(normal.pending_steps(), -mirrored.pending_steps());
        }

        #[test]
        fn prop_accumulator_stays_inside_detent(
            readings in proptest::collection::vec((0u8..4, 0u32..3_000), 0..300),
            detent_width in 2u8..8,
        ) {
            let mut decoder = QuadratureDecoder::new(&config(detent_width, false), PhasePair::LOW, 0);
            let mut now = 0u32;
            for (bits, gap) in readings {
                now = now.wrapping_add(gap);
                decoder.update(PhasePair::from_bits(bits), now);
                prop_assert!(decoder.accumulator().abs() < i16::from(detent_width));
            }
        }

        #[test]
        fn prop_clean_rotation_counts_detents(turns in 1usize..20, forward in any::<bool>()) {
            let mut decoder = QuadratureDecoder::new(&config(4, false), PhasePair::LOW, 0);
            let cycle = if forward { FORWARD } else { BACKWARD };

            let mut now = 0;
            for _ in 0..turns {
                now = feed(&mut decoder, &cycle, now);
            }

            let expected = if forward { turns as i32 } else { -(turns as i32) };
            prop_assert_eq!(drain(&mut decoder), expected);
        }
    }
}
