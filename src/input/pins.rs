//! Direct-pin encoder: quadrature decoded in software, button debounced in
//! software.
//!
//! Pins are sampled through closures rather than a HAL type so the decoder
//! runs identically against real GPIO reads and against simulated pin state.

use std::time::{Duration, Instant};

use super::RotaryInput;
use super::debounce::Debouncer;

/// Rotary encoder wired straight to two GPIO lines plus a push switch.
///
/// The decode is a minimal 2-bit scheme: whenever the sampled (A, B) pair
/// changes, the position moves +1 if the signals now read equal and -1 if
/// they read unequal. Every edge advances the count, so modest sampling
/// rates are fine; the cost is directional precision, which this device
/// does not need.
pub struct PinEncoder<A, B, S>
where
    A: FnMut() -> bool,
    B: FnMut() -> bool,
    S: FnMut() -> bool,
{
    pin_a: A,
    pin_b: B,
    /// Switch closure reports the logical level: true while pressed.
    switch: S,
    last_pair: (bool, bool),
    position: i32,
    debouncer: Debouncer,
}

impl<A, B, S> PinEncoder<A, B, S>
where
    A: FnMut() -> bool,
    B: FnMut() -> bool,
    S: FnMut() -> bool,
{
    pub fn new(mut pin_a: A, mut pin_b: B, switch: S, debounce_window: Duration) -> Self {
        // Baseline sample so the first real poll only sees actual motion.
        let last_pair = (pin_a(), pin_b());
        Self {
            pin_a,
            pin_b,
            switch,
            last_pair,
            position: 0,
            debouncer: Debouncer::new(debounce_window),
        }
    }
}

impl<A, B, S> RotaryInput for PinEncoder<A, B, S>
where
    A: FnMut() -> bool,
    B: FnMut() -> bool,
    S: FnMut() -> bool,
{
    fn position(&mut self) -> i32 {
        let pair = ((self.pin_a)(), (self.pin_b)());
        if pair != self.last_pair {
            if pair.0 == pair.1 {
                self.position += 1;
            } else {
                self.position -= 1;
            }
            self.last_pair = pair;
        }
        self.position
    }

    fn button(&mut self, now: Instant) -> bool {
        let raw = (self.switch)();
        self.debouncer.update(raw, now)
    }
}
