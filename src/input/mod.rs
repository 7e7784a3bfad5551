//! Rotary input abstraction.
//!
//! Two physical sensing schemes exist for the same control: a bare encoder
//! wired to GPIO and decoded in software ([`pins::PinEncoder`]), and a
//! bus-attached breakout board that decodes its own position
//! ([`breakout::BreakoutEncoder`]). Both sit behind [`RotaryInput`] so
//! nothing above this module knows which one is fitted; this is the one
//! place in the firmware where hardware heterogeneity is allowed to exist.

pub mod breakout;
pub mod debounce;
pub mod pins;

pub use breakout::{BreakoutDevice, BreakoutEncoder};
pub use debounce::Debouncer;
pub use pins::PinEncoder;

use std::time::Instant;

/// The two-operation capability contract shared by both sensing schemes.
///
/// Position is an accumulated signed count; callers diff successive reads to
/// get direction. The button is already debounced — raw contact noise never
/// crosses this boundary.
pub trait RotaryInput {
    /// Current accumulated position.
    fn position(&mut self) -> i32;

    /// Debounced button level, sampled at `now`.
    fn button(&mut self, now: Instant) -> bool;
}

impl<T: RotaryInput + ?Sized> RotaryInput for Box<T> {
    fn position(&mut self) -> i32 {
        (**self).position()
    }

    fn button(&mut self, now: Instant) -> bool {
        (**self).button(now)
    }
}

/// What one poll of the input produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Rotation since the previous poll: -1, 0, or +1.
    pub step: i8,
    /// Debounced button level.
    pub pressed: bool,
    /// True on the poll where the level went released -> pressed. A held
    /// button fires this exactly once.
    pub press_edge: bool,
}

/// Turns successive polls of a [`RotaryInput`] into [`InputEvent`]s by
/// diffing positions and edge-detecting the button level. This is the only
/// cross-poll memory outside the input source itself.
#[derive(Debug, Default)]
pub struct EventReader {
    last_position: Option<i32>,
    last_pressed: bool,
}

impl EventReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll<I: RotaryInput + ?Sized>(&mut self, input: &mut I, now: Instant) -> InputEvent {
        let position = input.position();
        // First poll establishes the baseline without emitting a step, so a
        // device that powers up at a non-zero position doesn't ghost-rotate.
        let step = match self.last_position {
            Some(prev) => (position - prev).signum() as i8,
            None => 0,
        };
        self.last_position = Some(position);

        let pressed = input.button(now);
        let press_edge = pressed && !self.last_pressed;
        self.last_pressed = pressed;

        if step != 0 || press_edge {
            tracing::debug!(step, pressed, "input event");
        }

        InputEvent {
            step,
            pressed,
            press_edge,
        }
    }
}
