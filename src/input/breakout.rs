//! Breakout-board encoder: position decoded by the board itself, polled over
//! a bus.
//!
//! The board owns the quadrature decode and hands back an absolute position;
//! this side only relays it. The push switch is wired active-low on the
//! board, so the raw level is inverted before debouncing.

use std::time::{Duration, Instant};

use super::RotaryInput;
use super::debounce::Debouncer;
use crate::error::InitError;

/// Default bus address of the breakout board.
pub const DEFAULT_ADDR: u8 = 0x36;

/// Board pin the push switch is wired to.
pub const SWITCH_PIN: u8 = 24;

/// Bus operations the breakout board exposes. The real implementation talks
/// to the board over the wire; the simulator implements the same trait in
/// memory, so both are exercised behind one contract.
pub trait BreakoutDevice {
    /// Probe for the board at `addr`; false if nothing answers.
    fn probe(&mut self, addr: u8) -> bool;

    /// Configure a board pin as an input with the internal pull-up.
    fn pin_input_pullup(&mut self, pin: u8);

    /// Absolute encoder position as decoded by the board.
    fn encoder_position(&mut self) -> i32;

    /// Raw electrical level of a board pin. The switch pin reads low while
    /// the button is held.
    fn pin_level(&mut self, pin: u8) -> bool;

    /// Have the board latch position changes between polls.
    fn enable_encoder_interrupt(&mut self);
}

pub struct BreakoutEncoder<D: BreakoutDevice> {
    device: D,
    debouncer: Debouncer,
}

impl<D: BreakoutDevice> BreakoutEncoder<D> {
    /// Probe the board and prepare the switch pin.
    ///
    /// Probe failure is fatal: with no encoder the device has no input at
    /// all, so the error is reported once and never retried.
    pub fn new(mut device: D, addr: u8, debounce_window: Duration) -> Result<Self, InitError> {
        if !device.probe(addr) {
            tracing::error!(addr, "no encoder breakout answered on the bus");
            return Err(InitError::BreakoutNotFound { addr });
        }
        device.pin_input_pullup(SWITCH_PIN);
        device.enable_encoder_interrupt();
        tracing::info!(addr, "encoder breakout online");
        Ok(Self {
            device,
            debouncer: Debouncer::new(debounce_window),
        })
    }
}

impl<D: BreakoutDevice> RotaryInput for BreakoutEncoder<D> {
    fn position(&mut self) -> i32 {
        self.device.encoder_position()
    }

    fn button(&mut self, now: Instant) -> bool {
        // Active-low: pressed pulls the pin to ground.
        let pressed = !self.device.pin_level(SWITCH_PIN);
        self.debouncer.update(pressed, now)
    }
}
