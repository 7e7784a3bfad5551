//! Simulated encoder hardware.
//!
//! One shared board backs both sensing schemes: the quadrature pin pair and
//! the switch line for the direct-pin build, and the decoded position and
//! bus probe for the breakout build. Mutations also raise an edge
//! notification, mirroring the pin-change interrupts on the real device that
//! only ever request a re-sample; consuming the event and mutating counters
//! stays with the single session loop.

use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::input::breakout::{self, BreakoutDevice};

#[derive(Debug, Default)]
struct BoardState {
    pin_a: bool,
    pin_b: bool,
    button_down: bool,
    /// Position as the breakout board would decode it.
    position: i32,
    /// False simulates a missing/unsoldered breakout board.
    absent: bool,
    interrupt_enabled: bool,
}

/// Cloneable handle to the simulated board. The REPL task mutates it, the
/// session task reads it; the mutex is held only for single field accesses.
#[derive(Clone, Debug, Default)]
pub struct SimBoard {
    state: Arc<Mutex<BoardState>>,
    edges: Arc<Notify>,
}

impl SimBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// One clockwise detent: the pin pair changes and lands equal, which the
    /// software decoder reads as +1. Both lines move under one lock so a
    /// poll never observes a half-updated pair.
    pub fn turn_cw(&self) {
        {
            let mut s = self.lock();
            if s.pin_a == s.pin_b {
                s.pin_a = !s.pin_a;
                s.pin_b = !s.pin_b;
            } else {
                s.pin_b = s.pin_a;
            }
            s.position += 1;
        }
        self.edges.notify_one();
    }

    /// One counter-clockwise detent: the pair changes and lands unequal,
    /// which the software decoder reads as -1.
    pub fn turn_ccw(&self) {
        {
            let mut s = self.lock();
            if s.pin_a == s.pin_b {
                s.pin_b = !s.pin_b;
            } else {
                s.pin_a = !s.pin_a;
                s.pin_b = !s.pin_b;
            }
            s.position -= 1;
        }
        self.edges.notify_one();
    }

    pub fn press(&self) {
        self.lock().button_down = true;
        self.edges.notify_one();
    }

    pub fn release(&self) {
        self.lock().button_down = false;
        self.edges.notify_one();
    }

    /// Simulate the breakout board being missing from the bus.
    pub fn set_absent(&self, absent: bool) {
        self.lock().absent = absent;
    }

    pub fn pin_a(&self) -> bool {
        self.lock().pin_a
    }

    pub fn pin_b(&self) -> bool {
        self.lock().pin_b
    }

    pub fn button_down(&self) -> bool {
        self.lock().button_down
    }

    /// Resolves when the board has pending edges to sample.
    pub async fn edge_notified(&self) {
        self.edges.notified().await;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BoardState> {
        self.state.lock().expect("sim board lock poisoned")
    }
}

impl BreakoutDevice for SimBoard {
    fn probe(&mut self, addr: u8) -> bool {
        let s = self.lock();
        !s.absent && addr == breakout::DEFAULT_ADDR
    }

    fn pin_input_pullup(&mut self, _pin: u8) {}

    fn encoder_position(&mut self) -> i32 {
        self.lock().position
    }

    fn pin_level(&mut self, pin: u8) -> bool {
        debug_assert_eq!(pin, breakout::SWITCH_PIN);
        // Pull-up line: high until the button shorts it to ground.
        !self.lock().button_down
    }

    fn enable_encoder_interrupt(&mut self) {
        self.lock().interrupt_enabled = true;
    }
}
