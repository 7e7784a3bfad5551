//! Session control loop: opponent selection, then counter tracking.
//!
//! The controller is a two-state machine fed by polled input events. It owns
//! all counter state and is the only thing that mutates it; interrupt-style
//! producers may only request a re-poll, never touch the counters. One-way
//! lifecycle: once opponents are confirmed there is no path back to
//! selection short of a power cycle.

use std::time::Instant;

use crate::counters::{CounterSet, MAX_OPPONENTS};
use crate::display::{CounterFrame, DisplaySink, LethalIndicator, Splash};
use crate::input::{EventReader, InputEvent, RotaryInput};

/// Fewest opponents a session can be configured with. A commander game has
/// at least one opponent, so zero is rejected at the selection screen.
pub const MIN_OPPONENTS: u8 = 1;

/// Where the controller is in the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Startup phase: rotation adjusts the pending opponent count, a press
    /// confirms it.
    SelectingOpponents { pending: u8 },
    /// Steady state: rotation mutates the active counter, a press cycles to
    /// the next one.
    Tracking,
}

/// Routes input events into the counter set and keeps the display and the
/// lethal indicator in sync. Hardware-agnostic: the input source, display,
/// and indicator are all injected.
pub struct SessionController<I: RotaryInput> {
    input: I,
    reader: EventReader,
    counters: CounterSet,
    state: SessionState,
}

impl<I: RotaryInput> SessionController<I> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            reader: EventReader::new(),
            counters: CounterSet::new(),
            state: SessionState::SelectingOpponents {
                pending: MIN_OPPONENTS,
            },
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn counters(&self) -> &CounterSet {
        &self.counters
    }

    /// Show the splash and the initial selection screen. Called once before
    /// the poll loop starts.
    pub fn start(&mut self, display: &mut dyn DisplaySink) {
        display.splash(&Splash::default());
        if let SessionState::SelectingOpponents { pending } = self.state {
            display.opponent_select(pending);
        }
    }

    /// One iteration of the control loop: read the input once and act on
    /// whatever it produced. Never blocks, never fails.
    pub fn poll(
        &mut self,
        now: Instant,
        display: &mut dyn DisplaySink,
        indicator: &mut dyn LethalIndicator,
    ) {
        let event = self.reader.poll(&mut self.input, now);
        match self.state {
            SessionState::SelectingOpponents { pending } => {
                self.select_opponents(event, pending, display, indicator);
            }
            SessionState::Tracking => self.track(event, display, indicator),
        }
    }

    fn select_opponents(
        &mut self,
        event: InputEvent,
        mut pending: u8,
        display: &mut dyn DisplaySink,
        indicator: &mut dyn LethalIndicator,
    ) {
        if event.step != 0 {
            pending = if event.step > 0 {
                (pending + 1).min(MAX_OPPONENTS)
            } else {
                pending.saturating_sub(1).max(MIN_OPPONENTS)
            };
            self.state = SessionState::SelectingOpponents { pending };
            display.opponent_select(pending);
        }

        if event.press_edge {
            self.counters.configure(pending);
            self.state = SessionState::Tracking;
            tracing::info!(opponents = pending, "opponent count confirmed");
            self.refresh(display, indicator);
        }
    }

    fn track(
        &mut self,
        event: InputEvent,
        display: &mut dyn DisplaySink,
        indicator: &mut dyn LethalIndicator,
    ) {
        let mut dirty = false;

        if event.step > 0 {
            self.counters.active_mut().increment();
            dirty = true;
        } else if event.step < 0 {
            self.counters.active_mut().decrement();
            dirty = true;
        }

        if event.press_edge {
            self.counters.cycle_next();
            tracing::info!(
                counter = self.counters.active().name(),
                "cycled to next counter"
            );
            dirty = true;
        }

        if dirty {
            self.refresh(display, indicator);
        }
    }

    /// Re-derive everything the outside world sees from counter state.
    fn refresh(&mut self, display: &mut dyn DisplaySink, indicator: &mut dyn LethalIndicator) {
        indicator.set_lethal(self.counters.any_lethal());

        let active = self.counters.active();
        display.counter(&CounterFrame {
            name: active.name(),
            value: active.value(),
            lethal: active.is_lethal(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Instant;

    /// Shared handle the test mutates between polls.
    #[derive(Default)]
    struct Knob {
        position: i32,
        pressed: bool,
    }

    #[derive(Clone, Default)]
    struct ScriptedInput(Rc<RefCell<Knob>>);

    impl ScriptedInput {
        fn turn(&self, steps: i32) {
            self.0.borrow_mut().position += steps;
        }

        fn press(&self) {
            self.0.borrow_mut().pressed = true;
        }

        fn release(&self) {
            self.0.borrow_mut().pressed = false;
        }
    }

    impl RotaryInput for ScriptedInput {
        fn position(&mut self) -> i32 {
            self.0.borrow().position
        }

        fn button(&mut self, _now: Instant) -> bool {
            self.0.borrow().pressed
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        splashes: usize,
        selects: Vec<u8>,
        frames: Vec<(String, i32, bool)>,
    }

    impl DisplaySink for RecordingDisplay {
        fn splash(&mut self, _splash: &Splash) {
            self.splashes += 1;
        }

        fn opponent_select(&mut self, pending: u8) {
            self.selects.push(pending);
        }

        fn counter(&mut self, frame: &CounterFrame<'_>) {
            self.frames
                .push((frame.name.to_string(), frame.value, frame.lethal));
        }
    }

    #[derive(Default)]
    struct RecordingIndicator {
        level: bool,
        changes: Vec<bool>,
    }

    impl LethalIndicator for RecordingIndicator {
        fn set_lethal(&mut self, on: bool) {
            if on != self.level {
                self.changes.push(on);
            }
            self.level = on;
        }
    }

    struct Harness {
        knob: ScriptedInput,
        controller: SessionController<ScriptedInput>,
        display: RecordingDisplay,
        indicator: RecordingIndicator,
    }

    impl Harness {
        fn new() -> Self {
            let knob = ScriptedInput::default();
            let controller = SessionController::new(knob.clone());
            Self {
                knob,
                controller,
                display: RecordingDisplay::default(),
                indicator: RecordingIndicator::default(),
            }
        }

        fn poll(&mut self) {
            self.controller
                .poll(Instant::now(), &mut self.display, &mut self.indicator);
        }

        /// Turn one detent at a time, polling after each so every step is
        /// observed.
        fn turn(&mut self, steps: i32) {
            for _ in 0..steps.abs() {
                self.knob.turn(steps.signum());
                self.poll();
            }
        }

        fn click(&mut self) {
            self.knob.press();
            self.poll();
            self.knob.release();
            self.poll();
        }

        /// Configure a session with `opponents` opponents (pending starts at
        /// the minimum of 1).
        fn configure(&mut self, opponents: u8) {
            self.poll(); // baseline poll
            self.turn(i32::from(opponents) - i32::from(MIN_OPPONENTS));
            self.click();
        }
    }

    #[test]
    fn starts_in_selection_at_minimum() {
        let mut h = Harness::new();
        h.controller.start(&mut h.display);
        assert_eq!(h.display.splashes, 1);
        assert_eq!(h.display.selects, vec![MIN_OPPONENTS]);
        assert_eq!(
            h.controller.state(),
            SessionState::SelectingOpponents {
                pending: MIN_OPPONENTS
            }
        );
    }

    #[test]
    fn selection_clamps_to_bounds() {
        let mut h = Harness::new();
        h.poll();
        h.turn(10);
        assert_eq!(
            h.controller.state(),
            SessionState::SelectingOpponents {
                pending: MAX_OPPONENTS
            }
        );

        h.turn(-10);
        assert_eq!(
            h.controller.state(),
            SessionState::SelectingOpponents {
                pending: MIN_OPPONENTS
            }
        );
    }

    #[test]
    fn press_confirms_and_builds_the_set() {
        let mut h = Harness::new();
        h.configure(3);
        assert_eq!(h.controller.state(), SessionState::Tracking);
        assert_eq!(h.controller.counters().len(), 5);

        // Confirmation repaints with the first counter.
        let last = h.display.frames.last().unwrap();
        assert_eq!(last.0, "Life Total");
        assert_eq!(last.1, 40);
    }

    #[test]
    fn there_is_no_way_back_to_selection() {
        let mut h = Harness::new();
        h.configure(2);
        h.click();
        h.click();
        h.turn(3);
        assert_eq!(h.controller.state(), SessionState::Tracking);
    }

    #[test]
    fn steps_mutate_the_active_counter() {
        let mut h = Harness::new();
        h.configure(1);

        h.turn(-4);
        assert_eq!(h.controller.counters().active().value(), 36);
        h.turn(2);
        assert_eq!(h.controller.counters().active().value(), 38);

        let last = h.display.frames.last().unwrap();
        assert_eq!((last.0.as_str(), last.1), ("Life Total", 38));
    }

    #[test]
    fn presses_cycle_through_all_counters_and_wrap() {
        let mut h = Harness::new();
        h.configure(3);
        let len = h.controller.counters().len();
        assert_eq!(len, 5);

        for _ in 0..len {
            h.click();
        }
        assert_eq!(h.controller.counters().active_index(), 0);
    }

    #[test]
    fn a_held_press_cycles_only_once() {
        let mut h = Harness::new();
        h.configure(2);

        h.knob.press();
        h.poll();
        h.poll();
        h.poll();
        h.knob.release();
        h.poll();
        assert_eq!(h.controller.counters().active_index(), 1);
    }

    #[test]
    fn indicator_follows_any_lethal() {
        let mut h = Harness::new();
        h.configure(1);

        // Cycle to poison and drive it to 10.
        h.click();
        assert_eq!(h.controller.counters().active().name(), "Poison Counters");
        h.turn(10);
        assert!(h.indicator.level);

        // Lethal is set-wide: cycling away keeps the indicator lit.
        h.click();
        assert!(h.indicator.level);

        // Back to poison, drop below the threshold.
        h.click();
        h.click();
        assert_eq!(h.controller.counters().active().name(), "Poison Counters");
        h.turn(-1);
        assert!(!h.indicator.level);
        assert_eq!(h.indicator.changes, vec![true, false]);
    }

    #[test]
    fn life_runs_to_lethal_end_to_end() {
        let mut h = Harness::new();
        h.configure(1);

        h.turn(-40);
        assert_eq!(h.controller.counters().active().value(), 0);
        assert!(h.indicator.level);

        // Saturation at the floor, still lethal.
        h.turn(-3);
        assert_eq!(h.controller.counters().active().value(), 0);
        assert!(h.indicator.level);

        let last = h.display.frames.last().unwrap();
        assert_eq!((last.1, last.2), (0, true));
    }

    #[test]
    fn selection_redraws_on_every_step() {
        let mut h = Harness::new();
        h.poll();
        h.turn(2);
        assert_eq!(h.display.selects, vec![2, 3]);
    }
}
