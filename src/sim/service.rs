//! The simulated device's control loop, run as a background task.

use std::time::Instant;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::{AppConfig, InputBackend};
use crate::error::InitError;
use crate::input::{BreakoutEncoder, PinEncoder, RotaryInput};
use crate::session::SessionController;
use crate::sim::board::SimBoard;
use crate::sim::console::{ConsoleDisplay, ConsoleIndicator};

/// Build the configured input backend against the simulated board. Both
/// variants come back behind the same trait object, exactly like the firmware
/// selecting its sensing scheme at startup.
pub fn build_input(
    config: &AppConfig,
    board: &SimBoard,
) -> Result<Box<dyn RotaryInput + Send>, InitError> {
    match config.backend {
        InputBackend::Pins => {
            let (a, b, s) = (board.clone(), board.clone(), board.clone());
            Ok(Box::new(PinEncoder::new(
                move || a.pin_a(),
                move || b.pin_b(),
                move || s.button_down(),
                config.debounce(),
            )))
        }
        InputBackend::Breakout => Ok(Box::new(BreakoutEncoder::new(
            board.clone(),
            config.breakout_addr,
            config.debounce(),
        )?)),
    }
}

/// Spawn the session loop. Fails fast if the configured input peripheral is
/// unavailable; past that point the loop never errors and runs until the
/// task is aborted.
pub fn spawn(config: AppConfig, board: SimBoard) -> Result<JoinHandle<()>, InitError> {
    let input = build_input(&config, &board)?;
    let poll_interval = config.poll_interval();

    let handle = tokio::spawn(async move {
        let mut display = ConsoleDisplay;
        let mut indicator = ConsoleIndicator::default();
        let mut controller = SessionController::new(input);
        controller.start(&mut display);

        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            // Sample on the regular tick, or immediately when the board
            // signals an edge.
            tokio::select! {
                _ = ticker.tick() => {}
                _ = board.edge_notified() => {}
            }
            controller.poll(Instant::now(), &mut display, &mut indicator);
        }
    });

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_breakout_fails_the_build() {
        let config = AppConfig {
            backend: InputBackend::Breakout,
            ..AppConfig::default()
        };
        let board = SimBoard::new();
        board.set_absent(true);

        let result = build_input(&config, &board);
        assert!(matches!(result, Err(InitError::BreakoutNotFound { .. })));
    }

    #[test]
    fn both_backends_build_against_the_same_board() {
        let board = SimBoard::new();

        let pins = AppConfig::default();
        assert!(build_input(&pins, &board).is_ok());

        let breakout = AppConfig {
            backend: InputBackend::Breakout,
            ..AppConfig::default()
        };
        assert!(build_input(&breakout, &board).is_ok());
    }

    #[test]
    fn backends_agree_on_direction() {
        let board = SimBoard::new();
        let pins = AppConfig::default();
        let breakout = AppConfig {
            backend: InputBackend::Breakout,
            ..AppConfig::default()
        };
        let mut via_pins = build_input(&pins, &board).unwrap();
        let mut via_breakout = build_input(&breakout, &board).unwrap();

        // Baselines differ (the software decoder starts at zero), but the
        // deltas both backends report must match.
        let (p0, b0) = (via_pins.position(), via_breakout.position());
        board.turn_cw();
        assert_eq!(via_pins.position() - p0, 1);
        assert_eq!(via_breakout.position() - b0, 1);

        board.turn_ccw();
        board.turn_ccw();
        // Two detents between polls collapse to one observed pair change for
        // the software decoder; only the sign is contractual.
        assert!(via_pins.position() - p0 <= 0);
        assert_eq!(via_breakout.position() - b0, -1);
    }
}
