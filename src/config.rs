//! Device configuration, persisted via confy.
//!
//! Only wiring and timing live here: which sensing backend is fitted, pin
//! assignments, the bus address, and the debounce/poll windows. Counter
//! state itself is deliberately volatile and reinitializes on every power-up.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::input::breakout;

/// Which physical sensing scheme the device is built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputBackend {
    /// Encoder wired straight to GPIO, decoded in software.
    #[default]
    Pins,
    /// Bus-attached breakout board that decodes its own position.
    Breakout,
}

/// GPIO assignments for the direct-pin build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PinAssignments {
    pub rotary_a: u8,
    pub rotary_b: u8,
    pub button: u8,
    pub lethal_led: u8,
}

impl Default for PinAssignments {
    fn default() -> Self {
        Self {
            rotary_a: 6,
            rotary_b: 7,
            button: 8,
            lethal_led: 13,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: InputBackend,
    /// Stability window for the button debounce filter, in milliseconds.
    pub debounce_ms: u64,
    /// How often the control loop samples the input, in milliseconds.
    pub poll_interval_ms: u64,
    /// Bus address of the breakout board (breakout backend only).
    pub breakout_addr: u8,
    #[serde(default)]
    pub pins: PinAssignments,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: InputBackend::default(),
            debounce_ms: 200,
            poll_interval_ms: 5,
            breakout_addr: breakout::DEFAULT_ADDR,
            pins: PinAssignments::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        confy::load("tally", None).unwrap_or_default()
    }

    pub fn save(self) {
        confy::store("tally", None, self).expect("Failed to save configuration");
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
