//! Time-window debounce filter for mechanical contacts.

use std::time::{Duration, Instant};

/// Default stability window. Long for a debouncer, but the device's button
/// only cycles counters, so latency matters less than never double-firing.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Commits a new level only after the raw reading has held it for the full
/// window. Any raw change resets the clock, so a burst of contact bounce
/// collapses to at most one committed change once the line settles.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last_raw: bool,
    /// None until the first raw change; the initial reading is treated as
    /// already stable.
    last_change: Option<Instant>,
    committed: bool,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_raw: false,
            last_change: None,
            committed: false,
        }
    }

    /// Feed one raw sample taken at `now`; returns the debounced level.
    pub fn update(&mut self, raw: bool, now: Instant) -> bool {
        if raw != self.last_raw {
            self.last_change = Some(now);
            self.last_raw = raw;
        }

        let stable_for = match self.last_change {
            Some(changed_at) => now.duration_since(changed_at),
            None => self.window,
        };
        if stable_for >= self.window {
            self.committed = self.last_raw;
        }

        self.committed
    }

    /// Last committed level, without feeding a new sample.
    pub fn state(&self) -> bool {
        self.committed
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
