//! The set of counters for one game session.
//!
//! A session always has the life total at index 0 and poison counters at
//! index 1; commander damage counters for each configured opponent follow.
//! Insertion order is cycle order.

use crate::counter::Counter;

/// Most opponents the device supports (display and memory constraint).
pub const MAX_OPPONENTS: u8 = 5;

/// Ordered, owned collection of the session's counters plus the index of the
/// one currently shown. Counters are owned by value; reconfiguring replaces
/// the whole collection atomically rather than patching it in place.
#[derive(Debug)]
pub struct CounterSet {
    counters: Vec<Counter>,
    active: usize,
}

impl Default for CounterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSet {
    /// Pre-configuration set: just life and poison.
    pub fn new() -> Self {
        Self {
            counters: vec![Counter::life(), Counter::poison()],
            active: 0,
        }
    }

    /// Rebuild the set for `opponents` opponents and reset the active index.
    /// Any previous commander damage counters are dropped with the old
    /// collection.
    pub fn configure(&mut self, opponents: u8) {
        let opponents = opponents.min(MAX_OPPONENTS);
        let mut counters = Vec::with_capacity(2 + opponents as usize);
        counters.push(Counter::life());
        counters.push(Counter::poison());
        for i in 1..=opponents {
            counters.push(Counter::commander_damage(i));
        }
        self.counters = counters;
        self.active = 0;
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The counter currently shown on the display.
    pub fn active(&self) -> &Counter {
        &self.counters[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Counter {
        &mut self.counters[self.active]
    }

    /// Advance to the next counter, wrapping past the end.
    pub fn cycle_next(&mut self) {
        self.active = (self.active + 1) % self.counters.len();
    }

    /// True if any counter in the set reports lethal. The set never holds
    /// more than `2 + MAX_OPPONENTS` entries, so a linear scan is fine.
    pub fn any_lethal(&self) -> bool {
        self.counters.iter().any(Counter::is_lethal)
    }

    pub fn get(&self, index: usize) -> Option<&Counter> {
        self.counters.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Counter> {
        self.counters.get_mut(index)
    }
}
