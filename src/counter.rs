//! Bounded counters with lethal detection.
//!
//! Every value this device tracks (life total, poison, commander damage) is
//! the same thing: a clamped integer plus a rule for when that integer means
//! a player is eliminated.

/// A clamped integer counter with a lethal threshold.
///
/// `value` stays within `min..=max` at all times. Increments and decrements
/// saturate at the bounds; hitting a bound is expected behavior, not an
/// error. The lethal flag is recomputed after every mutation so it can never
/// be stale relative to the value.
#[derive(Debug, Clone)]
pub struct Counter {
    name: String,
    value: i32,
    min: i32,
    max: i32,
    lethal_at: i32,
    /// Inverted counters (like a life total) are lethal when the value falls
    /// to or below the threshold instead of rising to it.
    inverted: bool,
    lethal: bool,
}

/// Starting life total in a commander game.
pub const LIFE_START: i32 = 40;
/// Poison counters needed to eliminate a player.
pub const POISON_LETHAL: i32 = 10;
/// Commander damage needed to eliminate a player.
pub const COMMANDER_LETHAL: i32 = 21;

impl Counter {
    /// Build a counter. `min > max` is a caller contract violation; all
    /// construction in this crate goes through the preset constructors below.
    pub fn new(
        name: impl Into<String>,
        value: i32,
        min: i32,
        max: i32,
        lethal_at: i32,
        inverted: bool,
    ) -> Self {
        let mut counter = Self {
            name: name.into(),
            value,
            min,
            max,
            lethal_at,
            inverted,
            lethal: false,
        };
        counter.update_lethal();
        counter
    }

    /// Life total: starts at 40, lethal when it reaches 0.
    pub fn life() -> Self {
        Self::new("Life Total", LIFE_START, 0, 100, 0, true)
    }

    /// Poison counters: start at 0, lethal at 10, capped at 10.
    pub fn poison() -> Self {
        Self::new("Poison Counters", 0, 0, POISON_LETHAL, POISON_LETHAL, false)
    }

    /// Commander damage from one opponent: lethal at 21, tracked up to 100.
    /// `opponent` is 1-based and only feeds the display name.
    pub fn commander_damage(opponent: u8) -> Self {
        Self::new(
            format!("Cmdr Dmg {opponent}"),
            0,
            0,
            100,
            COMMANDER_LETHAL,
            false,
        )
    }

    /// Add one, saturating at `max`.
    pub fn increment(&mut self) {
        if self.value < self.max {
            self.value += 1;
        }
        self.update_lethal();
    }

    /// Subtract one, saturating at `min`.
    pub fn decrement(&mut self) {
        if self.value > self.min {
            self.value -= 1;
        }
        self.update_lethal();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Whether this counter currently signals player elimination.
    pub fn is_lethal(&self) -> bool {
        self.lethal
    }

    fn update_lethal(&mut self) {
        self.lethal = if self.inverted {
            self.value <= self.lethal_at
        } else {
            self.value >= self.lethal_at
        };
    }
}
