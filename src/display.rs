//! Collaborator traits for the display panel and the lethal indicator.
//!
//! The core hands the display exactly the data it needs and nothing else: a
//! one-time splash payload, the opponent-select screen, and per-counter
//! frames. Pixel layout, fonts, and the panel transport live entirely on the
//! implementor's side.

/// One-time startup screen payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splash {
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl Default for Splash {
    fn default() -> Self {
        Self {
            title: "Commander",
            subtitle: "Tracker",
        }
    }
}

/// Snapshot of the active counter for one repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame<'a> {
    pub name: &'a str,
    pub value: i32,
    pub lethal: bool,
}

/// Receives repaint requests from the session controller.
pub trait DisplaySink {
    /// Shown once at startup.
    fn splash(&mut self, splash: &Splash);

    /// Opponent-selection screen with the pending count.
    fn opponent_select(&mut self, pending: u8);

    /// Steady-state screen: the active counter.
    fn counter(&mut self, frame: &CounterFrame<'_>);
}

/// Binary output driven high while any counter is lethal (the status LED on
/// the physical device).
pub trait LethalIndicator {
    fn set_lethal(&mut self, on: bool);
}
