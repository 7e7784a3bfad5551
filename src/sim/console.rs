//! Console implementations of the display and indicator collaborators.

use crate::display::{CounterFrame, DisplaySink, LethalIndicator, Splash};

/// Prints what the OLED panel would show, one line per repaint.
#[derive(Debug, Default)]
pub struct ConsoleDisplay;

impl DisplaySink for ConsoleDisplay {
    fn splash(&mut self, splash: &Splash) {
        println!();
        println!("  === {} {} ===", splash.title, splash.subtitle);
        println!();
    }

    fn opponent_select(&mut self, pending: u8) {
        println!("Select Opponents: {pending}");
    }

    fn counter(&mut self, frame: &CounterFrame<'_>) {
        let marker = if frame.lethal { "  [LETHAL]" } else { "" };
        println!("{}: {}{marker}", frame.name, frame.value);
    }
}

/// Stands in for the status LED; prints only on level changes.
#[derive(Debug, Default)]
pub struct ConsoleIndicator {
    level: bool,
}

impl LethalIndicator for ConsoleIndicator {
    fn set_lethal(&mut self, on: bool) {
        if on != self.level {
            println!("[led] {}", if on { "ON" } else { "OFF" });
            self.level = on;
        }
    }
}
