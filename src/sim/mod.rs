//! Host-side simulation of the device hardware.
//!
//! The simulator stands in for the physical board: pin levels, the breakout
//! bus device, the display panel, and the status LED all get in-memory
//! implementations, while the counter model, input decoding, and session
//! controller are the real thing. Both sensing backends run against the same
//! [`board::SimBoard`], so the whole input contract is exercised end to end.

pub mod board;
pub mod console;
pub mod service;

pub use board::SimBoard;
pub use console::{ConsoleDisplay, ConsoleIndicator};
