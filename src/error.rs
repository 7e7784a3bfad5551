//! Initialization error types.
//!
//! Steady-state operation has no error paths at all: counter saturation is
//! defined behavior and debounce transients are absorbed inside the input
//! layer. The only failures the core can surface are fatal ones at startup,
//! when a peripheral the device cannot run without is missing.

use thiserror::Error;

/// Fatal startup failures. None of these are retried: without its input or
/// display peripheral the device is unusable, so callers report the error
/// once and stop.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("no encoder breakout found at bus address 0x{addr:02x}")]
    BreakoutNotFound { addr: u8 },

    #[error("display did not initialize")]
    DisplayUnavailable,
}
