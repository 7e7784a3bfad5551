pub mod config;
pub mod counter;
pub mod counters;
pub mod display;
pub mod error;
pub mod input;
pub mod session;
pub mod sim;

pub use config::AppConfig;
pub use counter::Counter;
pub use counters::{CounterSet, MAX_OPPONENTS};
pub use display::{CounterFrame, DisplaySink, LethalIndicator, Splash};
pub use error::InitError;
pub use input::{EventReader, InputEvent, RotaryInput};
pub use session::{MIN_OPPONENTS, SessionController, SessionState};
