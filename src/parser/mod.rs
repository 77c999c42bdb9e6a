//! Terminal escape sequence parser
//!
//! A byte-at-a-time state machine that turns input into terminal actions.
//! Plain bytes become [`Action::Print`]; `ESC [` sequences carry up to two
//! decimal parameters and a command letter.

mod actions;
mod params;
mod state;

pub use actions::{Action, EraseMode};
pub use params::{Params, DEFAULT_PARAM, MAX_DIGITS, MAX_PRIVATE_DIGITS};
pub use state::{Parser, State};
