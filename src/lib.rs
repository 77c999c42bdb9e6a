//! VT100-style Terminal Core
//!
//! A fixed-size character-cell terminal driven one byte at a time:
//!
//! - `core`: attributes, the screen buffer, cursor navigation, snapshots
//! - `parser`: the escape-sequence state machine
//! - `app`: configuration
//!
//! [`Terminal`] ties them together; [`Terminal::feed`] is the only way its
//! contents change.

pub mod app;
pub mod core;
pub mod parser;
mod terminal;

pub use terminal::{Terminal, MAX_PENDING_RESPONSES};
