//! Terminal Core Module
//!
//! Platform-independent terminal state. This module contains:
//! - Display attributes and the SGR code mapping
//! - The fixed-size character and attribute grid
//! - Cursor state and the clamp/wrap addressing policies
//! - Deterministic snapshot generation
//!
//! Given the same sequence of actions, the core always produces the same
//! state.

mod attribute;
mod buffer;
mod cursor;
mod snapshot;

pub use attribute::{Attribute, Color};
pub use buffer::{Cell, ScreenBuffer, TerminalError, BLANK, MAX_CAPACITY};
pub use cursor::{Addressing, Cursor, Dimensions};
pub use snapshot::{AttributeSnapshot, CursorSnapshot, Snapshot};
