//! Deterministic snapshot generation
//!
//! Snapshots capture everything a renderer reads (cells, attributes, and
//! cursor) in a serializable form. Given the same byte stream, the
//! terminal must produce identical snapshots.

use serde::{Deserialize, Serialize};

use super::attribute::{Attribute, Color};
use crate::Terminal;

/// A complete snapshot of the terminal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Screen dimensions
    pub width: usize,
    pub height: usize,
    /// One string per row, one `char` per cell
    pub text: Vec<String>,
    /// Per-cell attributes (row-major)
    pub attributes: Vec<Vec<AttributeSnapshot>>,
    /// Cursor state
    pub cursor: CursorSnapshot,
}

/// Snapshot of a cell's attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSnapshot {
    pub fg: Color,
    pub bg: Color,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub blink: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reverse_video: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub conceal: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Snapshot of cursor state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSnapshot {
    pub x: usize,
    pub y: usize,
    pub visible: bool,
    pub blinks: bool,
}

impl From<&Attribute> for AttributeSnapshot {
    fn from(attr: &Attribute) -> Self {
        AttributeSnapshot {
            fg: attr.foreground,
            bg: attr.background,
            bold: attr.bold,
            underline: attr.underline,
            blink: attr.blink,
            reverse_video: attr.reverse_video,
            conceal: attr.conceal,
        }
    }
}

impl From<&AttributeSnapshot> for Attribute {
    fn from(snap: &AttributeSnapshot) -> Self {
        Attribute {
            bold: snap.bold,
            underline: snap.underline,
            blink: snap.blink,
            reverse_video: snap.reverse_video,
            conceal: snap.conceal,
            foreground: snap.fg,
            background: snap.bg,
        }
    }
}

impl Snapshot {
    /// Capture the current state of a terminal
    pub fn from_terminal(terminal: &Terminal) -> Self {
        let buffer = terminal.buffer();
        let height = buffer.height();

        let text: Vec<String> = (0..height)
            .filter_map(|y| buffer.row_characters(y))
            .map(|row| row.iter().map(|&c| char::from(c)).collect::<String>())
            .collect();
        let attributes: Vec<Vec<AttributeSnapshot>> = (0..height)
            .filter_map(|y| buffer.row_attributes(y))
            .map(|row| row.iter().map(AttributeSnapshot::from).collect::<Vec<_>>())
            .collect();

        let (x, y) = terminal.cursor_xy();
        Snapshot {
            width: buffer.width(),
            height,
            text,
            attributes,
            cursor: CursorSnapshot {
                x,
                y,
                visible: terminal.cursor_visible(),
                blinks: terminal.cursor_blinks(),
            },
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Plain text rendering: a header line, then each row with trailing
    /// blanks trimmed
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "{}x{} cursor=({}, {}){}\n",
            self.width,
            self.height,
            self.cursor.x,
            self.cursor.y,
            if self.cursor.visible { "" } else { " hidden" }
        );
        for line in &self.text {
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    /// Attribute of the cell at (x, y)
    pub fn attribute_at(&self, x: usize, y: usize) -> Option<Attribute> {
        self.attributes
            .get(y)
            .and_then(|row| row.get(x))
            .map(Attribute::from)
    }

    /// Compare screen contents, ignoring cursor state
    pub fn content_equals(&self, other: &Snapshot) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.text == other.text
            && self.attributes == other.attributes
    }
}
