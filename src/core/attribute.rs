//! Display attributes
//!
//! Every cell carries an [`Attribute`]: a handful of independent flags plus
//! a foreground and background colour from the 8-colour palette. SGR codes
//! (`CSI n m`) are folded into an attribute one code at a time.

use serde::{Deserialize, Serialize};

/// The 8-colour palette, in SGR order (`30 + n` / `40 + n`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// All colours, indexed by their SGR offset
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    /// Look up a colour by its 3-bit index. Returns `None` above 7.
    pub fn from_index(index: u16) -> Option<Color> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// The 3-bit index of this colour
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Convert to RGB. Bright colours use a full channel, normal ones half.
    pub fn to_rgb(self, bright: bool) -> (u8, u8, u8) {
        let on = if bright { 0xCC } else { 0x66 };
        let channel = |set: bool| if set { on } else { 0 };
        // Bits 0..2 of the index are red, green, blue
        let index = self.index();
        (
            channel(index & 0b001 != 0),
            channel(index & 0b010 != 0),
            channel(index & 0b100 != 0),
        )
    }
}

/// Per-cell display attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub bold: bool,
    pub underline: bool,
    pub blink: bool,
    pub reverse_video: bool,
    pub conceal: bool,
    pub foreground: Color,
    pub background: Color,
}

impl Default for Attribute {
    /// White on black, no flags
    fn default() -> Self {
        Self {
            bold: false,
            underline: false,
            blink: false,
            reverse_video: false,
            conceal: false,
            foreground: Color::White,
            background: Color::Black,
        }
    }
}

impl Attribute {
    /// Apply a single SGR code.
    ///
    /// Code 0 replaces the whole attribute with the default. Every other
    /// recognised code sets exactly one flag or one colour field, so those
    /// codes commute. Unknown codes are ignored.
    pub fn apply_code(&mut self, code: u16) {
        match code {
            0 => *self = Self::default(),
            1 => self.bold = true,
            4 => self.underline = true,
            5 => self.blink = true,
            7 => self.reverse_video = true,
            8 => self.conceal = true,
            30..=37 => {
                if let Some(color) = Color::from_index(code - 30) {
                    self.foreground = color;
                }
            }
            40..=47 => {
                if let Some(color) = Color::from_index(code - 40) {
                    self.background = color;
                }
            }
            _ => {}
        }
    }

    /// Apply a sequence of SGR codes in order
    pub fn apply_codes(&mut self, codes: &[u16]) {
        for &code in codes {
            self.apply_code(code);
        }
    }
}
