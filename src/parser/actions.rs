//! Terminal actions produced by the parser
//!
//! Each action is one completed command: a character to print, a control
//! byte, or a fully decoded control sequence with its parameters.

/// What an erase-display (`CSI n J`) command clears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    /// Cells before the cursor
    BeforeCursor,
    /// The whole screen; cursor stays put
    All,
    /// The whole screen, and the cursor goes home
    AllAndHome,
}

/// Actions produced by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Write a character at the cursor and advance
    Print(u8),
    /// HT: advance to the next multiple of 8
    Tab,
    /// CR or LF: start of the next row
    NewLine,
    /// BS or DEL: step back one column and blank it
    Backspace,

    /// CSI s
    SaveCursor,
    /// CSI n (with no parameter)
    RestoreCursor,

    /// CSI n A
    CursorUp(u16),
    /// CSI n B
    CursorDown(u16),
    /// CSI n C
    CursorForward(u16),
    /// CSI n D
    CursorBack(u16),
    /// CSI n E: column 0, n rows down
    NextLine(u16),
    /// CSI n F: column 0, n rows up
    PrecedingLine(u16),
    /// CSI n G
    CursorColumn(u16),
    /// CSI row ; col H (or f)
    CursorPosition { row: u16, col: u16 },

    /// CSI n m / CSI n ; n m
    SelectGraphicRendition { first: u16, second: Option<u16> },

    /// CSI 4 i / CSI 5 i
    AuxPort(bool),
    /// CSI 6 n
    DeviceStatusReport,
    /// CSI n J
    EraseDisplay(EraseMode),

    /// CSI ? 25 h / CSI ? 25 l
    CursorVisible(bool),
}

impl Action {
    /// Whether this action is a decoded control sequence rather than a
    /// plain character or control byte
    pub fn is_sequence(&self) -> bool {
        !matches!(
            self,
            Action::Print(_) | Action::Tab | Action::NewLine | Action::Backspace
        )
    }
}
