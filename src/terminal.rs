//! Terminal Executor
//!
//! Ties together the parser, screen buffer, and cursor. Bytes go in through
//! [`Terminal::feed`]; the parser turns them into actions, and the actions
//! are applied here.

use tracing::debug;

use crate::app::Config;
use crate::core::{
    Addressing, Attribute, Cursor, Dimensions, ScreenBuffer, TerminalError, BLANK,
};
use crate::parser::{Action, EraseMode, Parser, State};

/// Most reply bytes held for the host; replies past this are dropped
pub const MAX_PENDING_RESPONSES: usize = 1024;

/// A fixed-size terminal: screen buffer, cursor, current attribute, and
/// the escape-sequence decoder
#[derive(Debug, Clone)]
pub struct Terminal {
    buffer: ScreenBuffer,
    cursor: Cursor,
    /// Attribute stamped onto the next printed character
    attribute: Attribute,
    parser: Parser,
    /// Bytes the terminal wants sent back to the host
    responses: Vec<u8>,
}

impl Terminal {
    /// Create a blank terminal of `width` x `height` cells
    pub fn new(width: usize, height: usize) -> Result<Self, TerminalError> {
        Ok(Self {
            buffer: ScreenBuffer::new(width, height)?,
            cursor: Cursor::new(),
            attribute: Attribute::default(),
            parser: Parser::new(),
            responses: Vec::new(),
        })
    }

    /// Create a terminal with the geometry and cursor flags of `config`
    pub fn from_config(config: &Config) -> Result<Self, TerminalError> {
        let mut terminal = Self::new(config.width, config.height)?;
        terminal.cursor.visible = config.cursor_visible;
        terminal.cursor.blinks = config.cursor_blinks;
        Ok(terminal)
    }

    /// Feed one input byte
    pub fn feed(&mut self, byte: u8) {
        let in_normal = self.parser.state() == State::Normal;

        if let Some(action) = self.parser.advance(byte) {
            self.apply_action(action);
        }

        if in_normal {
            self.wrap_overflow();
        }
    }

    /// Feed a run of input bytes, in order
    pub fn feed_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.feed(byte);
        }
    }

    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    pub fn size(&self) -> usize {
        self.buffer.size()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.buffer.width(),
            height: self.buffer.height(),
        }
    }

    pub fn buffer(&self) -> &ScreenBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Cursor as (column, row)
    pub fn cursor_xy(&self) -> (usize, usize) {
        self.dimensions().position_of(self.cursor.index)
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor.visible
    }

    pub fn cursor_blinks(&self) -> bool {
        self.cursor.blinks
    }

    pub fn set_cursor_blinks(&mut self, blinks: bool) {
        self.cursor.blinks = blinks;
    }

    /// The attribute the next printed character will get
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Character at (x, y), if on screen
    pub fn char_at(&self, x: usize, y: usize) -> Option<u8> {
        self.index_of(x, y).and_then(|i| self.buffer.character(i))
    }

    /// Attribute at (x, y), if on screen
    pub fn attribute_at(&self, x: usize, y: usize) -> Option<Attribute> {
        self.index_of(x, y).and_then(|i| self.buffer.attribute(i))
    }

    /// Row `y` as text, one `char` per cell
    pub fn row_text(&self, y: usize) -> Option<String> {
        self.buffer
            .row_characters(y)
            .map(|row| row.iter().map(|&c| char::from(c)).collect())
    }

    /// Drain bytes queued for the host (device status replies)
    pub fn take_responses(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.responses)
    }

    fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width() && y < self.height()).then(|| y * self.width() + x)
    }

    fn apply_action(&mut self, action: Action) {
        let dims = self.dimensions();
        match action {
            Action::Print(c) => {
                self.buffer.write(self.cursor.index, c, self.attribute);
                self.cursor.index += 1;
            }
            Action::Tab => {
                self.cursor.index = (self.cursor.index + 8) & !0x7;
            }
            Action::NewLine => {
                self.cursor.index = (self.cursor.index / dims.width + 1) * dims.width;
            }
            Action::Backspace => {
                self.cursor.move_by(dims, -1, 0, Addressing::Clamp);
                self.buffer.set_character(self.cursor.index, BLANK);
            }
            Action::SaveCursor => self.cursor.save(),
            Action::RestoreCursor => self.cursor.restore(),
            Action::CursorUp(n) => {
                self.cursor.move_by(dims, 0, -i64::from(n), Addressing::Clamp);
            }
            Action::CursorDown(n) => {
                self.cursor.move_by(dims, 0, i64::from(n), Addressing::Clamp);
            }
            Action::CursorForward(n) => {
                self.cursor.move_by(dims, i64::from(n), 0, Addressing::Clamp);
            }
            Action::CursorBack(n) => {
                self.cursor.move_by(dims, -i64::from(n), 0, Addressing::Clamp);
            }
            Action::NextLine(n) => self.cursor.move_to_line_start(dims, i64::from(n)),
            Action::PrecedingLine(n) => self.cursor.move_to_line_start(dims, -i64::from(n)),
            Action::CursorColumn(n) => {
                let y = self.cursor.y(dims);
                self.cursor.move_to(dims, usize::from(n), y, Addressing::Clamp);
            }
            Action::CursorPosition { row, col } => {
                self.cursor
                    .move_to(dims, usize::from(col), usize::from(row), Addressing::Clamp);
            }
            Action::SelectGraphicRendition { first, second } => {
                self.attribute.apply_code(first);
                if let Some(code) = second {
                    self.attribute.apply_code(code);
                }
                self.buffer.set_attribute(self.cursor.index, self.attribute);
            }
            Action::AuxPort(on) => {
                debug!(on, "aux port toggled");
            }
            Action::DeviceStatusReport => {
                let (x, y) = self.cursor_xy();
                let reply = format!("\x1b[{};{}R", y + 1, x + 1);
                if self.responses.len() + reply.len() > MAX_PENDING_RESPONSES {
                    debug!(pending = self.responses.len(), "reply queue full, dropping report");
                } else {
                    self.responses.extend_from_slice(reply.as_bytes());
                }
            }
            Action::EraseDisplay(mode) => match mode {
                EraseMode::BeforeCursor => self.buffer.clear_range(self.cursor.index),
                EraseMode::All => self.buffer.clear(),
                EraseMode::AllAndHome => {
                    self.cursor.index = 0;
                    self.buffer.clear();
                }
            },
            Action::CursorVisible(visible) => self.cursor.visible = visible,
        }
    }

    /// No scrollback: once the cursor runs off the end, the screen is
    /// blanked and the cursor wraps.
    fn wrap_overflow(&mut self) {
        let size = self.buffer.size();
        if self.cursor.index >= size {
            debug!(cursor = self.cursor.index, size, "screen full, clearing");
            self.buffer.clear();
        }
        self.cursor.index %= size;
    }
}
