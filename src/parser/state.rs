//! Parser State Machine
//!
//! Decodes a byte stream one byte at a time into [`Action`]s.
//!
//! # States
//!
//! - Normal: plain text and control bytes; ESC leaves this state
//! - EscapeSeen: after ESC, expecting `[`
//! - Command: after `ESC [`, expecting a digit, `;`, `?`, or a bare command
//! - Param1: collecting the first parameter, or its command letter
//! - Param2: collecting the second parameter, or its command letter
//! - PrivateMode: after `ESC [ ?`, collecting a DEC private-mode number
//! - End: transient, falls straight back to Normal
//!
//! Every sequence ends in success or failure. Both return the machine to
//! Normal; a failed sequence is dropped with no effect.

use tracing::{debug, trace};

use super::actions::{Action, EraseMode};
use super::params::{Params, MAX_DIGITS, MAX_PRIVATE_DIGITS};

const BACKSPACE: u8 = 0x08;
const TAB: u8 = b'\t';
const ESCAPE: u8 = 0x1B;
const DELETE: u8 = 0x7F;

/// DEC private mode controlling cursor visibility
const DECTCEM: u16 = 25;

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Normal,
    EscapeSeen,
    Command,
    Param1,
    Param2,
    PrivateMode,
    End,
}

/// Outcome of feeding one byte to a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Sequence still open; move to the given state
    Continue(State),
    /// Sequence complete
    Success(Action),
    /// Sequence malformed; drop it
    Failure,
}

/// The escape-sequence decoder
#[derive(Debug, Clone, Default)]
pub struct Parser {
    state: State,
    params: Params,
}

impl Parser {
    /// Create a new parser in the normal state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Parameters of the sequence being decoded
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Drop any partial sequence and return to the normal state
    pub fn reset(&mut self) {
        self.state = State::Normal;
        self.params.reset();
    }

    /// Process a chunk of bytes, returning the completed actions
    pub fn feed(&mut self, data: &[u8]) -> Vec<Action> {
        data.iter().filter_map(|&byte| self.advance(byte)).collect()
    }

    /// Process a single byte
    pub fn advance(&mut self, byte: u8) -> Option<Action> {
        let step = match self.state {
            State::Normal => self.step_normal(byte),
            State::EscapeSeen => self.step_escape(byte),
            State::Command => self.step_command(byte),
            State::Param1 => self.step_param1(byte),
            State::Param2 => self.step_param2(byte),
            State::PrivateMode => self.step_private_mode(byte),
            State::End => Step::Continue(State::Normal),
        };

        match step {
            Step::Continue(next) => {
                self.state = next;
                None
            }
            Step::Success(action) => {
                if action.is_sequence() {
                    trace!(?action, "control sequence complete");
                }
                self.state = State::Normal;
                Some(action)
            }
            Step::Failure => {
                debug!(
                    state = ?self.state,
                    byte,
                    "discarding malformed control sequence"
                );
                self.state = State::Normal;
                None
            }
        }
    }

    fn step_normal(&self, byte: u8) -> Step {
        match byte {
            ESCAPE => Step::Continue(State::EscapeSeen),
            TAB => Step::Success(Action::Tab),
            b'\r' | b'\n' => Step::Success(Action::NewLine),
            DELETE | BACKSPACE => Step::Success(Action::Backspace),
            _ => Step::Success(Action::Print(byte)),
        }
    }

    fn step_escape(&self, byte: u8) -> Step {
        match byte {
            b'[' => Step::Continue(State::Command),
            _ => Step::Failure,
        }
    }

    fn step_command(&mut self, byte: u8) -> Step {
        match byte {
            b's' => Step::Success(Action::SaveCursor),
            b'n' => Step::Success(Action::RestoreCursor),
            b'?' => {
                self.params.reset();
                Step::Continue(State::PrivateMode)
            }
            b';' => {
                self.params.reset();
                Step::Continue(State::Param2)
            }
            b'0'..=b'9' => {
                self.params.reset();
                self.params.push_first(byte - b'0', MAX_DIGITS);
                Step::Continue(State::Param1)
            }
            // Bare erase: no digits, so mode 1 falls through to "before cursor"
            b'J' => {
                self.params.reset();
                self.erase_display()
            }
            _ => Step::Failure,
        }
    }

    fn step_param1(&mut self, byte: u8) -> Step {
        if byte.is_ascii_digit() {
            return if self.params.push_first(byte - b'0', MAX_DIGITS) {
                Step::Continue(State::Param1)
            } else {
                Step::Failure
            };
        }

        let n = self.params.n1;
        match byte {
            b'A' => Step::Success(Action::CursorUp(n)),
            b'B' => Step::Success(Action::CursorDown(n)),
            b'C' => Step::Success(Action::CursorForward(n)),
            b'D' => Step::Success(Action::CursorBack(n)),
            b'E' => Step::Success(Action::NextLine(n)),
            b'F' => Step::Success(Action::PrecedingLine(n)),
            b'G' => Step::Success(Action::CursorColumn(n)),
            b'm' => Step::Success(Action::SelectGraphicRendition {
                first: n,
                second: None,
            }),
            b'i' => match n {
                4 => Step::Success(Action::AuxPort(false)),
                5 => Step::Success(Action::AuxPort(true)),
                _ => Step::Failure,
            },
            b'n' => match n {
                6 => Step::Success(Action::DeviceStatusReport),
                _ => Step::Failure,
            },
            b'J' => self.erase_display(),
            b';' => {
                self.params.start_second();
                Step::Continue(State::Param2)
            }
            _ => Step::Failure,
        }
    }

    fn step_param2(&mut self, byte: u8) -> Step {
        if byte.is_ascii_digit() {
            return if self.params.push_second(byte - b'0', MAX_DIGITS) {
                Step::Continue(State::Param2)
            } else {
                Step::Failure
            };
        }

        let (n1, n2) = (self.params.n1, self.params.n2);
        match byte {
            b'm' => Step::Success(Action::SelectGraphicRendition {
                first: n1,
                second: Some(n2),
            }),
            b'H' | b'f' => Step::Success(Action::CursorPosition { row: n1, col: n2 }),
            _ => Step::Failure,
        }
    }

    fn step_private_mode(&mut self, byte: u8) -> Step {
        if byte.is_ascii_digit() {
            return if self.params.push_first(byte - b'0', MAX_PRIVATE_DIGITS) {
                Step::Continue(State::PrivateMode)
            } else {
                Step::Failure
            };
        }

        if self.params.n1 != DECTCEM {
            return Step::Failure;
        }
        match byte {
            b'l' => Step::Success(Action::CursorVisible(false)),
            b'h' => Step::Success(Action::CursorVisible(true)),
            _ => Step::Failure,
        }
    }

    /// Resolve `CSI n J`. Mode 1 clears the whole screen only when a digit
    /// was given; otherwise it behaves like mode 0.
    fn erase_display(&self) -> Step {
        let mode = match self.params.n1 {
            2 | 3 => EraseMode::AllAndHome,
            1 if self.params.has_digits() => EraseMode::All,
            0 | 1 => EraseMode::BeforeCursor,
            _ => return Step::Failure,
        };
        Step::Success(Action::EraseDisplay(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_print() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"Hello");

        assert_eq!(actions.len(), 5);
        assert_eq!(actions[0], Action::Print(b'H'));
        assert_eq!(actions[4], Action::Print(b'o'));
    }

    #[test]
    fn test_parser_controls() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"A\nB\rC\t\x08\x7f");

        assert_eq!(
            actions,
            vec![
                Action::Print(b'A'),
                Action::NewLine,
                Action::Print(b'B'),
                Action::NewLine,
                Action::Print(b'C'),
                Action::Tab,
                Action::Backspace,
                Action::Backspace,
            ]
        );
    }

    #[test]
    fn test_parser_cursor_moves() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[5A\x1b[2B\x1b[13C\x1b[1D\x1b[3E\x1b[4F\x1b[7G");

        assert_eq!(
            actions,
            vec![
                Action::CursorUp(5),
                Action::CursorDown(2),
                Action::CursorForward(13),
                Action::CursorBack(1),
                Action::NextLine(3),
                Action::PrecedingLine(4),
                Action::CursorColumn(7),
            ]
        );
        assert_eq!(parser.state(), State::Normal);
    }

    #[test]
    fn test_parser_cursor_position() {
        let mut parser = Parser::new();
        assert_eq!(
            parser.feed(b"\x1b[10;20H\x1b[3;4f"),
            vec![
                Action::CursorPosition { row: 10, col: 20 },
                Action::CursorPosition { row: 3, col: 4 },
            ]
        );
    }

    #[test]
    fn test_parser_omitted_params_default_to_one() {
        let mut parser = Parser::new();
        assert_eq!(
            parser.feed(b"\x1b[;7H\x1b[5;H"),
            vec![
                Action::CursorPosition { row: 1, col: 7 },
                Action::CursorPosition { row: 5, col: 1 },
            ]
        );
    }

    #[test]
    fn test_parser_sgr() {
        let mut parser = Parser::new();
        assert_eq!(
            parser.feed(b"\x1b[0m\x1b[1;31m"),
            vec![
                Action::SelectGraphicRendition {
                    first: 0,
                    second: None
                },
                Action::SelectGraphicRendition {
                    first: 1,
                    second: Some(31)
                },
            ]
        );
    }

    #[test]
    fn test_parser_save_restore() {
        let mut parser = Parser::new();
        assert_eq!(
            parser.feed(b"\x1b[s\x1b[n"),
            vec![Action::SaveCursor, Action::RestoreCursor]
        );
    }

    #[test]
    fn test_parser_erase_display_modes() {
        let mut parser = Parser::new();
        assert_eq!(
            parser.feed(b"\x1b[J\x1b[0J\x1b[1J\x1b[2J\x1b[3J"),
            vec![
                Action::EraseDisplay(EraseMode::BeforeCursor),
                Action::EraseDisplay(EraseMode::BeforeCursor),
                Action::EraseDisplay(EraseMode::All),
                Action::EraseDisplay(EraseMode::AllAndHome),
                Action::EraseDisplay(EraseMode::AllAndHome),
            ]
        );
        assert!(parser.feed(b"\x1b[4J").is_empty());
        assert_eq!(parser.state(), State::Normal);
    }

    #[test]
    fn test_parser_aux_port_and_status() {
        let mut parser = Parser::new();
        assert_eq!(
            parser.feed(b"\x1b[4i\x1b[5i\x1b[6n"),
            vec![
                Action::AuxPort(false),
                Action::AuxPort(true),
                Action::DeviceStatusReport,
            ]
        );
        assert!(parser.feed(b"\x1b[3i\x1b[5n").is_empty());
    }

    #[test]
    fn test_parser_cursor_visibility() {
        let mut parser = Parser::new();
        assert_eq!(
            parser.feed(b"\x1b[?25l\x1b[?25h"),
            vec![Action::CursorVisible(false), Action::CursorVisible(true)]
        );
        // Wrong mode number, wrong letter
        assert!(parser.feed(b"\x1b[?24h\x1b[?25x").is_empty());
        // A third digit fails the sequence; the final byte is then plain text
        assert_eq!(parser.feed(b"\x1b[?250h"), vec![Action::Print(b'h')]);
        assert_eq!(parser.state(), State::Normal);
    }

    #[test]
    fn test_parser_five_digits_fail() {
        let mut parser = Parser::new();
        // The fifth digit fails the sequence; the final byte is then plain text
        assert_eq!(parser.feed(b"\x1b[99999m"), vec![Action::Print(b'm')]);
        assert_eq!(parser.state(), State::Normal);

        assert_eq!(
            parser.feed(b"\x1b[9999m"),
            vec![Action::SelectGraphicRendition {
                first: 9999,
                second: None
            }]
        );
        assert_eq!(parser.feed(b"\x1b[1;12345H"), vec![Action::Print(b'H')]);
    }

    #[test]
    fn test_parser_failure_returns_to_normal() {
        let mut parser = Parser::new();

        // ESC not followed by '['
        assert_eq!(parser.feed(b"\x1bXa"), vec![Action::Print(b'a')]);
        // Unknown command byte
        assert_eq!(parser.feed(b"\x1b[zb"), vec![Action::Print(b'b')]);
        // Unknown letter after a parameter
        assert_eq!(parser.feed(b"\x1b[5zc"), vec![Action::Print(b'c')]);
        // Unknown letter after two parameters
        assert_eq!(parser.feed(b"\x1b[1;2Ad"), vec![Action::Print(b'd')]);
    }

    #[test]
    fn test_parser_chunk_boundary() {
        let mut parser = Parser::new();

        let actions1 = parser.feed(b"\x1b[");
        let actions2 = parser.feed(b"5");
        assert_eq!(parser.state(), State::Param1);
        assert_eq!(parser.params().n1, 5);
        let actions3 = parser.feed(b"A");

        assert!(actions1.is_empty());
        assert!(actions2.is_empty());
        assert_eq!(actions3, vec![Action::CursorUp(5)]);
    }

    #[test]
    fn test_parser_reset() {
        let mut parser = Parser::new();
        parser.feed(b"\x1b[12;");
        assert_eq!(parser.state(), State::Param2);
        parser.reset();
        assert_eq!(parser.state(), State::Normal);
        assert_eq!(parser.feed(b"x"), vec![Action::Print(b'x')]);
    }
}
