//! Keystroke decoding: raw bytes in, editing commands out.
//!
//! [`Decoder`] is a push-driven state machine. Each input byte is fed in and
//! either completes a [`Command`], advances a partial escape sequence, or is
//! ignored. Keeping the escape-sequence progress as explicit state (rather
//! than nested blocking reads) lets the decoder run against any byte source.

/// A logical editing command produced from one or more input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Insert a printable character at the cursor.
    Insert(char),
    /// Finish the line (Enter).
    Accept,
    /// Abort the session (Ctrl+C).
    Interrupt,
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character at the cursor (Delete key).
    DeleteForward,
    /// Delete at the cursor, or cancel the session on an empty line (Ctrl+D).
    DeleteOrEof,
    /// Delete from the cursor to the end of the line (Ctrl+K).
    KillToEnd,
    /// Delete the entire line (Ctrl+U).
    KillWholeLine,
    /// Move the cursor one position left.
    Left,
    /// Move the cursor one position right.
    Right,
    /// Move the cursor to the start of the line (Home, Ctrl+A).
    Home,
    /// Move the cursor to the end of the line (End, Ctrl+E).
    End,
    /// Load the previous (older) history entry.
    HistoryUp,
    /// Load the next (newer) history entry.
    HistoryDown,
    /// Enter reverse incremental search, or repeat it (Ctrl+R).
    SearchBackward,
    /// A bare escape; cancels the search sub-mode.
    Escape,
}

// Escape-sequence progress between bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    // Seen ESC, awaiting '[' or a stray byte
    Escape,
    // Seen ESC '[', awaiting the selector
    Csi,
    // Seen ESC '[' '3', awaiting '~'
    CsiDelete,
}

/// Translates a byte stream into [`Command`]s, one byte at a time.
pub struct Decoder {
    state: State,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            state: State::Ground,
        }
    }

    /// Feeds one byte; returns a command when one is complete.
    ///
    /// `None` means the byte started or continued an escape sequence, or was
    /// not recognized and got dropped.
    pub fn feed(&mut self, byte: u8) -> Option<Command> {
        match self.state {
            State::Ground => self.feed_ground(byte),
            State::Escape => {
                if byte == b'[' {
                    self.state = State::Csi;
                    None
                } else {
                    // Not a sequence after all: the ESC itself is the
                    // command and the lookahead byte is dropped.
                    self.state = State::Ground;
                    Some(Command::Escape)
                }
            }
            State::Csi => {
                self.state = State::Ground;
                match byte {
                    b'A' => Some(Command::HistoryUp),
                    b'B' => Some(Command::HistoryDown),
                    b'C' => Some(Command::Right),
                    b'D' => Some(Command::Left),
                    b'H' => Some(Command::Home),
                    b'F' => Some(Command::End),
                    b'3' => {
                        self.state = State::CsiDelete;
                        None
                    }
                    _ => None,
                }
            }
            State::CsiDelete => {
                self.state = State::Ground;
                if byte == b'~' {
                    Some(Command::DeleteForward)
                } else {
                    None
                }
            }
        }
    }

    fn feed_ground(&mut self, byte: u8) -> Option<Command> {
        match byte {
            1 => Some(Command::Home),
            2 => Some(Command::Left),
            3 => Some(Command::Interrupt),
            4 => Some(Command::DeleteOrEof),
            5 => Some(Command::End),
            6 => Some(Command::Right),
            8 | 127 => Some(Command::Backspace),
            11 => Some(Command::KillToEnd),
            18 => Some(Command::SearchBackward),
            21 => Some(Command::KillWholeLine),
            b'\r' | b'\n' => Some(Command::Accept),
            27 => {
                self.state = State::Escape;
                None
            }
            32..=126 => Some(Command::Insert(byte as char)),
            _ => None,
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
