//! Platform-agnostic interactive line editor with bounded history and
//! reverse incremental search.
//!
//! This library reads raw keystrokes from a terminal, maintains an editable
//! buffer with a cursor, and produces a finished line on acceptance. I/O is
//! fully separated from editing logic through the [`Terminal`] trait, so the
//! same editor runs against standard terminals, serial links, or scripted
//! test input.
//!
//! # Features
//!
//! - **Full line editing**: insert, delete, cursor movement, kill to end,
//!   kill whole line
//! - **Command history**: bounded FIFO store with adjacent-duplicate
//!   suppression and Up/Down browsing that restores the live line
//! - **Reverse incremental search**: Ctrl+R sub-mode scanning backward
//!   through history as the query grows
//! - **Byte-stream decoding**: control keys and escape sequences decoded by
//!   an explicit state machine, one byte at a time
//! - **Guarded raw mode**: terminal state restored on every exit path
//! - **Cross-platform**: Unix (termios/ANSI) and Windows (Console API)
//!   implementations included
//!
//! # Quick Start
//!
//! ```no_run
//! use zline::{LineEditor, ReadOutcome, terminals::StdioTerminal};
//!
//! let mut editor = LineEditor::new(1024, 50); // buffer size, history size
//! let mut terminal = StdioTerminal::new();
//!
//! loop {
//!     match editor.read_line(&mut terminal, "> ") {
//!         Ok(ReadOutcome::Accepted(line)) => {
//!             if line == "exit" {
//!                 break;
//!             }
//!             println!("You typed: {}", line);
//!         }
//!         Ok(ReadOutcome::Cancelled) => break,
//!         Err(e) => {
//!             eprintln!("Error: {}", e);
//!             break;
//!         }
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`LineEditor`]: session controller orchestrating one `read_line`
//!   interaction
//! - [`LineBuffer`]: the character sequence being edited, with its cursor
//! - [`History`] and [`HistoryCursor`]: bounded store of accepted lines and
//!   the per-session browsing state
//! - [`HistorySearch`]: the reverse incremental search sub-mode
//! - [`Decoder`]: byte stream in, [`Command`]s out
//!
//! All I/O goes through the [`Terminal`] trait, which platform-specific
//! implementations provide.
//!
//! # Custom Terminal Implementation
//!
//! To use zline with custom I/O (UART, network, tests), implement
//! [`Terminal`]:
//!
//! ```
//! use zline::{Terminal, Result};
//!
//! struct MyTerminal {
//!     // Your platform-specific fields
//! }
//!
//! impl Terminal for MyTerminal {
//!     fn read_byte(&mut self) -> Result<u8> {
//!         // Read from your input source
//! #       Ok(b'x')
//!     }
//!
//!     fn write(&mut self, data: &[u8]) -> Result<()> {
//!         // Write to your output
//! #       Ok(())
//!     }
//!
//!     fn flush(&mut self) -> Result<()> {
//! #       Ok(())
//!     }
//!
//!     fn enter_raw_mode(&mut self) -> Result<()> {
//!         // Configure for character-by-character input
//! #       Ok(())
//!     }
//!
//!     fn exit_raw_mode(&mut self) -> Result<()> {
//!         // Restore normal mode; must be idempotent
//! #       Ok(())
//!     }
//!
//!     fn draw(&mut self, prompt: &str, line: &str, cursor: usize) -> Result<()> {
//!         // Repaint the line with the cursor at `cursor`
//! #       Ok(())
//!     }
//!
//!     fn draw_search(&mut self, query: &str, matched: Option<&str>) -> Result<()> {
//!         // Repaint the reverse-search view
//! #       Ok(())
//!     }
//! }
//! ```

pub mod buffer;
pub mod decoder;
pub mod editor;
pub mod history;
pub mod search;
pub mod terminals;

pub use buffer::LineBuffer;
pub use decoder::{Command, Decoder};
pub use editor::{LineEditor, RawMode, ReadOutcome, Terminal};
pub use history::{History, HistoryCursor};
pub use search::HistorySearch;

/// Error type for zline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An index violated a buffer or history bound. This is a programming
    /// error in the caller; operations signal it instead of clamping.
    #[error("index {index} out of range (limit {limit})")]
    OutOfRange { index: usize, limit: usize },
    /// The input stream ended. The session controller turns this into a
    /// clean cancellation.
    #[error("input ended")]
    InputEnded,
    /// Any other I/O failure from the terminal.
    #[error("I/O error: {0}")]
    Io(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::InputEnded,
            _ => Error::Io(e),
        }
    }
}

/// Result type for zline operations.
pub type Result<T> = std::result::Result<T, Error>;
