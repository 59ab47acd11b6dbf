//! The session controller: one `read_line` interaction from raw bytes to a
//! finished line.
//!
//! [`LineEditor`] owns the buffer and the history and runs the read loop:
//! decode a byte, dispatch the command to the buffer, the history cursor, or
//! the search sub-mode, request a repaint, repeat until the line is accepted
//! or the session is cancelled. Raw mode is held by [`RawMode`], a guard
//! that restores the terminal on every exit path.

use log::{debug, trace, warn};

use crate::decoder::{Command, Decoder};
use crate::history::HistoryCursor;
use crate::search::HistorySearch;
use crate::{Error, History, LineBuffer, Result};

/// Terminal abstraction that enables platform-agnostic line editing.
///
/// Implement this trait to use zline with any I/O system: standard
/// terminals, serial connections, network sockets, or test fixtures.
/// Input is a plain byte stream; multi-byte key sequences are decoded by the
/// library, so implementations only read and draw.
///
/// # Platform Implementations
///
/// - [`terminals::StdioTerminal`](crate::terminals::StdioTerminal) for Unix
///   (termios + ANSI)
/// - [`terminals::StdioTerminal`](crate::terminals::StdioTerminal) for
///   Windows (Console API + VT sequences)
pub trait Terminal {
    /// Reads a single byte, blocking until one is available.
    ///
    /// # Errors
    ///
    /// [`Error::InputEnded`] at end of stream; the session treats that as
    /// cancellation, not a failure.
    fn read_byte(&mut self) -> Result<u8>;

    /// Writes raw bytes to the output.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Flushes buffered output. Called after each processed command so
    /// feedback is immediate.
    fn flush(&mut self) -> Result<()>;

    /// Enters raw (character-at-a-time, no echo) input mode.
    ///
    /// Failure is not fatal: the session proceeds in whatever mode the
    /// terminal is already in.
    fn enter_raw_mode(&mut self) -> Result<()>;

    /// Restores the terminal mode saved by [`enter_raw_mode`].
    ///
    /// Must be idempotent; it may run twice on some exit paths.
    ///
    /// [`enter_raw_mode`]: Terminal::enter_raw_mode
    fn exit_raw_mode(&mut self) -> Result<()>;

    /// Repaints the edited line: prompt, content, cursor at `cursor`
    /// characters past the prompt.
    fn draw(&mut self, prompt: &str, line: &str, cursor: usize) -> Result<()>;

    /// Repaints the reverse-search view: the query typed so far and the
    /// entry it currently matches, if any.
    fn draw_search(&mut self, query: &str, matched: Option<&str>) -> Result<()>;
}

/// Scoped raw-mode acquisition.
///
/// Acquiring puts the terminal in raw mode; dropping the guard restores it,
/// exactly once, on every exit path out of the session. A terminal that
/// cannot enter raw mode is logged and the session continues degraded.
pub struct RawMode<'a, T: Terminal> {
    terminal: &'a mut T,
    active: bool,
}

impl<'a, T: Terminal> RawMode<'a, T> {
    /// Tries to enter raw mode, holding the terminal either way.
    pub fn acquire(terminal: &'a mut T) -> Self {
        let active = match terminal.enter_raw_mode() {
            Ok(()) => true,
            Err(err) => {
                warn!("raw mode unavailable, continuing in current mode: {err}");
                false
            }
        };
        Self { terminal, active }
    }

    /// Access to the guarded terminal for the duration of the session.
    pub fn terminal(&mut self) -> &mut T {
        self.terminal
    }
}

impl<T: Terminal> Drop for RawMode<'_, T> {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            if let Err(err) = self.terminal.exit_raw_mode() {
                warn!("failed to restore terminal mode: {err}");
            }
        }
    }
}

/// How a read session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The user finished the line; it has already been offered to history.
    Accepted(String),
    /// Interrupt, end of input, or Ctrl+D on an empty line. No line was
    /// produced.
    Cancelled,
}

/// Main line editor interface with editing, history, and reverse search.
///
/// The editor persists across read sessions and owns the command history;
/// each [`read_line`](LineEditor::read_line) call is one session with its
/// own browsing and search state.
///
/// # Examples
///
/// ```no_run
/// use zline::{LineEditor, ReadOutcome, terminals::StdioTerminal};
///
/// let mut editor = LineEditor::new(1024, 50);
/// let mut terminal = StdioTerminal::new();
///
/// match editor.read_line(&mut terminal, "> ")? {
///     ReadOutcome::Accepted(line) => println!("got: {line}"),
///     ReadOutcome::Cancelled => println!("cancelled"),
/// }
/// # Ok::<(), zline::Error>(())
/// ```
///
/// # Key Bindings
///
/// - **Left/Right, Ctrl+B/F**: move the cursor; **Home/End, Ctrl+A/E**: jump
/// - **Backspace, Delete**: delete one character
/// - **Ctrl+K**: kill to end of line; **Ctrl+U**: kill the whole line
/// - **Up/Down**: browse history, restoring the live line on the way back
/// - **Ctrl+R**: reverse incremental search; repeat to dig older, Escape to
///   cancel, Enter to take the match
/// - **Enter**: accept; **Ctrl+C**: cancel; **Ctrl+D**: delete forward, or
///   cancel on an empty line
pub struct LineEditor {
    buffer: LineBuffer,
    history: History,
}

impl LineEditor {
    /// Creates an editor with the given buffer capacity (characters) and
    /// history capacity (entries).
    pub fn new(buffer_capacity: usize, history_capacity: usize) -> Self {
        Self {
            buffer: LineBuffer::new(buffer_capacity),
            history: History::new(history_capacity),
        }
    }

    /// The accumulated command history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Runs one read session against `terminal`.
    ///
    /// Blocks until the line is accepted or the session is cancelled. An
    /// accepted line is appended to history (subject to the empty and
    /// adjacent-duplicate rules) before being returned. Raw mode is entered
    /// for the duration and restored on every exit path.
    ///
    /// # Errors
    ///
    /// Only genuine I/O failures surface as `Err`; cancellation and end of
    /// input are reported through [`ReadOutcome::Cancelled`].
    pub fn read_line<T: Terminal>(
        &mut self,
        terminal: &mut T,
        prompt: &str,
    ) -> Result<ReadOutcome> {
        trace!("read session started");
        self.buffer.clear();
        let mut decoder = Decoder::new();
        let mut cursor = HistoryCursor::new(self.history.len());
        let mut search: Option<HistorySearch> = None;

        let mut raw = RawMode::acquire(terminal);
        raw.terminal().draw(prompt, "", 0)?;
        raw.terminal().flush()?;

        loop {
            let byte = match raw.terminal().read_byte() {
                Ok(byte) => byte,
                Err(Error::InputEnded) => {
                    trace!("input ended, session cancelled");
                    return Ok(ReadOutcome::Cancelled);
                }
                Err(err) => return Err(err),
            };

            let Some(command) = decoder.feed(byte) else {
                continue;
            };

            if let Some(active) = search.take() {
                match self.dispatch_search(raw.terminal(), prompt, active, command)? {
                    SearchStep::Continue(active) => {
                        search = Some(active);
                        raw.terminal().flush()?;
                        continue;
                    }
                    SearchStep::Exited => {
                        raw.terminal().flush()?;
                        continue;
                    }
                    SearchStep::Interrupted => return Ok(ReadOutcome::Cancelled),
                }
            }

            match command {
                Command::Insert(c) => {
                    self.buffer.insert(c);
                    self.draw(raw.terminal(), prompt)?;
                }
                Command::Accept => {
                    raw.terminal().write(b"\r\n")?;
                    raw.terminal().flush()?;
                    let line = self.buffer.contents();
                    self.history.append(&line);
                    debug!("line accepted ({} chars)", line.len());
                    return Ok(ReadOutcome::Accepted(line));
                }
                Command::Interrupt => {
                    raw.terminal().write(b"^C\r\n")?;
                    raw.terminal().flush()?;
                    trace!("interrupted, session cancelled");
                    return Ok(ReadOutcome::Cancelled);
                }
                Command::Backspace => {
                    if self.buffer.cursor() > 0 {
                        self.buffer.delete_backward(1)?;
                        self.draw(raw.terminal(), prompt)?;
                    }
                }
                Command::DeleteForward => {
                    if self.buffer.cursor() < self.buffer.len() {
                        self.buffer.delete_forward(1)?;
                        self.draw(raw.terminal(), prompt)?;
                    }
                }
                Command::DeleteOrEof => {
                    if self.buffer.is_empty() {
                        raw.terminal().write(b"\r\n")?;
                        raw.terminal().flush()?;
                        trace!("Ctrl+D on empty line, session cancelled");
                        return Ok(ReadOutcome::Cancelled);
                    }
                    if self.buffer.cursor() < self.buffer.len() {
                        self.buffer.delete_forward(1)?;
                        self.draw(raw.terminal(), prompt)?;
                    }
                }
                Command::KillToEnd => {
                    let rest = self.buffer.len() - self.buffer.cursor();
                    if rest > 0 {
                        self.buffer.delete_forward(rest)?;
                        self.draw(raw.terminal(), prompt)?;
                    }
                }
                Command::KillWholeLine => {
                    if !self.buffer.is_empty() {
                        let len = self.buffer.len();
                        self.buffer.move_to(0)?;
                        self.buffer.delete_forward(len)?;
                        self.draw(raw.terminal(), prompt)?;
                    }
                }
                Command::Left => {
                    if self.buffer.cursor() > 0 {
                        self.buffer.move_to(self.buffer.cursor() - 1)?;
                        self.draw(raw.terminal(), prompt)?;
                    }
                }
                Command::Right => {
                    if self.buffer.cursor() < self.buffer.len() {
                        self.buffer.move_to(self.buffer.cursor() + 1)?;
                        self.draw(raw.terminal(), prompt)?;
                    }
                }
                Command::Home => {
                    self.buffer.move_to(0)?;
                    self.draw(raw.terminal(), prompt)?;
                }
                Command::End => {
                    self.buffer.move_to(self.buffer.len())?;
                    self.draw(raw.terminal(), prompt)?;
                }
                Command::HistoryUp => {
                    let live = self.buffer.contents();
                    if let Some(text) = cursor.up(&self.history, &live) {
                        self.buffer.set_content(&text);
                        self.draw(raw.terminal(), prompt)?;
                    }
                }
                Command::HistoryDown => {
                    if let Some(text) = cursor.down(&self.history) {
                        self.buffer.set_content(&text);
                        self.draw(raw.terminal(), prompt)?;
                    }
                }
                Command::SearchBackward => {
                    trace!("entering reverse search");
                    let active = HistorySearch::new(&self.history);
                    raw.terminal()
                        .draw_search(active.query(), active.matched(&self.history))?;
                    search = Some(active);
                }
                Command::Escape => {}
            }

            raw.terminal().flush()?;
        }
    }

    // One search-mode command. Printable, erase, repeat, accept, and escape
    // are the search keys; anything else cancels the sub-mode and is
    // discarded. The live buffer is only written on accept-with-match.
    fn dispatch_search<T: Terminal>(
        &mut self,
        terminal: &mut T,
        prompt: &str,
        mut active: HistorySearch,
        command: Command,
    ) -> Result<SearchStep> {
        match command {
            Command::Insert(c) => {
                active.push(c, &self.history);
                terminal.draw_search(active.query(), active.matched(&self.history))?;
                Ok(SearchStep::Continue(active))
            }
            Command::Backspace => {
                active.erase(&self.history);
                terminal.draw_search(active.query(), active.matched(&self.history))?;
                Ok(SearchStep::Continue(active))
            }
            Command::SearchBackward => {
                active.next_match(&self.history);
                terminal.draw_search(active.query(), active.matched(&self.history))?;
                Ok(SearchStep::Continue(active))
            }
            Command::Accept => {
                if let Some(entry) = active.matched(&self.history) {
                    let entry = entry.to_string();
                    self.buffer.set_content(&entry);
                }
                trace!("search accepted");
                self.draw(terminal, prompt)?;
                Ok(SearchStep::Exited)
            }
            Command::Interrupt => {
                terminal.write(b"^C\r\n")?;
                terminal.flush()?;
                trace!("interrupted during search, session cancelled");
                Ok(SearchStep::Interrupted)
            }
            // Escape, and any command that has no meaning while searching
            _ => {
                trace!("search cancelled");
                self.draw(terminal, prompt)?;
                Ok(SearchStep::Exited)
            }
        }
    }

    fn draw<T: Terminal>(&self, terminal: &mut T, prompt: &str) -> Result<()> {
        terminal.draw(prompt, &self.buffer.contents(), self.buffer.cursor())
    }
}

enum SearchStep {
    Continue(HistorySearch),
    Exited,
    Interrupted,
}
