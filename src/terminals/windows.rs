//! Windows terminal implementation using the Console API.
//!
//! Raw mode disables line input and echo and turns on virtual terminal
//! input and processing, so arrow keys arrive as VT byte sequences and the
//! ANSI repaints work unchanged. One decoder serves both platforms.

use std::io::{self, Write};

use winapi::um::consoleapi::{GetConsoleMode, SetConsoleMode};
use winapi::um::fileapi::ReadFile;
use winapi::um::processenv::GetStdHandle;
use winapi::um::winbase::{STD_INPUT_HANDLE, STD_OUTPUT_HANDLE};
use winapi::um::wincon::{
    ENABLE_ECHO_INPUT, ENABLE_LINE_INPUT, ENABLE_PROCESSED_INPUT, ENABLE_VIRTUAL_TERMINAL_INPUT,
    ENABLE_VIRTUAL_TERMINAL_PROCESSING,
};
use winapi::um::winnt::HANDLE;

use crate::{Error, Result, Terminal};

/// Windows terminal using stdin/stdout with the Console API.
pub struct StdioTerminal {
    stdin_handle: HANDLE,
    stdout_handle: HANDLE,
    saved_input_mode: Option<u32>,
    saved_output_mode: Option<u32>,
}

impl StdioTerminal {
    /// Creates a terminal over the process's standard console handles.
    ///
    /// Handle validity is checked on first use; a process without a console
    /// fails at `read_byte`/`enter_raw_mode` rather than here.
    pub fn new() -> Self {
        unsafe {
            Self {
                stdin_handle: GetStdHandle(STD_INPUT_HANDLE),
                stdout_handle: GetStdHandle(STD_OUTPUT_HANDLE),
                saved_input_mode: None,
                saved_output_mode: None,
            }
        }
    }
}

impl Default for StdioTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for StdioTerminal {
    fn read_byte(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        let mut bytes_read: u32 = 0;

        unsafe {
            if ReadFile(
                self.stdin_handle,
                buf.as_mut_ptr() as *mut _,
                1,
                &mut bytes_read,
                std::ptr::null_mut(),
            ) == 0
            {
                return Err(io::Error::last_os_error().into());
            }
        }

        if bytes_read == 0 {
            return Err(Error::InputEnded);
        }

        Ok(buf[0])
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        io::stdout().write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        unsafe {
            let mut input_mode: u32 = 0;
            if GetConsoleMode(self.stdin_handle, &mut input_mode) == 0 {
                return Err(io::Error::last_os_error().into());
            }
            self.saved_input_mode = Some(input_mode);

            let raw = input_mode
                & !(ENABLE_LINE_INPUT | ENABLE_ECHO_INPUT | ENABLE_PROCESSED_INPUT)
                | ENABLE_VIRTUAL_TERMINAL_INPUT;
            if SetConsoleMode(self.stdin_handle, raw) == 0 {
                return Err(io::Error::last_os_error().into());
            }

            let mut output_mode: u32 = 0;
            if GetConsoleMode(self.stdout_handle, &mut output_mode) == 0 {
                return Err(io::Error::last_os_error().into());
            }
            self.saved_output_mode = Some(output_mode);

            if SetConsoleMode(
                self.stdout_handle,
                output_mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING,
            ) == 0
            {
                return Err(io::Error::last_os_error().into());
            }
        }

        Ok(())
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        unsafe {
            if let Some(saved) = self.saved_input_mode.take() {
                if SetConsoleMode(self.stdin_handle, saved) == 0 {
                    return Err(io::Error::last_os_error().into());
                }
            }
            if let Some(saved) = self.saved_output_mode.take() {
                if SetConsoleMode(self.stdout_handle, saved) == 0 {
                    return Err(io::Error::last_os_error().into());
                }
            }
        }

        Ok(())
    }

    fn draw(&mut self, prompt: &str, line: &str, cursor: usize) -> Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "\r\x1b[K{prompt}{line}")?;

        let back = line.chars().count().saturating_sub(cursor);
        if back > 0 {
            write!(stdout, "\x1b[{back}D")?;
        }

        Ok(())
    }

    fn draw_search(&mut self, query: &str, matched: Option<&str>) -> Result<()> {
        let shown = matched.unwrap_or("");
        write!(io::stdout(), "\r\x1b[K(reverse-i-search)`{query}': {shown}")?;
        Ok(())
    }
}

impl Drop for StdioTerminal {
    fn drop(&mut self) {
        // Last-resort restore; exit_raw_mode is idempotent
        let _ = self.exit_raw_mode();
    }
}
