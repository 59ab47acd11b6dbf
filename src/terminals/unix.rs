// Unix terminal implementation using termios and ANSI escape codes

use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;

use crate::{Result, Terminal};

/// Unix terminal using stdin/stdout with termios.
pub struct StdioTerminal {
    stdin: io::Stdin,
    stdout: io::Stdout,
    saved_termios: Option<libc::termios>,
}

impl StdioTerminal {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            saved_termios: None,
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
        self.stdin.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.stdout.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        let fd = self.stdin.as_raw_fd();

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();

            if libc::tcgetattr(fd, &mut termios) != 0 {
                return Err(io::Error::last_os_error().into());
            }

            // Save original settings
            self.saved_termios = Some(termios);

            // No echo, no canonical buffering, no signal generation:
            // interrupt must arrive as byte 3 for the decoder
            termios.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
            termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);

            // Block for one byte at a time
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &termios) != 0 {
                return Err(io::Error::last_os_error().into());
            }
        }

        Ok(())
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        if let Some(saved) = self.saved_termios.take() {
            let fd = self.stdin.as_raw_fd();

            unsafe {
                if libc::tcsetattr(fd, libc::TCSAFLUSH, &saved) != 0 {
                    return Err(io::Error::last_os_error().into());
                }
            }
        }

        Ok(())
    }

    fn draw(&mut self, prompt: &str, line: &str, cursor: usize) -> Result<()> {
        // Repaint in place: return, clear, prompt and content, then park
        // the cursor
        write!(self.stdout, "\r\x1b[K{prompt}{line}")?;

        let back = line.chars().count().saturating_sub(cursor);
        if back > 0 {
            write!(self.stdout, "\x1b[{back}D")?;
        }

        Ok(())
    }

    fn draw_search(&mut self, query: &str, matched: Option<&str>) -> Result<()> {
        let shown = matched.unwrap_or("");
        write!(self.stdout, "\r\x1b[K(reverse-i-search)`{query}': {shown}")?;
        Ok(())
    }
}

impl Drop for StdioTerminal {
    fn drop(&mut self) {
        // Last-resort restore; exit_raw_mode is idempotent
        let _ = self.exit_raw_mode();
    }
}
