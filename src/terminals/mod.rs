//! Platform-specific terminal implementations.
//!
//! This module provides [`Terminal`](crate::Terminal) implementations:
//!
//! - **Unix/Linux/macOS**: [`StdioTerminal`] using termios and ANSI escape
//!   codes
//! - **Windows**: [`StdioTerminal`] using the Console API with virtual
//!   terminal sequences enabled, so both platforms feed the same decoder
//!
//! Each implementation handles raw mode setup and line repainting; key
//! decoding is shared and lives in [`Decoder`](crate::Decoder).

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::StdioTerminal;

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::StdioTerminal;
