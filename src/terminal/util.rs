//! Terminal utilities

use crate::{Result, SpellError};
use log::debug;
use nix::libc;
use std::os::unix::io::RawFd;

/// Get the terminal size for the given file descriptor
pub fn get_terminal_size(fd: RawFd) -> Result<(u16, u16)> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };

    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 {
        Ok((ws.ws_col, ws.ws_row))
    } else {
        // Default size if ioctl fails
        Ok((80, 24))
    }
}

/// Is the file descriptor an interactive terminal?
pub fn is_tty(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) != 0 }
}

/// Set raw mode on a terminal file descriptor
///
/// Raw mode delivers each keypress as it happens, including alt+key
/// sequences and Ctrl+C, instead of waiting for a full line.
pub fn set_raw_mode(fd: RawFd) -> Result<libc::termios> {
    let original_termios = unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut termios) != 0 {
            return Err(SpellError::Terminal(format!(
                "tcgetattr failed: {}",
                std::io::Error::last_os_error()
            )));
        }
        termios
    };

    let mut raw_termios = original_termios;

    unsafe {
        libc::cfmakeraw(&mut raw_termios);
        libc::tcsetattr(fd, libc::TCSANOW, &raw_termios);
    }

    Ok(original_termios)
}

/// Restore terminal attributes
pub fn restore_termios(fd: RawFd, termios: &libc::termios) {
    unsafe {
        libc::tcsetattr(fd, libc::TCSANOW, termios);
    }
}

/// RAII guard that puts the terminal back on drop
///
/// Restores the saved attributes and shows the cursor again even when
/// the event loop exits with an error.
pub struct TermiosGuard {
    fd: RawFd,
    termios: libc::termios,
}

impl TermiosGuard {
    /// Switch `fd` to raw mode, remembering how to undo it
    pub fn raw(fd: RawFd) -> Result<Self> {
        let termios = set_raw_mode(fd)?;
        Ok(Self { fd, termios })
    }
}

impl Drop for TermiosGuard {
    fn drop(&mut self) {
        restore_termios(self.fd, &self.termios);
        print!("{}", super::render::LEAVE_SCREEN);
        debug!("Terminal attributes restored");
    }
}
