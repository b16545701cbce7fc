//! Ctrl-C handling: report the interruption and exit with 130.
//!
//! While a password prompt has echo turned off, the terminal settings to
//! restore are parked here so the handler can put them back before exiting.

use anyhow::{Result, bail};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

const MESSAGE: &[u8] = b"\nScript stopped by user.\n";
pub const EXIT_CODE: i32 = 130;

static SAVED_TERMINAL: OnceLock<libc::termios> = OnceLock::new();
static TERMINAL_ALTERED: AtomicBool = AtomicBool::new(false);

/// Record the settings to restore if the process is interrupted.
pub(crate) fn remember_terminal(original: libc::termios) {
    let _ = SAVED_TERMINAL.set(original);
    TERMINAL_ALTERED.store(true, Ordering::SeqCst);
}

/// The terminal is back to its saved settings.
pub(crate) fn forget_terminal() {
    TERMINAL_ALTERED.store(false, Ordering::SeqCst);
}

fn altered_terminal() -> Option<&'static libc::termios> {
    if TERMINAL_ALTERED.load(Ordering::SeqCst) {
        SAVED_TERMINAL.get()
    } else {
        None
    }
}

extern "C" fn on_interrupt(_signal: libc::c_int) {
    // Only async-signal-safe calls here.
    unsafe {
        if let Some(original) = altered_terminal() {
            libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, original);
        }
        libc::write(
            libc::STDERR_FILENO,
            MESSAGE.as_ptr().cast::<libc::c_void>(),
            MESSAGE.len(),
        );
        libc::_exit(EXIT_CODE);
    }
}

pub fn install() -> Result<()> {
    let handler = on_interrupt as extern "C" fn(libc::c_int);
    // SAFETY: the handler only performs async-signal-safe calls.
    let previous = unsafe { libc::signal(libc::SIGINT, handler as libc::sighandler_t) };
    if previous == libc::SIG_ERR {
        bail!("failed to install SIGINT handler");
    }
    Ok(())
}
