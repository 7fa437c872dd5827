use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nix::sys::signal::{signal, SigHandler, Signal};
use signal_hook::consts::SIGTSTP;

use crate::process::ProcessError;

const ENTER_FOREGROUND_ONLY: &[u8] = b"Entering foreground-only mode (& is now ignored)\n";
const EXIT_FOREGROUND_ONLY: &[u8] = b"Exiting foreground-only mode\n";

/// The shell ignores SIGINT and turns SIGTSTP into the foreground-only toggle.
pub fn setup_signal_handlers(background_allowed: Arc<AtomicBool>) -> Result<(), ProcessError> {
    unsafe { signal(Signal::SIGINT, SigHandler::SigIgn) }
        .map_err(|e| ProcessError::Signal(format!("SIGINT: {}", e)))?;

    // The closure runs in signal context: one atomic op and one write(2).
    unsafe {
        signal_hook::low_level::register(SIGTSTP, move || {
            toggle_foreground_only(&background_allowed)
        })
    }
    .map_err(|e| ProcessError::Signal(format!("SIGTSTP: {}", e)))?;

    log::debug!("signal handlers installed");
    Ok(())
}

/// Dispositions for a forked child, set before exec. SIGPIPE is ignored by
/// the Rust runtime and that would otherwise leak into every program.
pub fn reset_for_child() {
    unsafe {
        let _ = signal(Signal::SIGINT, SigHandler::SigDfl);
        let _ = signal(Signal::SIGPIPE, SigHandler::SigDfl);
        let _ = signal(Signal::SIGTSTP, SigHandler::SigIgn);
    }
}

fn toggle_foreground_only(background_allowed: &AtomicBool) {
    let notice = flip_mode(background_allowed);
    // A short write is dropped; nothing else is safe to do here.
    unsafe {
        libc::write(libc::STDOUT_FILENO, notice.as_ptr().cast(), notice.len());
    }
}

/// Flips the mode flag and returns the line announcing the new mode.
fn flip_mode(background_allowed: &AtomicBool) -> &'static [u8] {
    let was_allowed = background_allowed.fetch_xor(true, Ordering::SeqCst);
    notice_for(was_allowed)
}

fn notice_for(was_allowed: bool) -> &'static [u8] {
    if was_allowed {
        ENTER_FOREGROUND_ONLY
    } else {
        EXIT_FOREGROUND_ONLY
    }
}
