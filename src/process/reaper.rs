use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::core::state::{ShellState, Status};

/// Collects every child that has already terminated, without blocking.
///
/// Each one is reported on stdout and becomes the new `last_status`.
/// Returns how many children were reaped.
pub fn reap_background(state: &mut ShellState) -> usize {
    let mut reaped = 0;
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => break,
            Ok(wait_status) => {
                if let Some((pid, status)) = Status::from_wait(wait_status) {
                    report_done(pid, status, state);
                    reaped += 1;
                }
            }
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => break,
            Err(e) => {
                log::warn!("background sweep stopped: {}", e);
                break;
            }
        }
    }
    reaped
}

pub(crate) fn report_done(pid: Pid, status: Status, state: &mut ShellState) {
    log::debug!("reaped {} ({:?})", pid, status);
    println!("background pid {} is done: {}", pid, status);
    state.last_status = status;
}
