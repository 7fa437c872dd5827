use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nix::sys::wait::WaitStatus;
use nix::unistd::{getpid, Pid};

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Exited(i32),
    Signaled(i32),
}

impl Status {
    /// Terminal status of a wait result, with the pid it belongs to.
    /// Returns `None` for anything that is not a termination.
    pub fn from_wait(status: WaitStatus) -> Option<(Pid, Status)> {
        match status {
            WaitStatus::Exited(pid, code) => Some((pid, Status::Exited(code))),
            WaitStatus::Signaled(pid, signal, _) => {
                Some((pid, Status::Signaled(signal as i32)))
            }
            _ => None,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Exited(0)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Exited(code) => write!(f, "exit value {}", code),
            Status::Signaled(signal) => write!(f, "terminated by signal {}", signal),
        }
    }
}

/// State shared by the built-ins, the launcher and the reaper.
///
/// Owned by the control loop. `background_allowed` is the only field the
/// SIGTSTP handler touches, hence the atomic.
pub struct ShellState {
    background_allowed: Arc<AtomicBool>,
    pub last_status: Status,
    shell_pid: Pid,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        ShellState {
            background_allowed: Arc::new(AtomicBool::new(true)),
            last_status: Status::default(),
            shell_pid: getpid(),
        }
    }

    pub fn background_allowed(&self) -> bool {
        self.background_allowed.load(Ordering::SeqCst)
    }

    /// Handle to the mode flag for the signal handler.
    pub fn background_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.background_allowed)
    }

    pub fn shell_pid(&self) -> Pid {
        self.shell_pid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::Signal;

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Exited(0).to_string(), "exit value 0");
        assert_eq!(Status::Exited(7).to_string(), "exit value 7");
        assert_eq!(Status::Signaled(15).to_string(), "terminated by signal 15");
    }

    #[test]
    fn test_status_from_wait() {
        let pid = Pid::from_raw(4242);
        assert_eq!(
            Status::from_wait(WaitStatus::Exited(pid, 3)),
            Some((pid, Status::Exited(3)))
        );
        assert_eq!(
            Status::from_wait(WaitStatus::Signaled(pid, Signal::SIGKILL, false)),
            Some((pid, Status::Signaled(9)))
        );
        assert_eq!(Status::from_wait(WaitStatus::StillAlive), None);
    }

    #[test]
    fn test_initial_state() {
        let state = ShellState::new();
        assert!(state.background_allowed());
        assert_eq!(state.last_status, Status::Exited(0));
        assert_eq!(state.shell_pid().as_raw() as u32, std::process::id());
    }

    #[test]
    fn test_flag_is_shared() {
        let state = ShellState::new();
        let flag = state.background_flag();
        flag.store(false, Ordering::SeqCst);
        assert!(!state.background_allowed());
    }
}
