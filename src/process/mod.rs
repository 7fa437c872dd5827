use nix::errno::Errno;
use thiserror::Error;

pub mod executor;
pub mod reaper;
pub mod redirect;
pub mod signal;

pub use executor::ProcessExecutor;
pub use reaper::reap_background;
pub use redirect::{RedirectError, Redirection};

/// Exit code of a child whose `<` or `>` target could not be opened.
pub const EXIT_REDIRECT_FAILED: i32 = 1;
/// Exit code of a child whose program image could not be loaded.
pub const EXIT_EXEC_FAILED: i32 = 2;
/// Exit code of the shell itself when it cannot create a child.
pub const EXIT_FORK_FAILED: i32 = 3;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("fork failed: {0}")]
    Fork(#[source] Errno),
    #[error("waitpid failed: {0}")]
    Wait(#[source] Errno),
    #[error("argument contains a NUL byte: {0:?}")]
    InvalidArgument(String),
    #[error("signal setup failed: {0}")]
    Signal(String),
}

impl ProcessError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::Fork(_))
    }
}
