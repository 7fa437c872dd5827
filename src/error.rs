use thiserror::Error;

use crate::core::commands::CommandError;
use crate::core::parser::ParseError;
use crate::process::{ProcessError, EXIT_FORK_FAILED};

/// Exit code for failures while setting up or reading input.
pub const EXIT_SETUP_FAILED: i32 = 4;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl ShellError {
    /// Whether this ends the interpreter. Parse and built-in failures only
    /// abandon the current command.
    pub fn is_fatal(&self) -> bool {
        match self {
            ShellError::Parse(_) => false,
            ShellError::Command(e) => e.is_fatal(),
            ShellError::Process(e) => e.is_fatal(),
            ShellError::Readline(_) | ShellError::Io(_) => true,
        }
    }

    /// Code the interpreter exits with when this error ends the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShellError::Process(e) if e.is_fatal() => EXIT_FORK_FAILED,
            ShellError::Command(e) if e.is_fatal() => EXIT_FORK_FAILED,
            _ => EXIT_SETUP_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::errno::Errno;

    #[test]
    fn test_exit_codes() {
        let fork = ShellError::Command(CommandError::Process(ProcessError::Fork(Errno::EAGAIN)));
        assert_eq!(fork.exit_code(), EXIT_FORK_FAILED);

        let fork = ShellError::Process(ProcessError::Fork(Errno::ENOMEM));
        assert_eq!(fork.exit_code(), EXIT_FORK_FAILED);

        let signal = ShellError::Process(ProcessError::Signal("SIGTSTP".to_string()));
        assert_eq!(signal.exit_code(), EXIT_SETUP_FAILED);

        let io = ShellError::Io(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(io.exit_code(), EXIT_SETUP_FAILED);
    }

    #[test]
    fn test_contained_errors() {
        assert!(!ShellError::Parse(ParseError::EmptyCommand).is_fatal());
        assert!(!ShellError::Command(CommandError::HomeDirNotFound).is_fatal());
        let fork = CommandError::Process(ProcessError::Fork(Errno::EAGAIN));
        assert!(ShellError::Command(fork).is_fatal());
    }

    #[test]
    fn test_fork_message() {
        let err = ShellError::Process(ProcessError::Fork(Errno::EAGAIN));
        assert!(err.to_string().starts_with("fork failed"));
    }
}
