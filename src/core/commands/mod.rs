use thiserror::Error;

mod cd;
mod status;

pub use cd::CdCommand;
pub use status::StatusCommand;

use crate::core::parser::Command;
use crate::core::state::ShellState;
use crate::process::{ProcessError, ProcessExecutor};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cd: {path}: {source}")]
    ChangeDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cd: HOME not set")]
    HomeDirNotFound,
    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl CommandError {
    /// Errors that must end the interpreter rather than just the command.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CommandError::Process(e) if e.is_fatal())
    }
}

/// What a parsed line turns into. Built-ins never reach the launcher.
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch {
    ChangeDirectory(Option<String>),
    ExitShell,
    ReportStatus,
    External(Command),
}

impl Dispatch {
    pub fn classify(command: Command) -> Self {
        match command.program() {
            "cd" => Dispatch::ChangeDirectory(command.args().get(1).cloned()),
            "exit" => Dispatch::ExitShell,
            "status" => Dispatch::ReportStatus,
            _ => Dispatch::External(command),
        }
    }
}

/// Whether the read loop keeps going after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Default)]
pub struct CommandExecutor {
    process_executor: ProcessExecutor,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn execute(
        &self,
        dispatch: Dispatch,
        state: &mut ShellState,
    ) -> Result<Flow, CommandError> {
        match dispatch {
            Dispatch::ChangeDirectory(target) => {
                let dir = CdCommand::new().execute(target.as_deref())?;
                log::debug!("working directory is now {}", dir.display());
            }
            Dispatch::ReportStatus => StatusCommand::new().execute(state),
            Dispatch::ExitShell => {
                // background children are left running and get reparented
                log::debug!("exit requested");
                return Ok(Flow::Exit);
            }
            Dispatch::External(command) => self.process_executor.launch(command, state)?,
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::Limits;
    use crate::core::state::Status;
    use nix::unistd::Pid;

    fn classify(line: &str) -> Dispatch {
        let command = Command::parse(line, Pid::from_raw(1), Limits::default()).unwrap();
        Dispatch::classify(command)
    }

    #[test]
    fn test_builtin_detection() {
        assert_eq!(classify("cd"), Dispatch::ChangeDirectory(None));
        assert_eq!(
            classify("cd /tmp extra"),
            Dispatch::ChangeDirectory(Some("/tmp".to_string()))
        );
        assert_eq!(classify("exit"), Dispatch::ExitShell);
        assert_eq!(classify("exit 3"), Dispatch::ExitShell);
        assert_eq!(classify("status > out.txt &"), Dispatch::ReportStatus);
        assert!(matches!(classify("ls -la"), Dispatch::External(_)));
    }

    #[test]
    fn test_builtin_match_is_exact() {
        for line in ["CD", "cd.", "exit0", "./status", "Status"] {
            assert!(matches!(classify(line), Dispatch::External(_)), "{}", line);
        }
    }

    #[test]
    fn test_external_keeps_command() {
        match classify("sleep 5 &") {
            Dispatch::External(cmd) => {
                assert_eq!(cmd.args(), ["sleep", "5"]);
                assert!(cmd.background());
            }
            other => panic!("unexpected dispatch {:?}", other),
        }
    }

    #[test]
    fn test_exit_and_status_leave_state_alone() {
        let executor = CommandExecutor::new();
        let mut state = ShellState::new();
        state.last_status = Status::Exited(7);

        let flow = executor.execute(Dispatch::ReportStatus, &mut state).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(state.last_status, Status::Exited(7));

        let flow = executor.execute(Dispatch::ExitShell, &mut state).unwrap();
        assert_eq!(flow, Flow::Exit);
        assert_eq!(state.last_status, Status::Exited(7));
    }

    #[test]
    fn test_cd_failure_is_not_fatal() {
        let executor = CommandExecutor::new();
        let mut state = ShellState::new();
        state.last_status = Status::Signaled(2);

        let result = executor.execute(
            Dispatch::ChangeDirectory(Some("/path/that/does/not/exist".to_string())),
            &mut state,
        );
        let err = result.unwrap_err();
        assert!(!err.is_fatal());
        assert!(err.to_string().starts_with("cd: /path/that/does/not/exist: "));
        assert_eq!(state.last_status, Status::Signaled(2));
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::HomeDirNotFound,
            CommandError::ChangeDirectory {
                path: "nowhere".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            },
            CommandError::Process(ProcessError::InvalidArgument("a\0b".to_string())),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
            assert!(!error.is_fatal());
        }
    }
}
