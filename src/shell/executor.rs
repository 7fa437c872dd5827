use crate::core::commands::{Dispatch, Flow};
use crate::core::parser::Command;
use crate::error::ShellError;
use crate::process::reap_background;

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, line: &str) -> Result<Flow, ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, line: &str) -> Result<Flow, ShellError> {
        let command = Command::parse(line, self.state.shell_pid(), self.flags.limits())?;
        log::debug!("parsed {:?}", command);

        let dispatch = Dispatch::classify(command);
        let result = self.executor.execute(dispatch, &mut self.state);

        match result {
            Ok(Flow::Exit) => Ok(Flow::Exit),
            Err(e) if e.is_fatal() => Err(e.into()),
            other => {
                // after built-ins and foreground commands too
                let reaped = reap_background(&mut self.state);
                if reaped > 0 {
                    log::debug!("reaped {} background children", reaped);
                }
                other.map_err(ShellError::from)
            }
        }
    }
}
