mod executor;

use crate::{
    core::{commands::CommandExecutor, commands::Flow, state::ShellState},
    error::ShellError,
    flags::Flags,
    input::{self, LineSource},
    process::signal,
};

use executor::CommandHandler;

pub struct Shell {
    pub(crate) source: Box<dyn LineSource>,
    pub(crate) state: ShellState,
    pub(crate) flags: Flags,
    pub(crate) executor: CommandExecutor,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let state = ShellState::new();
        signal::setup_signal_handlers(state.background_flag())?;
        let source = input::open()?;

        Ok(Shell {
            source,
            state,
            flags,
            executor: CommandExecutor::new(),
        })
    }

    /// Reads and runs commands until `exit` or end of input.
    pub fn run(&mut self) -> Result<(), ShellError> {
        log::debug!("shell started with pid {}", self.state.shell_pid());

        loop {
            let line = match self.source.read_line(self.flags.prompt()) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    log::debug!("end of input");
                    break;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };
            if input::is_ignored(&line) {
                continue;
            }

            match self.execute_command(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => println!("{}", e),
            }
        }
        Ok(())
    }
}
