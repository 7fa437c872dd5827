use std::ffi::CString;
use std::io::{self, Write};
use std::path::Path;

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag};
use nix::unistd::{execvp, fork, ForkResult, Pid};

use super::reaper::report_done;
use super::redirect::Redirection;
use super::{signal, ProcessError, EXIT_EXEC_FAILED, EXIT_REDIRECT_FAILED};
use crate::core::parser::Command;
use crate::core::state::{ShellState, Status};

/// Everything the child needs, built before fork so the child only
/// touches signal dispositions, file descriptors and exec.
struct ExecPlan {
    name: String,
    argv: Vec<CString>,
    redirection: Redirection,
}

impl ExecPlan {
    fn new(command: &Command) -> Result<Self, ProcessError> {
        let argv = command
            .args()
            .iter()
            .map(|arg| {
                CString::new(arg.as_bytes())
                    .map_err(|_| ProcessError::InvalidArgument(arg.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ExecPlan {
            name: command.program().to_string(),
            argv,
            redirection: Redirection::new(
                command.input().map(Path::to_path_buf),
                command.output().map(Path::to_path_buf),
            ),
        })
    }
}

#[derive(Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    /// Forks and execs `command`, then waits for it or leaves it running
    /// in the background depending on its `&` marker and the current mode.
    pub fn launch(&self, command: Command, state: &mut ShellState) -> Result<(), ProcessError> {
        let background = command.background() && state.background_allowed();
        if command.background() && !background {
            log::debug!(
                "foreground-only mode: running {} in the foreground",
                command.program()
            );
        }
        let plan = ExecPlan::new(&command)?;

        // The child inherits any buffered output; flush so it is not written twice.
        let _ = io::stdout().flush();

        match unsafe { fork() } {
            Err(errno) => Err(ProcessError::Fork(errno)),
            Ok(ForkResult::Child) => run_child(&plan),
            Ok(ForkResult::Parent { child }) => {
                log::debug!("forked {} for {} (background: {})", child, plan.name, background);
                if background {
                    register_background(child, state);
                    Ok(())
                } else {
                    wait_foreground(child, state)
                }
            }
        }
    }
}

fn run_child(plan: &ExecPlan) -> ! {
    signal::reset_for_child();

    if !plan.redirection.is_empty() {
        if let Err(e) = plan.redirection.apply() {
            println!("{}", e);
            exit_child(EXIT_REDIRECT_FAILED);
        }
    }

    let errno = match execvp(&plan.argv[0], &plan.argv) {
        Ok(never) => match never {},
        Err(errno) => errno,
    };
    println!("{}: {}", plan.name, errno.desc());
    exit_child(EXIT_EXEC_FAILED)
}

/// Leaves a forked child without running the parent's exit handlers.
fn exit_child(code: i32) -> ! {
    let _ = io::stdout().flush();
    unsafe { libc::_exit(code) }
}

fn register_background(child: Pid, state: &mut ShellState) {
    println!("background pid is {}", child);

    // A child that is already gone gets reported right here instead of
    // waiting for the sweep.
    match waitpid(child, Some(WaitPidFlag::WNOHANG)) {
        Ok(wait_status) => {
            if let Some((pid, status)) = Status::from_wait(wait_status) {
                report_done(pid, status, state);
            }
        }
        Err(e) => log::debug!("initial poll of {} failed: {}", child, e),
    }
}

fn wait_foreground(child: Pid, state: &mut ShellState) -> Result<(), ProcessError> {
    loop {
        match waitpid(child, None) {
            Ok(wait_status) => {
                if let Some((_, status)) = Status::from_wait(wait_status) {
                    if let Status::Signaled(_) = status {
                        println!("{}", status);
                    }
                    log::debug!("foreground {} finished: {:?}", child, status);
                    state.last_status = status;
                    return Ok(());
                }
            }
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ProcessError::Wait(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::Limits;
    use std::path::PathBuf;

    fn command(line: &str) -> Command {
        Command::parse(line, Pid::from_raw(1), Limits::default()).unwrap()
    }

    #[test]
    fn test_plan_without_redirection() {
        let plan = ExecPlan::new(&command("true")).unwrap();
        assert!(plan.redirection.is_empty());
    }

    #[test]
    fn test_plan_keeps_argv_and_redirection() {
        let plan = ExecPlan::new(&command("wc -l < in.txt > out.txt")).unwrap();
        assert_eq!(plan.name, "wc");
        assert_eq!(plan.argv, [CString::new("wc").unwrap(), CString::new("-l").unwrap()]);
        assert_eq!(plan.redirection.input, Some(PathBuf::from("in.txt")));
        assert_eq!(plan.redirection.output, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_plan_rejects_nul_bytes() {
        let result = ExecPlan::new(&command("echo a\0b"));
        assert!(matches!(result, Err(ProcessError::InvalidArgument(_))));
    }
}
